use std::ops::Index;

use crate::automaton::GIndex;

pub trait IndexMapData: Clone + PartialEq {
    fn empty() -> Self;
}

impl<T: Clone + PartialEq> IndexMapData for Option<T> {
    fn empty() -> Self {
        None
    }
}

impl<T: Clone + PartialEq> IndexMapData for Vec<T> {
    fn empty() -> Self {
        Vec::new()
    }
}

impl IndexMapData for usize {
    fn empty() -> Self {
        0
    }
}

/// Map from a compact index space to values, backed by a [Vec].
/// A key counts as present when its value differs from [IndexMapData::empty].
#[derive(Debug, Clone, PartialEq)]
pub struct IndexMap<K: GIndex, V: IndexMapData> {
    data: Vec<V>,
    _marker: std::marker::PhantomData<K>,
}

impl<K: GIndex, V: IndexMapData> IndexMap<K, V> {
    pub fn new(max_index: usize) -> Self {
        IndexMap {
            data: vec![V::empty(); max_index],
            _marker: std::marker::PhantomData,
        }
    }

    pub fn has_key(&self, key: K) -> bool {
        let index = key.index();

        index < self.data.len() && self.data[index] != V::empty()
    }

    pub fn get(&self, key: K) -> &V {
        &self.data[key.index()]
    }

    pub fn get_mut(&mut self, key: K) -> &mut V {
        &mut self.data[key.index()]
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.data[key.index()] = value;
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterates the present entries in index order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> {
        self.data
            .iter()
            .enumerate()
            .filter(|(_, value)| **value != V::empty())
            .map(|(index, value)| (K::new(index), value))
    }
}

impl<K: GIndex, V: IndexMapData> Index<K> for IndexMap<K, V> {
    type Output = V;

    fn index(&self, key: K) -> &V {
        self.get(key)
    }
}

/// Set over a compact index space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSet<K: GIndex> {
    data: Vec<bool>,
    count: usize,
    _marker: std::marker::PhantomData<K>,
}

impl<K: GIndex> IndexSet<K> {
    pub fn new(max_index: usize) -> Self {
        IndexSet {
            data: vec![false; max_index],
            count: 0,
            _marker: std::marker::PhantomData,
        }
    }

    /// Returns whether the key was newly inserted.
    pub fn insert(&mut self, key: K) -> bool {
        let index = key.index();
        if index >= self.data.len() {
            self.data.resize(index + 1, false);
        }

        if self.data[index] {
            return false;
        }

        self.data[index] = true;
        self.count += 1;
        true
    }

    pub fn contains(&self, key: K) -> bool {
        self.data.get(key.index()).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = K> {
        self.data
            .iter()
            .enumerate()
            .filter(|(_, present)| **present)
            .map(|(index, _)| K::new(index))
    }
}
