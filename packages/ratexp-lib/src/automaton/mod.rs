use std::{fmt::Debug, hash::Hash};

use petgraph::graph::NodeIndex;

use crate::automaton::index_map::IndexSet;

pub mod algorithms;
pub mod dfa;
pub mod index_map;
pub mod nfa;
pub mod path;

/// This trait represents types that can be used as node data in an automaton.
pub trait AutomatonNode: Debug + Clone + PartialEq + Eq + Hash {}
impl<T> AutomatonNode for T where T: Debug + Clone + PartialEq + Eq + Hash {}

/// This trait represents the letters read along the transitions of an
/// automaton. Letters are ordered so alphabets can be kept sorted.
pub trait Letter: Debug + Clone + PartialEq + Eq + Hash + Ord {}
impl<T> Letter for T where T: Debug + Clone + PartialEq + Eq + Hash + Ord {}

/// This trait represents node indices in an automaton.
/// The index space must be compact, so implementers of this trait are
/// just some wrapper type around some integer type.
pub trait GIndex: Debug + Copy + Clone + PartialEq + Eq + Hash + Ord {
    /// Create a new index from a [usize].
    fn new(index: usize) -> Self;
    /// Turn this index into a [usize] to e.g. index into a [Vec].
    fn index(self) -> usize;
}

impl GIndex for NodeIndex {
    fn new(index: usize) -> Self {
        NodeIndex::new(index)
    }

    fn index(self) -> usize {
        NodeIndex::index(self)
    }
}

impl GIndex for usize {
    fn new(index: usize) -> Self {
        index
    }

    fn index(self) -> usize {
        self
    }
}

/// Iterator over a compact interval of indices.
pub struct GIndexIterator<G: GIndex> {
    current: usize,
    end: usize,
    __marker: std::marker::PhantomData<G>,
}

impl<G: GIndex> GIndexIterator<G> {
    pub fn new(start: usize, end: usize) -> Self {
        GIndexIterator {
            current: start,
            end,
            __marker: std::marker::PhantomData,
        }
    }
}

impl<G: GIndex> Iterator for GIndexIterator<G> {
    type Item = G;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current < self.end {
            let index = G::new(self.current);
            self.current += 1;
            Some(index)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.current;
        (remaining, Some(remaining))
    }
}

impl<G: GIndex> ExactSizeIterator for GIndexIterator<G> {}

pub trait Alphabet {
    type Letter: Letter;

    /// The sorted, duplicate free alphabet.
    fn alphabet(&self) -> &[Self::Letter];
}

pub trait Automaton: Alphabet {
    type NIndex: GIndex;

    fn node_count(&self) -> usize;

    fn iter_node_indices(&self) -> GIndexIterator<Self::NIndex> {
        GIndexIterator::new(0, self.node_count())
    }
}

/// An automaton whose labelled transitions can be enumerated per state.
pub trait TransitionSystem: Automaton {
    fn transitions_from(
        &self,
        node: Self::NIndex,
    ) -> impl Iterator<Item = (&Self::Letter, Self::NIndex)>;

    fn successors(&self, node: Self::NIndex) -> impl Iterator<Item = Self::NIndex> {
        self.transitions_from(node).map(|(_, target)| target)
    }

    /// All states reachable from `node`, `node` itself included.
    fn reachable_from(&self, node: Self::NIndex) -> IndexSet<Self::NIndex> {
        let mut visited = IndexSet::new(self.node_count());
        let mut stack = vec![node];
        visited.insert(node);

        while let Some(current) = stack.pop() {
            for successor in self.successors(current) {
                if visited.insert(successor) {
                    stack.push(successor);
                }
            }
        }

        visited
    }
}

pub trait InitializedAutomaton: TransitionSystem {
    fn initial_states(&self) -> Vec<Self::NIndex>;
    fn is_accepting(&self, node: Self::NIndex) -> bool;
}

pub trait Language: Alphabet {
    fn accepts<'a>(&self, input: impl IntoIterator<Item = &'a Self::Letter>) -> bool
    where
        Self::Letter: 'a;
}
