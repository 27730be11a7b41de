//! Positional analysis of an expression tree: leaf numbering, nullability and
//! the First, Last and Follow sets used by the Glushkov construction.
//!
//! Epsilon leaves are numbered like letters but stand for no symbol
//! occurrence, so they never appear in First, Last or Follow sets.

use crate::{
    automaton::index_map::IndexMap,
    expression::{Expression, NodeId, NodeKind, Position, PositionSet},
};

impl Expression {
    /// Numbers the leaves `1..=N` from left to right and stores on every node
    /// the range of positions below it. Returns `N`.
    pub fn number(&mut self) -> Position {
        let order = self.preorder();

        let mut next = 1;
        for &node in &order {
            if self.kind(node).is_leaf() {
                let entry = &mut self.nodes[node.index()];
                entry.position_min = next;
                entry.position_max = next;
                next += 1;
            }
        }

        for &node in order.iter().rev() {
            let (min, max) = match self.kind(node) {
                NodeKind::Epsilon | NodeKind::Letter(_) => continue,
                NodeKind::Star(child) => (child, child),
                NodeKind::Union(left, right) | NodeKind::Concat(left, right) => (left, right),
            };

            let range = (
                self.nodes[min.index()].position_min,
                self.nodes[max.index()].position_max,
            );
            let entry = &mut self.nodes[node.index()];
            (entry.position_min, entry.position_max) = range;
        }

        self.numbered = true;
        next - 1
    }

    pub fn is_numbered(&self) -> bool {
        self.numbered
    }

    pub fn position_min(&self, node: NodeId) -> Position {
        assert!(self.numbered, "Expression has not been numbered");
        self.nodes[node.index()].position_min
    }

    pub fn position_max(&self, node: NodeId) -> Position {
        assert!(self.numbered, "Expression has not been numbered");
        self.nodes[node.index()].position_max
    }

    /// Number of leaves, i.e. the largest position after numbering.
    pub fn position_count(&self) -> Position {
        self.position_max(self.root)
    }

    pub fn contains_empty_word(&self, node: NodeId) -> bool {
        self.nodes[node.index()].nullable
    }

    /// Positions that can start a word of the subtree.
    pub fn first(&self, node: NodeId) -> PositionSet {
        let mut first = PositionSet::new();
        self.collect_first(node, &mut first);
        first
    }

    fn collect_first(&self, node: NodeId, into: &mut PositionSet) {
        let mut stack = vec![node];

        while let Some(node) = stack.pop() {
            match self.kind(node) {
                NodeKind::Epsilon => {}
                NodeKind::Letter(_) => {
                    into.insert(self.position_min(node));
                }
                NodeKind::Star(child) => stack.push(child),
                NodeKind::Union(left, right) => stack.extend([left, right]),
                NodeKind::Concat(left, right) => {
                    stack.push(left);
                    if self.contains_empty_word(left) {
                        stack.push(right);
                    }
                }
            }
        }
    }

    /// Positions that can end a word of the subtree.
    pub fn last(&self, node: NodeId) -> PositionSet {
        let mut last = PositionSet::new();
        self.collect_last(node, &mut last);
        last
    }

    fn collect_last(&self, node: NodeId, into: &mut PositionSet) {
        let mut stack = vec![node];

        while let Some(node) = stack.pop() {
            match self.kind(node) {
                NodeKind::Epsilon => {}
                NodeKind::Letter(_) => {
                    into.insert(self.position_min(node));
                }
                NodeKind::Star(child) => stack.push(child),
                NodeKind::Union(left, right) => stack.extend([left, right]),
                NodeKind::Concat(left, right) => {
                    stack.push(right);
                    if self.contains_empty_word(right) {
                        stack.push(left);
                    }
                }
            }
        }
    }

    /// The leaf numbered `position`, found by descending along the stored
    /// position ranges.
    pub fn leaf_at(&self, position: Position) -> NodeId {
        assert!(
            (1..=self.position_count()).contains(&position),
            "Position {} is outside of 1..={}",
            position,
            self.position_count()
        );

        let mut node = self.root;
        loop {
            node = match self.kind(node) {
                NodeKind::Epsilon | NodeKind::Letter(_) => return node,
                NodeKind::Star(child) => child,
                NodeKind::Union(left, right) | NodeKind::Concat(left, right) => {
                    if position <= self.position_max(left) {
                        left
                    } else {
                        right
                    }
                }
            };
        }
    }

    /// Positions that can directly follow `position` in a word of the whole
    /// expression.
    ///
    /// Walks from the leaf to the root. A star contributes the First set of
    /// its operand, a concatenation entered from its left operand contributes
    /// the First set of its right operand and stops the walk unless that
    /// operand is nullable.
    pub fn follow(&self, position: Position) -> PositionSet {
        let leaf = self.leaf_at(position);
        let mut follow = PositionSet::new();

        if self.kind(leaf) == NodeKind::Epsilon {
            return follow;
        }

        let mut from = leaf;
        while let Some(parent) = self.parent(from) {
            match self.kind(parent) {
                NodeKind::Star(child) => self.collect_first(child, &mut follow),
                NodeKind::Concat(left, right) if left == from => {
                    self.collect_first(right, &mut follow);
                    if !self.contains_empty_word(right) {
                        break;
                    }
                }
                _ => {}
            }
            from = parent;
        }

        follow
    }

    /// The letter at each position, `None` for epsilon leaves. Index 0 is
    /// unused.
    pub fn letters_by_position(&self) -> IndexMap<Position, Option<char>> {
        let mut letters = IndexMap::new(self.position_count() + 1);

        for leaf in self.leaves() {
            if let NodeKind::Letter(letter) = self.kind(leaf) {
                letters.insert(self.position_min(leaf), Some(letter));
            }
        }

        letters
    }
}
