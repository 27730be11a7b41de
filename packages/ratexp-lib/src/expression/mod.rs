//! Rational expressions over single-character letters.
//!
//! An [`Expression`] owns its syntax tree as an arena of nodes. Nodes refer to
//! their children and to their parent by [`NodeId`], and the ids of one tree
//! stay stable until the tree is combined with another one through the smart
//! constructors. The empty language has no tree: it is `None` wherever an
//! `Option<Expression>` is expected.

use std::{collections::BTreeSet, fmt::Debug};

pub mod display;
pub mod matching;
pub mod parser;
pub mod positions;

/// Index of a leaf in the left-to-right numbering, starting at 1.
pub type Position = usize;
pub type PositionSet = BTreeSet<Position>;

/// Handle of a node inside one [`Expression`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }

    fn shifted(self, offset: usize) -> Self {
        NodeId(self.0 + offset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Epsilon,
    Letter(char),
    Union(NodeId, NodeId),
    Concat(NodeId, NodeId),
    Star(NodeId),
}

impl NodeKind {
    pub fn is_leaf(&self) -> bool {
        matches!(self, NodeKind::Epsilon | NodeKind::Letter(_))
    }

    /// Children from left to right.
    pub fn children(self) -> impl Iterator<Item = NodeId> {
        let (left, right) = match self {
            NodeKind::Epsilon | NodeKind::Letter(_) => (None, None),
            NodeKind::Union(left, right) | NodeKind::Concat(left, right) => {
                (Some(left), Some(right))
            }
            NodeKind::Star(child) => (Some(child), None),
        };
        left.into_iter().chain(right)
    }

    fn shifted(self, offset: usize) -> Self {
        match self {
            NodeKind::Union(left, right) => {
                NodeKind::Union(left.shifted(offset), right.shifted(offset))
            }
            NodeKind::Concat(left, right) => {
                NodeKind::Concat(left.shifted(offset), right.shifted(offset))
            }
            NodeKind::Star(child) => NodeKind::Star(child.shifted(offset)),
            leaf => leaf,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    /// The subtree contains the empty word.
    nullable: bool,
    position_min: Position,
    position_max: Position,
}

impl Node {
    fn new(kind: NodeKind, nullable: bool) -> Self {
        Node {
            kind,
            parent: None,
            nullable,
            position_min: 0,
            position_max: 0,
        }
    }

    fn shifted(self, offset: usize) -> Self {
        Node {
            kind: self.kind.shifted(offset),
            parent: self.parent.map(|parent| parent.shifted(offset)),
            ..self
        }
    }
}

/// A rational expression tree. Cloning copies the whole tree, positions
/// included.
///
/// Every node is stored after its children, so walking the arena by
/// increasing id visits a subtree bottom-up. Trees can be as deep as they are
/// long (`a.b.c...` nests to the left), which is why the traversals here keep
/// explicit stacks instead of recursing.
#[derive(Clone)]
pub struct Expression {
    nodes: Vec<Node>,
    root: NodeId,
    numbered: bool,
}

impl Expression {
    fn leaf(kind: NodeKind) -> Self {
        Expression {
            nodes: vec![Node::new(kind, kind == NodeKind::Epsilon)],
            root: NodeId(0),
            numbered: false,
        }
    }

    pub fn epsilon() -> Self {
        Expression::leaf(NodeKind::Epsilon)
    }

    pub fn letter(letter: char) -> Self {
        Expression::leaf(NodeKind::Letter(letter))
    }

    pub fn union(mut left: Expression, right: Expression) -> Expression {
        let left_root = left.root;
        let right_root = left.graft(right);
        left.attach(NodeKind::Union(left_root, right_root))
    }

    /// Concatenation. `ε` is a neutral element on both sides, in which case
    /// the other operand is returned unchanged.
    pub fn concat(mut left: Expression, right: Expression) -> Expression {
        if left.is_epsilon() {
            return right;
        }
        if right.is_epsilon() {
            return left;
        }

        let left_root = left.root;
        let right_root = left.graft(right);
        left.attach(NodeKind::Concat(left_root, right_root))
    }

    pub fn star(inner: Expression) -> Expression {
        let child = inner.root;
        inner.attach(NodeKind::Star(child))
    }

    /// Moves the nodes of `other` into this arena, returning the new id of
    /// its root. The grafted subtree has no parent yet.
    fn graft(&mut self, other: Expression) -> NodeId {
        let offset = self.nodes.len();
        let other_root = other.root.shifted(offset);
        self.nodes
            .extend(other.nodes.into_iter().map(|node| node.shifted(offset)));
        other_root
    }

    /// Pushes a new root of `kind` above its children.
    fn attach(mut self, kind: NodeKind) -> Expression {
        let nullable = match kind {
            NodeKind::Epsilon | NodeKind::Star(_) => true,
            NodeKind::Letter(_) => false,
            NodeKind::Union(left, right) => {
                self.nodes[left.0].nullable || self.nodes[right.0].nullable
            }
            NodeKind::Concat(left, right) => {
                self.nodes[left.0].nullable && self.nodes[right.0].nullable
            }
        };

        let id = NodeId(self.nodes.len());
        for child in kind.children() {
            self.nodes[child.0].parent = Some(id);
        }

        self.nodes.push(Node::new(kind, nullable));
        self.root = id;
        self.numbered = false;
        self
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn kind(&self, node: NodeId) -> NodeKind {
        self.nodes[node.0].kind
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn is_root(&self, node: NodeId) -> bool {
        node == self.root
    }

    pub fn is_epsilon(&self) -> bool {
        self.kind(self.root) == NodeKind::Epsilon
    }

    /// The letter of a letter leaf. Panics for any other node.
    pub fn letter_of(&self, node: NodeId) -> char {
        match self.kind(node) {
            NodeKind::Letter(letter) => letter,
            other => panic!("{:?} is not a letter leaf but {:?}", node, other),
        }
    }

    /// Left operand of a union or concatenation.
    pub fn left(&self, node: NodeId) -> NodeId {
        match self.kind(node) {
            NodeKind::Union(left, _) | NodeKind::Concat(left, _) => left,
            other => panic!("{:?} has no left child, it is {:?}", node, other),
        }
    }

    /// Right operand of a union or concatenation.
    pub fn right(&self, node: NodeId) -> NodeId {
        match self.kind(node) {
            NodeKind::Union(_, right) | NodeKind::Concat(_, right) => right,
            other => panic!("{:?} has no right child, it is {:?}", node, other),
        }
    }

    /// Operand of a star.
    pub fn child(&self, node: NodeId) -> NodeId {
        match self.kind(node) {
            NodeKind::Star(child) => child,
            other => panic!("{:?} has no single child, it is {:?}", node, other),
        }
    }

    /// All nodes of the tree in pre-order, so leaves appear left to right.
    pub fn preorder(&self) -> Vec<NodeId> {
        self.preorder_from(self.root)
    }

    /// The subtree below `node` in pre-order. Reversed, every child comes
    /// before its parent.
    pub fn preorder_from(&self, node: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![node];

        while let Some(node) = stack.pop() {
            order.push(node);
            let children = self.kind(node).children().collect::<Vec<_>>();
            stack.extend(children.into_iter().rev());
        }

        order
    }

    pub fn leaves(&self) -> Vec<NodeId> {
        self.preorder()
            .into_iter()
            .filter(|&node| self.kind(node).is_leaf())
            .collect()
    }

    /// The sorted, duplicate free set of letters occurring in the tree.
    pub fn letters(&self) -> Vec<char> {
        let letters = self
            .nodes
            .iter()
            .filter_map(|node| match node.kind {
                NodeKind::Letter(letter) => Some(letter),
                _ => None,
            })
            .collect::<BTreeSet<_>>();

        letters.into_iter().collect()
    }

    /// Deep copy of the subtree below `node` as a standalone expression. The
    /// position fields are copied as they are.
    pub fn copy_subtree(&self, node: NodeId) -> Expression {
        let mut copy_of = vec![None; self.nodes.len()];
        let mut nodes = Vec::new();

        for original in self.preorder_from(node).into_iter().rev() {
            let copied = |id: NodeId| copy_of[id.0].unwrap_or_else(|| unreachable!("child copied first"));
            let kind = match self.kind(original) {
                NodeKind::Union(left, right) => NodeKind::Union(copied(left), copied(right)),
                NodeKind::Concat(left, right) => NodeKind::Concat(copied(left), copied(right)),
                NodeKind::Star(child) => NodeKind::Star(copied(child)),
                leaf => leaf,
            };

            let id = NodeId(nodes.len());
            for child in kind.children() {
                let child: &mut Node = &mut nodes[child.0];
                child.parent = Some(id);
            }

            nodes.push(Node {
                kind,
                parent: None,
                ..self.nodes[original.0]
            });
            copy_of[original.0] = Some(id);
        }

        Expression {
            root: NodeId(nodes.len() - 1),
            nodes,
            numbered: self.numbered,
        }
    }

    fn same_structure(&self, node: NodeId, other: &Expression, other_node: NodeId) -> bool {
        let mut stack = vec![(node, other_node)];

        while let Some((node, other_node)) = stack.pop() {
            match (self.kind(node), other.kind(other_node)) {
                (NodeKind::Epsilon, NodeKind::Epsilon) => {}
                (NodeKind::Letter(a), NodeKind::Letter(b)) if a == b => {}
                (NodeKind::Union(l1, r1), NodeKind::Union(l2, r2))
                | (NodeKind::Concat(l1, r1), NodeKind::Concat(l2, r2)) => {
                    stack.push((r1, r2));
                    stack.push((l1, l2));
                }
                (NodeKind::Star(c1), NodeKind::Star(c2)) => stack.push((c1, c2)),
                _ => return false,
            }
        }

        true
    }
}

/// Structural equality of the trees. Arena layout and positions are ignored.
impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        self.same_structure(self.root, other, other.root)
    }
}

impl Eq for Expression {}

impl Debug for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Expression({})", self)
    }
}

/// Union where an absent operand denotes the empty language.
pub fn union(left: Option<Expression>, right: Option<Expression>) -> Option<Expression> {
    match (left, right) {
        (Some(left), Some(right)) => Some(Expression::union(left, right)),
        (left, None) => left,
        (None, right) => right,
    }
}

/// Concatenation where an absent operand denotes the empty language.
pub fn concat(left: Option<Expression>, right: Option<Expression>) -> Option<Expression> {
    Some(Expression::concat(left?, right?))
}
