use crate::automaton::AutomatonNode;

/// A state of an [NFA](crate::automaton::nfa::NFA) or a
/// [DFA](crate::automaton::dfa::DFA), carrying some data of type `T`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DfaNode<T: AutomatonNode> {
    pub accepting: bool,
    pub data: T,
}

impl<T: AutomatonNode> DfaNode<T> {
    pub fn new(accepting: bool, data: T) -> Self {
        DfaNode { accepting, data }
    }

    pub fn accepting(data: T) -> Self {
        DfaNode::new(true, data)
    }

    pub fn non_accepting(data: T) -> Self {
        DfaNode::new(false, data)
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn invert_mut(&mut self) {
        self.accepting = !self.accepting;
    }

    /// Product state of an intersection, keeping the data of `self`.
    pub fn join_left<TO: AutomatonNode>(&self, other: &DfaNode<TO>) -> DfaNode<T> {
        DfaNode::new(self.accepting && other.accepting, self.data.clone())
    }
}
