use hashbrown::{HashMap, HashSet};
use itertools::Itertools;
use petgraph::{
    Direction,
    graph::{DiGraph, EdgeIndex, NodeIndex},
    visit::EdgeRef,
};

use crate::automaton::{
    Alphabet, Automaton, AutomatonNode, InitializedAutomaton, Language, Letter, TransitionSystem,
    dfa::{DFA, node::DfaNode},
};

/// Nondeterministic automaton without epsilon transitions, with a set of
/// initial states.
#[derive(Debug, Clone)]
pub struct NFA<N: AutomatonNode, L: Letter> {
    initial: Vec<NodeIndex>,
    pub graph: DiGraph<DfaNode<N>, L>,
    alphabet: Vec<L>,
}

impl<N: AutomatonNode, L: Letter> NFA<N, L> {
    /// The alphabet is sorted and deduplicated.
    pub fn new(mut alphabet: Vec<L>) -> Self {
        alphabet.sort();
        alphabet.dedup();

        NFA {
            alphabet,
            initial: vec![],
            graph: DiGraph::new(),
        }
    }

    pub fn add_state(&mut self, data: DfaNode<N>) -> NodeIndex {
        self.graph.add_node(data)
    }

    pub fn add_initial(&mut self, state: NodeIndex) {
        if !self.initial.contains(&state) {
            self.initial.push(state);
        }
    }

    pub fn initial(&self) -> &[NodeIndex] {
        &self.initial
    }

    pub fn set_accepting(&mut self, state: NodeIndex) {
        self.graph[state].accepting = true;
    }

    pub fn is_accepting(&self, state: NodeIndex) -> bool {
        self.graph[state].accepting
    }

    pub fn accepting_states(&self) -> Vec<NodeIndex> {
        self.graph
            .node_indices()
            .filter(|&state| self.is_accepting(state))
            .collect()
    }

    pub fn state_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn transition_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn find_transition(&self, from: NodeIndex, to: NodeIndex, letter: &L) -> Option<EdgeIndex> {
        self.graph
            .edges_connecting(from, to)
            .find(|edge| edge.weight() == letter)
            .map(|edge| edge.id())
    }

    pub fn has_transition(&self, from: NodeIndex, to: NodeIndex, letter: &L) -> bool {
        self.find_transition(from, to, letter).is_some()
    }

    /// Adds `from --letter--> to`. Adding an existing transition again is a
    /// no-op returning the existing edge.
    pub fn add_transition(&mut self, from: NodeIndex, to: NodeIndex, letter: L) -> EdgeIndex {
        assert!(
            self.alphabet.binary_search(&letter).is_ok(),
            "Letter {:?} is not in the alphabet {:?}",
            letter,
            self.alphabet
        );

        match self.find_transition(from, to, &letter) {
            Some(edge) => edge,
            None => self.graph.add_edge(from, to, letter),
        }
    }

    /// All `(from, letter, to)` triples, in edge insertion order.
    pub fn transitions(&self) -> impl Iterator<Item = (NodeIndex, &L, NodeIndex)> {
        self.graph
            .edge_references()
            .map(|edge| (edge.source(), edge.weight(), edge.target()))
    }

    pub fn node_data(&self, node: NodeIndex) -> &N {
        self.graph[node].data()
    }

    /// Determinizes the NFA over its own alphabet.
    pub fn determinize(&self) -> DFA<(), L> {
        self.determinize_over(&self.alphabet)
    }

    /// Subset construction over `alphabet`, which must contain the alphabet of
    /// the NFA. The result is complete and always has an explicit trap state
    /// for the empty set.
    pub fn determinize_over(&self, alphabet: &[L]) -> DFA<(), L> {
        assert!(!self.initial.is_empty(), "NFA must have an initial state");
        assert!(
            self.alphabet.iter().all(|letter| alphabet.contains(letter)),
            "Alphabet {:?} does not contain the NFA alphabet {:?}",
            alphabet,
            self.alphabet
        );

        let mut state_map = HashMap::new();
        let mut dfa = DFA::<(), L>::new(alphabet.to_vec());

        let mut start_state_set = self.initial.clone();
        start_state_set.sort();
        start_state_set.dedup();
        let dfa_start = dfa.add_state(self.state_from_set(&start_state_set));
        dfa.set_start(dfa_start);
        state_map.insert(start_state_set.clone(), dfa_start);

        let trap_state_set = vec![];
        let trap_state = dfa.add_state(DfaNode::non_accepting(()));
        state_map.insert(trap_state_set.clone(), trap_state);

        let mut stack = vec![start_state_set, trap_state_set];

        while let Some(state) = stack.pop() {
            let source = state_map[&state];

            for symbol in dfa.alphabet().to_vec() {
                let target_state = state
                    .iter()
                    .flat_map(|&node| self.graph.edges_directed(node, Direction::Outgoing))
                    .filter(|edge| *edge.weight() == symbol)
                    .map(|edge| edge.target())
                    .sorted()
                    .dedup()
                    .collect_vec();

                let target_dfa_state = match state_map.get(&target_state) {
                    Some(&existing) => existing,
                    None => {
                        let new_state = dfa.add_state(self.state_from_set(&target_state));
                        state_map.insert(target_state.clone(), new_state);
                        stack.push(target_state);
                        new_state
                    }
                };

                dfa.add_transition(source, target_dfa_state, symbol);
            }
        }

        #[cfg(debug_assertions)]
        dfa.assert_complete();

        dfa.override_complete();

        tracing::debug!(
            nfa_states = self.state_count(),
            dfa_states = dfa.state_count(),
            "determinized NFA"
        );

        dfa
    }

    /// Checks if a set of states contains an accepting state.
    pub fn is_accepting_set(&self, states: &[NodeIndex]) -> bool {
        states.iter().any(|&x| self.is_accepting(x))
    }

    /// Creates a DFA state from a set of NFA states.
    fn state_from_set(&self, states: &[NodeIndex]) -> DfaNode<()> {
        DfaNode::new(self.is_accepting_set(states), ())
    }
}

impl<N: AutomatonNode, L: Letter> Alphabet for NFA<N, L> {
    type Letter = L;

    fn alphabet(&self) -> &[L] {
        &self.alphabet
    }
}

impl<N: AutomatonNode, L: Letter> Automaton for NFA<N, L> {
    type NIndex = NodeIndex;

    fn node_count(&self) -> usize {
        self.graph.node_count()
    }
}

impl<N: AutomatonNode, L: Letter> TransitionSystem for NFA<N, L> {
    fn transitions_from(&self, node: NodeIndex) -> impl Iterator<Item = (&L, NodeIndex)> {
        self.graph
            .edges_directed(node, Direction::Outgoing)
            .map(|edge| (edge.weight(), edge.target()))
    }
}

impl<N: AutomatonNode, L: Letter> InitializedAutomaton for NFA<N, L> {
    fn initial_states(&self) -> Vec<NodeIndex> {
        self.initial.clone()
    }

    fn is_accepting(&self, node: NodeIndex) -> bool {
        self.graph[node].accepting
    }
}

impl<N: AutomatonNode, L: Letter> Language for NFA<N, L> {
    fn accepts<'a>(&self, input: impl IntoIterator<Item = &'a L>) -> bool
    where
        L: 'a,
    {
        let mut current = self.initial.iter().copied().collect::<HashSet<_>>();

        for symbol in input {
            current = current
                .iter()
                .flat_map(|&node| self.graph.edges_directed(node, Direction::Outgoing))
                .filter(|edge| edge.weight() == symbol)
                .map(|edge| edge.target())
                .collect();

            if current.is_empty() {
                return false;
            }
        }

        current.into_iter().any(|state| self.is_accepting(state))
    }
}
