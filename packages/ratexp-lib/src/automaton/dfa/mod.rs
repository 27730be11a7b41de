use std::fmt::Debug;

use hashbrown::HashMap;
use itertools::Itertools;
use node::DfaNode;
use petgraph::{
    Direction,
    graph::{DiGraph, EdgeIndex, NodeIndex},
    visit::EdgeRef,
};

use crate::automaton::{
    Alphabet, Automaton, AutomatonNode, InitializedAutomaton, Language, Letter, TransitionSystem,
    algorithms::AutomatonAlgorithms,
};

pub mod minimization;
pub mod node;

#[derive(Clone)]
pub struct DFA<N: AutomatonNode, L: Letter> {
    start: Option<NodeIndex>,
    pub graph: DiGraph<DfaNode<N>, L>,
    alphabet: Vec<L>,
    complete: bool,
}

impl<N: AutomatonNode, L: Letter> DFA<N, L> {
    /// The alphabet is sorted and deduplicated.
    pub fn new(mut alphabet: Vec<L>) -> Self {
        alphabet.sort();
        alphabet.dedup();

        DFA {
            alphabet,
            start: None,
            graph: DiGraph::new(),
            complete: false,
        }
    }

    pub fn set_start(&mut self, start: NodeIndex) {
        self.start = Some(start);
    }

    pub fn get_start(&self) -> Option<NodeIndex> {
        self.start
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Sets the DFA to be complete. This is useful when we don't want to spend
    /// the time to check if the DFA is complete.
    pub fn override_complete(&mut self) {
        self.complete = true;
    }

    pub fn state_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn transition_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn add_state(&mut self, data: DfaNode<N>) -> NodeIndex {
        self.graph.add_node(data)
    }

    /// Adds `from --letter--> to`. Adding an existing transition again is a
    /// no-op, a second target for the same letter panics.
    pub fn add_transition(&mut self, from: NodeIndex, to: NodeIndex, letter: L) -> EdgeIndex {
        assert!(
            self.alphabet.binary_search(&letter).is_ok(),
            "Letter {:?} is not in the alphabet {:?}",
            letter,
            self.alphabet
        );

        let existing_edge = self
            .graph
            .edges_directed(from, Direction::Outgoing)
            .find(|edge| *edge.weight() == letter);
        if let Some(edge) = existing_edge {
            let target = edge.target();
            if target != to {
                panic!(
                    "Transition conflict, adding the new transition causes this automaton to no longer be a DFA. Existing: {:?} -{:?}-> {:?}. New: {:?} -{:?}-> {:?}",
                    from, letter, target, from, letter, to
                );
            }
            return edge.id();
        }

        self.graph.add_edge(from, to, letter)
    }

    pub fn successor(&self, state: NodeIndex, letter: &L) -> Option<NodeIndex> {
        self.graph
            .edges_directed(state, Direction::Outgoing)
            .find(|edge| edge.weight() == letter)
            .map(|edge| edge.target())
    }

    /// Adds a failure state if needed. This turns the DFA into a complete DFA,
    /// which is needed for complementation and intersection.
    pub fn add_failure_state(&mut self, data: N) -> Option<NodeIndex> {
        let dfa = &*self;
        let failure_transitions = dfa
            .graph
            .node_indices()
            .flat_map(|state| {
                dfa.alphabet
                    .iter()
                    .filter(move |letter| dfa.successor(state, letter).is_none())
                    .map(move |letter| (state, letter.clone()))
            })
            .collect_vec();

        self.complete = true;

        if failure_transitions.is_empty() {
            return None;
        }

        let failure_state = self.add_state(DfaNode::non_accepting(data));

        for (state, letter) in failure_transitions {
            self.add_transition(state, failure_state, letter);
        }

        for letter in self.alphabet.clone() {
            self.add_transition(failure_state, failure_state, letter);
        }

        Some(failure_state)
    }

    /// Assert that the DFA is complete.
    /// This means that every state has a transition for every letter in the
    /// alphabet.
    ///
    /// If the DFA is not complete, this function will panic.
    pub fn assert_complete(&self) {
        for state in self.graph.node_indices() {
            for letter in self.alphabet.iter() {
                assert!(
                    self.successor(state, letter).is_some(),
                    "DFA is not complete. State {:?} does not have a transition for letter {:?}",
                    state,
                    letter
                );
            }
        }
    }

    /// Creates the complement DFA. The DFA must have a start state and be
    /// complete.
    ///
    /// See [`DFA::invert_mut`] for a version that modifies the DFA in place.
    pub fn invert(&self) -> DFA<N, L> {
        assert!(self.start.is_some(), "DFA must have a start state");

        let mut inverted = self.clone();
        inverted.invert_mut();
        inverted
    }

    /// Complements the DFA in place. The DFA must be complete.
    pub fn invert_mut(&mut self) {
        assert!(self.complete, "DFA must be complete to invert");

        for node in self.graph.node_indices() {
            self.graph[node].invert_mut();
        }
    }

    /// Builds the product DFA accepting the intersection of both languages.
    /// Both DFAs must have the same alphabet, a start state, and they must be
    /// complete. Only the reachable part of the product is built.
    pub fn intersect<NO: AutomatonNode>(&self, other: &DFA<NO, L>) -> DFA<N, L> {
        let self_start = self.start.expect("Self must have a start state");
        let other_start = other.start.expect("Other must have a start state");

        assert!(self.complete, "Self must be complete to intersect");
        assert!(other.complete, "Other must be complete to intersect");
        assert_eq!(
            self.alphabet, other.alphabet,
            "Alphabets must be the same to intersect DFAs"
        );

        // state map to map combinations of states to the new intersected states
        let mut state_map = HashMap::new();
        let mut stack = vec![(self_start, other_start)];
        let mut intersected = DFA::new(self.alphabet.clone());

        let start_state =
            intersected.add_state(self.graph[self_start].join_left(&other.graph[other_start]));
        intersected.set_start(start_state);
        state_map.insert((self_start, other_start), start_state);

        while let Some((state1, state2)) = stack.pop() {
            let new_state = state_map[&(state1, state2)];

            for edge1 in self.graph.edges_directed(state1, Direction::Outgoing) {
                let Some(target2) = other.successor(state2, edge1.weight()) else {
                    continue;
                };
                let target1 = edge1.target();

                let next_state = *state_map.entry((target1, target2)).or_insert_with(|| {
                    stack.push((target1, target2));
                    intersected.add_state(self.graph[target1].join_left(&other.graph[target2]))
                });

                intersected.add_transition(new_state, next_state, edge1.weight().clone());
            }
        }

        intersected.override_complete();

        intersected
    }

    /// `L(self) ⊆ L(other)`, decided as emptiness of `self ∩ complement(other)`.
    pub fn is_subset_of<NO: AutomatonNode>(&self, other: &DFA<NO, L>) -> bool {
        self.intersect(&other.invert()).is_language_empty()
    }
}

impl<N: AutomatonNode, L: Letter> Alphabet for DFA<N, L> {
    type Letter = L;

    fn alphabet(&self) -> &[L] {
        &self.alphabet
    }
}

impl<N: AutomatonNode, L: Letter> Automaton for DFA<N, L> {
    type NIndex = NodeIndex;

    fn node_count(&self) -> usize {
        self.graph.node_count()
    }
}

impl<N: AutomatonNode, L: Letter> TransitionSystem for DFA<N, L> {
    fn transitions_from(&self, node: NodeIndex) -> impl Iterator<Item = (&L, NodeIndex)> {
        self.graph
            .edges_directed(node, Direction::Outgoing)
            .map(|edge| (edge.weight(), edge.target()))
    }
}

impl<N: AutomatonNode, L: Letter> InitializedAutomaton for DFA<N, L> {
    fn initial_states(&self) -> Vec<NodeIndex> {
        self.start.into_iter().collect()
    }

    fn is_accepting(&self, node: NodeIndex) -> bool {
        self.graph[node].accepting
    }
}

impl<N: AutomatonNode, L: Letter> Language for DFA<N, L> {
    fn accepts<'a>(&self, input: impl IntoIterator<Item = &'a L>) -> bool
    where
        L: 'a,
    {
        let mut current_state = self.start.expect("Self must have a start state");

        for symbol in input {
            assert!(
                self.alphabet.contains(symbol),
                "Symbol {:?} not in alphabet",
                symbol
            );

            match self.successor(current_state, symbol) {
                Some(next) => current_state = next,
                None => return false,
            }
        }

        self.graph[current_state].accepting
    }
}

impl<N: AutomatonNode, L: Letter> Debug for DFA<N, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DFA")
            .field("alphabet", &self.alphabet)
            .field("state_count", &self.graph.node_count())
            .field("initial_state", &self.start)
            .field(
                "final_states",
                &self
                    .graph
                    .node_indices()
                    .filter(|node| self.graph[*node].accepting)
                    .collect_vec(),
            )
            .field(
                "edges",
                &self
                    .graph
                    .edge_references()
                    .map(|edge| {
                        format!(
                            "{:?} --- {:?} --> {:?}",
                            edge.source().index(),
                            edge.weight(),
                            edge.target().index()
                        )
                    })
                    .collect_vec(),
            )
            .finish()
    }
}
