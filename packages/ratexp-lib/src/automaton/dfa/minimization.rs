use itertools::Itertools;
use petgraph::graph::NodeIndex;

use crate::automaton::{
    Alphabet, AutomatonNode, Letter, TransitionSystem,
    dfa::{DFA, node::DfaNode},
    index_map::IndexMap,
};

pub trait Minimizable {
    /// Builds the minimal automaton for the same language.
    fn minimize(&self) -> Self;
}

/// Table-filling minimization over the states reachable from the start.
///
/// States are numbered by their position in `states`, transitions are stored
/// per state in alphabet order, so `transitions[s][l]` is the successor of
/// state `s` for the `l`-th letter.
#[derive(Debug, Clone)]
pub struct DfaMinimizationTable<'a, N: AutomatonNode, L: Letter> {
    dfa: &'a DFA<N, L>,
    states: Vec<NodeIndex>,
    start: usize,
    transitions: Vec<Vec<usize>>,
}

impl<'a, N: AutomatonNode, L: Letter> DfaMinimizationTable<'a, N, L> {
    pub fn new(dfa: &'a DFA<N, L>) -> Self {
        let start = dfa.get_start().expect("DFA must have a start state");
        assert!(dfa.is_complete(), "DFA must be complete to minimize");

        let states = dfa.reachable_from(start).iter().collect_vec();
        let mut position = IndexMap::<NodeIndex, Option<usize>>::new(dfa.state_count());
        for (index, &state) in states.iter().enumerate() {
            position.insert(state, Some(index));
        }

        let transitions = states
            .iter()
            .map(|&state| {
                dfa.alphabet()
                    .iter()
                    .map(|letter| {
                        dfa.successor(state, letter)
                            .and_then(|target| position[target])
                            .unwrap_or_else(|| {
                                panic!(
                                    "State {:?} has no reachable successor for {:?}",
                                    state, letter
                                )
                            })
                    })
                    .collect_vec()
            })
            .collect_vec();

        DfaMinimizationTable {
            dfa,
            start: position[start].unwrap_or(0),
            states,
            transitions,
        }
    }

    fn is_accepting(&self, state: usize) -> bool {
        self.dfa.graph[self.states[state]].accepting
    }

    /// `marked[i][j]` is true iff some word separates state `i` from `j`.
    fn distinguishable_pairs(&self) -> Vec<Vec<bool>> {
        let n = self.states.len();
        let mut marked = vec![vec![false; n]; n];

        for i in 0..n {
            for j in 0..i {
                if self.is_accepting(i) != self.is_accepting(j) {
                    marked[i][j] = true;
                    marked[j][i] = true;
                }
            }
        }

        let mut changed = true;
        while changed {
            changed = false;

            for i in 0..n {
                for j in 0..i {
                    if marked[i][j] {
                        continue;
                    }

                    let separated = self.transitions[i]
                        .iter()
                        .zip(&self.transitions[j])
                        .any(|(&a, &b)| marked[a][b]);

                    if separated {
                        marked[i][j] = true;
                        marked[j][i] = true;
                        changed = true;
                    }
                }
            }
        }

        marked
    }

    /// Maps each state to the smallest state equivalent to it.
    pub fn representatives(&self) -> Vec<usize> {
        let marked = self.distinguishable_pairs();

        (0..self.states.len())
            .map(|i| (0..i).find(|&j| !marked[i][j]).unwrap_or(i))
            .collect()
    }

    pub fn to_dfa(&self) -> DFA<N, L> {
        let representatives = self.representatives();
        let mut minimized = DFA::new(self.dfa.alphabet().to_vec());

        let mut class_of = vec![0; self.states.len()];
        let mut class_states = Vec::new();

        for (state, &representative) in representatives.iter().enumerate() {
            if representative != state {
                class_of[state] = class_of[representative];
                continue;
            }

            let node = &self.dfa.graph[self.states[state]];
            class_of[state] = class_states.len();
            class_states.push(minimized.add_state(DfaNode::new(node.accepting, node.data.clone())));
        }

        minimized.set_start(class_states[class_of[self.start]]);

        for (state, &representative) in representatives.iter().enumerate() {
            if representative != state {
                continue;
            }

            for (letter, &target) in self.dfa.alphabet().iter().zip(&self.transitions[state]) {
                minimized.add_transition(
                    class_states[class_of[state]],
                    class_states[class_of[target]],
                    letter.clone(),
                );
            }
        }

        minimized.override_complete();

        minimized
    }
}

impl<N: AutomatonNode, L: Letter> Minimizable for DFA<N, L> {
    fn minimize(&self) -> Self {
        let minimized = DfaMinimizationTable::new(self).to_dfa();

        tracing::debug!(
            states = self.state_count(),
            minimal_states = minimized.state_count(),
            "minimized DFA"
        );

        minimized
    }
}
