use std::collections::VecDeque;

use itertools::Itertools;

use crate::automaton::{
    GIndex, InitializedAutomaton,
    index_map::{IndexMap, IndexSet},
    path::Path,
};

/// Algorithms available on every automaton with initial and accepting states.
pub trait AutomatonAlgorithms: InitializedAutomaton {
    /// Whether some accepting state is reachable from some initial state.
    fn has_accepting_run(&self) -> bool {
        self.initial_states().into_iter().any(|initial| {
            self.reachable_from(initial)
                .iter()
                .any(|node| self.is_accepting(node))
        })
    }

    fn is_language_empty(&self) -> bool {
        !self.has_accepting_run()
    }

    /// Breadth first search from all initial states at once. The returned
    /// path ends in an accepting state and has minimal length.
    fn shortest_accepting_path(&self) -> Option<Path<Self::NIndex, Self::Letter>> {
        let mut predecessor: IndexMap<Self::NIndex, Option<(Self::NIndex, Self::Letter)>> =
            IndexMap::new(self.node_count());
        let mut visited = IndexSet::new(self.node_count());
        let mut queue = VecDeque::new();

        for initial in self.initial_states() {
            if visited.insert(initial) {
                queue.push_back(initial);
            }
        }

        while let Some(node) = queue.pop_front() {
            if self.is_accepting(node) {
                let mut states = vec![node];
                let mut letters = vec![];
                let mut current = node;

                while let Some((previous, letter)) = predecessor.get(current).clone() {
                    states.push(previous);
                    letters.push(letter);
                    current = previous;
                }

                states.reverse();
                letters.reverse();
                return Some(Path { states, letters });
            }

            for (letter, target) in self.transitions_from(node) {
                if visited.insert(target) {
                    predecessor.insert(target, Some((node, letter.clone())));
                    queue.push_back(target);
                }
            }
        }

        None
    }

    fn to_graphviz(&self) -> String {
        let mut dot = String::new();
        dot.push_str("digraph finite_state_machine {\n");
        dot.push_str("fontname=\"Helvetica,Arial,sans-serif\"\n");
        dot.push_str("node [fontname=\"Helvetica,Arial,sans-serif\"]\n");
        dot.push_str("edge [fontname=\"Helvetica,Arial,sans-serif\"]\n");
        dot.push_str("rankdir=LR;\n");
        dot.push_str("node [shape=point,label=\"\"]START\n");

        let accepting_states = self
            .iter_node_indices()
            .filter(|node| self.is_accepting(*node))
            .map(|node| node.index().to_string())
            .join(" ");

        if !accepting_states.is_empty() {
            dot.push_str(&format!(
                "node [shape = doublecircle]; {};\n",
                accepting_states
            ));
        }
        dot.push_str("node [shape = circle];\n");

        for initial in self.initial_states() {
            dot.push_str(&format!("START -> {};\n", initial.index()));
        }

        for node in self.iter_node_indices() {
            dot.push_str(&format!("{} [ label=\"{}\" ];\n", node.index(), node.index()));
        }

        for node in self.iter_node_indices() {
            for (letter, target) in self.transitions_from(node) {
                dot.push_str(&format!(
                    "{} -> {} [ label=\"{:?}\" ];\n",
                    node.index(),
                    target.index(),
                    letter
                ));
            }
        }

        dot.push_str("}\n");

        dot
    }
}

impl<T: InitializedAutomaton> AutomatonAlgorithms for T {}
