use std::fmt::Display;

use petgraph::graph::NodeIndex;

use crate::automaton::{AutomatonNode, GIndex, Letter, dfa::DFA};

/// A run through an automaton: `states[i] --letters[i]--> states[i + 1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path<N: GIndex, L: Letter> {
    pub states: Vec<N>,
    pub letters: Vec<L>,
}

impl<N: GIndex, L: Letter> Path<N, L> {
    pub fn start(&self) -> N {
        self.states[0]
    }

    pub fn end(&self) -> N {
        self.states[self.states.len() - 1]
    }

    pub fn len(&self) -> usize {
        debug_assert!(self.states.len() == self.letters.len() + 1);
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn word(&self) -> &[L] {
        &self.letters
    }

    pub fn into_word(self) -> Vec<L> {
        self.letters
    }
}

impl<L: Letter> Path<NodeIndex, L> {
    /// Follows `word` through a DFA from `start`.
    pub fn from_word<'a, N: AutomatonNode>(
        start: NodeIndex,
        word: impl IntoIterator<Item = &'a L>,
        dfa: &DFA<N, L>,
    ) -> anyhow::Result<Self>
    where
        L: 'a,
    {
        let mut states = vec![start];
        let mut letters = vec![];

        for letter in word {
            let current = states[states.len() - 1];
            let successor = dfa.successor(current, letter).ok_or_else(|| {
                anyhow::anyhow!(
                    "path failed to take letter {:?}, no successor for node {:?}",
                    letter,
                    current
                )
            })?;
            letters.push(letter.clone());
            states.push(successor);
        }

        Ok(Path { states, letters })
    }
}

impl<N: GIndex, L: Letter + Display> Display for Path<N, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.states[0].index())?;
        for (letter, state) in self.letters.iter().zip(self.states.iter().skip(1)) {
            write!(f, " -{}-> {}", letter, state.index())?;
        }
        Ok(())
    }
}
