use std::collections::BTreeSet;

use crate::{
    automaton::{Alphabet, Language},
    expression::{Expression, NodeId, NodeKind},
};

impl Expression {
    /// Decides membership of `word` directly on the tree.
    ///
    /// Unlike the positional analysis this recurses once per tree level, so
    /// it is meant for small expressions such as test oracles. Deciding a
    /// word against a deep tree goes through [glushkov](crate::glushkov::glushkov)
    /// and [Language::accepts] instead.
    pub fn matches(&self, word: &[char]) -> bool {
        self.match_ends(self.root, word, 0).contains(&word.len())
    }

    /// Offsets at which a match of `node` starting at `start` can end.
    fn match_ends(&self, node: NodeId, word: &[char], start: usize) -> BTreeSet<usize> {
        match self.kind(node) {
            NodeKind::Epsilon => BTreeSet::from([start]),
            NodeKind::Letter(letter) => {
                if word.get(start) == Some(&letter) {
                    BTreeSet::from([start + 1])
                } else {
                    BTreeSet::new()
                }
            }
            NodeKind::Union(left, right) => {
                let mut ends = self.match_ends(left, word, start);
                ends.extend(self.match_ends(right, word, start));
                ends
            }
            NodeKind::Concat(left, right) => self
                .match_ends(left, word, start)
                .into_iter()
                .flat_map(|middle| self.match_ends(right, word, middle))
                .collect(),
            NodeKind::Star(child) => {
                let mut ends = BTreeSet::from([start]);
                let mut frontier = vec![start];

                while let Some(offset) = frontier.pop() {
                    for end in self.match_ends(child, word, offset) {
                        if ends.insert(end) {
                            frontier.push(end);
                        }
                    }
                }

                ends
            }
        }
    }

    pub fn language(&self) -> ExpressionLanguage<'_> {
        ExpressionLanguage {
            expression: self,
            alphabet: self.letters(),
        }
    }
}

/// Adapter exposing an expression through the [Language] interface.
#[derive(Debug, Clone)]
pub struct ExpressionLanguage<'a> {
    expression: &'a Expression,
    alphabet: Vec<char>,
}

impl Alphabet for ExpressionLanguage<'_> {
    type Letter = char;

    fn alphabet(&self) -> &[char] {
        &self.alphabet
    }
}

impl Language for ExpressionLanguage<'_> {
    fn accepts<'a>(&self, input: impl IntoIterator<Item = &'a char>) -> bool
    where
        Self::Letter: 'a,
    {
        let word = input.into_iter().copied().collect::<Vec<_>>();
        self.expression.matches(&word)
    }
}
