//! Language inclusion and equivalence of rational expressions.
//!
//! `L(e1) ⊆ L(e2)` holds iff the product of the Glushkov automaton of `e1`
//! with the complement of the Glushkov automaton of `e2` accepts nothing.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::{
    automaton::{Alphabet, algorithms::AutomatonAlgorithms},
    config::{EquivalenceConfig, EquivalenceMode},
    expression::Expression,
    glushkov::{GlushkovAutomaton, glushkov},
    logger::{LogLevel, Logger},
    solver::{SolverResult, SolverStatus},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquivalenceStatistics {
    pub left_states: usize,
    pub right_states: usize,
    /// Summed over all inclusion checks that got past the alphabet check.
    pub complement_states: usize,
    pub product_states: usize,
    pub time: Duration,
}

/// `False` optionally carries a word of the left language that the right
/// language lacks.
pub type InclusionStatus = SolverStatus<(), Option<Vec<char>>>;
pub type EquivalenceResult = SolverResult<(), Option<Vec<char>>, EquivalenceStatistics>;

pub struct EquivalenceChecker<'l> {
    config: EquivalenceConfig,
    logger: Option<&'l Logger>,
}

impl<'l> EquivalenceChecker<'l> {
    pub fn new(config: EquivalenceConfig, logger: Option<&'l Logger>) -> Self {
        EquivalenceChecker { config, logger }
    }

    /// Runs the check selected by the configured mode.
    pub fn check(&self, left: &Expression, right: &Expression) -> EquivalenceResult {
        match self.config.get_mode() {
            EquivalenceMode::Inclusion => self.check_inclusion(left, right),
            EquivalenceMode::Equivalence => self.check_equivalence(left, right),
        }
    }

    /// `L(left) ⊆ L(right)`.
    pub fn check_inclusion(&self, left: &Expression, right: &Expression) -> EquivalenceResult {
        let start = Instant::now();
        let (left_automaton, right_automaton) = Self::automata(left, right);
        let mut statistics = EquivalenceStatistics {
            left_states: left_automaton.state_count(),
            right_states: right_automaton.state_count(),
            ..Default::default()
        };

        let status = self.included(&left_automaton, &right_automaton, &mut statistics);

        statistics.time = start.elapsed();
        self.log_result("inclusion", &status, &statistics);
        SolverResult::new(status, statistics)
    }

    /// `L(left) = L(right)`. Differing alphabets refute equivalence right
    /// away.
    pub fn check_equivalence(&self, left: &Expression, right: &Expression) -> EquivalenceResult {
        let start = Instant::now();
        let (left_automaton, right_automaton) = Self::automata(left, right);
        let mut statistics = EquivalenceStatistics {
            left_states: left_automaton.state_count(),
            right_states: right_automaton.state_count(),
            ..Default::default()
        };

        let status = if left_automaton.alphabet() != right_automaton.alphabet() {
            tracing::debug!(
                left = ?left_automaton.alphabet(),
                right = ?right_automaton.alphabet(),
                "alphabets differ"
            );
            SolverStatus::False(None)
        } else {
            match self.included(&left_automaton, &right_automaton, &mut statistics) {
                SolverStatus::True(()) => {
                    self.included(&right_automaton, &left_automaton, &mut statistics)
                }
                refuted => refuted,
            }
        };

        statistics.time = start.elapsed();
        self.log_result("equivalence", &status, &statistics);
        SolverResult::new(status, statistics)
    }

    fn automata(left: &Expression, right: &Expression) -> (GlushkovAutomaton, GlushkovAutomaton) {
        let mut left = left.clone();
        let mut right = right.clone();
        (glushkov(&mut left), glushkov(&mut right))
    }

    fn included(
        &self,
        left: &GlushkovAutomaton,
        right: &GlushkovAutomaton,
        statistics: &mut EquivalenceStatistics,
    ) -> InclusionStatus {
        // every Glushkov state lies on an accepting run, so a letter missing
        // on the right refutes inclusion
        if let Some(letter) = left
            .alphabet()
            .iter()
            .find(|letter| !right.alphabet().contains(letter))
        {
            tracing::debug!(%letter, "letter of the left expression missing on the right");
            return SolverStatus::False(None);
        }

        let left_dfa = left.determinize_over(right.alphabet());
        let mut complement = right.determinize();
        complement.invert_mut();
        statistics.complement_states += complement.state_count();

        let product = left_dfa.intersect(&complement);
        statistics.product_states += product.state_count();

        tracing::debug!(
            complement_states = complement.state_count(),
            product_states = product.state_count(),
            "built inclusion product"
        );

        if !product.has_accepting_run() {
            return SolverStatus::True(());
        }

        let counterexample = if *self.config.get_counterexample() {
            product.shortest_accepting_path().map(|path| path.into_word())
        } else {
            None
        };
        SolverStatus::False(counterexample)
    }

    fn log_result(&self, check: &str, status: &InclusionStatus, statistics: &EquivalenceStatistics) {
        let Some(logger) = self.logger else {
            return;
        };

        let verdict = match status {
            SolverStatus::True(()) => "holds".to_string(),
            SolverStatus::False(Some(word)) => format!(
                "fails, counterexample '{}'",
                word.iter().collect::<String>()
            ),
            SolverStatus::False(None) => "fails".to_string(),
        };

        logger
            .object(check)
            .add_field("result", verdict)
            .add_field("left_states", statistics.left_states)
            .add_field("right_states", statistics.right_states)
            .add_field("complement_states", statistics.complement_states)
            .add_field("product_states", statistics.product_states)
            .add_field("time", format!("{:?}", statistics.time))
            .log(LogLevel::Info);
    }
}

/// `L(left) ⊆ L(right)`. Note the asymmetry: `same_language(a, a+b)` holds
/// while `same_language(a+b, a)` does not.
pub fn same_language(left: &Expression, right: &Expression) -> bool {
    EquivalenceChecker::new(
        EquivalenceConfig::default().with_counterexample(false),
        None,
    )
    .check_inclusion(left, right)
    .is_success()
}

/// `L(left) = L(right)`.
pub fn equivalent(left: &Expression, right: &Expression) -> bool {
    EquivalenceChecker::new(
        EquivalenceConfig::default().with_counterexample(false),
        None,
    )
    .check_equivalence(left, right)
    .is_success()
}
