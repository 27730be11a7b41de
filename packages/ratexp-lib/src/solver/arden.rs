use std::time::Instant;

use crate::{
    automaton::{
        AutomatonNode, GIndex, InitializedAutomaton, dfa::minimization::Minimizable, nfa::NFA,
    },
    config::ArdenConfig,
    expression::{self, Expression, display::OptionalExpression},
    logger::Logger,
    solver::system::EquationSystem,
};

/// Converts automata back into rational expressions by solving their
/// equation system with Arden's lemma.
pub struct ArdenSolver<'l> {
    config: ArdenConfig,
    logger: Option<&'l Logger>,
}

impl<'l> ArdenSolver<'l> {
    pub fn new(config: ArdenConfig, logger: Option<&'l Logger>) -> Self {
        ArdenSolver { config, logger }
    }

    /// An expression for the language of `automaton`, `None` if the language
    /// is empty.
    pub fn solve<N: AutomatonNode>(&self, automaton: &NFA<N, char>) -> Option<Expression> {
        if *self.config.get_minimize() {
            let minimal = automaton.determinize().minimize();

            if let Some(logger) = self.logger {
                logger.debug(&format!(
                    "Solving the minimal DFA with {} states instead of the NFA with {} states",
                    minimal.state_count(),
                    automaton.state_count()
                ));
            }

            self.solve_automaton(&minimal)
        } else {
            self.solve_automaton(automaton)
        }
    }

    /// Solves the equation system of any automaton directly. The result is the
    /// union of the values of all initial states.
    pub fn solve_automaton<A>(&self, automaton: &A) -> Option<Expression>
    where
        A: InitializedAutomaton<Letter = char>,
    {
        let start = Instant::now();
        let mut system = EquationSystem::from_automaton(automaton);
        let size = system.size();

        let trace = if *self.config.get_trace_system() {
            self.logger
        } else {
            None
        };
        system.solve(trace);

        let mut result = None;
        for initial in automaton.initial_states() {
            result = expression::union(result, system.take(initial.index(), size));
        }

        tracing::debug!(
            size,
            time = ?start.elapsed(),
            "Arden solver finished"
        );
        if let Some(logger) = self.logger {
            logger.info(&format!(
                "Arden solution: {}",
                OptionalExpression(result.as_ref())
            ));
        }

        result
    }
}

/// [ArdenSolver] with the default configuration and no logger.
pub fn arden<N: AutomatonNode>(automaton: &NFA<N, char>) -> Option<Expression> {
    ArdenSolver::new(ArdenConfig::default(), None).solve(automaton)
}
