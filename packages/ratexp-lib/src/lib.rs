//! Conversions between rational expressions and finite automata: the
//! Glushkov construction, Arden's lemma on the equation system of an
//! automaton, and language inclusion / equivalence of expressions.

pub mod automaton;
pub mod config;
pub mod expression;
pub mod glushkov;
pub mod logger;
pub mod random;
pub mod solver;
pub mod validation;
