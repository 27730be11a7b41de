//! Glushkov (position) automaton of a rational expression.

use petgraph::graph::NodeIndex;

use crate::{
    automaton::{dfa::node::DfaNode, nfa::NFA},
    expression::{Expression, Position},
};

/// States are the positions `0..=N`, state `p` carries `p` as data and has
/// node index `p`.
pub type GlushkovAutomaton = NFA<Position, char>;

/// Builds the Glushkov automaton of `expression`, numbering its leaves first.
///
/// State 0 is the only initial state and is accepting iff the expression
/// contains the empty word. State `p > 0` is accepting iff `p` is in the
/// Last set of the root. Transitions are `0 -x-> p` for `p` in First and
/// `p -x-> q` for `q` in Follow(p), labelled with the letter `x` at `q`.
pub fn glushkov(expression: &mut Expression) -> GlushkovAutomaton {
    let position_count = expression.number();
    let root = expression.root();
    let letters = expression.letters_by_position();
    let letter_at = |position: Position| {
        letters
            .get(position)
            .unwrap_or_else(|| panic!("Position {} is not a letter", position))
    };

    let mut automaton = NFA::new(expression.letters());
    for position in 0..=position_count {
        automaton.add_state(DfaNode::non_accepting(position));
    }

    let initial = NodeIndex::new(0);
    automaton.add_initial(initial);
    if expression.contains_empty_word(root) {
        automaton.set_accepting(initial);
    }

    for position in expression.last(root) {
        automaton.set_accepting(NodeIndex::new(position));
    }

    for position in expression.first(root) {
        automaton.add_transition(initial, NodeIndex::new(position), letter_at(position));
    }

    for position in 1..=position_count {
        if letters.get(position).is_none() {
            continue;
        }

        for next in expression.follow(position) {
            automaton.add_transition(
                NodeIndex::new(position),
                NodeIndex::new(next),
                letter_at(next),
            );
        }
    }

    tracing::debug!(
        positions = position_count,
        states = automaton.state_count(),
        transitions = automaton.transition_count(),
        "built Glushkov automaton"
    );

    automaton
}
