use itertools::Itertools;
use petgraph::graph::NodeIndex;
use ratexp_lib::{
    automaton::{
        InitializedAutomaton, Language, TransitionSystem,
        algorithms::AutomatonAlgorithms,
        dfa::{DFA, minimization::Minimizable, node::DfaNode},
        path::Path,
    },
    validation::same_language::{assert_inverse_language, assert_same_language, same_language},
};

/// `(ab)+` over `{a, b}`, completed with a failure state.
fn ab_plus() -> DFA<u32, char> {
    let mut dfa = DFA::<u32, char>::new(vec!['a', 'b']);
    let q0 = dfa.add_state(DfaNode::non_accepting(0));
    let q1 = dfa.add_state(DfaNode::non_accepting(1));
    let q2 = dfa.add_state(DfaNode::accepting(2));
    dfa.set_start(q0);

    dfa.add_transition(q0, q1, 'a');
    dfa.add_transition(q1, q2, 'b');
    dfa.add_transition(q2, q1, 'a');

    dfa.add_failure_state(3);
    dfa
}

#[test]
fn test_dfa() {
    let dfa = ab_plus();

    let input = "ababab";
    let chars = input.chars().collect_vec();
    assert!(dfa.accepts(&chars));

    let input = "ababa";
    let chars = input.chars().collect_vec();
    assert!(!dfa.accepts(&chars));

    assert!(!dfa.accepts(&[]));
}

#[test]
fn test_failure_state() {
    let mut dfa = ab_plus();
    assert!(dfa.is_complete());
    assert_eq!(dfa.state_count(), 4);
    dfa.assert_complete();

    // already complete, nothing to add
    assert_eq!(dfa.add_failure_state(4), None);
    assert_eq!(dfa.state_count(), 4);

    let failure = NodeIndex::new(3);
    assert!(!dfa.graph[failure].accepting);
    assert_eq!(dfa.reachable_from(failure).len(), 1);
    assert_eq!(dfa.successor(NodeIndex::new(0), &'b'), Some(failure));
}

#[test]
fn test_duplicate_transition() {
    let mut dfa = DFA::<u32, char>::new(vec!['a']);
    let q0 = dfa.add_state(DfaNode::accepting(0));
    dfa.set_start(q0);

    let first = dfa.add_transition(q0, q0, 'a');
    let second = dfa.add_transition(q0, q0, 'a');

    assert_eq!(first, second);
    assert_eq!(dfa.transition_count(), 1);
}

#[test]
#[should_panic]
fn test_conflicting_transition() {
    let mut dfa = DFA::<u32, char>::new(vec!['a']);
    let q0 = dfa.add_state(DfaNode::accepting(0));
    let q1 = dfa.add_state(DfaNode::accepting(1));

    dfa.add_transition(q0, q0, 'a');
    dfa.add_transition(q0, q1, 'a');
}

#[test]
#[should_panic]
fn test_invert_requires_completeness() {
    let mut dfa = DFA::<u32, char>::new(vec!['a', 'b']);
    let q0 = dfa.add_state(DfaNode::accepting(0));
    dfa.set_start(q0);
    dfa.add_transition(q0, q0, 'a');

    dfa.invert();
}

#[test]
fn test_dfa_inversion() {
    let dfa = ab_plus();

    let inverted = dfa.invert();
    assert_inverse_language(&dfa, &inverted, 6);

    let double_inverted = inverted.invert();
    assert_same_language(&dfa, &double_inverted, 6);
}

/// `a* b b*`
fn a_star_b_plus() -> DFA<u32, char> {
    let mut dfa = DFA::<u32, char>::new(vec!['a', 'b']);
    let q0 = dfa.add_state(DfaNode::non_accepting(0));
    let q1 = dfa.add_state(DfaNode::accepting(1));
    dfa.set_start(q0);

    dfa.add_transition(q0, q0, 'a');
    dfa.add_transition(q0, q1, 'b');
    dfa.add_transition(q1, q1, 'b');

    dfa.add_failure_state(2);
    dfa
}

/// `a b*`
fn a_b_star() -> DFA<u32, char> {
    let mut dfa = DFA::<u32, char>::new(vec!['a', 'b']);
    let q0 = dfa.add_state(DfaNode::non_accepting(0));
    let q1 = dfa.add_state(DfaNode::accepting(1));
    dfa.set_start(q0);

    dfa.add_transition(q0, q1, 'a');
    dfa.add_transition(q1, q1, 'b');

    dfa.add_failure_state(2);
    dfa
}

#[test]
fn test_dfa_intersection() {
    let dfa1 = a_star_b_plus();
    let dfa2 = a_b_star();

    // "ab", "abb", ... are in both
    let intersection = dfa1.intersect(&dfa2);
    assert!(intersection.accepts(&['a', 'b']));
    assert!(intersection.accepts(&['a', 'b', 'b']));
    assert!(!intersection.accepts(&['a']));
    assert!(!intersection.accepts(&['b']));
    assert!(intersection.has_accepting_run());
}

#[test]
fn test_dfa_subset() {
    let dfa1 = a_star_b_plus();
    let dfa2 = a_b_star();

    // "a" is not in (a* b b*)
    assert!(!dfa2.is_subset_of(&dfa1));
    // "b" is not in (a b*)
    assert!(!dfa1.is_subset_of(&dfa2));

    // a* b
    let mut dfa3 = DFA::<u32, char>::new(vec!['a', 'b']);
    let q0 = dfa3.add_state(DfaNode::non_accepting(0));
    let q1 = dfa3.add_state(DfaNode::accepting(1));
    dfa3.set_start(q0);
    dfa3.add_transition(q0, q0, 'a');
    dfa3.add_transition(q0, q1, 'b');
    dfa3.add_failure_state(2);

    assert!(dfa3.is_subset_of(&dfa1));
    assert!(!dfa1.is_subset_of(&dfa3));
}

#[test]
fn test_empty_intersection() {
    let dfa = ab_plus();
    let inverted = dfa.invert();

    let intersection = dfa.intersect(&inverted);
    assert!(intersection.is_language_empty());
    assert!(intersection.shortest_accepting_path().is_none());
}

#[test]
fn test_shortest_accepting_path() {
    let dfa = ab_plus();

    let path = dfa.shortest_accepting_path().unwrap();
    assert_eq!(path.word(), &['a', 'b']);
    assert_eq!(path.len(), 2);
    assert_eq!(path.start(), NodeIndex::new(0));
    assert_eq!(path.end(), NodeIndex::new(2));
    assert_eq!(path.to_string(), "0 -a-> 1 -b-> 2");
}

#[test]
fn test_path_from_word() {
    let dfa = ab_plus();
    let start = dfa.initial_states()[0];

    let path = Path::from_word(start, &['a', 'b', 'a', 'b'], &dfa).unwrap();
    assert_eq!(path.end(), NodeIndex::new(2));
    assert_eq!(path.states.len(), 5);
    assert!(dfa.accepts(path.word()));

    let mut incomplete = DFA::<u32, char>::new(vec!['a', 'b']);
    let q0 = incomplete.add_state(DfaNode::accepting(0));
    incomplete.set_start(q0);
    incomplete.add_transition(q0, q0, 'a');

    assert!(Path::from_word(q0, &['a', 'b'], &incomplete).is_err());
}

#[test]
fn minimize_1() {
    let mut dfa = DFA::<u32, char>::new(vec!['a', 'b']);
    let q0 = dfa.add_state(DfaNode::non_accepting(0));
    let q1 = dfa.add_state(DfaNode::non_accepting(1));
    let q2 = dfa.add_state(DfaNode::non_accepting(2));
    let q3 = dfa.add_state(DfaNode::accepting(3));
    let q4 = dfa.add_state(DfaNode::non_accepting(4));
    let q5 = dfa.add_state(DfaNode::accepting(5));
    dfa.set_start(q0);

    dfa.add_transition(q0, q1, 'a');
    dfa.add_transition(q0, q3, 'b');
    dfa.add_transition(q1, q0, 'a');
    dfa.add_transition(q1, q3, 'b');
    dfa.add_transition(q2, q1, 'a');
    dfa.add_transition(q2, q4, 'b');
    dfa.add_transition(q3, q5, 'a');
    dfa.add_transition(q3, q5, 'b');
    dfa.add_transition(q4, q3, 'a');
    dfa.add_transition(q4, q3, 'b');
    dfa.add_transition(q5, q5, 'a');
    dfa.add_transition(q5, q5, 'b');

    dfa.override_complete();

    let minimized = dfa.minimize();

    assert!(same_language(&dfa, &minimized, 10));
    assert_eq!(minimized.state_count(), 2);
}

#[test]
fn minimize_2() {
    // example:  https://en.wikipedia.org/wiki/DFA_minimization
    let mut dfa = DFA::<u32, char>::new(vec!['a', 'b']);
    let q0 = dfa.add_state(DfaNode::non_accepting(0));
    let q1 = dfa.add_state(DfaNode::non_accepting(1));
    let q2 = dfa.add_state(DfaNode::accepting(2));
    let q3 = dfa.add_state(DfaNode::accepting(3));
    let q4 = dfa.add_state(DfaNode::accepting(4));
    let q5 = dfa.add_state(DfaNode::non_accepting(5));
    dfa.set_start(q0);

    dfa.add_transition(q0, q1, 'a');
    dfa.add_transition(q0, q2, 'b');
    dfa.add_transition(q1, q0, 'a');
    dfa.add_transition(q1, q3, 'b');
    dfa.add_transition(q2, q4, 'a');
    dfa.add_transition(q2, q5, 'b');
    dfa.add_transition(q3, q4, 'a');
    dfa.add_transition(q3, q5, 'b');
    dfa.add_transition(q4, q4, 'a');
    dfa.add_transition(q4, q5, 'b');
    dfa.add_transition(q5, q5, 'a');
    dfa.add_transition(q5, q5, 'b');

    dfa.override_complete();

    let minimized = dfa.minimize();

    assert!(same_language(&dfa, &minimized, 10));
    assert_eq!(minimized.state_count(), 3);

    // exactly one class is a rejecting sink
    let sinks = minimized
        .graph
        .node_indices()
        .filter(|&node| {
            !minimized.graph[node].accepting && minimized.reachable_from(node).len() == 1
        })
        .count();
    assert_eq!(sinks, 1);
}

#[test]
fn minimize_3() {
    let mut dfa = DFA::<u32, char>::new(vec!['a']);

    let q0 = dfa.add_state(DfaNode::accepting(0));
    let q1 = dfa.add_state(DfaNode::non_accepting(1));
    let q2 = dfa.add_state(DfaNode::accepting(2));
    let q3 = dfa.add_state(DfaNode::non_accepting(3));

    dfa.set_start(q0);

    dfa.add_transition(q0, q1, 'a');
    dfa.add_transition(q1, q2, 'a');
    dfa.add_transition(q2, q3, 'a');
    dfa.add_transition(q3, q0, 'a');

    dfa.override_complete();

    let minimized = dfa.minimize();

    assert!(same_language(&dfa, &minimized, 10));
    assert_eq!(minimized.state_count(), 2);
}

#[test]
fn minimize_4() {
    let mut dfa = DFA::<u32, char>::new(vec!['a', 'b', 'c', 'd']);

    let q0 = dfa.add_state(DfaNode::non_accepting(0));
    let q1 = dfa.add_state(DfaNode::accepting(1));
    let q2 = dfa.add_state(DfaNode::non_accepting(2));

    dfa.set_start(q0);

    dfa.add_transition(q0, q0, 'a');
    dfa.add_transition(q0, q1, 'b');
    dfa.add_transition(q0, q2, 'c');
    dfa.add_transition(q0, q2, 'd');
    dfa.add_transition(q1, q2, 'a');
    dfa.add_transition(q1, q2, 'b');
    dfa.add_transition(q1, q1, 'c');
    dfa.add_transition(q1, q2, 'd');
    dfa.add_transition(q2, q2, 'a');
    dfa.add_transition(q2, q2, 'b');
    dfa.add_transition(q2, q2, 'c');
    dfa.add_transition(q2, q2, 'd');

    dfa.override_complete();

    let minimized = dfa.minimize();

    assert!(same_language(&dfa, &minimized, 6));
    assert_eq!(minimized.state_count(), 3);
}
