use ratexp_lib::{
    automaton::{
        Alphabet, InitializedAutomaton, Language, TransitionSystem, dfa::node::DfaNode, nfa::NFA,
    },
    validation::same_language::assert_same_language,
};

#[test]
fn test_nfa_to_dfa() {
    let mut nfa = NFA::<u32, char>::new(vec!['a', 'b']);
    let q0 = nfa.add_state(DfaNode::non_accepting(0));
    let q1 = nfa.add_state(DfaNode::non_accepting(1));
    let q2 = nfa.add_state(DfaNode::accepting(2));

    nfa.add_initial(q0);

    nfa.add_transition(q0, q0, 'a');
    nfa.add_transition(q0, q1, 'b');

    nfa.add_transition(q1, q2, 'a');
    nfa.add_transition(q2, q1, 'b');

    nfa.add_transition(q1, q1, 'a');
    nfa.add_transition(q1, q1, 'b');

    nfa.add_transition(q2, q2, 'a');
    nfa.add_transition(q2, q2, 'b');

    let dfa = nfa.determinize();

    assert!(dfa.is_complete());
    dfa.assert_complete();
    assert_same_language(&nfa, &dfa, 6);
}

#[test]
fn test_nfa_multiple_initial_states() {
    // a+ from q0, b from q1
    let mut nfa = NFA::<u32, char>::new(vec!['a', 'b']);
    let q0 = nfa.add_state(DfaNode::non_accepting(0));
    let q1 = nfa.add_state(DfaNode::non_accepting(1));
    let q2 = nfa.add_state(DfaNode::accepting(2));

    nfa.add_initial(q0);
    nfa.add_initial(q1);
    nfa.add_initial(q1);
    assert_eq!(nfa.initial_states(), vec![q0, q1]);

    nfa.add_transition(q0, q2, 'a');
    nfa.add_transition(q2, q2, 'a');
    nfa.add_transition(q1, q2, 'b');

    assert!(nfa.accepts(&['a', 'a']));
    assert!(nfa.accepts(&['b']));
    assert!(!nfa.accepts(&['b', 'a']));
    assert!(!nfa.accepts(&[]));

    let dfa = nfa.determinize();
    assert_same_language(&nfa, &dfa, 6);
}

#[test]
fn test_duplicate_transition_is_noop() {
    let mut nfa = NFA::<u32, char>::new(vec!['a']);
    let q0 = nfa.add_state(DfaNode::accepting(0));
    let q1 = nfa.add_state(DfaNode::accepting(1));
    nfa.add_initial(q0);

    let first = nfa.add_transition(q0, q1, 'a');
    let second = nfa.add_transition(q0, q1, 'a');
    nfa.add_transition(q0, q0, 'a');

    assert_eq!(first, second);
    assert_eq!(nfa.transition_count(), 2);
    assert!(nfa.has_transition(q0, q1, &'a'));
    assert!(!nfa.has_transition(q1, q0, &'a'));
}

#[test]
#[should_panic]
fn test_letter_outside_alphabet() {
    let mut nfa = NFA::<u32, char>::new(vec!['a']);
    let q0 = nfa.add_state(DfaNode::accepting(0));
    nfa.add_transition(q0, q0, 'b');
}

#[test]
fn test_determinize_over_larger_alphabet() {
    let mut nfa = NFA::<u32, char>::new(vec!['a']);
    let q0 = nfa.add_state(DfaNode::accepting(0));
    nfa.add_initial(q0);
    nfa.add_transition(q0, q0, 'a');

    let dfa = nfa.determinize_over(&['a', 'b']);

    assert_eq!(dfa.alphabet(), &['a', 'b']);
    dfa.assert_complete();
    assert!(dfa.accepts(&['a', 'a']));
    assert!(!dfa.accepts(&['a', 'b']));
    assert!(!dfa.accepts(&['b']));
}

#[test]
fn test_reachable_from() {
    let mut nfa = NFA::<u32, char>::new(vec!['a', 'b']);
    let q0 = nfa.add_state(DfaNode::non_accepting(0));
    let q1 = nfa.add_state(DfaNode::non_accepting(1));
    let q2 = nfa.add_state(DfaNode::accepting(2));
    nfa.add_initial(q0);

    nfa.add_transition(q0, q1, 'a');
    nfa.add_transition(q2, q0, 'b');

    let reachable = nfa.reachable_from(q0);
    assert!(reachable.contains(q0));
    assert!(reachable.contains(q1));
    assert!(!reachable.contains(q2));
    assert_eq!(reachable.len(), 2);

    assert_eq!(nfa.accepting_states(), vec![q2]);
}
