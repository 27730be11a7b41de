use petgraph::graph::NodeIndex;
use ratexp_lib::{
    automaton::{Alphabet, InitializedAutomaton, Language, algorithms::AutomatonAlgorithms},
    expression::Expression,
    glushkov::glushkov,
    validation::same_language::assert_same_language,
};

fn parse(input: &str) -> Expression {
    Expression::parse(input).unwrap()
}

#[test]
fn state_per_position() {
    let mut expression = parse("((a+b)*.c*.f+a.d.g.h*.(f+r*))*.g");
    let automaton = glushkov(&mut expression);

    assert_eq!(automaton.state_count(), expression.position_count() + 1);
    assert_eq!(automaton.initial_states(), vec![NodeIndex::new(0)]);
    for state in 0..automaton.state_count() {
        assert_eq!(*automaton.node_data(NodeIndex::new(state)), state);
    }
    assert_eq!(
        automaton.alphabet(),
        &['a', 'b', 'c', 'd', 'f', 'g', 'h', 'r']
    );
}

#[test]
fn transitions_of_a_small_expression() {
    // a=1 b=2 a=3
    let mut expression = parse("(a.b)*.a");
    let automaton = glushkov(&mut expression);

    let q = NodeIndex::new;
    assert!(!automaton.is_accepting(q(0)));
    assert!(!automaton.is_accepting(q(1)));
    assert!(!automaton.is_accepting(q(2)));
    assert!(automaton.is_accepting(q(3)));

    assert!(automaton.has_transition(q(0), q(1), &'a'));
    assert!(automaton.has_transition(q(0), q(3), &'a'));
    assert!(automaton.has_transition(q(1), q(2), &'b'));
    assert!(automaton.has_transition(q(2), q(1), &'a'));
    assert!(automaton.has_transition(q(2), q(3), &'a'));
    assert_eq!(automaton.transition_count(), 5);
}

#[test]
fn nullable_expression_accepts_in_the_initial_state() {
    let mut expression = parse("a*.b*");
    let automaton = glushkov(&mut expression);

    assert!(automaton.is_accepting(NodeIndex::new(0)));
    assert_eq!(automaton.accepting_states().len(), 3);
}

#[test]
fn epsilon_positions_are_isolated() {
    // ε=1 a=2
    let mut expression = parse("(ε+a)*");
    let automaton = glushkov(&mut expression);

    assert_eq!(automaton.state_count(), 3);
    let epsilon_state = NodeIndex::new(1);
    assert!(!automaton.is_accepting(epsilon_state));
    assert_eq!(
        automaton
            .transitions()
            .filter(|(from, _, to)| *from == epsilon_state || *to == epsilon_state)
            .count(),
        0
    );
    assert_same_language(&automaton, &expression.language(), 5);
}

#[test]
fn only_epsilon() {
    let mut expression = parse("ε");
    let automaton = glushkov(&mut expression);

    assert_eq!(automaton.state_count(), 2);
    assert!(automaton.alphabet().is_empty());
    assert!(automaton.is_accepting(NodeIndex::new(0)));
    assert_eq!(automaton.transition_count(), 0);
    assert!(automaton.has_accepting_run());
}

#[test]
fn same_language_as_the_expression() {
    for input in [
        "a",
        "a.b+b.a",
        "(a+b)*.a.b",
        "(a.b*)*.c",
        "a*.(b+ε).a*",
        "((a+b)*.c*.f+a.d.g.h*.(f+r*))*.g",
        "(a+b.(c+a)*)*",
    ] {
        let mut expression = parse(input);
        let automaton = glushkov(&mut expression);
        let max_word_length = if expression.letters().len() > 4 { 4 } else { 6 };

        assert_same_language(&automaton, &expression.language(), max_word_length);
    }
}

#[test]
fn shortest_word_of_the_automaton() {
    let mut expression = parse("a.a.a+b.(a+b)");
    let automaton = glushkov(&mut expression);

    let path = automaton.shortest_accepting_path().unwrap();
    assert_eq!(path.len(), 2);
    assert!(expression.matches(path.word()));
}

#[test]
fn long_words_build_deep_trees() {
    // concatenation nests to the left, so the tree is as deep as the word is
    // long
    let input = "ab".repeat(10_000);
    let mut expression = parse(&input);
    let automaton = glushkov(&mut expression);

    assert_eq!(expression.position_count(), 20_000);
    assert_eq!(automaton.state_count(), 20_001);
    assert_eq!(automaton.transition_count(), 20_000);

    let word = input.chars().collect::<Vec<_>>();
    assert!(automaton.accepts(&word));
    assert!(!automaton.accepts(&word[1..]));

    let printed = expression.to_string();
    assert_eq!(printed.len(), 2 * 20_000 - 1);
    assert_eq!(parse(&printed), expression);
    assert_eq!(expression.copy_subtree(expression.root()), expression);
    assert!(expression.to_dot().contains("b-20000"));
}
