use ratexp_lib::{
    automaton::{dfa::node::DfaNode, nfa::NFA},
    expression::Expression,
    glushkov::glushkov,
    solver::system::EquationSystem,
};

fn parse(input: &str) -> Expression {
    Expression::parse(input).unwrap()
}

#[test]
fn build_from_glushkov() {
    // a=1 b=2
    let mut expression = parse("a.b");
    let automaton = glushkov(&mut expression);
    let system = EquationSystem::from_automaton(&automaton);

    assert_eq!(system.size(), 3);
    assert_eq!(system.get(0, 1), Some(&parse("a")));
    assert_eq!(system.get(1, 2), Some(&parse("b")));
    assert_eq!(system.constant(0), None);
    assert_eq!(system.constant(1), None);
    assert_eq!(system.constant(2), Some(&Expression::epsilon()));
    assert_eq!(system.live_cell_count(), 3);
    assert!(!system.is_solved());
}

#[test]
fn parallel_transitions_are_united() {
    let mut nfa = NFA::<u32, char>::new(vec!['a', 'b']);
    let q0 = nfa.add_state(DfaNode::non_accepting(0));
    let q1 = nfa.add_state(DfaNode::accepting(1));
    nfa.add_initial(q0);
    nfa.add_transition(q0, q1, 'a');
    nfa.add_transition(q0, q1, 'b');

    let system = EquationSystem::from_automaton(&nfa);

    assert_eq!(system.get(0, 1), Some(&parse("a+b")));
    assert_eq!(system.to_string(), "X0 = (a+b) X1\nX1 = ε\n");
}

#[test]
fn solve_a_chain() {
    let mut expression = parse("a.b");
    let automaton = glushkov(&mut expression);
    let mut system = EquationSystem::from_automaton(&automaton);

    system.solve(None);

    assert!(system.is_solved());
    assert_eq!(system.constant(0), Some(&parse("a.b")));
    assert_eq!(system.constant(1), Some(&parse("b")));
    assert_eq!(system.constant(2), Some(&Expression::epsilon()));
}

#[test]
fn solve_a_loop() {
    let mut expression = parse("a*");
    let automaton = glushkov(&mut expression);
    let mut system = EquationSystem::from_automaton(&automaton);

    system.solve(None);

    assert!(system.is_solved());
    assert_eq!(system.constant(1), Some(&parse("a*")));
    assert_eq!(system.constant(0), Some(&parse("ε+a.a*")));
}

#[test]
fn dead_states_stay_absent() {
    // q2 never reaches an accepting state
    let mut nfa = NFA::<u32, char>::new(vec!['a', 'b']);
    let q0 = nfa.add_state(DfaNode::non_accepting(0));
    let q1 = nfa.add_state(DfaNode::accepting(1));
    let q2 = nfa.add_state(DfaNode::non_accepting(2));
    nfa.add_initial(q0);
    nfa.add_transition(q0, q1, 'a');
    nfa.add_transition(q0, q2, 'b');
    nfa.add_transition(q2, q2, 'a');

    let mut system = EquationSystem::from_automaton(&nfa);
    system.solve(None);

    assert!(system.is_solved());
    assert_eq!(system.constant(2), None);
    assert_eq!(system.constant(0), Some(&parse("a")));
}

#[test]
fn empty_system() {
    let mut system = EquationSystem::new(0);
    system.solve(None);

    assert!(system.is_solved());
    assert_eq!(system.live_cell_count(), 0);
    assert_eq!(system.to_string(), "");
}

#[test]
fn upward_pass_resolves_lower_references() {
    // X0 = a X1, X1 = b X0 + ε
    let mut system = EquationSystem::new(2);
    system.set(0, 1, Some(parse("a")));
    system.set(1, 0, Some(parse("b")));
    system.set(1, 2, Some(Expression::epsilon()));

    system.solve(None);

    assert!(system.is_solved());
    assert_eq!(system.constant(0), Some(&parse("(a.b)*.a")));
    assert_eq!(system.constant(1), Some(&parse("ε+b.((a.b)*.a)")));
}
