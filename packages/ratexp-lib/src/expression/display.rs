use std::fmt::{self, Display};

use crate::expression::{Expression, NodeId, NodeKind};

impl Expression {
    fn precedence(&self, node: NodeId) -> u8 {
        match self.kind(node) {
            NodeKind::Union(..) => 0,
            NodeKind::Concat(..) => 1,
            NodeKind::Star(_) => 2,
            NodeKind::Epsilon | NodeKind::Letter(_) => 3,
        }
    }

    /// Writes the subtree below `node`. Pending output is kept on a stack,
    /// so deep trees do not grow the call stack.
    fn fmt_node(&self, node: NodeId, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![Pending::Node(node)];

        while let Some(pending) = stack.pop() {
            match pending {
                Pending::Text(text) => write!(f, "{}", text)?,
                Pending::Operand(node, outer, right_side) => {
                    // operators parse left associative, so a right operand of
                    // the same precedence keeps its parentheses
                    let inner = self.precedence(node);
                    if inner < outer || (right_side && inner == outer) {
                        stack.extend([Pending::Text(")"), Pending::Node(node), Pending::Text("(")]);
                    } else {
                        stack.push(Pending::Node(node));
                    }
                }
                Pending::Node(node) => match self.kind(node) {
                    NodeKind::Epsilon => write!(f, "ε")?,
                    NodeKind::Letter(letter) => write!(f, "{}", letter)?,
                    NodeKind::Union(left, right) => stack.extend([
                        Pending::Operand(right, 0, true),
                        Pending::Text("+"),
                        Pending::Operand(left, 0, false),
                    ]),
                    NodeKind::Concat(left, right) => stack.extend([
                        Pending::Operand(right, 1, true),
                        Pending::Text("."),
                        Pending::Operand(left, 1, false),
                    ]),
                    NodeKind::Star(child) => {
                        stack.extend([Pending::Text("*"), Pending::Operand(child, 2, false)])
                    }
                },
            }
        }

        Ok(())
    }

    /// Graphviz rendering of the syntax tree. Leaves are labelled
    /// `letter-position`, inner nodes `operator (min/max)` once the tree is
    /// numbered.
    pub fn to_dot(&self) -> String {
        let mut dot = String::new();
        dot.push_str("digraph expression {\n");
        dot.push_str("node [fontname=\"Helvetica,Arial,sans-serif\"]\n");

        let mut counter = 0;
        let mut stack = vec![(self.root, None)];

        while let Some((node, parent)) = stack.pop() {
            counter += 1;
            let id = counter;

            let kind = self.kind(node);
            let symbol = match kind {
                NodeKind::Epsilon => "ε".to_string(),
                NodeKind::Letter(letter) => letter.to_string(),
                NodeKind::Union(..) => "+".to_string(),
                NodeKind::Concat(..) => ".".to_string(),
                NodeKind::Star(_) => "*".to_string(),
            };

            let label = match (self.numbered, kind.is_leaf()) {
                (false, _) => symbol,
                (true, true) => format!("{}-{}", symbol, self.position_min(node)),
                (true, false) => format!(
                    "{} ({}/{})",
                    symbol,
                    self.position_min(node),
                    self.position_max(node)
                ),
            };

            dot.push_str(&format!("node{} [label=\"{}\"];\n", id, label));
            if let Some(parent) = parent {
                dot.push_str(&format!("node{} -> node{};\n", parent, id));
            }

            let children = kind.children().collect::<Vec<_>>();
            stack.extend(children.into_iter().rev().map(|child| (child, Some(id))));
        }

        dot.push_str("}\n");
        dot
    }
}

enum Pending {
    Node(NodeId),
    /// Node, precedence of the enclosing operator, whether it is the right
    /// operand.
    Operand(NodeId, u8, bool),
    Text(&'static str),
}

impl Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(self.root, f)
    }
}

/// Displays an expression that may denote the empty language, which is
/// printed as `∅`.
pub struct OptionalExpression<'a>(pub Option<&'a Expression>);

impl Display for OptionalExpression<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(expression) => write!(f, "{}", expression),
            None => write!(f, "∅"),
        }
    }
}

pub fn fmt_optional(expression: Option<&Expression>) -> String {
    OptionalExpression(expression).to_string()
}
