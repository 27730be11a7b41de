//! Linear equation systems over rational expressions.
//!
//! A system of size `n` has one row per variable `X0..Xn-1`. Row `i` stands
//! for `Xi = Σj cell[i][j].Xj + cell[i][n]`, where column `n` holds the
//! constant term and an absent cell is the empty language.

use std::fmt::{self, Display};

use crate::{
    automaton::{GIndex, InitializedAutomaton},
    expression::{self, Expression, NodeKind},
    logger::{LogLevel, Logger},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquationSystem {
    size: usize,
    cells: Vec<Vec<Option<Expression>>>,
}

impl EquationSystem {
    /// A system of `size` equations with every cell absent.
    pub fn new(size: usize) -> Self {
        EquationSystem {
            size,
            cells: (0..size).map(|_| vec![None; size + 1]).collect(),
        }
    }

    /// Reads the system off an automaton: state `i` becomes variable `Xi`, a
    /// transition `i -a-> j` adds `a` to cell `[i][j]` and an accepting state
    /// gets the constant `ε`. State indices must be compact.
    pub fn from_automaton<A>(automaton: &A) -> Self
    where
        A: InitializedAutomaton<Letter = char>,
    {
        let size = automaton.node_count();
        let mut system = EquationSystem::new(size);

        for state in automaton.iter_node_indices() {
            let row = state.index();

            for (letter, target) in automaton.transitions_from(state) {
                let cell = &mut system.cells[row][target.index()];
                *cell = expression::union(cell.take(), Some(Expression::letter(*letter)));
            }

            if automaton.is_accepting(state) {
                system.cells[row][size] = Some(Expression::epsilon());
            }
        }

        system
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&Expression> {
        self.cells[row][column].as_ref()
    }

    /// Replaces a cell, returning its previous content.
    pub fn set(&mut self, row: usize, column: usize, value: Option<Expression>) -> Option<Expression> {
        std::mem::replace(&mut self.cells[row][column], value)
    }

    pub fn take(&mut self, row: usize, column: usize) -> Option<Expression> {
        self.cells[row][column].take()
    }

    pub fn constant(&self, row: usize) -> Option<&Expression> {
        self.get(row, self.size)
    }

    /// Number of present cells.
    pub fn live_cell_count(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| cell.is_some()).count()
    }

    /// Every row refers to no variable, only to its constant.
    pub fn is_solved(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row[..self.size].iter().all(Option::is_none))
    }

    /// Arden's lemma on row `variable`: `X = r.X + t` becomes `X = r*.t`.
    /// Every other present cell of the row, the constant included, is
    /// prefixed with `r*` and the self reference is removed. Without a self
    /// reference the row is left unchanged, an absent constant stays absent.
    pub fn apply_arden(&mut self, variable: usize) {
        let Some(repeated) = self.cells[variable][variable].take() else {
            return;
        };
        let star = Expression::star(repeated);

        for cell in self.cells[variable].iter_mut() {
            if let Some(value) = cell.take() {
                *cell = Some(Expression::concat(star.clone(), value));
            }
        }
    }

    /// Replaces `Xvariable` in `row` by the current right hand side of
    /// `variable`: with `op = cell[row][variable]`, every present cell `k` of
    /// row `variable` adds `op.cell[variable][k]` to cell `[row][k]`.
    pub fn substitute(&mut self, row: usize, variable: usize) {
        assert_ne!(row, variable, "Cannot substitute a variable into its own row");

        let Some(operand) = self.cells[row][variable].take() else {
            return;
        };

        for column in 0..=self.size {
            let Some(value) = self.cells[variable][column].clone() else {
                continue;
            };

            let term = Expression::concat(operand.clone(), value);
            let cell = &mut self.cells[row][column];
            *cell = expression::union(cell.take(), Some(term));
        }
    }

    /// Gaussian elimination. The downward pass applies Arden to the last row
    /// and substitutes it into every earlier row, leaving row `i` referring to
    /// variables below `i` only; the upward pass then back-substitutes, so
    /// every row ends up as a constant.
    ///
    /// Both passes together perform O(n³) cell operations, and since every
    /// substitution concatenates copies of existing cells, expression sizes
    /// can grow multiplicatively with each eliminated variable.
    pub fn solve(&mut self, logger: Option<&Logger>) {
        let n = self.size;
        self.trace(logger, "initial system");

        for variable in (0..n).rev() {
            self.apply_arden(variable);
            self.trace(logger, &format!("Arden on X{}", variable));

            for row in 0..variable {
                self.substitute(row, variable);
            }
            self.trace(logger, &format!("substituted X{} downwards", variable));
        }

        for variable in 0..n.saturating_sub(1) {
            for row in variable + 1..n {
                self.substitute(row, variable);
            }
            self.trace(logger, &format!("substituted X{} upwards", variable));
        }

        tracing::debug!(
            size = n,
            live_cells = self.live_cell_count(),
            "solved equation system"
        );
    }

    fn trace(&self, logger: Option<&Logger>, title: &str) {
        if let Some(logger) = logger {
            logger.block(LogLevel::Debug, title, self);
        }
    }
}

impl Display for EquationSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, row) in self.cells.iter().enumerate() {
            write!(f, "X{} = ", index)?;

            let mut terms = Vec::new();
            for (column, cell) in row[..self.size].iter().enumerate() {
                if let Some(value) = cell {
                    if matches!(value.kind(value.root()), NodeKind::Union(..)) {
                        terms.push(format!("({}) X{}", value, column));
                    } else {
                        terms.push(format!("{} X{}", value, column));
                    }
                }
            }
            if let Some(constant) = &row[self.size] {
                terms.push(constant.to_string());
            }

            if terms.is_empty() {
                writeln!(f, "∅")?;
            } else {
                writeln!(f, "{}", terms.join(" + "))?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Expression {
        Expression::parse(input).unwrap()
    }

    #[test]
    fn arden_prefixes_present_cells() {
        // X0 = a X0 + b X1 + ε
        let mut system = EquationSystem::new(2);
        system.set(0, 0, Some(parse("a")));
        system.set(0, 1, Some(parse("b")));
        system.set(0, 2, Some(Expression::epsilon()));

        system.apply_arden(0);

        assert_eq!(system.get(0, 0), None);
        assert_eq!(system.get(0, 1), Some(&parse("a*.b")));
        assert_eq!(system.constant(0), Some(&parse("a*")));
    }

    #[test]
    fn arden_keeps_absent_constant() {
        let mut system = EquationSystem::new(1);
        system.set(0, 0, Some(parse("a")));

        system.apply_arden(0);

        assert_eq!(system.live_cell_count(), 0);
    }

    #[test]
    fn substitution_unions_terms() {
        // X0 = a X1 + c, X1 = b
        let mut system = EquationSystem::new(2);
        system.set(0, 1, Some(parse("a")));
        system.set(0, 2, Some(parse("c")));
        system.set(1, 2, Some(parse("b")));

        system.substitute(0, 1);

        assert_eq!(system.get(0, 1), None);
        assert_eq!(system.constant(0), Some(&parse("c+a.b")));
    }

    #[test]
    fn display_rows() {
        let mut system = EquationSystem::new(2);
        system.set(0, 1, Some(parse("a+b")));
        system.set(0, 2, Some(Expression::epsilon()));

        assert_eq!(system.to_string(), "X0 = (a+b) X1 + ε\nX1 = ∅\n");
    }
}
