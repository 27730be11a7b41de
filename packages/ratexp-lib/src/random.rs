//! Seeded random expression trees.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::expression::Expression;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomOptions {
    pub seed: u64,
    pub count: usize,
    /// Maximum height of a generated tree.
    pub depth: usize,
    /// Chance that a leaf is `ε` instead of a letter.
    pub epsilon_probability: f64,
}

impl RandomOptions {
    pub fn new(seed: u64, count: usize) -> Self {
        RandomOptions {
            seed,
            count,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_epsilon_probability(mut self, epsilon_probability: f64) -> Self {
        self.epsilon_probability = epsilon_probability;
        self
    }
}

impl Default for RandomOptions {
    fn default() -> Self {
        RandomOptions {
            seed: 0,
            count: 10,
            depth: 4,
            epsilon_probability: 0.05,
        }
    }
}

/// `options.count` random expressions over `alphabet`. The same options
/// always produce the same expressions.
pub fn random_expressions(options: &RandomOptions, alphabet: &[char]) -> Vec<Expression> {
    let mut rng = StdRng::seed_from_u64(options.seed);

    (0..options.count)
        .map(|_| {
            random_expression(
                &mut rng,
                alphabet,
                options.depth,
                options.epsilon_probability,
            )
        })
        .collect()
}

pub fn random_expression<R: Rng + ?Sized>(
    rng: &mut R,
    alphabet: &[char],
    depth: usize,
    epsilon_probability: f64,
) -> Expression {
    assert!(!alphabet.is_empty(), "Alphabet must not be empty");

    if depth == 0 || rng.random_bool(0.2) {
        return if rng.random_bool(epsilon_probability) {
            Expression::epsilon()
        } else {
            Expression::letter(alphabet[rng.random_range(0..alphabet.len())])
        };
    }

    match rng.random_range(0..3) {
        0 => Expression::union(
            random_expression(rng, alphabet, depth - 1, epsilon_probability),
            random_expression(rng, alphabet, depth - 1, epsilon_probability),
        ),
        1 => Expression::concat(
            random_expression(rng, alphabet, depth - 1, epsilon_probability),
            random_expression(rng, alphabet, depth - 1, epsilon_probability),
        ),
        _ => Expression::star(random_expression(
            rng,
            alphabet,
            depth - 1,
            epsilon_probability,
        )),
    }
}
