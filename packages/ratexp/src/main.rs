use clap::{Parser, Subcommand};
use ratexp_lib::{
    automaton::{
        Alphabet, InitializedAutomaton, algorithms::AutomatonAlgorithms, nfa::NFA,
    },
    config::{EquivalenceMode, GeneralConfig, LoggerConfig, RatexpConfig},
    expression::{Expression, display::OptionalExpression},
    glushkov::glushkov,
    logger::Logger,
    random::{RandomOptions, random_expressions},
    solver::{
        SerializableSolverResult, SolverStatus, arden::ArdenSolver,
        equivalence::{EquivalenceChecker, EquivalenceStatistics},
    },
};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "ratexp")]
#[command(version = "0.1")]
#[command(about = "Translate between rational expressions and finite automata", long_about = None)]
struct Args {
    /// TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the Glushkov automaton of an expression.
    Glushkov {
        expression: String,
        /// Print a graphviz graph instead of a transition list.
        #[arg(long)]
        dot: bool,
    },
    /// Build the Glushkov automaton and solve it back into an expression.
    Arden { expression: String },
    /// Check whether the language of LEFT is contained in the language of RIGHT.
    Same {
        left: String,
        right: String,
        /// Check equality of the languages instead of inclusion.
        #[arg(short, long)]
        equivalence: bool,
    },
    /// Print the numbered syntax tree as a graphviz graph.
    Tree { expression: String },
    /// Check whether a word belongs to the language of an expression.
    Match { expression: String, word: String },
    /// Print seeded random expressions.
    Random {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 10)]
        count: usize,
        #[arg(long, default_value_t = 4)]
        depth: usize,
        #[arg(long, default_value = "ab")]
        alphabet: String,
    },
}

#[derive(Debug, Serialize)]
struct SameOutput {
    #[serde(flatten)]
    result: SerializableSolverResult<EquivalenceStatistics>,
    counterexample: Option<String>,
}

fn init_tracing(config: &LoggerConfig) {
    if !*config.get_enabled() {
        return;
    }

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::from(*config.get_log_level()))
        .with_writer(std::io::stderr)
        .init();
}

fn print_transitions(automaton: &NFA<usize, char>) {
    println!("alphabet: {:?}", automaton.alphabet());
    println!(
        "initial: {:?}",
        automaton
            .initial_states()
            .iter()
            .map(|state| state.index())
            .collect::<Vec<_>>()
    );
    println!(
        "final: {:?}",
        automaton
            .accepting_states()
            .iter()
            .map(|state| state.index())
            .collect::<Vec<_>>()
    );
    for (from, letter, to) in automaton.transitions() {
        println!("{} -{}-> {}", from.index(), letter, to.index());
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = RatexpConfig::from_optional_file(args.config.as_deref())?;

    init_tracing(config.logger());
    let logger = Logger::from_config(config.logger(), "ratexp")?;

    match args.command {
        Command::Glushkov { expression, dot } => {
            let mut expression = Expression::parse(&expression)?;
            let automaton = glushkov(&mut expression);

            if dot {
                print!("{}", automaton.to_graphviz());
            } else {
                print_transitions(&automaton);
            }
        }
        Command::Arden { expression } => {
            let mut expression = Expression::parse(&expression)?;
            let automaton = glushkov(&mut expression);
            let solved = ArdenSolver::new(config.get_arden().clone(), logger.as_ref())
                .solve(&automaton);

            println!("{}", OptionalExpression(solved.as_ref()));
        }
        Command::Same {
            left,
            right,
            equivalence,
        } => {
            let left = Expression::parse(&left)?;
            let right = Expression::parse(&right)?;

            let mut equivalence_config = config.get_equivalence().clone();
            if equivalence {
                equivalence_config.set_mode(EquivalenceMode::Equivalence);
            }

            let result = EquivalenceChecker::new(equivalence_config, logger.as_ref())
                .check(&left, &right);
            let counterexample = match &result.status {
                SolverStatus::False(Some(word)) => Some(word.iter().collect::<String>()),
                _ => None,
            };

            let output = SameOutput {
                result: SerializableSolverResult::from(result),
                counterexample,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Tree { expression } => {
            let mut expression = Expression::parse(&expression)?;
            expression.number();
            print!("{}", expression.to_dot());
        }
        Command::Match { expression, word } => {
            let expression = Expression::parse(&expression)?;
            let word = word.chars().filter(|c| *c != 'ε').collect::<Vec<_>>();
            println!("{}", expression.matches(&word));
        }
        Command::Random {
            seed,
            count,
            depth,
            alphabet,
        } => {
            let alphabet = alphabet.chars().collect::<Vec<_>>();
            if alphabet.is_empty() {
                anyhow::bail!("The alphabet must contain at least one letter");
            }

            let options = RandomOptions::new(seed, count).with_depth(depth);
            for expression in random_expressions(&options, &alphabet) {
                println!("{}", expression);
            }
        }
    }

    Ok(())
}
