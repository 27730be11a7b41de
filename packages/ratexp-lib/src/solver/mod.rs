use serde::{Deserialize, Serialize};

pub mod arden;
pub mod equivalence;
pub mod system;

/// Outcome of a decision procedure: `True` carries a proof, `False` a
/// refutation (for example a counterexample word).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverStatus<T = (), F = ()> {
    True(T),
    False(F),
}

impl<T, F> SolverStatus<T, F> {
    pub fn is_success(&self) -> bool {
        matches!(self, SolverStatus::True(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, SolverStatus::False(_))
    }

    pub fn unwrap_success(self) -> T {
        match self {
            SolverStatus::True(t) => t,
            SolverStatus::False(_) => panic!("Called unwrap_success on a non-successful SolverStatus"),
        }
    }

    pub fn unwrap_failure(self) -> F {
        match self {
            SolverStatus::False(f) => f,
            SolverStatus::True(_) => panic!("Called unwrap_failure on a non-failure SolverStatus"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverResult<T = (), F = (), Statistics = ()> {
    pub status: SolverStatus<T, F>,
    pub statistics: Statistics,
}

impl<T, F, Statistics> SolverResult<T, F, Statistics> {
    pub fn new(status: SolverStatus<T, F>, statistics: Statistics) -> Self {
        Self { status, statistics }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn is_failure(&self) -> bool {
        self.status.is_failure()
    }

    pub fn unwrap_success(self) -> T {
        self.status.unwrap_success()
    }

    pub fn unwrap_failure(self) -> F {
        self.status.unwrap_failure()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SerializableSolverStatus {
    True,
    False,
}

impl<T, F> From<&SolverStatus<T, F>> for SerializableSolverStatus {
    fn from(status: &SolverStatus<T, F>) -> Self {
        match status {
            SolverStatus::True(_) => SerializableSolverStatus::True,
            SolverStatus::False(_) => SerializableSolverStatus::False,
        }
    }
}

/// A [SolverResult] with the payloads dropped, for printing as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableSolverResult<Statistics = ()> {
    pub status: SerializableSolverStatus,
    pub statistics: Statistics,
}

impl<T, F, Statistics> From<SolverResult<T, F, Statistics>>
    for SerializableSolverResult<Statistics>
{
    fn from(result: SolverResult<T, F, Statistics>) -> Self {
        SerializableSolverResult {
            status: (&result.status).into(),
            statistics: result.statistics,
        }
    }
}
