use ratexp_macros::config;
use serde::{Deserialize, Serialize};

use crate::logger::LogLevel;

pub trait IntoOr<T> {
    fn into_or(self, or: T) -> T;
}

impl<T> IntoOr<Option<T>> for Option<T> {
    fn into_or(self, or: Option<T>) -> Option<T> {
        match self {
            Some(t) => Some(t),
            None => or,
        }
    }
}

impl<T> IntoOr<T> for Option<T> {
    fn into_or(self, or: T) -> T {
        self.unwrap_or(or)
    }
}

pub trait GeneralConfig {
    fn logger(&self) -> &LoggerConfig;
}

config! {
    pub struct LoggerConfig {
        enabled: bool = false,
        log_file: bool = false,
        log_level: LogLevel = LogLevel::Warn,
    }
}

config! {
    pub struct RatexpConfig {
        arden: ArdenConfig (Option<PartialArdenConfig> = ArdenConfig::default()),
        equivalence: EquivalenceConfig (Option<PartialEquivalenceConfig> = EquivalenceConfig::default()),
        logger: LoggerConfig (Option<PartialLoggerConfig> = LoggerConfig::default()),
    }
}

impl GeneralConfig for RatexpConfig {
    fn logger(&self) -> &LoggerConfig {
        &self.logger
    }
}

config! {
    pub struct ArdenConfig {
        minimize: bool = true,
        trace_system: bool = false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquivalenceMode {
    /// `L(left) ⊆ L(right)`
    Inclusion,
    /// Inclusion in both directions.
    Equivalence,
}

config! {
    pub struct EquivalenceConfig {
        mode: EquivalenceMode = EquivalenceMode::Inclusion,
        counterexample: bool = true,
    }
}
