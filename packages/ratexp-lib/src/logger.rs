use std::{
    fmt::Display,
    fs::{self, File},
    io::{BufWriter, Write},
    path::PathBuf,
    str::FromStr,
    sync::Mutex,
};

use chrono::Local;
use colored::{ColoredString, Colorize};
use serde::{Deserialize, Serialize};

use crate::config::LoggerConfig;

/// Ordered from most to least verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn tag(&self) -> ColoredString {
        match self {
            LogLevel::Debug => "DBG".bright_cyan(),
            LogLevel::Info => "INF".bright_green(),
            LogLevel::Warn => "WAR".yellow(),
            LogLevel::Error => "ERR".bright_red(),
        }
    }

    pub fn tag_no_color(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DBG",
            LogLevel::Info => "INF",
            LogLevel::Warn => "WAR",
            LogLevel::Error => "ERR",
        }
    }

    /// Whether a logger configured with `self` prints a message of `message`
    /// level.
    pub fn shows(&self, message: LogLevel) -> bool {
        message >= *self
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" | "dbg" => Ok(LogLevel::Debug),
            "info" | "inf" => Ok(LogLevel::Info),
            "warn" | "warning" | "war" => Ok(LogLevel::Warn),
            "error" | "err" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "Debug"),
            LogLevel::Info => write!(f, "Info"),
            LogLevel::Warn => write!(f, "Warn"),
            LogLevel::Error => write!(f, "Error"),
        }
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Human readable solver log. Messages at or above `level` go to stderr,
/// every message goes to the log file when one is configured.
#[derive(Debug)]
pub struct Logger {
    level: LogLevel,
    name: String,
    file: Option<Mutex<BufWriter<File>>>,
}

impl Logger {
    pub fn new(
        level: LogLevel,
        name: impl Into<String>,
        log_file_path: Option<PathBuf>,
    ) -> anyhow::Result<Self> {
        let file = match log_file_path {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                Some(Mutex::new(BufWriter::new(File::create(path)?)))
            }
            None => None,
        };

        Ok(Logger {
            level,
            name: name.into(),
            file,
        })
    }

    /// Returns `None` when logging is disabled in the config.
    pub fn from_config(config: &LoggerConfig, name: &str) -> anyhow::Result<Option<Self>> {
        if !*config.get_enabled() {
            return Ok(None);
        }

        let log_file_path = config.get_log_file().then(|| {
            PathBuf::from(format!(
                "./logs/{}_{}.txt",
                name,
                Local::now().format("%Y-%m-%d_%H-%M-%S")
            ))
        });

        Logger::new(*config.get_log_level(), name, log_file_path).map(Some)
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        self.writeln_to_file(&format!(
            "[{}] {}: {}",
            level.tag_no_color(),
            self.name,
            message
        ));

        if self.level.shows(level) {
            eprintln!(
                "[{}] {} {}",
                level.tag(),
                format!("{}:", self.name).dimmed(),
                message
            );
        }
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    /// Logs a title line followed by the indented lines of `body`.
    pub fn block(&self, level: LogLevel, title: &str, body: &impl Display) {
        let mut message = title.to_string();
        for line in body.to_string().lines() {
            message.push_str("\n  ");
            message.push_str(line);
        }
        self.log(level, &message);
    }

    fn writeln_to_file(&self, line: &str) {
        let Some(file) = &self.file else {
            return;
        };

        let Ok(mut file) = file.lock() else {
            return;
        };

        if let Err(error) = writeln!(file, "{}", line).and_then(|_| file.flush()) {
            tracing::warn!(%error, "failed to write to the log file");
        }
    }

    pub fn object<'a>(&'a self, name: &'a str) -> ObjectBuilder<'a> {
        ObjectBuilder::new(name, self)
    }
}

/// Collects named fields and logs them as one `name { .. }` block.
#[derive(Debug, Clone)]
pub struct ObjectBuilder<'a> {
    logger: &'a Logger,
    name: &'a str,
    fields: Vec<(&'a str, String)>,
}

impl<'a> ObjectBuilder<'a> {
    fn new(name: &'a str, logger: &'a Logger) -> Self {
        ObjectBuilder {
            logger,
            name,
            fields: vec![],
        }
    }

    pub fn add_field(mut self, name: &'a str, value: impl Display) -> Self {
        self.fields.push((name, value.to_string()));

        self
    }

    fn build(&self) -> String {
        let mut result = format!("{} {{", self.name);
        for (name, value) in &self.fields {
            result.push_str(&format!("\n  {}: {}", name, value));
        }
        result.push_str("\n}");
        result
    }

    pub fn log(&self, level: LogLevel) {
        self.logger.log(level, &self.build());
    }
}
