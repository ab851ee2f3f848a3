//! Error types for configuration, collaborators and scoring

use thiserror::Error;

/// Invalid or unreadable tournament configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown ranking metric: {0} (expected score, novelty-distance or novelty-entropy)")]
    UnknownMetric(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed configuration: {0}")]
    Format(#[from] serde_json::Error),
}

/// Program source rejected by the parser
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("{name}: program has {length} instructions, limit is {limit}")]
    TooLong {
        name: String,
        length: usize,
        limit: usize,
    },

    #[error("{name}: program is empty")]
    Empty { name: String },

    #[error("{name}: line {line}: {message}")]
    Malformed {
        name: String,
        line: usize,
        message: String,
    },
}

/// Fault inside the combat simulator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("simulator fault running {first} vs {second}: {message}")]
pub struct SimulatorError {
    pub first: String,
    pub second: String,
    pub message: String,
}

impl SimulatorError {
    pub fn new(first: &str, second: &str, message: impl Into<String>) -> Self {
        Self {
            first: first.to_string(),
            second: second.to_string(),
            message: message.into(),
        }
    }
}

/// Scoring could not produce a number
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("no recorded outcomes for the selected opponents")]
    NoData,

    #[error("no outcome recorded against {0}")]
    UnknownOpponent(String),

    #[error("weighted score divisor must be non-zero")]
    ZeroDivisor,
}
