//! Tournament errors

use thiserror::Error;
use warhill_core::{ConfigError, ParseError, ScoreError, SimulatorError};

/// Anything that aborts a tournament pass
#[derive(Debug, Error)]
pub enum HillError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Simulator(#[from] SimulatorError),

    #[error(transparent)]
    Score(#[from] ScoreError),

    #[error("{0} has no parsed program")]
    NotParsed(String),

    #[error("worker pool failed: {0}")]
    WorkerPool(String),

    #[error("expected {expected} match results, received {received}")]
    IncompleteResults { expected: usize, received: usize },
}
