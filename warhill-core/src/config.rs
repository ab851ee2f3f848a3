//! Configuration types for hill tournaments
//!
//! A `HillConfig` is built once per run and never mutated while a
//! tournament pass is in progress.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Arena parameters handed to the parser and the simulator
///
/// These must be identical for every entry on a hill, otherwise recorded
/// outcomes are not comparable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreLimits {
    /// Number of cells in the arena
    pub arena_size: u32,
    /// Maximum live processes per program
    pub max_processes: u32,
    /// Cycle budget before a round is declared a tie
    pub max_cycles: u32,
    /// Minimum distance between the two programs at load time
    pub min_separation: u32,
    /// Maximum program length in instructions
    pub max_length: u32,
}

impl Default for CoreLimits {
    fn default() -> Self {
        Self {
            arena_size: 800,
            max_processes: 800,
            max_cycles: 8000,
            min_separation: 20,
            max_length: 20,
        }
    }
}

/// How a single match is executed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum MatchMode {
    /// One averaged run covering every legal starting offset
    Probabilistic,
    /// A fixed number of rounds per match
    Fixed { rounds: u32 },
}

/// Which derived field orders the hill
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankMetric {
    /// Weighted win/tie score
    #[serde(rename = "score")]
    Score,
    /// Mean weighted distance between outcome vectors
    #[serde(rename = "novelty-distance", alias = "d_avg")]
    NoveltyDistance,
    /// Marginal entropy relative to the next-better entry
    #[serde(rename = "novelty-entropy", alias = "d_entropy")]
    NoveltyEntropy,
}

impl Default for RankMetric {
    fn default() -> Self {
        RankMetric::Score
    }
}

impl RankMetric {
    /// Selector string as used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            RankMetric::Score => "score",
            RankMetric::NoveltyDistance => "novelty-distance",
            RankMetric::NoveltyEntropy => "novelty-entropy",
        }
    }

    /// Whether the metric must be recomputed after every membership change
    pub fn is_novelty(&self) -> bool {
        !matches!(self, RankMetric::Score)
    }
}

impl FromStr for RankMetric {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "score" => Ok(RankMetric::Score),
            "novelty-distance" | "d_avg" => Ok(RankMetric::NoveltyDistance),
            "novelty-entropy" | "d_entropy" => Ok(RankMetric::NoveltyEntropy),
            other => Err(ConfigError::UnknownMetric(other.to_string())),
        }
    }
}

impl fmt::Display for RankMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings for the abbreviated accept/reject pass
///
/// Deliberately has no `Default`: both values must come from the caller.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuickEvalConfig {
    /// Candidates must score strictly above this to pass; also the
    /// viability floor for the top entry under the entropy metric
    pub min_score: f64,
    /// Rounds per match during quick evaluation
    pub rounds: u32,
}

/// Tournament configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HillConfig {
    /// Arena limits shared by parser and simulator
    #[serde(default)]
    pub limits: CoreLimits,
    /// Match execution mode
    pub match_mode: MatchMode,
    /// Active ranking metric
    #[serde(default)]
    pub metric: RankMetric,
    /// Population cap
    #[serde(default = "default_hill_size")]
    pub hill_size: usize,
    /// Quick evaluation settings
    pub quick: QuickEvalConfig,
    /// Worker count for parallel dispatch (None = inline)
    #[serde(default)]
    pub workers: Option<usize>,
}

fn default_hill_size() -> usize {
    50
}

impl HillConfig {
    /// Create a config with default limits, score ranking and a cap of 50
    pub fn new(match_mode: MatchMode, quick: QuickEvalConfig) -> Self {
        Self {
            limits: CoreLimits::default(),
            match_mode,
            metric: RankMetric::Score,
            hill_size: default_hill_size(),
            quick,
            workers: None,
        }
    }

    /// Set arena limits
    pub fn with_limits(mut self, limits: CoreLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Set ranking metric
    pub fn with_metric(mut self, metric: RankMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Set population cap
    pub fn with_hill_size(mut self, hill_size: usize) -> Self {
        self.hill_size = hill_size;
        self
    }

    /// Dispatch matches through a pool of `workers` threads
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Rounds represented by one match
    ///
    /// In probabilistic mode a single averaged run covers every starting
    /// offset twice, so the count is derived from the arena geometry.
    ///
    /// Saturates at `u32::MAX`; `validate` rejects limits that would.
    pub fn rounds(&self) -> u32 {
        match self.match_mode {
            MatchMode::Fixed { rounds } => rounds,
            MatchMode::Probabilistic => probabilistic_rounds(&self.limits).unwrap_or(u32::MAX),
        }
    }

    /// Check limits for values the simulator cannot honor
    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = &self.limits;
        if limits.arena_size == 0 {
            return Err(ConfigError::Invalid("arena_size must be positive".into()));
        }
        if limits.max_length == 0 {
            return Err(ConfigError::Invalid("max_length must be positive".into()));
        }
        if limits.min_separation >= limits.arena_size {
            return Err(ConfigError::Invalid(format!(
                "min_separation {} must be below arena_size {}",
                limits.min_separation, limits.arena_size
            )));
        }
        match self.match_mode {
            MatchMode::Fixed { rounds: 0 } => {
                return Err(ConfigError::Invalid("fixed rounds must be positive".into()));
            }
            MatchMode::Probabilistic if probabilistic_rounds(limits).is_none() => {
                return Err(ConfigError::Invalid(format!(
                    "arena_size {} with min_separation {} overflows the round count",
                    limits.arena_size, limits.min_separation
                )));
            }
            _ => {}
        }
        if self.quick.rounds == 0 {
            return Err(ConfigError::Invalid("quick rounds must be positive".into()));
        }
        if self.workers == Some(0) {
            return Err(ConfigError::Invalid("workers must be positive".into()));
        }
        Ok(())
    }

    /// Load and validate from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: HillConfig = serde_json::from_str(&content)?;
        config.validate()?;
        tracing::debug!("Loaded hill config from {}", path.display());
        Ok(config)
    }

    /// Save to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Every legal starting offset, once from each side
fn probabilistic_rounds(limits: &CoreLimits) -> Option<u32> {
    limits
        .arena_size
        .saturating_sub(limits.min_separation)
        .checked_add(1)?
        .checked_mul(2)
}
