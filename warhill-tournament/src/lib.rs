//! WARHILL Tournament - Scheduling, ranking and pruning of a hill
//!
//! This crate provides the tournament engine:
//! - Match scheduling with memoized outcomes (round-robin and gauntlet)
//! - A worker pool for independent matches
//! - Novelty rankings (outcome distance, marginal entropy)
//! - The hill: score, sort and prune one entry at a time
//! - Loading and saving entries on disk
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: Hill::score_hill, Hill::score_gauntlet (orchestration)
//! - Level 2: schedule, dispatch, rank, prune (phases)
//! - Level 3: pair enumeration, distance and entropy computation (steps)
//! - Level 4: statistics, comparison, configuration

mod entropy;
mod error;
mod hill;
mod novelty;
mod pool;
mod ranking;
mod scheduler;
mod stats;
mod storage;

#[cfg(test)]
mod testing;

pub use entropy::{calculate_entropy_delta, SymbolTable, ENTROPY_SENTINEL};
pub use error::HillError;
pub use hill::{Hill, HillState};
pub use novelty::{calculate_distance, pairwise_distance};
pub use pool::WorkerPool;
pub use ranking::{compare_entries, sort_entries};
pub use scheduler::{MatchReport, MatchTask, Pairing, RunPlan};
pub use stats::{median, HillStats};
