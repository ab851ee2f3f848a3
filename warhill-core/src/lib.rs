//! WARHILL Core - Entries, outcomes and scoring
//!
//! This crate provides the domain types shared by the tournament engine:
//! - Tournament configuration (arena limits, match mode, ranking metric)
//! - Outcome records for one pairing
//! - Entries and their per-opponent outcome mappings
//! - The weighted win/tie scoring formula
//! - Collaborator seams for the program parser and the combat simulator

pub mod config;
pub mod entry;
pub mod error;
pub mod outcome;
pub mod program;
pub mod scoring;
#[cfg(feature = "testing")]
pub mod testing;

// Re-exports for convenient access
pub use config::{CoreLimits, HillConfig, MatchMode, QuickEvalConfig, RankMetric};
pub use entry::Entry;
pub use error::{ConfigError, ParseError, ScoreError, SimulatorError};
pub use outcome::OutcomeRecord;
pub use program::{Backend, ParsedProgram, Parser, Simulator};
pub use scoring::{tally, ScoreSheet, WIN_WEIGHT, TIE_WEIGHT};
