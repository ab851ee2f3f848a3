//! Parsed programs and the collaborator seams around them
//!
//! The combat virtual machine and the assembler live outside this
//! workspace. The tournament engine only needs three things from them:
//! parse source into a `ParsedProgram`, run one match between two parsed
//! programs, and build fresh instances of both for worker threads.

use std::fmt;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::config::CoreLimits;
use crate::error::{ParseError, SimulatorError};
use crate::outcome::OutcomeRecord;

/// Validated executable form of a program
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedProgram {
    /// Program identity
    pub name: String,
    /// Canonical instruction text, one entry per instruction
    pub instructions: Vec<String>,
}

impl ParsedProgram {
    pub fn new(name: impl Into<String>, instructions: Vec<String>) -> Self {
        Self {
            name: name.into(),
            instructions,
        }
    }

    /// Number of instructions
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Distinct instruction forms appearing in the program
    pub fn symbols(&self) -> FxHashSet<&str> {
        self.instructions.iter().map(String::as_str).collect()
    }
}

impl fmt::Display for ParsedProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, ";name {}", self.name)?;
        for instruction in &self.instructions {
            writeln!(f, "{}", instruction)?;
        }
        Ok(())
    }
}

/// Converts source text into a `ParsedProgram`
pub trait Parser: Send {
    /// Parse `source`, enforcing the length and format rules of `limits`
    fn parse(&self, name: &str, source: &str, limits: &CoreLimits)
        -> Result<ParsedProgram, ParseError>;
}

/// Executes matches between two parsed programs
///
/// Instances are not assumed to be reentrant; each worker owns one.
pub trait Simulator: Send {
    /// Run `rounds` rounds and return the outcome from `first`'s side
    fn run(
        &mut self,
        first: &ParsedProgram,
        second: &ParsedProgram,
        limits: &CoreLimits,
        rounds: u32,
    ) -> Result<OutcomeRecord, SimulatorError>;

    /// Run one averaged match covering every starting offset and return
    /// the round-normalized outcome from `first`'s side
    fn run_averaged(
        &mut self,
        first: &ParsedProgram,
        second: &ParsedProgram,
        limits: &CoreLimits,
    ) -> Result<OutcomeRecord, SimulatorError>;
}

/// Factory for private parser and simulator instances
pub trait Backend: Sync {
    type Sim: Simulator;
    type Parse: Parser;

    fn simulator(&self, limits: &CoreLimits) -> Self::Sim;

    fn parser(&self, limits: &CoreLimits) -> Self::Parse;
}
