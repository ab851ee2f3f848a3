//! Scripted parser, simulator and backend for tests
//!
//! Enabled by the `testing` feature. Outcomes come from a plain rule
//! function, and every backend counts simulator construction and each
//! invocation style separately.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::{
    Backend, CoreLimits, OutcomeRecord, ParseError, ParsedProgram, Parser, Simulator,
    SimulatorError,
};

pub type Rule = fn(&ParsedProgram, &ParsedProgram) -> OutcomeRecord;

/// The program named first in a pairing wins its single round
pub fn first_named_wins(_first: &ParsedProgram, _second: &ParsedProgram) -> OutcomeRecord {
    OutcomeRecord::new(1, 0, 0)
}

/// Outcome depends on the instruction counts of both programs
pub fn longer_wins(first: &ParsedProgram, second: &ParsedProgram) -> OutcomeRecord {
    let (a, b) = (first.len() as u32, second.len() as u32);
    OutcomeRecord::new(a, b, 1)
}

/// Deterministic, uneven outcomes derived from both names
pub fn name_duel(first: &ParsedProgram, second: &ParsedProgram) -> OutcomeRecord {
    let seed = |p: &ParsedProgram| p.name.bytes().map(u32::from).sum::<u32>();
    let (a, b) = (seed(first), seed(second));
    OutcomeRecord::new((a * 3 + b) % 7, (b * 3 + a) % 7, (a + b) % 3)
}

/// One instruction per non-empty line
pub struct LineParser;

impl Parser for LineParser {
    fn parse(
        &self,
        name: &str,
        source: &str,
        limits: &CoreLimits,
    ) -> Result<ParsedProgram, ParseError> {
        let instructions: Vec<String> = source
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        if instructions.is_empty() {
            return Err(ParseError::Empty {
                name: name.to_string(),
            });
        }
        if instructions.len() > limits.max_length as usize {
            return Err(ParseError::TooLong {
                name: name.to_string(),
                length: instructions.len(),
                limit: limits.max_length as usize,
            });
        }
        Ok(ParsedProgram::new(name, instructions))
    }
}

/// Counters shared by a backend and every simulator it builds
#[derive(Clone, Default)]
struct Counters {
    matches: Arc<AtomicUsize>,
    counted: Arc<AtomicUsize>,
    averaged: Arc<AtomicUsize>,
    built: Arc<AtomicUsize>,
}

pub struct ScriptedSimulator {
    rule: Rule,
    counters: Counters,
    fail_on: Option<String>,
}

impl ScriptedSimulator {
    fn play(
        &mut self,
        first: &ParsedProgram,
        second: &ParsedProgram,
    ) -> Result<OutcomeRecord, SimulatorError> {
        self.counters.matches.fetch_add(1, Ordering::SeqCst);
        if let Some(name) = &self.fail_on {
            if &first.name == name || &second.name == name {
                return Err(SimulatorError::new(&first.name, &second.name, "scripted fault"));
            }
        }
        Ok((self.rule)(first, second))
    }
}

impl Simulator for ScriptedSimulator {
    fn run(
        &mut self,
        first: &ParsedProgram,
        second: &ParsedProgram,
        _limits: &CoreLimits,
        _rounds: u32,
    ) -> Result<OutcomeRecord, SimulatorError> {
        self.counters.counted.fetch_add(1, Ordering::SeqCst);
        self.play(first, second)
    }

    fn run_averaged(
        &mut self,
        first: &ParsedProgram,
        second: &ParsedProgram,
        _limits: &CoreLimits,
    ) -> Result<OutcomeRecord, SimulatorError> {
        self.counters.averaged.fetch_add(1, Ordering::SeqCst);
        self.play(first, second)
    }
}

/// Backend whose simulators share one set of counters
pub struct ScriptedBackend {
    rule: Rule,
    counters: Counters,
    fail_on: Option<String>,
}

impl ScriptedBackend {
    pub fn new(rule: Rule) -> Self {
        Self {
            rule,
            counters: Counters::default(),
            fail_on: None,
        }
    }

    /// Fault on any match involving `name`
    pub fn failing_on(mut self, name: &str) -> Self {
        self.fail_on = Some(name.to_string());
        self
    }

    /// Matches played, in either style
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.counters.matches)
    }

    /// Matches played through `Simulator::run`
    pub fn counted_runs(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.counters.counted)
    }

    /// Matches played through `Simulator::run_averaged`
    pub fn averaged_runs(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.counters.averaged)
    }

    /// Simulators handed out by `Backend::simulator`
    pub fn simulators_built(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.counters.built)
    }
}

impl Backend for ScriptedBackend {
    type Sim = ScriptedSimulator;
    type Parse = LineParser;

    fn simulator(&self, _limits: &CoreLimits) -> ScriptedSimulator {
        self.counters.built.fetch_add(1, Ordering::SeqCst);
        ScriptedSimulator {
            rule: self.rule,
            counters: self.counters.clone(),
            fail_on: self.fail_on.clone(),
        }
    }

    fn parser(&self, _limits: &CoreLimits) -> LineParser {
        LineParser
    }
}
