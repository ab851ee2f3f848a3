//! Match scheduling - enumerate the matches a pass still needs
//!
//! Level 2 - Phase-level implementation
//!
//! Outcomes are memoized on the entries themselves: a pairing recorded in
//! either direction is never simulated again. Tasks name their entries,
//! never their positions, so results can be merged after the population
//! has been reordered.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use warhill_core::{
    CoreLimits, Entry, HillConfig, MatchMode, OutcomeRecord, ParsedProgram, Parser, Simulator,
    SimulatorError,
};

use crate::error::HillError;

/// Who plays whom
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pairing {
    /// Every live entry against every other; both sides are recorded
    RoundRobin,
    /// Every live entry against the bias set; only the challenger is recorded
    Gauntlet,
}

/// How the simulator is invoked for one match
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunPlan {
    /// One averaged run standing in for `rounds` rounds
    Averaged { rounds: u32 },
    /// An explicit number of rounds
    Rounds(u32),
}

impl RunPlan {
    /// Plan for a match of `rounds` rounds under `config`
    ///
    /// Averaged runs only stand in for the full configured round count;
    /// any other count (quick evaluation) is run round by round.
    pub fn select(config: &HillConfig, rounds: u32) -> Self {
        match config.match_mode {
            MatchMode::Probabilistic if rounds == config.rounds() => RunPlan::Averaged { rounds },
            _ => RunPlan::Rounds(rounds),
        }
    }

    /// Plan for a regular tournament match
    pub fn for_config(config: &HillConfig) -> Self {
        Self::select(config, config.rounds())
    }

    /// Rounds accounted to one match
    pub fn rounds(&self) -> u32 {
        match *self {
            RunPlan::Averaged { rounds } => rounds,
            RunPlan::Rounds(rounds) => rounds,
        }
    }
}

/// One self-contained match
#[derive(Clone, Debug)]
pub struct MatchTask {
    /// Entry whose outcome mapping receives the result
    pub challenger: String,
    /// Opponent identity
    pub opponent: String,
    first: Arc<ParsedProgram>,
    second: Arc<ParsedProgram>,
    limits: CoreLimits,
    plan: RunPlan,
}

/// Result of one match from the challenger's side
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchReport {
    pub challenger: String,
    pub opponent: String,
    pub record: OutcomeRecord,
}

impl MatchTask {
    pub fn new(
        challenger: &str,
        opponent: &str,
        first: Arc<ParsedProgram>,
        second: Arc<ParsedProgram>,
        limits: CoreLimits,
        plan: RunPlan,
    ) -> Self {
        Self {
            challenger: challenger.to_string(),
            opponent: opponent.to_string(),
            first,
            second,
            limits,
            plan,
        }
    }

    /// Run the match on the given simulator
    pub fn execute<S: Simulator + ?Sized>(
        &self,
        simulator: &mut S,
    ) -> Result<MatchReport, SimulatorError> {
        let record = match self.plan {
            RunPlan::Averaged { .. } => {
                simulator.run_averaged(&self.first, &self.second, &self.limits)?
            }
            RunPlan::Rounds(rounds) => {
                simulator.run(&self.first, &self.second, &self.limits, rounds)?
            }
        };

        Ok(MatchReport {
            challenger: self.challenger.clone(),
            opponent: self.opponent.clone(),
            record,
        })
    }
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// Parse every entry that has no program yet
pub fn prepare_entries<P: Parser + ?Sized>(
    entries: &mut [Entry],
    parser: &P,
    limits: &CoreLimits,
) -> Result<Vec<Arc<ParsedProgram>>, HillError> {
    entries
        .iter_mut()
        .map(|entry| entry.ensure_parsed(parser, limits).map_err(HillError::from))
        .collect()
}

/// Matches still missing from a full round-robin
///
/// A pairing recorded on only one side is repaired by mirroring the
/// existing record instead of re-simulating it.
pub fn round_robin_tasks<P: Parser + ?Sized>(
    entries: &mut [Entry],
    parser: &P,
    limits: &CoreLimits,
    plan: RunPlan,
) -> Result<Vec<MatchTask>, HillError> {
    let programs = prepare_entries(entries, parser, limits)?;
    let n = entries.len();
    let mut tasks = Vec::new();
    let mut repairs: Vec<(usize, String, OutcomeRecord)> = Vec::new();

    for i in 0..n {
        for j in (i + 1)..n {
            let (a, b) = (&entries[i], &entries[j]);
            match (a.outcome(&b.name), b.outcome(&a.name)) {
                (Some(_), Some(_)) => {}
                (Some(record), None) => repairs.push((j, a.name.clone(), record.mirrored())),
                (None, Some(record)) => repairs.push((i, b.name.clone(), record.mirrored())),
                (None, None) => tasks.push(MatchTask::new(
                    &a.name,
                    &b.name,
                    Arc::clone(&programs[i]),
                    Arc::clone(&programs[j]),
                    *limits,
                    plan,
                )),
            }
        }
    }

    for (index, opponent, record) in repairs {
        tracing::debug!("Mirroring {} vs {} without re-running", entries[index].name, opponent);
        entries[index].record_outcome(&opponent, record);
    }

    Ok(tasks)
}

/// Matches still missing between the live entries and the bias set
pub fn gauntlet_tasks<P: Parser + ?Sized>(
    entries: &mut [Entry],
    bias: &[Arc<ParsedProgram>],
    parser: &P,
    limits: &CoreLimits,
    plan: RunPlan,
) -> Result<Vec<MatchTask>, HillError> {
    let programs = prepare_entries(entries, parser, limits)?;
    let mut tasks = Vec::new();

    for (entry, program) in entries.iter().zip(&programs) {
        for member in bias {
            if entry.has_outcome(&member.name) {
                tracing::debug!("Already ran {} vs {}", entry.name, member.name);
                continue;
            }
            tasks.push(MatchTask::new(
                &entry.name,
                &member.name,
                Arc::clone(program),
                Arc::clone(member),
                *limits,
                plan,
            ));
        }
    }

    Ok(tasks)
}

/// Run tasks one after another on a single simulator
///
/// The first simulator fault ends the run.
pub fn run_inline<S: Simulator + ?Sized>(
    simulator: &mut S,
    tasks: &[MatchTask],
) -> Result<Vec<MatchReport>, HillError> {
    tasks
        .iter()
        .map(|task| {
            tracing::debug!("Running {} vs {}", task.challenger, task.opponent);
            task.execute(&mut *simulator).map_err(HillError::from)
        })
        .collect()
}

/// Write reports into the entries they name
///
/// Round-robin results are written to both sides; gauntlet results only
/// to the challenger.
pub fn merge_reports(entries: &mut [Entry], reports: &[MatchReport], pairing: Pairing) {
    let index: FxHashMap<String, usize> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| (entry.name.clone(), i))
        .collect();

    for report in reports {
        match index.get(&report.challenger) {
            Some(&i) => entries[i].record_outcome(&report.opponent, report.record),
            None => tracing::warn!("Dropping result for departed entry {}", report.challenger),
        }

        if pairing == Pairing::RoundRobin {
            match index.get(&report.opponent) {
                Some(&j) => entries[j].record_outcome(&report.challenger, report.record.mirrored()),
                None => tracing::warn!("Dropping result for departed entry {}", report.opponent),
            }
        }
    }
}
