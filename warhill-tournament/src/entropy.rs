//! Novelty by marginal entropy
//!
//! Level 3 - Step-level implementation
//!
//! Instruction forms are counted across the population, once per program
//! that contains them. An entry's entropy is taken over its own distinct
//! symbols using those global frequencies, and its reported metric is the
//! gain over the entry ranked directly above it by score.

use rustc_hash::FxHashMap;
use warhill_core::{Entry, ParsedProgram, RankMetric};

use crate::error::HillError;
use crate::ranking::sort_entries;

/// Delta forced onto a non-viable top entry so it ranks last
pub const ENTROPY_SENTINEL: f64 = f64::MIN;

/// Population-wide symbol counts
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    counts: FxHashMap<String, u64>,
    total: u64,
}

impl SymbolTable {
    /// Count the symbols of every entry's parsed program
    pub fn build(entries: &[Entry]) -> Result<Self, HillError> {
        let mut table = SymbolTable::default();
        for entry in entries {
            let program = entry
                .program()
                .ok_or_else(|| HillError::NotParsed(entry.name.clone()))?;
            table.add(program);
        }
        Ok(table)
    }

    /// Count each distinct symbol of `program` once
    pub fn add(&mut self, program: &ParsedProgram) {
        for symbol in program.symbols() {
            *self.counts.entry(symbol.to_string()).or_insert(0) += 1;
            self.total += 1;
        }
    }

    /// Total symbol occurrences
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Global frequency of a symbol (0 if never seen)
    pub fn frequency(&self, symbol: &str) -> f64 {
        match self.counts.get(symbol) {
            Some(&count) if self.total > 0 => count as f64 / self.total as f64,
            _ => 0.0,
        }
    }

    /// Shannon entropy of a program's distinct symbols under global frequencies
    pub fn entropy(&self, program: &ParsedProgram) -> f64 {
        let sum: f64 = program
            .symbols()
            .into_iter()
            .map(|symbol| self.frequency(symbol))
            .filter(|&f| f > 0.0)
            .map(|f| f * f.ln())
            .sum();
        -sum
    }
}

/// Compute `entropy_delta` for every entry, then sort by `metric`
///
/// Entries are ranked by score first. The top entry keeps its raw entropy
/// unless its score is below `min_score`, in which case it gets
/// `ENTROPY_SENTINEL`.
pub fn calculate_entropy_delta(
    entries: &mut [Entry],
    min_score: f64,
    metric: RankMetric,
) -> Result<(), HillError> {
    let table = SymbolTable::build(entries)?;

    sort_entries(entries, RankMetric::Score);

    let entropies: Vec<f64> = entries
        .iter()
        .map(|entry| {
            entry
                .program()
                .map(|program| table.entropy(program))
                .ok_or_else(|| HillError::NotParsed(entry.name.clone()))
        })
        .collect::<Result<_, _>>()?;

    for (rank, entry) in entries.iter_mut().enumerate() {
        entry.entropy_delta = Some(if rank > 0 {
            entropies[rank] - entropies[rank - 1]
        } else if entry.score < min_score {
            ENTROPY_SENTINEL
        } else {
            entropies[0]
        });
    }

    sort_entries(entries, metric);
    Ok(())
}
