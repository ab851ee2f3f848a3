//! Entry - one competing program and everything recorded about it

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::config::{CoreLimits, RankMetric};
use crate::error::ParseError;
use crate::outcome::OutcomeRecord;
use crate::program::{ParsedProgram, Parser};

/// A program on (or trying to get on) the hill
///
/// The outcome mapping is private: the scheduler writes it through
/// `record_outcome` and the hill purges it through `remove_outcome`.
#[derive(Clone, Debug)]
pub struct Entry {
    /// Unique identity
    pub name: String,
    /// Source text
    pub source: String,
    program: Option<Arc<ParsedProgram>>,
    outcomes: FxHashMap<String, OutcomeRecord>,
    distances: FxHashMap<String, f64>,
    /// Weighted win/tie score
    pub score: f64,
    /// Accumulator for staged weighted scoring
    pub raw_score: f64,
    /// Win percentage
    pub p_wins: f64,
    /// Tie percentage
    pub p_ties: f64,
    /// Loss percentage
    pub p_losses: f64,
    /// Mean pairwise outcome distance
    pub novelty: Option<f64>,
    /// Entropy gain relative to the next-better entry
    pub entropy_delta: Option<f64>,
    /// Tournament passes survived
    pub age: u32,
    /// Not yet scored on a hill
    pub is_new: bool,
}

impl Entry {
    /// Create a new, unparsed entry
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            program: None,
            outcomes: FxHashMap::default(),
            distances: FxHashMap::default(),
            score: 0.0,
            raw_score: 0.0,
            p_wins: 0.0,
            p_ties: 0.0,
            p_losses: 0.0,
            novelty: None,
            entropy_delta: None,
            age: 0,
            is_new: true,
        }
    }

    /// Create an entry around an already parsed program
    pub fn from_program(program: ParsedProgram) -> Self {
        let mut entry = Entry::new(program.name.clone(), program.to_string());
        entry.program = Some(Arc::new(program));
        entry
    }

    /// Set the "new" flag
    pub fn with_new_flag(mut self, is_new: bool) -> Self {
        self.is_new = is_new;
        self
    }

    /// Parsed representation, if it has been built
    pub fn program(&self) -> Option<&Arc<ParsedProgram>> {
        self.program.as_ref()
    }

    /// Build the parsed representation if absent and return it
    pub fn ensure_parsed<P: Parser + ?Sized>(
        &mut self,
        parser: &P,
        limits: &CoreLimits,
    ) -> Result<Arc<ParsedProgram>, ParseError> {
        if let Some(program) = &self.program {
            return Ok(Arc::clone(program));
        }
        tracing::debug!("Parsing {}", self.name);
        let program = Arc::new(parser.parse(&self.name, &self.source, limits)?);
        self.program = Some(Arc::clone(&program));
        Ok(program)
    }

    /// Drop the parsed representation; it is rebuilt on the next `ensure_parsed`
    pub fn discard_program(&mut self) {
        self.program = None;
    }

    /// All recorded outcomes keyed by opponent name
    pub fn outcomes(&self) -> &FxHashMap<String, OutcomeRecord> {
        &self.outcomes
    }

    /// Outcome against one opponent
    pub fn outcome(&self, opponent: &str) -> Option<&OutcomeRecord> {
        self.outcomes.get(opponent)
    }

    pub fn has_outcome(&self, opponent: &str) -> bool {
        self.outcomes.contains_key(opponent)
    }

    /// Record (or replace) the outcome against `opponent`
    pub fn record_outcome(&mut self, opponent: &str, record: OutcomeRecord) {
        self.outcomes.insert(opponent.to_string(), record);
    }

    /// Forget the outcome against `opponent`, if any
    pub fn remove_outcome(&mut self, opponent: &str) -> Option<OutcomeRecord> {
        self.distances.remove(opponent);
        self.outcomes.remove(opponent)
    }

    /// Pairwise novelty distances keyed by entry name
    pub fn distances(&self) -> &FxHashMap<String, f64> {
        &self.distances
    }

    pub fn distance_to(&self, other: &str) -> Option<f64> {
        self.distances.get(other).copied()
    }

    pub fn set_distance(&mut self, other: &str, distance: f64) {
        self.distances.insert(other.to_string(), distance);
    }

    pub fn clear_distances(&mut self) {
        self.distances.clear();
    }

    /// Reset outcomes, score and percentages; identity and code are kept
    pub fn clear_scores(&mut self) {
        self.outcomes.clear();
        self.score = 0.0;
        self.raw_score = 0.0;
        self.p_wins = 0.0;
        self.p_ties = 0.0;
        self.p_losses = 0.0;
    }

    /// Value of the given ranking metric (None if not computed)
    pub fn metric(&self, metric: RankMetric) -> Option<f64> {
        match metric {
            RankMetric::Score => Some(self.score),
            RankMetric::NoveltyDistance => self.novelty,
            RankMetric::NoveltyEntropy => self.entropy_delta,
        }
    }
}
