//! Scoring engine - weighted win/tie score from recorded outcomes
//!
//! A win is worth three points and a tie one. The score is the average
//! number of points per round scaled by 100, so an entry that wins every
//! round scores 300. Scores are never clamped.

use rustc_hash::FxHashMap;

use crate::entry::Entry;
use crate::error::ScoreError;
use crate::outcome::OutcomeRecord;

/// Points per won round
pub const WIN_WEIGHT: u64 = 3;
/// Points per tied round
pub const TIE_WEIGHT: u64 = 1;

/// Totals over a set of opponents
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScoreSheet {
    pub wins: u64,
    pub losses: u64,
    pub ties: u64,
    /// Sum of `wins * 3 + ties`
    pub points: u64,
}

impl ScoreSheet {
    /// Rounds covered
    pub fn count(&self) -> u64 {
        self.wins + self.losses + self.ties
    }

    /// Points per round, times 100
    pub fn score(&self) -> f64 {
        self.points as f64 / self.count() as f64 * 100.0
    }

    pub fn p_wins(&self) -> f64 {
        self.percent(self.wins)
    }

    pub fn p_ties(&self) -> f64 {
        self.percent(self.ties)
    }

    pub fn p_losses(&self) -> f64 {
        self.percent(self.losses)
    }

    fn percent(&self, part: u64) -> f64 {
        part as f64 / self.count() as f64 * 100.0
    }

    fn add(&mut self, record: &OutcomeRecord) {
        self.wins += record.wins as u64;
        self.losses += record.losses as u64;
        self.ties += record.ties as u64;
        self.points += record.wins as u64 * WIN_WEIGHT + record.ties as u64 * TIE_WEIGHT;
    }
}

/// Sum the outcomes against `names`
///
/// Fails with `NoData` when the selected records cover zero rounds, so
/// callers never divide by zero.
pub fn tally<'a, I>(
    outcomes: &FxHashMap<String, OutcomeRecord>,
    names: I,
) -> Result<ScoreSheet, ScoreError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut sheet = ScoreSheet::default();
    for name in names {
        let record = outcomes
            .get(name)
            .ok_or_else(|| ScoreError::UnknownOpponent(name.to_string()))?;
        sheet.add(record);
    }

    if sheet.count() == 0 {
        return Err(ScoreError::NoData);
    }
    Ok(sheet)
}

impl Entry {
    /// Final-mode score over every recorded opponent
    pub fn calculate_score(&mut self) -> Result<f64, ScoreError> {
        let sheet = tally(self.outcomes(), self.outcomes().keys().map(String::as_str))?;
        self.apply_sheet(&sheet);
        Ok(self.score)
    }

    /// Final-mode score over a subset of opponents
    pub fn calculate_score_for(&mut self, names: &[&str]) -> Result<f64, ScoreError> {
        let sheet = tally(self.outcomes(), names.iter().copied())?;
        self.apply_sheet(&sheet);
        Ok(self.score)
    }

    /// Staged scoring: add `weight` times the subset score to the raw
    /// accumulator and report the accumulator divided by `divisor`
    pub fn accumulate_score(
        &mut self,
        names: &[&str],
        weight: f64,
        divisor: f64,
    ) -> Result<f64, ScoreError> {
        if divisor == 0.0 {
            return Err(ScoreError::ZeroDivisor);
        }
        let sheet = tally(self.outcomes(), names.iter().copied())?;
        self.raw_score += sheet.score() * weight;
        self.score = self.raw_score / divisor;
        Ok(self.score)
    }

    fn apply_sheet(&mut self, sheet: &ScoreSheet) {
        self.score = sheet.score();
        self.raw_score = self.score;
        self.p_wins = sheet.p_wins();
        self.p_ties = sheet.p_ties();
        self.p_losses = sheet.p_losses();
    }
}
