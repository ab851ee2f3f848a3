//! Outcome records - results of one pairing

use serde::{Deserialize, Serialize};

/// Wins, losses and ties for one pairing, from one side's perspective
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl OutcomeRecord {
    pub fn new(wins: u32, losses: u32, ties: u32) -> Self {
        Self { wins, losses, ties }
    }

    /// The same match seen from the opponent's side
    pub fn mirrored(&self) -> Self {
        Self {
            wins: self.losses,
            losses: self.wins,
            ties: self.ties,
        }
    }

    /// Number of rounds this record covers
    pub fn total(&self) -> u32 {
        self.wins + self.losses + self.ties
    }

    /// Weighted 3-axis distance to another record
    ///
    /// Wins are stretched by 1.5 and losses compressed by 0.5, so a
    /// different winning profile counts for more than a different losing one.
    pub fn distance(&self, other: &OutcomeRecord) -> f64 {
        let dw = (self.wins as f64 - other.wins as f64) * 1.5;
        let dl = (self.losses as f64 - other.losses as f64) * 0.5;
        let dt = self.ties as f64 - other.ties as f64;
        (dw * dw + dl * dl + dt * dt).sqrt()
    }
}

impl From<(u32, u32, u32)> for OutcomeRecord {
    fn from((wins, losses, ties): (u32, u32, u32)) -> Self {
        Self { wins, losses, ties }
    }
}
