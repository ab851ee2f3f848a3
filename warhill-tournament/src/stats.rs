//! Aggregate hill statistics
//!
//! Level 4 - Utilities

use std::fmt;

/// Score statistics over the current population
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HillStats {
    /// Score of the last-ranked entry
    pub min: f64,
    /// Score of the first-ranked entry
    pub max: f64,
    /// Running total divided by population
    pub avg: f64,
    /// Median score by rank (None for an empty hill)
    pub median: Option<f64>,
}

impl HillStats {
    /// Build from scores in rank order and the running score total
    pub fn from_ranked(scores: &[f64], total: f64) -> Self {
        match (scores.first(), scores.last()) {
            (Some(&max), Some(&min)) => Self {
                min,
                max,
                avg: total / scores.len() as f64,
                median: median(scores),
            },
            _ => Self::default(),
        }
    }
}

impl fmt::Display for HillStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:3.2}/{:3.2}/{:3.2}/{:3.2} (Min/Max/Avg/Med)",
            self.min,
            self.max,
            self.avg,
            self.median.unwrap_or(0.0)
        )
    }
}

/// Middle value for odd counts, mean of the two middle values for even
pub fn median(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n == 0 {
        return None;
    }
    if n % 2 == 1 {
        Some(values[(n + 1) / 2 - 1])
    } else {
        Some((values[n / 2 - 1] + values[n / 2]) / 2.0)
    }
}
