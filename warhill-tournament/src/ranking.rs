//! Ranking - one comparison for all three metrics
//!
//! Level 4 - Utilities

use std::cmp::Ordering;
use std::fmt;

use warhill_core::{Entry, RankMetric};

use crate::entropy::ENTROPY_SENTINEL;

/// Order two entries best-first under `metric`
///
/// An entry whose metric has not been computed ranks below every entry
/// that has one.
pub fn compare_entries(a: &Entry, b: &Entry, metric: RankMetric) -> Ordering {
    let a_value = a.metric(metric).unwrap_or(f64::NEG_INFINITY);
    let b_value = b.metric(metric).unwrap_or(f64::NEG_INFINITY);
    b_value.partial_cmp(&a_value).unwrap_or(Ordering::Equal)
}

/// Stable sort, best first
pub fn sort_entries(entries: &mut [Entry], metric: RankMetric) {
    entries.sort_by(|a, b| compare_entries(a, b, metric));
}

/// Printable metric value honoring width and precision
///
/// The entropy sentinel prints as `-inf` and a missing value as `-`.
#[derive(Clone, Copy, Debug)]
pub struct MetricValue(pub Option<f64>);

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.0 {
            Some(value) if value == ENTROPY_SENTINEL => "-inf",
            Some(value) => return fmt::Display::fmt(&value, f),
            None => "-",
        };
        write!(f, "{:>width$}", label, width = f.width().unwrap_or(0))
    }
}
