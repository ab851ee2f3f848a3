//! Unit test fixtures

pub use warhill_core::testing::*;
use warhill_core::{HillConfig, MatchMode, QuickEvalConfig};

pub fn make_test_config(hill_size: usize) -> HillConfig {
    HillConfig::new(
        MatchMode::Fixed { rounds: 10 },
        QuickEvalConfig {
            min_score: 100.0,
            rounds: 2,
        },
    )
    .with_hill_size(hill_size)
}
