//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

pub use warhill_core::testing::{first_named_wins, name_duel, Rule, ScriptedBackend};
use warhill_core::{HillConfig, MatchMode, QuickEvalConfig, RankMetric};
use warhill_tournament::Hill;

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn make_test_config(hill_size: usize, metric: RankMetric) -> HillConfig {
    HillConfig::new(
        MatchMode::Fixed { rounds: 1 },
        QuickEvalConfig {
            min_score: 50.0,
            rounds: 1,
        },
    )
    .with_hill_size(hill_size)
    .with_metric(metric)
}

/// Add entries named `w0..wN`, each with a distinct program
pub fn load_test_entries(hill: &mut Hill<ScriptedBackend>, n: usize) {
    for i in 0..n {
        let source = (0..=i % 4)
            .map(|k| format!("MOV {}, {}", k, i))
            .collect::<Vec<_>>()
            .join("\n");
        hill.load_string(&format!("w{}", i), &source)
            .expect("test program parses");
    }
}

/// Hill with entries named `w0..wN`; also returns the match counter
pub fn make_test_hill(
    config: HillConfig,
    rule: Rule,
    n: usize,
) -> (Hill<ScriptedBackend>, Arc<AtomicUsize>) {
    let backend = ScriptedBackend::new(rule);
    let calls = backend.counter();
    let mut hill = Hill::new(config, backend).expect("valid config");
    load_test_entries(&mut hill, n);
    (hill, calls)
}
