//! Hill - the bounded, ranked population
//!
//! Level 1 - Orchestration and Level 2 - Phases
//!
//! A pass schedules whatever matches are still missing, scores everyone,
//! ranks by the configured metric and then evicts the last-ranked entry
//! one at a time. Every eviction changes the baseline for the survivors,
//! so each removal is followed by a full rescore and re-rank.

use std::fmt;
use std::ops::Index;
use std::sync::Arc;
use std::time::Instant;

use rustc_hash::FxHashMap;
use warhill_core::{
    tally, Backend, Entry, HillConfig, ParsedProgram, RankMetric, ScoreError,
};

use crate::entropy::calculate_entropy_delta;
use crate::error::HillError;
use crate::novelty::calculate_distance;
use crate::pool::WorkerPool;
use crate::ranking::{sort_entries, MetricValue};
use crate::scheduler::{
    gauntlet_tasks, merge_reports, round_robin_tasks, run_inline, MatchReport, MatchTask, Pairing,
    RunPlan,
};
use crate::stats::HillStats;

/// Where the hill is in its pass cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HillState {
    /// Membership changed since the last ranking
    Unscored,
    /// Matches run and scores computed
    Scored,
    /// Evicting down to the cap
    Pruning,
    /// Within the cap, metrics consistent with membership
    Stable,
}

/// The population under tournament
pub struct Hill<B: Backend> {
    config: HillConfig,
    backend: B,
    simulator: B::Sim,
    parser: B::Parse,
    pool: Option<WorkerPool>,
    entries: Vec<Entry>,
    bias: Vec<Arc<ParsedProgram>>,
    state: HillState,
    age: u32,
    stats: HillStats,
    rounds_executed: u64,
    matches_executed: u64,
}

impl<B: Backend> Hill<B> {
    /// Create an empty hill
    ///
    /// Fails if the configuration is invalid or the worker pool cannot be built.
    pub fn new(config: HillConfig, backend: B) -> Result<Self, HillError> {
        config.validate()?;
        let pool = match config.workers {
            Some(workers) => Some(WorkerPool::new(workers)?),
            None => None,
        };
        let simulator = backend.simulator(&config.limits);
        let parser = backend.parser(&config.limits);

        Ok(Self {
            config,
            backend,
            simulator,
            parser,
            pool,
            entries: Vec::new(),
            bias: Vec::new(),
            state: HillState::Unscored,
            age: 0,
            stats: HillStats::default(),
            rounds_executed: 0,
            matches_executed: 0,
        })
    }

    pub fn config(&self) -> &HillConfig {
        &self.config
    }

    /// Entries in the order of the last ranking
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Fixed reference opponents
    pub fn bias(&self) -> &[Arc<ParsedProgram>] {
        &self.bias
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn state(&self) -> HillState {
        self.state
    }

    /// Passes completed
    pub fn age(&self) -> u32 {
        self.age
    }

    /// Statistics from the last completed pass
    pub fn stats(&self) -> HillStats {
        self.stats
    }

    /// Rounds represented by every match run so far
    pub fn rounds_executed(&self) -> u64 {
        self.rounds_executed
    }

    /// Simulator invocations so far
    pub fn matches_executed(&self) -> u64 {
        self.matches_executed
    }

    pub(crate) fn parser(&self) -> &B::Parse {
        &self.parser
    }

    /// Parsed programs of the first `count` entries in rank order
    pub(crate) fn top_programs(
        &mut self,
        count: usize,
    ) -> Result<Vec<Arc<ParsedProgram>>, HillError> {
        let limits = self.config.limits;
        self.entries
            .iter_mut()
            .take(count)
            .map(|entry| entry.ensure_parsed(&self.parser, &limits).map_err(HillError::from))
            .collect()
    }

    pub fn find_entry(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Insert an entry, discarding any outcomes it carries
    ///
    /// Returns false (and leaves the hill untouched) if an entry with the
    /// same name is already present.
    pub fn add_entry(&mut self, mut entry: Entry) -> bool {
        if self.find_entry(&entry.name).is_some() {
            tracing::info!("add_entry: already had a copy of {}", entry.name);
            return false;
        }
        entry.clear_scores();
        entry.clear_distances();
        self.entries.push(entry);
        self.state = HillState::Unscored;
        true
    }

    /// Parse `source` and insert it as a new entry
    pub fn load_string(&mut self, name: &str, source: &str) -> Result<bool, HillError> {
        let mut entry = Entry::new(name, source);
        entry.ensure_parsed(&self.parser, &self.config.limits)?;
        Ok(self.add_entry(entry))
    }

    /// Add a pre-parsed reference opponent
    pub fn add_bias(&mut self, program: ParsedProgram) -> bool {
        if self.bias.iter().any(|b| b.name == program.name) {
            tracing::info!("add_bias: already had a copy of {}", program.name);
            return false;
        }
        tracing::info!("Loaded bias {}", program.name);
        self.bias.push(Arc::new(program));
        true
    }

    /// Clear every entry's outcomes and scores
    pub fn clear_scores(&mut self) {
        for entry in &mut self.entries {
            entry.clear_scores();
        }
        self.state = HillState::Unscored;
    }

    // ========================================================================
    // Level 1 - Orchestration
    // ========================================================================

    /// Full round-robin pass: play, score, rank, prune
    pub fn score_hill(&mut self, quiet: bool) -> Result<(), HillError> {
        self.state = HillState::Unscored;
        self.run_round_robin()?;
        self.rank_and_prune(quiet)
    }

    /// Gauntlet pass: every entry against the bias set only
    pub fn score_gauntlet(&mut self, quiet: bool) -> Result<(), HillError> {
        self.state = HillState::Unscored;
        self.run_gauntlet(None)?;
        self.rank_and_prune(quiet)
    }

    /// One stage of a staged gauntlet
    ///
    /// Plays every entry against the named bias members and folds the
    /// subset score into each entry's running accumulator. Does not rank
    /// or prune.
    pub fn score_stage(
        &mut self,
        names: &[&str],
        weight: f64,
        divisor: f64,
    ) -> Result<(), HillError> {
        self.run_gauntlet(Some(names))?;
        for entry in &mut self.entries {
            entry.accumulate_score(names, weight, divisor)?;
        }
        self.state = HillState::Scored;
        Ok(())
    }

    /// Abbreviated score of `candidate` against the bias set
    ///
    /// Uses the quick round count. The candidate's outcome mapping is not
    /// touched.
    pub fn quick_score(&mut self, candidate: &mut Entry) -> Result<f64, HillError> {
        tracing::debug!("quick_score for {}", candidate.name);
        let program = candidate.ensure_parsed(&self.parser, &self.config.limits)?;
        let plan = RunPlan::select(&self.config, self.config.quick.rounds);
        let tasks: Vec<MatchTask> = self
            .bias
            .iter()
            .map(|member| {
                MatchTask::new(
                    &candidate.name,
                    &member.name,
                    Arc::clone(&program),
                    Arc::clone(member),
                    self.config.limits,
                    plan,
                )
            })
            .collect();

        let start = Instant::now();
        let reports = self.dispatch(tasks)?;
        self.account(reports.len(), plan, start);

        let outcomes: FxHashMap<String, _> = reports
            .into_iter()
            .map(|report| (report.opponent, report.record))
            .collect();
        let sheet = tally(&outcomes, outcomes.keys().map(String::as_str))?;
        Ok(sheet.score())
    }

    /// Whether `candidate` scores strictly above the quick threshold
    pub fn quick_test(&mut self, candidate: &mut Entry) -> Result<bool, HillError> {
        let score = self.quick_score(candidate)?;
        Ok(score > self.config.quick.min_score)
    }

    // ========================================================================
    // Level 2 - Phases
    // ========================================================================

    fn run_round_robin(&mut self) -> Result<(), HillError> {
        let start = Instant::now();
        let plan = RunPlan::for_config(&self.config);
        let tasks = round_robin_tasks(&mut self.entries, &self.parser, &self.config.limits, plan)?;
        let reports = self.dispatch(tasks)?;
        merge_reports(&mut self.entries, &reports, Pairing::RoundRobin);
        self.account(reports.len(), plan, start);
        Ok(())
    }

    fn run_gauntlet(&mut self, names: Option<&[&str]>) -> Result<(), HillError> {
        let start = Instant::now();
        let plan = RunPlan::for_config(&self.config);
        let bias: Vec<Arc<ParsedProgram>> = match names {
            Some(names) => self
                .bias
                .iter()
                .filter(|b| names.contains(&b.name.as_str()))
                .cloned()
                .collect(),
            None => self.bias.clone(),
        };
        tracing::debug!("Running gauntlet against {} bias programs", bias.len());

        let tasks = gauntlet_tasks(
            &mut self.entries,
            &bias,
            &self.parser,
            &self.config.limits,
            plan,
        )?;
        let reports = self.dispatch(tasks)?;
        merge_reports(&mut self.entries, &reports, Pairing::Gauntlet);
        self.account(reports.len(), plan, start);
        Ok(())
    }

    /// Run tasks inline or on the pool, depending on configuration
    fn dispatch(&mut self, tasks: Vec<MatchTask>) -> Result<Vec<MatchReport>, HillError> {
        match &self.pool {
            Some(pool) => pool.execute(&self.backend, &self.config.limits, tasks),
            None => run_inline(&mut self.simulator, &tasks),
        }
    }

    fn rank_and_prune(&mut self, quiet: bool) -> Result<(), HillError> {
        let metric = self.config.metric;
        let mut total = self.score_entries();
        for entry in &mut self.entries {
            entry.is_new = false;
        }
        self.state = HillState::Scored;
        self.refresh_metric()?;
        sort_entries(&mut self.entries, metric);

        self.state = HillState::Pruning;
        while self.entries.len() > self.config.hill_size {
            let Some(dead) = self.entries.pop() else {
                break;
            };
            total -= dead.score;

            let value = MetricValue(dead.metric(metric));
            if quiet {
                tracing::debug!("{} was pushed off ({:3.2} {})", dead.name, value, metric);
            } else {
                tracing::info!("{} was pushed off ({:3.2} {})", dead.name, value, metric);
            }

            for entry in &mut self.entries {
                entry.remove_outcome(&dead.name);
            }
            self.score_entries();
            self.refresh_metric()?;
            sort_entries(&mut self.entries, metric);
        }

        let scores: Vec<f64> = self.entries.iter().map(|e| e.score).collect();
        self.stats = HillStats::from_ranked(&scores, total);
        self.age += 1;
        for entry in &mut self.entries {
            entry.age += 1;
        }
        self.state = HillState::Stable;

        tracing::info!("Hill age {}: {} entries, {}", self.age, self.entries.len(), self.stats);
        Ok(())
    }

    // ========================================================================
    // Level 3 - Steps
    // ========================================================================

    /// Final-mode score for every entry; returns the population total
    ///
    /// An entry with no recorded outcomes scores zero.
    fn score_entries(&mut self) -> f64 {
        let mut total = 0.0;
        for entry in &mut self.entries {
            match entry.calculate_score() {
                Ok(score) => total += score,
                Err(ScoreError::NoData) => {
                    tracing::debug!("{} has no outcomes to score", entry.name);
                    entry.score = 0.0;
                    entry.raw_score = 0.0;
                    entry.p_wins = 0.0;
                    entry.p_ties = 0.0;
                    entry.p_losses = 0.0;
                }
                // Scoring over all recorded opponents cannot name a missing one
                Err(e) => tracing::warn!("{}: {}", entry.name, e),
            }
        }
        total
    }

    fn refresh_metric(&mut self) -> Result<(), HillError> {
        match self.config.metric {
            RankMetric::Score => Ok(()),
            RankMetric::NoveltyDistance => {
                calculate_distance(&mut self.entries);
                Ok(())
            }
            RankMetric::NoveltyEntropy => calculate_entropy_delta(
                &mut self.entries,
                self.config.quick.min_score,
                self.config.metric,
            ),
        }
    }

    fn account(&mut self, matches: usize, plan: RunPlan, start: Instant) {
        let rounds = matches as u64 * plan.rounds() as u64;
        self.matches_executed += matches as u64;
        self.rounds_executed += rounds;

        let elapsed = start.elapsed().as_secs_f64();
        let rate = if elapsed > 0.0 { rounds as f64 / elapsed } else { 0.0 };
        tracing::info!(
            "Ran {} matches, {} rounds in {:.2}s ({:.2} r/s)",
            matches,
            rounds,
            elapsed,
            rate
        );
    }
}

impl<B: Backend> Index<usize> for Hill<B> {
    type Output = Entry;

    fn index(&self, index: usize) -> &Entry {
        &self.entries[index]
    }
}

impl<B: Backend> fmt::Display for Hill<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let metric = self.config.metric;
        writeln!(f, "Hill Age: {:5}", self.age)?;
        writeln!(f, "Hill Score Stats: {}", self.stats)?;

        for (rank, entry) in self.entries.iter().enumerate() {
            let name: String = entry.name.chars().take(32).collect();
            let new = if entry.is_new { "New" } else { "" };
            write!(f, "{:3} {:>32} {:6.2} ", rank + 1, name, entry.score)?;
            if metric.is_novelty() {
                write!(f, "{:6.2} ", MetricValue(entry.metric(metric)))?;
            }
            writeln!(
                f,
                "WTL% {:5.1} {:5.1} {:5.1} {:3} {:3}",
                entry.p_wins, entry.p_ties, entry.p_losses, entry.age, new
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{first_named_wins, longer_wins, make_test_config, ScriptedBackend};
    use std::sync::atomic::Ordering;
    use warhill_core::{MatchMode, OutcomeRecord, QuickEvalConfig};

    use crate::entropy::ENTROPY_SENTINEL;

    fn make_test_hill(hill_size: usize, names: &[&str]) -> Hill<ScriptedBackend> {
        let mut hill =
            Hill::new(make_test_config(hill_size), ScriptedBackend::new(first_named_wins)).unwrap();
        for name in names {
            assert!(hill.load_string(name, &format!("MOV {}, 1", name)).unwrap());
        }
        hill
    }

    #[test]
    fn test_three_entries_cap_two() {
        let mut hill = make_test_hill(2, &["A", "B", "C"]);
        hill.score_hill(true).unwrap();

        assert_eq!(hill.len(), 2);
        assert_eq!(hill[0].name, "A");
        assert_eq!(hill[1].name, "B");
        assert!(hill.find_entry("C").is_none());

        // After C leaves, A has one win over B and B one loss to A
        assert!((hill[0].score - 300.0).abs() < 1e-9);
        assert_eq!(hill[1].score, 0.0);
        assert!(hill.entries().iter().all(|e| !e.has_outcome("C")));

        // Running total keeps the pre-eviction scores: (300 + 150 + 0 - 0) / 2
        let stats = hill.stats();
        assert_eq!(stats.max, hill[0].score);
        assert_eq!(stats.min, hill[1].score);
        assert!((stats.avg - 225.0).abs() < 1e-9);
        assert_eq!(hill.state(), HillState::Stable);
        assert_eq!(hill.matches_executed(), 3);
        assert_eq!(hill.rounds_executed(), 30);
    }

    #[test]
    fn test_no_eviction_under_cap() {
        let mut hill = make_test_hill(5, &["A", "B", "C"]);
        hill.score_hill(true).unwrap();
        assert_eq!(hill.len(), 3);
        assert!(hill.entries().iter().all(|e| e.outcomes().len() == 2));
    }

    #[test]
    fn test_second_pass_runs_nothing() {
        let mut hill = make_test_hill(10, &["A", "B", "C", "D"]);
        let counter = hill.backend.counter();
        hill.score_hill(true).unwrap();
        let after_first = counter.load(Ordering::SeqCst);
        assert_eq!(after_first, 6);

        hill.score_hill(true).unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), after_first);
        assert_eq!(hill.age(), 2);
        assert!(hill.entries().iter().all(|e| e.age == 2));
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut hill = make_test_hill(5, &["A"]);
        assert!(!hill.load_string("A", "ADD 1, 2").unwrap());
        assert_eq!(hill.len(), 1);
        assert_eq!(hill[0].source, "MOV A, 1");
    }

    #[test]
    fn test_add_entry_clears_stale_outcomes() {
        let mut hill = make_test_hill(5, &[]);
        let mut entry = Entry::new("stale", "MOV 0, 1");
        entry.record_outcome("ghost", OutcomeRecord::new(3, 0, 0));
        assert!(hill.add_entry(entry));
        assert!(hill[0].outcomes().is_empty());
    }

    #[test]
    fn test_new_flag_cleared_by_scoring() {
        let mut hill = make_test_hill(5, &["A", "B"]);
        assert!(hill[0].is_new);
        hill.score_hill(true).unwrap();
        assert!(hill.entries().iter().all(|e| !e.is_new));
    }

    #[test]
    fn test_lone_entry_scores_zero() {
        let mut hill = make_test_hill(5, &["A"]);
        hill.score_hill(true).unwrap();
        assert_eq!(hill[0].score, 0.0);
        assert_eq!(hill.stats().median, Some(0.0));
    }

    #[test]
    fn test_gauntlet_scores_against_bias_only() {
        let mut hill = make_test_hill(5, &["A", "B"]);
        hill.add_bias(ParsedProgram::new("x", vec!["DAT 0, 0".into()]));
        hill.add_bias(ParsedProgram::new("y", vec!["DAT 0, 0".into()]));
        hill.score_gauntlet(true).unwrap();

        for entry in hill.entries() {
            let mut opponents: Vec<&str> = entry.outcomes().keys().map(String::as_str).collect();
            opponents.sort();
            assert_eq!(opponents, vec!["x", "y"]);
            assert!((entry.score - 300.0).abs() < 1e-9);
        }
        assert_eq!(hill.matches_executed(), 4);
    }

    #[test]
    fn test_staged_scoring_accumulates() {
        let mut hill = make_test_hill(5, &["A"]);
        hill.add_bias(ParsedProgram::new("x", vec!["DAT 0, 0".into()]));
        hill.add_bias(ParsedProgram::new("y", vec!["DAT 0, 0".into()]));

        hill.score_stage(&["x"], 1.0, 2.0).unwrap();
        assert!((hill[0].score - 150.0).abs() < 1e-9);
        assert_eq!(hill[0].outcomes().len(), 1);

        hill.score_stage(&["y"], 1.0, 2.0).unwrap();
        assert!((hill[0].score - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_quick_score_is_transient() {
        let mut hill = make_test_hill(5, &[]);
        hill.add_bias(ParsedProgram::new("x", vec!["DAT 0, 0".into()]));
        let mut candidate = Entry::new("cand", "MOV 0, 1");

        let score = hill.quick_score(&mut candidate).unwrap();
        assert!((score - 300.0).abs() < 1e-9);
        assert!(candidate.outcomes().is_empty());
        assert!(candidate.is_new);
        assert!(hill.quick_test(&mut candidate).unwrap());
        assert_eq!(hill.rounds_executed(), 4);
    }

    #[test]
    fn test_quick_score_without_bias_has_no_data() {
        let mut hill = make_test_hill(5, &[]);
        let mut candidate = Entry::new("cand", "MOV 0, 1");
        let err = hill.quick_score(&mut candidate).unwrap_err();
        assert!(matches!(err, HillError::Score(ScoreError::NoData)));
    }

    #[test]
    fn test_quick_test_threshold_is_strict() {
        let mut config = make_test_config(5);
        config.quick = QuickEvalConfig {
            min_score: 300.0,
            rounds: 2,
        };
        let mut hill = Hill::new(config, ScriptedBackend::new(first_named_wins)).unwrap();
        hill.add_bias(ParsedProgram::new("x", vec!["DAT 0, 0".into()]));
        let mut candidate = Entry::new("cand", "MOV 0, 1");
        assert!(!hill.quick_test(&mut candidate).unwrap());
    }

    #[test]
    fn test_simulator_fault_aborts_pass() {
        let mut hill = Hill::new(
            make_test_config(1),
            ScriptedBackend::new(first_named_wins).failing_on("B"),
        )
        .unwrap();
        hill.load_string("A", "MOV 0, 1").unwrap();
        hill.load_string("B", "MOV 0, 1").unwrap();

        assert!(matches!(hill.score_hill(true), Err(HillError::Simulator(_))));
        assert_eq!(hill.len(), 2);
        assert_eq!(hill.age(), 0);
    }

    #[test]
    fn test_parse_error_on_load_string() {
        let mut hill = make_test_hill(5, &[]);
        assert!(matches!(
            hill.load_string("empty", "   \n"),
            Err(HillError::Parse(_))
        ));
        assert!(hill.is_empty());
    }

    #[test]
    fn test_novelty_metric_prunes_to_cap() {
        let config = make_test_config(3).with_metric(RankMetric::NoveltyDistance);
        let mut hill = Hill::new(config, ScriptedBackend::new(longer_wins)).unwrap();
        for i in 1..=5 {
            let source = vec!["NOP"; i].join("\n");
            hill.load_string(&format!("w{}", i), &source).unwrap();
        }
        hill.score_hill(true).unwrap();

        assert_eq!(hill.len(), 3);
        for entry in hill.entries() {
            assert!(entry.novelty.is_some());
            assert_eq!(entry.outcomes().len(), 2);
        }
        let values: Vec<f64> = hill.entries().iter().filter_map(|e| e.novelty).collect();
        assert!(values.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_display_lists_entries() {
        let mut hill = make_test_hill(5, &["A", "B"]);
        hill.score_hill(true).unwrap();
        let text = hill.to_string();
        assert!(text.starts_with("Hill Age:     1\n"));
        assert!(text.contains("(Min/Max/Avg/Med)"));
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn test_probabilistic_mode_averages_passes_only() {
        let mut config = make_test_config(5);
        config.match_mode = MatchMode::Probabilistic;
        let backend = ScriptedBackend::new(first_named_wins);
        let (averaged, counted) = (backend.averaged_runs(), backend.counted_runs());
        let mut hill = Hill::new(config, backend).unwrap();
        for name in ["A", "B", "C"] {
            hill.load_string(name, &format!("MOV {}, 1", name)).unwrap();
        }
        hill.add_bias(ParsedProgram::new("x", vec!["DAT 0, 0".into()]));

        hill.score_hill(true).unwrap();
        assert_eq!(averaged.load(Ordering::SeqCst), 3);
        assert_eq!(counted.load(Ordering::SeqCst), 0);
        // 2 * (800 - 20 + 1) rounds accounted per averaged match
        assert_eq!(hill.rounds_executed(), 3 * 1562);

        hill.score_gauntlet(true).unwrap();
        assert_eq!(averaged.load(Ordering::SeqCst), 6);
        assert_eq!(counted.load(Ordering::SeqCst), 0);

        let mut candidate = Entry::new("cand", "MOV 0, 1");
        hill.quick_score(&mut candidate).unwrap();
        assert_eq!(averaged.load(Ordering::SeqCst), 6);
        assert_eq!(counted.load(Ordering::SeqCst), 1);
        assert_eq!(hill.rounds_executed(), 6 * 1562 + 2);
    }

    #[test]
    fn test_fixed_mode_never_averages() {
        let backend = ScriptedBackend::new(first_named_wins);
        let (averaged, counted) = (backend.averaged_runs(), backend.counted_runs());
        let mut hill = Hill::new(make_test_config(5), backend).unwrap();
        hill.load_string("A", "MOV 0, 1").unwrap();
        hill.load_string("B", "MOV 1, 1").unwrap();

        hill.score_hill(true).unwrap();
        assert_eq!(averaged.load(Ordering::SeqCst), 0);
        assert_eq!(counted.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_display_prints_entropy_sentinel_readably() {
        let mut config = make_test_config(5).with_metric(RankMetric::NoveltyEntropy);
        config.quick.min_score = 10_000.0;
        let mut hill = Hill::new(config, ScriptedBackend::new(first_named_wins)).unwrap();
        for name in ["A", "B", "C"] {
            hill.load_string(name, &format!("MOV {}, 1", name)).unwrap();
        }
        hill.score_hill(true).unwrap();

        assert_eq!(hill.entries().last().unwrap().entropy_delta, Some(ENTROPY_SENTINEL));
        let text = hill.to_string();
        assert!(text.contains("  -inf "));
        assert!(text.lines().all(|line| line.len() < 120), "{}", text);
    }
}
