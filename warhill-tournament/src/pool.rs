//! Worker pool - run independent matches in parallel
//!
//! Level 2 - Phase-level implementation
//!
//! Each worker job builds exactly one simulator from the backend and
//! pulls tasks from a shared cursor until none are left; simulators are
//! never shared between threads. Results stream back over a channel in
//! completion order and are drained completely before the caller merges
//! them.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;

use rayon::{ThreadPool, ThreadPoolBuilder};
use warhill_core::{Backend, CoreLimits, SimulatorError};

use crate::error::HillError;
use crate::scheduler::{MatchReport, MatchTask};

/// Fixed-size pool of match workers
pub struct WorkerPool {
    pool: ThreadPool,
    workers: usize,
}

impl WorkerPool {
    /// Create a pool with `workers` threads
    pub fn new(workers: usize) -> Result<Self, HillError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("warhill-worker-{}", i))
            .build()
            .map_err(|e| HillError::WorkerPool(e.to_string()))?;

        Ok(Self { pool, workers })
    }

    /// Execute every task and return all reports, in completion order
    ///
    /// At most one simulator is built per worker. A simulator fault in any
    /// task fails the whole batch, but only after every submitted task has
    /// been accounted for.
    pub fn execute<B: Backend>(
        &self,
        backend: &B,
        limits: &CoreLimits,
        tasks: Vec<MatchTask>,
    ) -> Result<Vec<MatchReport>, HillError> {
        let expected = tasks.len();
        if expected == 0 {
            return Ok(Vec::new());
        }

        let jobs = self.workers.min(expected);
        tracing::debug!("Dispatching {} matches to {} workers", expected, jobs);
        let (sender, receiver) = mpsc::channel::<Result<MatchReport, SimulatorError>>();
        let cursor = AtomicUsize::new(0);
        let (tasks, cursor) = (&tasks, &cursor);

        let (reports, failure) = self.pool.in_place_scope(move |scope| {
            for _ in 0..jobs {
                let sender = sender.clone();
                scope.spawn(move |_| {
                    let mut simulator = backend.simulator(limits);
                    while let Some(task) = tasks.get(cursor.fetch_add(1, Ordering::Relaxed)) {
                        // Receiver outlives the scope, so the send cannot fail.
                        let _ = sender.send(task.execute(&mut simulator));
                    }
                });
            }
            // Workers hold the only remaining senders; the drain ends with them.
            drop(sender);

            let mut reports = Vec::with_capacity(expected);
            let mut failure = None;
            for result in receiver.iter() {
                match result {
                    Ok(report) => reports.push(report),
                    Err(e) => {
                        tracing::error!("Match failed: {}", e);
                        failure.get_or_insert(e);
                    }
                }
            }
            (reports, failure)
        });

        if let Some(e) = failure {
            return Err(e.into());
        }
        if reports.len() != expected {
            return Err(HillError::IncompleteResults {
                expected,
                received: reports.len(),
            });
        }
        Ok(reports)
    }
}
