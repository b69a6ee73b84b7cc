//! Recurring refresh scheduler
//!
//! Runs keyed refresh tasks at fixed periods on a single loop. Each task runs
//! to completion before the next one starts, so two refreshes never interleave.

use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};

/// Longest period a task may be registered with.
pub const MAX_PERIOD: Duration = Duration::from_secs(24 * 60 * 60);

/// Where a task is in its refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskPhase {
    Idle,
    Fetching,
    DisplayingData,
    DisplayingError,
}

/// What a finished refresh ended up displaying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    Data,
    Error,
}

/// Work the scheduler runs for a key when it comes due.
#[async_trait]
pub trait RefreshTask<K: Send>: Send {
    async fn run(&mut self, key: K) -> TaskOutcome;
}

/// A registered task and its schedule.
#[derive(Debug, Clone)]
pub struct RecurringTask<K> {
    key: K,
    period: Duration,
    next_due: Instant,
    phase: TaskPhase,
    last_outcome: Option<TaskOutcome>,
    runs: u64,
}

impl<K: Copy> RecurringTask<K> {
    pub fn key(&self) -> K {
        self.key
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn phase(&self) -> TaskPhase {
        self.phase
    }

    pub fn last_outcome(&self) -> Option<TaskOutcome> {
        self.last_outcome
    }

    /// Completed runs so far.
    pub fn runs(&self) -> u64 {
        self.runs
    }

    /// Move the due time one period ahead, skipping ticks already in the past.
    fn reschedule(&mut self, now: Instant) {
        self.next_due += self.period;
        while self.next_due <= now {
            self.next_due += self.period;
        }
    }
}

/// Fixed-period scheduler over keyed tasks.
pub struct Scheduler<K> {
    tasks: Vec<RecurringTask<K>>,
}

impl<K> Default for Scheduler<K> {
    fn default() -> Self {
        Self { tasks: Vec::new() }
    }
}

impl<K: Copy + Debug + PartialEq + Send> Scheduler<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task. It is due immediately, then every `period`.
    ///
    /// Panics if `period` is zero or longer than [`MAX_PERIOD`].
    pub fn register(&mut self, key: K, period: Duration) {
        assert!(!period.is_zero(), "task period must be positive");
        assert!(period <= MAX_PERIOD, "task period must be at most {MAX_PERIOD:?}");
        debug!("Registered {key:?} every {period:?}");
        self.tasks.push(RecurringTask {
            key,
            period,
            next_due: Instant::now(),
            phase: TaskPhase::Idle,
            last_outcome: None,
            runs: 0,
        });
    }

    pub fn tasks(&self) -> &[RecurringTask<K>] {
        &self.tasks
    }

    pub fn task(&self, key: K) -> Option<&RecurringTask<K>> {
        self.tasks.iter().find(|t| t.key == key)
    }

    /// Earliest due task; ties go to the one registered first.
    fn next_index(&self) -> Option<usize> {
        self.tasks
            .iter()
            .enumerate()
            .min_by_key(|(_, t)| t.next_due)
            .map(|(i, _)| i)
    }

    async fn run_task<H: RefreshTask<K>>(&mut self, idx: usize, handler: &mut H) {
        let task = &mut self.tasks[idx];
        task.phase = TaskPhase::Fetching;
        debug!("{:?}: fetching", task.key);

        let outcome = handler.run(task.key).await;

        task.phase = match outcome {
            TaskOutcome::Data => TaskPhase::DisplayingData,
            TaskOutcome::Error => TaskPhase::DisplayingError,
        };
        debug!("{:?}: {:?}", task.key, task.phase);
        task.last_outcome = Some(outcome);
        task.runs += 1;
        task.reschedule(Instant::now());
        task.phase = TaskPhase::Idle;
    }

    /// Run every task once, in registration order.
    pub async fn run_once<H: RefreshTask<K>>(&mut self, handler: &mut H) {
        for idx in 0..self.tasks.len() {
            self.run_task(idx, handler).await;
        }
    }

    /// Run tasks as they come due until `shutdown` resolves.
    ///
    /// Shutdown is only observed between tasks; a refresh in progress always
    /// completes.
    pub async fn run<H, F>(&mut self, handler: &mut H, shutdown: F)
    where
        H: RefreshTask<K>,
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        loop {
            let Some(idx) = self.next_index() else {
                shutdown.await;
                return;
            };
            let due = self.tasks[idx].next_due;
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("Scheduler stopping");
                    return;
                }
                _ = sleep_until(due) => {}
            }
            self.run_task(idx, handler).await;
        }
    }
}

/// Resolves on Ctrl+C. If the signal handler cannot be installed, never
/// resolves, so the scheduler keeps running.
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    }
}
