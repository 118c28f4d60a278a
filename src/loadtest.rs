//! Asymmetric load test comparing the fair queue against a global FIFO.
//!
//! A profile assigns each item key a simulated processing time. Workers
//! drain the queue, re-adding every item until it has been processed
//! `cycles` times; the last worker to see every item finished shuts the
//! queue down. With one namespace carrying most of the slow items, the fair
//! queue keeps the light namespaces moving while the FIFO serves them only
//! in arrival order.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::key::split_tenant_key;
use crate::queue::{FairQueue, FifoQueue, WorkQueue};
use crate::telemetry::reconcile::{record_outcome, start_reconcile_span};

/// Top-level TOML layout: `[items]` mapping keys to milliseconds.
#[derive(Debug, Deserialize)]
struct ProfileFile {
    items: BTreeMap<String, u64>,
}

/// Simulated processing time per item key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadProfile {
    items: BTreeMap<String, Duration>,
}

impl Default for LoadProfile {
    /// ns1 carries three slow items, the other namespaces are light.
    fn default() -> Self {
        let items = [
            ("ns1/item1", 200),
            ("ns1/item2", 100),
            ("ns1/item3", 50),
            ("ns2/item1", 5),
            ("ns3/item1", 100),
            ("ns3/item2", 50),
            ("ns4/item1", 5),
            ("ns5/item1", 5),
        ]
        .into_iter()
        .map(|(key, ms)| (key.to_string(), Duration::from_millis(ms)))
        .collect();
        Self { items }
    }
}

impl LoadProfile {
    /// Build a profile, rejecting empty profiles and keys without a valid
    /// tenant.
    pub fn new(items: impl IntoIterator<Item = (String, Duration)>) -> Result<Self> {
        let items: BTreeMap<_, _> = items.into_iter().collect();
        if items.is_empty() {
            return Err(Error::Profile("profile has no items".to_string()));
        }
        for key in items.keys() {
            split_tenant_key(key)?;
        }
        Ok(Self { items })
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ProfileFile =
            toml::from_str(content).map_err(|e| Error::Profile(format!("bad profile: {e}")))?;
        Self::from_file(file)
    }

    /// Load a profile from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let file: ProfileFile = toml::from_str(&content)
            .map_err(|e| Error::Profile(format!("bad profile {}: {e}", path.display())))?;
        Self::from_file(file)
    }

    fn from_file(file: ProfileFile) -> Result<Self> {
        Self::new(
            file.items
                .into_iter()
                .map(|(key, ms)| (key, Duration::from_millis(ms))),
        )
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.items.keys()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Processing time for `key`; zero for keys not in the profile.
    pub fn duration_of(&self, key: &str) -> Duration {
        self.items.get(key).copied().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LoadTestOptions {
    pub rounds: usize,
    pub cycles: usize,
    pub workers: usize,
}

impl Default for LoadTestOptions {
    fn default() -> Self {
        Self {
            rounds: 10,
            cycles: 10,
            workers: crate::config::DEFAULT_WORKERS,
        }
    }
}

/// Outcome of draining one queue.
#[derive(Debug, Clone, Serialize)]
pub struct RoundReport {
    pub elapsed_secs: f64,
    /// Times each item was processed.
    pub processed: BTreeMap<String, usize>,
}

/// Drain `queue` under `profile` with `workers` threads until every item
/// was processed `cycles` times, or until someone else shuts it down.
pub fn run_load_test<Q>(
    queue: &Q,
    profile: &LoadProfile,
    cycles: usize,
    workers: usize,
) -> RoundReport
where
    Q: WorkQueue<String> + ?Sized,
{
    let counts: Mutex<HashMap<String, usize>> =
        Mutex::new(profile.keys().map(|key| (key.clone(), 0)).collect());
    let start = Instant::now();

    thread::scope(|scope| {
        let counts = &counts;
        for _ in 0..workers.max(1) {
            scope.spawn(move || drain(queue, profile, counts, cycles));
        }
        for key in profile.keys() {
            queue.add(key.clone());
        }
    });

    RoundReport {
        elapsed_secs: start.elapsed().as_secs_f64(),
        processed: counts.into_inner().into_iter().collect(),
    }
}

fn drain<Q>(
    queue: &Q,
    profile: &LoadProfile,
    counts: &Mutex<HashMap<String, usize>>,
    cycles: usize,
) where
    Q: WorkQueue<String> + ?Sized,
{
    while let Some(key) = queue.get() {
        let span = start_reconcile_span("loadtest", &key);
        let _entered = span.enter();

        thread::sleep(profile.duration_of(&key));
        queue.done(&key);

        let (count, all_done) = {
            let mut counts = counts.lock();
            let count = counts.entry(key.clone()).or_insert(0);
            *count += 1;
            let count = *count;
            (count, counts.values().all(|&n| n >= cycles))
        };
        if all_done {
            record_outcome(&span, false);
            queue.shut_down();
            return;
        }
        let requeue = count < cycles;
        if requeue {
            queue.add(key);
        }
        record_outcome(&span, requeue);
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub started_at: DateTime<Utc>,
    pub options: LoadTestOptions,
    pub fair: Vec<RoundReport>,
    pub fifo: Vec<RoundReport>,
    pub fair_avg_secs: f64,
    pub fifo_avg_secs: f64,
    /// `(fifo - fair) / fifo * 100`.
    pub speedup_pct: f64,
    /// Set when the run was cut short; the averages cover finished rounds.
    pub cancelled: bool,
}

/// Runs rounds on fresh fair and FIFO queues and can be cancelled from
/// another thread.
pub struct LoadTest {
    profile: LoadProfile,
    options: LoadTestOptions,
    cancelled: AtomicBool,
    active: Mutex<Option<Arc<dyn WorkQueue<String>>>>,
}

impl LoadTest {
    pub fn new(profile: LoadProfile, options: LoadTestOptions) -> Self {
        Self {
            profile,
            options,
            cancelled: AtomicBool::new(false),
            active: Mutex::new(None),
        }
    }

    /// Run every round. Blocks the calling thread.
    pub fn run(&self) -> Comparison {
        let started_at = Utc::now();
        let fair = self.rounds("fair", || {
            Arc::new(FairQueue::<String>::named("loadtest-fair")) as Arc<dyn WorkQueue<String>>
        });
        let fifo = self.rounds("fifo", || {
            Arc::new(FifoQueue::<String>::named("loadtest-fifo")) as Arc<dyn WorkQueue<String>>
        });

        let fair_avg_secs = average(&fair);
        let fifo_avg_secs = average(&fifo);
        let speedup_pct = if fifo_avg_secs > 0.0 {
            (fifo_avg_secs - fair_avg_secs) / fifo_avg_secs * 100.0
        } else {
            0.0
        };
        info!(fair_avg_secs, fifo_avg_secs, speedup_pct, "load test finished");

        Comparison {
            started_at,
            options: self.options,
            fair,
            fifo,
            fair_avg_secs,
            fifo_avg_secs,
            speedup_pct,
            cancelled: self.is_cancelled(),
        }
    }

    fn rounds<F>(&self, flavour: &str, make: F) -> Vec<RoundReport>
    where
        F: Fn() -> Arc<dyn WorkQueue<String>>,
    {
        let mut reports = Vec::with_capacity(self.options.rounds);
        for round in 0..self.options.rounds {
            let queue = make();
            *self.active.lock() = Some(Arc::clone(&queue));
            if self.is_cancelled() {
                break;
            }
            let report = run_load_test(
                queue.as_ref(),
                &self.profile,
                self.options.cycles,
                self.options.workers,
            );
            self.active.lock().take();
            if self.is_cancelled() {
                warn!(flavour, round, "round interrupted, discarding");
                break;
            }
            info!(
                flavour,
                round,
                cycles = self.options.cycles,
                elapsed_secs = report.elapsed_secs,
                "round finished"
            );
            reports.push(report);
        }
        reports
    }

    /// Stop after the current round, shutting down its queue.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        if let Some(queue) = self.active.lock().as_ref() {
            queue.shut_down();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Run a full comparison without a cancellation handle.
pub fn compare(profile: LoadProfile, options: LoadTestOptions) -> Comparison {
    LoadTest::new(profile, options).run()
}

fn average(reports: &[RoundReport]) -> f64 {
    if reports.is_empty() {
        return 0.0;
    }
    reports.iter().map(|r| r.elapsed_secs).sum::<f64>() / reports.len() as f64
}
