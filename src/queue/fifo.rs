//! Global deduplicating FIFO queue.
//!
//! Same contract and locking as [`FairQueue`](super::FairQueue) but a single
//! sub-queue for everything, so one tenant's burst delays all others. Kept as
//! the baseline the fair queue is measured against.

use std::fmt;
use std::hash::Hash;

use parking_lot::{Condvar, Mutex};
use tracing::info;

use super::WorkQueue;
use super::dedup::DedupingQueue;
use crate::telemetry::metrics::QueueMetrics;

struct State<T> {
    queue: DedupingQueue<T>,
    shutting_down: bool,
}

pub struct FifoQueue<T> {
    name: String,
    state: Mutex<State<T>>,
    cond: Condvar,
    metrics: QueueMetrics,
}

impl<T: Clone + Eq + Hash> Default for FifoQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Eq + Hash> FifoQueue<T> {
    pub fn new() -> Self {
        Self::named("fifo")
    }

    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            metrics: QueueMetrics::new(&name),
            name,
            state: Mutex::new(State {
                queue: DedupingQueue::new(),
                shutting_down: false,
            }),
            cond: Condvar::new(),
        }
    }

    pub fn add(&self, item: T) {
        self.state.lock().queue.add(item);
        self.metrics.record_add();
        self.cond.notify_one();
    }

    /// Block until an item is available. `None` once shutting down.
    pub fn get(&self) -> Option<T> {
        let mut state = self.state.lock();
        loop {
            if state.shutting_down {
                return None;
            }
            if let Some(item) = state.queue.get() {
                self.metrics.record_get();
                return Some(item);
            }
            self.cond.wait(&mut state);
        }
    }

    pub fn done(&self, item: &T) {
        if self.state.lock().queue.done(item) {
            self.metrics.record_requeue();
            self.cond.notify_one();
        }
    }

    pub fn len(&self) -> usize {
        self.state.lock().queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn shut_down(&self) {
        let mut state = self.state.lock();
        state.shutting_down = true;
        info!(queue = %self.name, "queue shutting down");
        self.cond.notify_all();
    }

    pub fn shutting_down(&self) -> bool {
        self.state.lock().shutting_down
    }
}

impl<T> WorkQueue<T> for FifoQueue<T>
where
    T: Clone + Eq + Hash + fmt::Debug + Send,
{
    fn add(&self, item: T) {
        FifoQueue::add(self, item)
    }

    fn get(&self) -> Option<T> {
        FifoQueue::get(self)
    }

    fn done(&self, item: &T) {
        FifoQueue::done(self, item)
    }

    fn len(&self) -> usize {
        FifoQueue::len(self)
    }

    fn shut_down(&self) {
        FifoQueue::shut_down(self)
    }

    fn shutting_down(&self) -> bool {
        FifoQueue::shutting_down(self)
    }
}
