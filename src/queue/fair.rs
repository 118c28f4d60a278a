//! Per-tenant fair queue.
//!
//! Each tenant (namespace) owns a [`DedupingQueue`]; the tenants sit in an
//! [`IndexedCircularBuffer`] whose cursor remembers the last tenant served.
//! `get` resumes the scan just after that tenant, so a tenant with a deep
//! backlog is served once per revolution like everyone else, and the wait
//! any tenant sees is bounded by the number of tenants rather than by the
//! depth of another tenant's queue.
//!
//! One mutex guards the ring and every sub-queue; one condvar wakes
//! consumers. `get` is the only call that blocks.

use parking_lot::{Condvar, Mutex};
use tracing::{debug, info, warn};

use super::WorkQueue;
use super::dedup::DedupingQueue;
use super::ring::IndexedCircularBuffer;
use crate::key::QueueItem;
use crate::telemetry::metrics::QueueMetrics;

struct State<T> {
    tenants: IndexedCircularBuffer<String, DedupingQueue<T>>,
    shutting_down: bool,
}

/// A blocking work queue that round-robins across tenants.
///
/// Sub-queues are created on the first add for a tenant and kept for the
/// life of the queue.
pub struct FairQueue<T> {
    name: String,
    state: Mutex<State<T>>,
    cond: Condvar,
    metrics: QueueMetrics,
}

impl<T: QueueItem> Default for FairQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: QueueItem> FairQueue<T> {
    pub fn new() -> Self {
        Self::named("fair")
    }

    /// Create a queue whose logs and metrics carry `name`.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            metrics: QueueMetrics::new(&name),
            name,
            state: Mutex::new(State {
                tenants: IndexedCircularBuffer::new(),
                shutting_down: false,
            }),
            cond: Condvar::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of tenants seen so far.
    pub fn tenant_count(&self) -> usize {
        self.state.lock().tenants.len()
    }

    /// Queue `item` under its tenant. Items whose tenant cannot be derived
    /// are logged and dropped.
    ///
    /// Adds are accepted after shutdown but will never be handed out.
    pub fn add(&self, item: T) {
        let tenant = match item.tenant() {
            Ok(tenant) => tenant,
            Err(error) => {
                warn!(queue = %self.name, key = ?item, %error, "dropping item on add");
                self.metrics.record_dropped();
                return;
            }
        };
        let mut state = self.state.lock();
        let (queue, existed) = state.tenants.get_or_insert_with(tenant, DedupingQueue::new);
        if !existed {
            debug!(queue = %self.name, tenant, "created tenant queue");
        }
        queue.add(item);
        self.metrics.record_add();
        self.cond.notify_one();
    }

    /// Block until an item is available, taking it from the tenant after the
    /// one served last. Returns `None` once the queue is shutting down.
    pub fn get(&self) -> Option<T> {
        let mut state = self.state.lock();
        loop {
            if state.shutting_down {
                return None;
            }
            let mut picked = None;
            state.tenants.range_next(|queue| match queue.get() {
                Some(item) => {
                    picked = Some(item);
                    false
                }
                None => true,
            });
            if picked.is_some() {
                self.metrics.record_get();
                return picked;
            }
            self.cond.wait(&mut state);
        }
    }

    /// Finish processing `item`, waking a consumer if it was re-added in the
    /// meantime. Unknown or not checked-out items are ignored.
    pub fn done(&self, item: &T) {
        let tenant = match item.tenant() {
            Ok(tenant) => tenant,
            Err(error) => {
                warn!(queue = %self.name, key = ?item, %error, "dropping item on done");
                self.metrics.record_dropped();
                return;
            }
        };
        let mut state = self.state.lock();
        let Some(queue) = state.tenants.get_mut(tenant) else {
            return;
        };
        if queue.done(item) {
            self.metrics.record_requeue();
            self.cond.notify_one();
        }
    }

    /// Items waiting across all tenants. Informational only.
    pub fn len(&self) -> usize {
        let state = self.state.lock();
        let mut total = 0;
        state.tenants.range(|queue| {
            total += queue.len();
            true
        });
        total
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Wake every blocked consumer and make all further `get`s return `None`.
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

impl<T> WorkQueue<T> for FairQueue<T>
where
    T: QueueItem + Send,
{
    fn add(&self, item: T) {
        FairQueue::add(self, item)
    }

    fn get(&self) -> Option<T> {
        FairQueue::get(self)
    }

    fn done(&self, item: &T) {
        FairQueue::done(self, item)
    }

    fn len(&self) -> usize {
        FairQueue::len(self)
    }

    fn shut_down(&self) {
        FairQueue::shut_down(self)
    }

    fn shutting_down(&self) -> bool {
        FairQueue::shutting_down(self)
    }
}
