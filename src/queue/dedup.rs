//! Single-tenant deduplicating queue.
//!
//! Not thread-safe; the owning queue serializes every call under its lock.

use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

/// An ordered queue that collapses redundant adds.
///
/// Every element of `queue` is also in `dirty` and never in `processing`.
/// An item re-added while it is being processed is only marked dirty; it
/// goes back on the queue once, when [`done`](Self::done) is called.
#[derive(Debug)]
pub struct DedupingQueue<T> {
    /// Order in which items are handed out.
    queue: VecDeque<T>,
    /// Items that need processing, queued or not.
    dirty: HashSet<T>,
    /// Items handed out by `get` and not yet returned through `done`.
    processing: HashSet<T>,
}

impl<T> Default for DedupingQueue<T> {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
            dirty: HashSet::new(),
            processing: HashSet::new(),
        }
    }
}

impl<T: Clone + Eq + Hash> DedupingQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `item` as needing processing.
    pub fn add(&mut self, item: T) {
        if self.dirty.contains(&item) {
            return;
        }
        self.dirty.insert(item.clone());
        if self.processing.contains(&item) {
            return;
        }
        self.queue.push_back(item);
    }

    /// Pop the oldest queued item and check it out. Never blocks.
    pub fn get(&mut self) -> Option<T> {
        let item = self.queue.pop_front()?;
        self.dirty.remove(&item);
        self.processing.insert(item.clone());
        Some(item)
    }

    /// Finish processing `item`. Returns true if it was re-added meanwhile
    /// and is queued again.
    pub fn done(&mut self, item: &T) -> bool {
        if !self.processing.remove(item) {
            return false;
        }
        if self.dirty.contains(item) {
            self.queue.push_back(item.clone());
            return true;
        }
        false
    }

    /// Number of queued items. Informational only.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn is_dirty(&self, item: &T) -> bool {
        self.dirty.contains(item)
    }

    pub fn is_processing(&self, item: &T) -> bool {
        self.processing.contains(item)
    }
}
