//! Work queues consumed by reconciliation loops.
//!
//! A consumer loops `get` → process → `done` until `get` returns `None`:
//!
//! ```
//! use fairq::queue::FairQueue;
//!
//! let queue = FairQueue::new();
//! queue.add("team-a/web".to_string());
//! queue.add("team-a/web".to_string());
//! queue.add("team-b/db".to_string());
//! assert_eq!(queue.len(), 2);
//!
//! while let Some(key) = queue.get() {
//!     // reconcile `key` here
//!     queue.done(&key);
//!     if queue.is_empty() {
//!         queue.shut_down();
//!     }
//! }
//! ```

pub mod dedup;
pub mod fair;
pub mod fifo;
pub mod ring;

pub use dedup::DedupingQueue;
pub use fair::FairQueue;
pub use fifo::FifoQueue;
pub use ring::IndexedCircularBuffer;

/// Blocking work queue contract shared by all queue flavours.
///
/// Adding an item that is already waiting is a no-op; adding one that is
/// being processed defers it until `done`. Only `get` blocks.
pub trait WorkQueue<T>: Send + Sync {
    fn add(&self, item: T);

    /// Block for the next item; `None` means the queue is shutting down.
    fn get(&self) -> Option<T>;

    fn done(&self, item: &T);

    /// Items waiting to be handed out. Not for flow control.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn shut_down(&self);

    fn shutting_down(&self) -> bool;
}
