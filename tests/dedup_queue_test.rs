//! Tests for the single-tenant deduplicating queue.

use fairq::queue::DedupingQueue;

fn queue() -> DedupingQueue<&'static str> {
    DedupingQueue::new()
}

#[test]
fn get_on_empty_returns_none() {
    let mut q = queue();
    assert_eq!(q.get(), None);
    assert!(q.is_empty());
}

#[test]
fn add_marks_dirty_and_queues() {
    let mut q = queue();
    assert!(!q.is_dirty(&"x"));

    q.add("x");
    assert!(q.is_dirty(&"x"));
    assert!(!q.is_processing(&"x"));
    assert_eq!(q.len(), 1);
}

#[test]
fn repeated_add_collapses() {
    let mut q = queue();
    q.add("x");
    q.add("x");
    q.add("x");
    assert_eq!(q.len(), 1);

    q.add("y");
    assert_eq!(q.len(), 2);
}

#[test]
fn add_while_processing_requeues_on_done() {
    let mut q = queue();
    q.add("x");
    assert_eq!(q.get(), Some("x"));
    assert!(!q.is_dirty(&"x"));
    assert!(q.is_processing(&"x"));
    assert_eq!(q.len(), 0);

    // Re-added while checked out: dirty, but not handed out again yet.
    q.add("x");
    assert!(q.is_dirty(&"x"));
    assert!(q.is_processing(&"x"));
    assert_eq!(q.len(), 0);
    assert_eq!(q.get(), None);

    assert!(q.done(&"x"));
    assert!(q.is_dirty(&"x"));
    assert!(!q.is_processing(&"x"));
    assert_eq!(q.len(), 1);
}

#[test]
fn add_twice_while_processing_requeues_once() {
    let mut q = queue();
    q.add("x");
    q.get();
    q.add("x");
    q.add("x");

    assert!(q.done(&"x"));
    assert_eq!(q.len(), 1);
    assert_eq!(q.get(), Some("x"));
    assert!(!q.done(&"x"));
    assert_eq!(q.len(), 0);
}

#[test]
fn done_on_queued_item_is_noop() {
    let mut q = queue();
    q.add("x");
    q.add("x");

    assert!(!q.done(&"x"));
    assert!(q.is_dirty(&"x"));
    assert!(!q.is_processing(&"x"));
    assert_eq!(q.len(), 1);
}

#[test]
fn done_after_single_get_clears_item() {
    let mut q = queue();
    q.add("x");
    assert_eq!(q.get(), Some("x"));

    assert!(!q.done(&"x"));
    assert!(!q.is_dirty(&"x"));
    assert!(!q.is_processing(&"x"));
    assert_eq!(q.len(), 0);
}

#[test]
fn done_twice_does_not_double_requeue() {
    let mut q = queue();
    q.add("x");
    q.get();
    q.add("x");

    assert!(q.done(&"x"));
    assert!(!q.done(&"x"));
    assert_eq!(q.len(), 1);
}

#[test]
fn done_on_unknown_item_is_noop() {
    let mut q = queue();
    assert!(!q.done(&"never-added"));
    assert_eq!(q.len(), 0);
}

#[test]
fn preserves_insertion_order() {
    let mut q = queue();
    for item in ["a", "b", "c"] {
        q.add(item);
    }
    q.add("a");

    assert_eq!(q.get(), Some("a"));
    assert_eq!(q.get(), Some("b"));
    assert_eq!(q.get(), Some("c"));
    assert_eq!(q.get(), None);
}
