//! Tests for the global FIFO baseline queue.

use fairq::queue::{FifoQueue, WorkQueue};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[test]
fn serves_in_arrival_order_across_tenants() {
    let q: FifoQueue<String> = FifoQueue::new();
    for i in 0..3 {
        q.add(format!("a/{i}"));
    }
    q.add("b/0".to_string());

    let served: Vec<String> = (0..4).map(|_| q.get().expect("item")).collect();
    assert_eq!(served, vec!["a/0", "a/1", "a/2", "b/0"]);
}

#[test]
fn dedups_like_the_fair_queue() {
    let q: FifoQueue<&'static str> = FifoQueue::new();
    q.add("foo");
    q.add("foo");
    assert_eq!(q.len(), 1);

    let item = q.get().expect("item");
    q.add(item);
    assert_eq!(q.len(), 0);
    q.done(&item);
    assert_eq!(q.len(), 1);
    assert_eq!(q.get(), Some("foo"));
    q.done(&"foo");
    assert!(q.is_empty());
}

#[test]
fn shutdown_semantics_match() {
    let q = Arc::new(FifoQueue::<String>::named("fifo-test"));
    let consumer = {
        let q = Arc::clone(&q);
        thread::spawn(move || q.get())
    };
    thread::sleep(Duration::from_millis(20));
    q.shut_down();
    assert_eq!(consumer.join().expect("consumer panicked"), None);

    q.add("late".to_string());
    assert_eq!(q.len(), 1);
    assert!(q.shutting_down());
    assert_eq!(q.get(), None);
}

#[test]
fn usable_as_work_queue() {
    let q: Box<dyn WorkQueue<String>> = Box::new(FifoQueue::<String>::new());
    q.add("x".to_string());
    assert_eq!(q.get().as_deref(), Some("x"));
    q.done(&"x".to_string());
    assert!(q.is_empty());
}
