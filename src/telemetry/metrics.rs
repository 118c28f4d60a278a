//! Metric instruments for fairq queues.
//!
//! Uses the OTel Meter API with the globally-registered `MeterProvider`.
//! Without a registered provider every instrument is a no-op.

use opentelemetry::KeyValue;
use opentelemetry::metrics::{Counter, Meter};

/// Returns the shared meter for fairq instruments.
fn meter() -> Meter {
    opentelemetry::global::meter("fairq")
}

/// Counters for one queue instance, labelled with the queue name.
///
/// Built once when the queue is created so the hot path only records.
#[derive(Debug, Clone)]
pub struct QueueMetrics {
    adds: Counter<u64>,
    gets: Counter<u64>,
    requeues: Counter<u64>,
    dropped: Counter<u64>,
    labels: [KeyValue; 1],
}

impl QueueMetrics {
    pub fn new(queue: &str) -> Self {
        let meter = meter();
        Self {
            adds: meter
                .u64_counter("fairq.queue.adds")
                .with_description("Items added to the queue, including deduplicated adds")
                .build(),
            gets: meter
                .u64_counter("fairq.queue.gets")
                .with_description("Items handed out to consumers")
                .build(),
            requeues: meter
                .u64_counter("fairq.queue.requeues")
                .with_description("Items queued again because they were re-added while processing")
                .build(),
            dropped: meter
                .u64_counter("fairq.queue.dropped")
                .with_description("Items dropped because their key could not be parsed")
                .build(),
            labels: [KeyValue::new("queue", queue.to_string())],
        }
    }

    pub fn record_add(&self) {
        self.adds.add(1, &self.labels);
    }

    pub fn record_get(&self) {
        self.gets.add(1, &self.labels);
    }

    pub fn record_requeue(&self) {
        self.requeues.add(1, &self.labels);
    }

    pub fn record_dropped(&self) {
        self.dropped.add(1, &self.labels);
    }
}
