//! Reconcile span helpers.
//!
//! Wraps the processing of one dequeued item so that logs emitted while
//! handling it carry the queue and key.

use tracing::Span;

/// Start a span for processing one item taken from `queue`.
///
/// The `reconcile.requeued` field is declared empty and filled in by
/// [`record_outcome`].
pub fn start_reconcile_span(queue: &str, key: &str) -> Span {
    tracing::info_span!(
        "reconcile",
        "reconcile.queue" = queue,
        "reconcile.key" = key,
        "reconcile.requeued" = tracing::field::Empty,
    )
}

/// Record whether the worker put the item back for another pass.
pub fn record_outcome(span: &Span, requeued: bool) {
    span.record("reconcile.requeued", requeued);
    span.in_scope(|| {
        tracing::debug!(requeued, "reconcile finished");
    });
}
