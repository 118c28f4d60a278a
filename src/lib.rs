//! # fairq
//!
//! Tenant-fair, deduplicating work queue for reconciliation controllers.
//!
//! Work items are `"<namespace>/<name>"` keys. Each namespace gets its own
//! deduplicating sub-queue and consumers are served round-robin across
//! namespaces, so one noisy namespace cannot starve the rest. An item is
//! never handed out twice concurrently, and re-adds of a pending item
//! collapse into one unit of work.

pub mod config;
pub mod error;
pub mod key;
pub mod loadtest;
pub mod queue;
pub mod telemetry;
