//! Typed configuration from environment variables.
//!
//! Loads once at startup and fails fast on malformed values.

use crate::error::{Error, Result};

/// Default number of worker threads draining a queue.
pub const DEFAULT_WORKERS: usize = 3;

#[derive(Debug, Clone)]
pub struct Config {
    pub otel_endpoint: Option<String>,
    pub log_level: String,
    pub workers: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// In local dev, call `dotenvy::dotenv().ok()` before this.
    pub fn from_env() -> Result<Self> {
        let workers = match std::env::var("FAIRQ_WORKERS") {
            Ok(raw) => parse_workers(&raw)?,
            Err(_) => DEFAULT_WORKERS,
        };
        Ok(Self {
            otel_endpoint: std::env::var("OTEL_ENDPOINT").ok(),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            workers,
        })
    }
}

fn parse_workers(raw: &str) -> Result<usize> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(Error::Config(format!(
            "FAIRQ_WORKERS must be a positive integer, got {raw:?}"
        ))),
    }
}
