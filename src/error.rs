//! Error types for fairq.
//!
//! Queue operations themselves never fail; these cover key parsing,
//! configuration, load profiles and telemetry setup.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid key {key:?}: {reason}")]
    InvalidKey { key: String, reason: &'static str },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("load profile error: {0}")]
    Profile(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("telemetry error: {0}")]
    Telemetry(String),
}

pub type Result<T> = std::result::Result<T, Error>;
