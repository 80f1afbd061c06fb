//! Error types for storebench
//!
//! Provides a unified error type for all harness operations.
//!
//! Every variant is fatal to a run. A key that is simply absent is not an
//! error: backends report it as `Ok(None)` from `get`.

use thiserror::Error;

use crate::runner::PassState;

/// Result type alias using BenchError
pub type Result<T> = std::result::Result<T, BenchError>;

/// Unified error type for storebench operations
#[derive(Debug, Error)]
pub enum BenchError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Engine Errors
    // -------------------------------------------------------------------------
    #[error("Log store error: {0}")]
    LogStore(#[from] fjall::Error),

    #[error("Relational engine error: {0}")]
    Relational(#[from] rusqlite::Error),

    #[error("Engine error: {0}")]
    Engine(String),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Run Errors
    // -------------------------------------------------------------------------
    /// An engine fault, annotated with where in the run it happened
    #[error(
        "{backend} {workload} {phase} failed at key {key} after {completed} operations: {source}"
    )]
    Operation {
        backend: String,
        workload: String,
        phase: PassState,
        completed: usize,
        key: String,
        #[source]
        source: Box<BenchError>,
    },

    /// A key the runner itself wrote could not be read back
    #[error("{backend} {workload}: key {key} not found after being written ({completed} reads completed)")]
    UnexpectedNotFound {
        backend: String,
        workload: String,
        completed: usize,
        key: String,
    },

    #[error("{backend} {workload}: value read for key {key} differs from the value written ({actual_len} bytes read, {expected_len} expected)")]
    ValueMismatch {
        backend: String,
        workload: String,
        key: String,
        expected_len: usize,
        actual_len: usize,
    },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BenchError {
    /// True if the error originated inside a storage engine
    pub fn is_engine_error(&self) -> bool {
        match self {
            BenchError::LogStore(_) | BenchError::Relational(_) | BenchError::Engine(_) => true,
            BenchError::Operation { source, .. } => source.is_engine_error(),
            _ => false,
        }
    }
}

/// Render a key for diagnostics
pub(crate) fn display_key(key: &[u8]) -> String {
    key.iter().map(|b| format!("{:02x}", b)).collect()
}
