//! # storebench
//!
//! Measures write and read throughput of two embedded storage engines under
//! the same synthetic workloads:
//! - a log-structured (LSM-tree) key-value store
//! - a relational engine used as a two-column key/value table
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Harness                               │
//! │          (config → workloads → backends → runner)            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  BenchmarkRunner                             │
//! │       (write pass, then read pass, per backend)              │
//! └──────────┬──────────────────────────────────┬───────────────┘
//!            │                                  │
//!            ▼                                  ▼
//!   ┌─────────────────┐                ┌─────────────────┐
//!   │    Workload     │                │ StorageBackend  │
//!   │ (RecordGenerator│                │ logstore /      │
//!   │  + KeyCodec)    │                │ relational      │
//!   └─────────────────┘                └─────────────────┘
//!                       │
//!                       ▼
//!               ┌───────────────┐
//!               │    Report     │
//!               └───────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod codec;
pub mod workload;
pub mod backend;
pub mod runner;
pub mod report;
pub mod harness;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{BenchError, Result};
pub use config::{Config, ReportFormat};
pub use backend::{BackendKind, StorageBackend};
pub use runner::{BenchmarkRunner, TimingResult};
pub use report::Report;
pub use workload::{Workload, WorkloadMode};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of storebench
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
