//! Workload Module
//!
//! Synthetic benchmark input.
//!
//! ## Responsibilities
//! - Generate records lazily for a given mode and count
//! - Keep generation deterministic for a fixed seed, so every backend is
//!   measured against byte-identical input
//! - Materialise a labelled workload once, shared by every backend
//!
//! ## Modes
//! - `sequential-integers`: key = value = big-endian counter
//! - `structured-random`: key = 8 random bytes, value = encoded item built
//!   from the same bytes

mod record;
mod generator;

pub use record::Record;
pub use generator::{RecordGenerator, Workload, WorkloadMode, WorkloadSummary};
