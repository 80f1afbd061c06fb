//! Runner Module
//!
//! Times write and read passes of workloads against backends.
//!
//! ## Responsibilities
//! - Replay each workload against each backend: all writes, then all reads
//! - Measure wall-clock time of each phase
//! - Abort the run on the first engine fault or missing key
//! - Hand each result to a `ResultSink` as soon as it exists
//!
//! ## Pass State Machine
//! ```text
//!   Idle ──► Writing ──► Written ──► Reading ──► Done
//!               │                       │
//!               └──── fault ──► abort ◄─┘
//! ```
//!
//! Execution is single-threaded. One backend finishes its whole pass before
//! the next starts, so the engines never compete for CPU or disk. There is
//! no warm-up: the read phase sees whatever the write phase left cached.

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Serialize, Serializer};

use crate::backend::StorageBackend;
use crate::error::{display_key, BenchError, Result};
use crate::workload::{Workload, WorkloadSummary};

/// Phase a timing refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Write,
    Read,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Write => write!(f, "write"),
            Phase::Read => write!(f, "read"),
        }
    }
}

/// Where a (backend, workload) pass is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassState {
    Idle,
    Writing,
    Written,
    Reading,
    Done,
}

impl fmt::Display for PassState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassState::Idle => write!(f, "idle"),
            PassState::Writing => write!(f, "write"),
            PassState::Written => write!(f, "written"),
            PassState::Reading => write!(f, "read"),
            PassState::Done => write!(f, "done"),
        }
    }
}

/// Elapsed time of one phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimingResult {
    pub backend: String,
    pub workload: String,
    pub phase: Phase,

    #[serde(rename = "elapsed_ns", serialize_with = "serialize_nanos")]
    pub elapsed: Duration,

    /// Operations performed
    pub records: usize,

    /// Key plus value bytes moved
    pub bytes: u64,
}

fn serialize_nanos<S: Serializer>(
    elapsed: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u64(elapsed.as_nanos() as u64)
}

/// Results of a completed pass
#[derive(Debug, Clone)]
pub struct PassOutcome {
    pub write: TimingResult,
    pub read: TimingResult,
}

// =============================================================================
// ResultSink
// =============================================================================

/// Receives results in the order they are produced
pub trait ResultSink {
    /// Called once before a workload's first pass
    fn begin_workload(&mut self, _summary: &WorkloadSummary) -> Result<()> {
        Ok(())
    }

    fn record(&mut self, result: &TimingResult) -> Result<()>;
}

impl ResultSink for Vec<TimingResult> {
    fn record(&mut self, result: &TimingResult) -> Result<()> {
        self.push(result.clone());
        Ok(())
    }
}

// =============================================================================
// BenchmarkRunner
// =============================================================================

/// Owns the backends for the duration of a run
pub struct BenchmarkRunner {
    backends: Vec<Box<dyn StorageBackend>>,
    verify_values: bool,
}

impl BenchmarkRunner {
    pub fn new(backends: Vec<Box<dyn StorageBackend>>) -> Self {
        Self {
            backends,
            verify_values: true,
        }
    }

    /// Compare each value read with the value written (on by default)
    pub fn verify_values(mut self, verify: bool) -> Self {
        self.verify_values = verify;
        self
    }

    pub fn backends(&self) -> &[Box<dyn StorageBackend>] {
        &self.backends
    }

    pub fn into_backends(self) -> Vec<Box<dyn StorageBackend>> {
        self.backends
    }

    /// Run every workload against every backend, in order
    pub fn run<S: ResultSink + ?Sized>(
        &mut self,
        workloads: &[Workload],
        sink: &mut S,
    ) -> Result<()> {
        for workload in workloads {
            let summary = workload.summary();
            tracing::info!(
                "Workload {}: {} records, value size {}, fingerprint {:08x}",
                summary.label,
                summary.records,
                summary.value_size,
                summary.fingerprint
            );
            sink.begin_workload(&summary)?;

            for backend in self.backends.iter_mut() {
                run_pass(backend.as_mut(), workload, self.verify_values, &mut *sink)?;
            }
        }
        Ok(())
    }
}

/// Write then read `workload` through `backend`
///
/// The write result reaches `sink` before the read phase starts.
pub fn run_pass<S: ResultSink + ?Sized>(
    backend: &mut dyn StorageBackend,
    workload: &Workload,
    verify_values: bool,
    sink: &mut S,
) -> Result<PassOutcome> {
    let mut pass = Pass {
        backend,
        workload,
        verify_values,
        state: PassState::Idle,
    };

    let write = pass.write()?;
    sink.record(&write)?;

    let read = pass.read()?;
    sink.record(&read)?;

    pass.advance(PassState::Done);
    Ok(PassOutcome { write, read })
}

struct Pass<'a> {
    backend: &'a mut dyn StorageBackend,
    workload: &'a Workload,
    verify_values: bool,
    state: PassState,
}

impl Pass<'_> {
    fn advance(&mut self, next: PassState) {
        tracing::debug!(
            "{} {}: {} -> {}",
            self.backend.name(),
            self.workload.label(),
            self.state,
            next
        );
        self.state = next;
    }

    fn write(&mut self) -> Result<TimingResult> {
        self.advance(PassState::Writing);
        let workload = self.workload;
        let records = workload.records();

        let start = Instant::now();
        for (completed, record) in records.iter().enumerate() {
            if let Err(source) = self.backend.put(record.key(), record.value()) {
                return Err(self.abort(completed, record.key(), source));
            }
        }
        let elapsed = start.elapsed();

        self.advance(PassState::Written);
        Ok(self.timing(Phase::Write, elapsed))
    }

    fn read(&mut self) -> Result<TimingResult> {
        self.advance(PassState::Reading);
        let workload = self.workload;
        let records = workload.records();

        let start = Instant::now();
        for (completed, record) in records.iter().enumerate() {
            let value = match self.backend.get(record.key()) {
                Ok(Some(value)) => value,
                Ok(None) => {
                    return Err(BenchError::UnexpectedNotFound {
                        backend: self.backend.name().to_string(),
                        workload: self.workload.label().to_string(),
                        completed,
                        key: display_key(record.key()),
                    })
                }
                Err(source) => return Err(self.abort(completed, record.key(), source)),
            };

            if self.verify_values && &value != record.value() {
                return Err(BenchError::ValueMismatch {
                    backend: self.backend.name().to_string(),
                    workload: self.workload.label().to_string(),
                    key: display_key(record.key()),
                    expected_len: record.value().len(),
                    actual_len: value.len(),
                });
            }
        }
        let elapsed = start.elapsed();

        Ok(self.timing(Phase::Read, elapsed))
    }

    fn abort(&self, completed: usize, key: &[u8], source: BenchError) -> BenchError {
        BenchError::Operation {
            backend: self.backend.name().to_string(),
            workload: self.workload.label().to_string(),
            phase: self.state,
            completed,
            key: display_key(key),
            source: Box::new(source),
        }
    }

    fn timing(&self, phase: Phase, elapsed: Duration) -> TimingResult {
        TimingResult {
            backend: self.backend.name().to_string(),
            workload: self.workload.label().to_string(),
            phase,
            elapsed,
            records: self.workload.len(),
            bytes: self.workload.total_bytes(),
        }
    }
}
