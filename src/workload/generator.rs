//! Record generation
//!
//! `RecordGenerator` is a lazy iterator; `Workload` is its materialised,
//! labelled output that the runner replays against each backend.

use std::fmt;

use bytes::Bytes;
use clap::ValueEnum;
use rand::RngCore;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::codec::{encode_key, Item, ItemCodec, ADDRESS_SIZE};
use crate::error::Result;

use super::Record;

/// Which kind of records a workload contains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum WorkloadMode {
    /// Key and value are the same big-endian counter
    SequentialIntegers,

    /// Random 8-byte keys with encoded item values
    StructuredRandom,
}

impl WorkloadMode {
    /// Label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            WorkloadMode::SequentialIntegers => "key-value",
            WorkloadMode::StructuredRandom => "items",
        }
    }
}

impl fmt::Display for WorkloadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkloadMode::SequentialIntegers => write!(f, "sequential-integers"),
            WorkloadMode::StructuredRandom => write!(f, "structured-random"),
        }
    }
}

// =============================================================================
// RecordGenerator
// =============================================================================

/// Lazily produces `count` records for a mode
///
/// The random source is ChaCha8 seeded from `seed`, whose output is stable
/// across platforms and crate versions, so a (seed, count) pair always yields
/// the same bytes.
pub struct RecordGenerator {
    mode: WorkloadMode,
    count: usize,
    produced: usize,
    rng: ChaCha8Rng,
    codec: ItemCodec,
}

impl RecordGenerator {
    pub fn new(mode: WorkloadMode, count: usize, seed: u64, codec: ItemCodec) -> Self {
        Self {
            mode,
            count,
            produced: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            codec,
        }
    }

    /// Generator for `sequential-integers` (seed and codec are unused)
    pub fn sequential(count: usize) -> Self {
        Self::new(WorkloadMode::SequentialIntegers, count, 0, ItemCodec::default())
    }

    /// Generator for `structured-random`
    pub fn structured(count: usize, seed: u64, codec: ItemCodec) -> Self {
        Self::new(WorkloadMode::StructuredRandom, count, seed, codec)
    }

    fn next_structured(&mut self) -> Result<Record> {
        let mut address = [0u8; ADDRESS_SIZE];
        self.rng.fill_bytes(&mut address);

        let value = self.codec.encode(&Item::from_address(address))?;
        Ok(Record::new(Bytes::copy_from_slice(&address), value))
    }
}

impl Iterator for RecordGenerator {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.produced >= self.count {
            return None;
        }
        let index = self.produced as u64;
        self.produced += 1;

        match self.mode {
            WorkloadMode::SequentialIntegers => {
                let bytes = Bytes::copy_from_slice(&encode_key(index));
                Some(Ok(Record::new(bytes.clone(), bytes)))
            }
            WorkloadMode::StructuredRandom => Some(self.next_structured()),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.produced;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RecordGenerator {}

// =============================================================================
// Workload
// =============================================================================

/// A labelled, ordered set of records
#[derive(Debug, Clone)]
pub struct Workload {
    label: String,
    records: Vec<Record>,
}

impl Workload {
    pub fn new(label: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            label: label.into(),
            records,
        }
    }

    /// Generate a workload, labelled after its mode
    pub fn generate(mode: WorkloadMode, count: usize, seed: u64, codec: ItemCodec) -> Result<Self> {
        let records = RecordGenerator::new(mode, count, seed, codec).collect::<Result<Vec<_>>>()?;
        Ok(Self::new(mode.label(), records))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of key and value lengths over all records
    pub fn total_bytes(&self) -> u64 {
        self.records.iter().map(|r| r.size() as u64).sum()
    }

    /// CRC32 over every key and value, in order
    pub fn fingerprint(&self) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        for record in &self.records {
            hasher.update(&(record.key().len() as u32).to_be_bytes());
            hasher.update(record.key());
            hasher.update(&(record.value().len() as u32).to_be_bytes());
            hasher.update(record.value());
        }
        hasher.finalize()
    }

    pub fn summary(&self) -> WorkloadSummary {
        WorkloadSummary {
            label: self.label.clone(),
            records: self.len(),
            value_size: self.records.first().map(|r| r.value().len()).unwrap_or(0),
            total_bytes: self.total_bytes(),
            fingerprint: self.fingerprint(),
        }
    }
}

/// Shape of a workload, reported before it runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadSummary {
    pub label: String,
    pub records: usize,

    /// Value size of the first record
    pub value_size: usize,
    pub total_bytes: u64,
    pub fingerprint: u32,
}
