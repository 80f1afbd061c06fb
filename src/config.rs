//! Configuration for storebench
//!
//! Centralized configuration with sensible defaults.
//!
//! ## Record count
//! The default of 100,000 records per workload finishes in seconds on both
//! engines while still being large enough for the LSM tree to flush and for
//! SQLite's index to outgrow its page cache. Pass a larger count for
//! steady-state numbers.

use std::collections::HashSet;
use std::env;
use std::fs;
use std::hash::Hash;
use std::path::{Component, Path, PathBuf};

use clap::ValueEnum;

use crate::backend::{reset_backend, BackendKind, ReadOrder};
use crate::codec::ItemCodec;
use crate::error::{BenchError, Result};
use crate::workload::WorkloadMode;

/// Main configuration for a benchmark run
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory for backend files
    /// Internal structure:
    ///   {data_dir}/
    ///     ├── logstore/        (fjall keyspace)
    ///     └── relational/      (kv.sqlite)
    pub data_dir: PathBuf,

    /// Override for the log store directory
    pub logstore_path: Option<PathBuf>,

    /// Override for the relational store directory
    pub relational_path: Option<PathBuf>,

    /// Remove files a previous run of each backend left before opening it
    pub reset: bool,

    // -------------------------------------------------------------------------
    // Workload Configuration
    // -------------------------------------------------------------------------
    /// Records per workload
    pub record_count: usize,

    /// Seed for the structured-random workload
    pub seed: u64,

    /// Workloads to run, in order
    pub workloads: Vec<WorkloadMode>,

    /// Encoding of item values
    pub item_codec: ItemCodec,

    // -------------------------------------------------------------------------
    // Backend Configuration
    // -------------------------------------------------------------------------
    /// Backends to run, in order
    pub backends: Vec<BackendKind>,

    /// Which duplicate row the relational backend returns
    pub read_order: ReadOrder,

    // -------------------------------------------------------------------------
    // Runner / Report Configuration
    // -------------------------------------------------------------------------
    /// Compare every value read against the value written
    pub verify_values: bool,

    pub report_format: ReportFormat,
}

/// Output format of the report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// One human-readable line per result
    #[default]
    Text,

    /// One JSON object per line
    Json,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./storebench_data"),
            logstore_path: None,
            relational_path: None,
            reset: true,
            record_count: 100_000,
            seed: 0,
            workloads: vec![WorkloadMode::SequentialIntegers, WorkloadMode::StructuredRandom],
            item_codec: ItemCodec::Json,
            backends: vec![BackendKind::Relational, BackendKind::LogStore],
            read_order: ReadOrder::FirstWrite,
            verify_values: true,
            report_format: ReportFormat::Text,
        }
    }
}

impl Config {
    const LOGSTORE_DIR: &'static str = "logstore";
    const RELATIONAL_DIR: &'static str = "relational";
    const PROBE_FILENAME: &'static str = ".storebench-probe";

    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Directory owned by the given backend
    pub fn backend_path(&self, kind: BackendKind) -> PathBuf {
        match kind {
            BackendKind::LogStore => self
                .logstore_path
                .clone()
                .unwrap_or_else(|| self.data_dir.join(Self::LOGSTORE_DIR)),
            BackendKind::Relational => self
                .relational_path
                .clone()
                .unwrap_or_else(|| self.data_dir.join(Self::RELATIONAL_DIR)),
        }
    }

    /// Check values without modifying the filesystem
    pub fn validate(&self) -> Result<()> {
        if self.record_count == 0 {
            return Err(BenchError::Config(
                "record count must be greater than zero".to_string(),
            ));
        }
        if self.workloads.is_empty() {
            return Err(BenchError::Config("no workloads selected".to_string()));
        }
        if self.backends.is_empty() {
            return Err(BenchError::Config("no backends selected".to_string()));
        }
        if has_duplicates(&self.workloads) {
            return Err(BenchError::Config("workload listed more than once".to_string()));
        }
        if has_duplicates(&self.backends) {
            return Err(BenchError::Config("backend listed more than once".to_string()));
        }
        if same_location(
            &self.backend_path(BackendKind::LogStore),
            &self.backend_path(BackendKind::Relational),
        ) {
            return Err(BenchError::Config(
                "log store and relational store must use different directories".to_string(),
            ));
        }
        Ok(())
    }

    /// Prepare each selected backend's directory
    ///
    /// When `reset` is set, first removes what a previous run of that backend
    /// left there (never the directory itself or unrelated files). Then
    /// creates it and checks that it is writable.
    pub fn prepare_dirs(&self) -> Result<()> {
        for kind in &self.backends {
            let path = self.backend_path(*kind);
            if self.reset {
                reset_backend(*kind, &path).map_err(|e| match e {
                    BenchError::Config(_) => e,
                    other => {
                        BenchError::Config(format!("cannot clear {}: {}", path.display(), other))
                    }
                })?;
            }
            ensure_writable(&path)?;
        }
        Ok(())
    }
}

fn has_duplicates<T: Eq + Hash>(items: &[T]) -> bool {
    let mut seen = HashSet::new();
    !items.iter().all(|item| seen.insert(item))
}

/// True if both paths name the same directory
///
/// Existing paths are compared after resolving symlinks; otherwise the
/// absolute, lexically normalised forms are compared.
fn same_location(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => normalize(a) == normalize(b),
    }
}

fn normalize(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

fn ensure_writable(dir: &Path) -> Result<()> {
    let unwritable =
        |e: std::io::Error| BenchError::Config(format!("{} is not writable: {}", dir.display(), e));

    fs::create_dir_all(dir).map_err(unwritable)?;
    let probe = dir.join(Config::PROBE_FILENAME);
    fs::write(&probe, b"probe").map_err(unwritable)?;
    fs::remove_file(&probe).map_err(unwritable)?;
    Ok(())
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (root for all backends)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Place the log store somewhere other than `{data_dir}/logstore`
    pub fn logstore_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.logstore_path = Some(path.into());
        self
    }

    /// Place the relational store somewhere other than `{data_dir}/relational`
    pub fn relational_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.relational_path = Some(path.into());
        self
    }

    pub fn reset(mut self, reset: bool) -> Self {
        self.config.reset = reset;
        self
    }

    /// Set the number of records per workload
    pub fn record_count(mut self, count: usize) -> Self {
        self.config.record_count = count;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn workloads(mut self, workloads: impl Into<Vec<WorkloadMode>>) -> Self {
        self.config.workloads = workloads.into();
        self
    }

    pub fn item_codec(mut self, codec: ItemCodec) -> Self {
        self.config.item_codec = codec;
        self
    }

    pub fn backends(mut self, backends: impl Into<Vec<BackendKind>>) -> Self {
        self.config.backends = backends.into();
        self
    }

    pub fn read_order(mut self, order: ReadOrder) -> Self {
        self.config.read_order = order;
        self
    }

    pub fn verify_values(mut self, verify: bool) -> Self {
        self.config.verify_values = verify;
        self
    }

    pub fn report_format(mut self, format: ReportFormat) -> Self {
        self.config.report_format = format;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
