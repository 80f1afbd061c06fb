//! Backend Module
//!
//! Storage engines under test, behind one engine-agnostic interface.
//!
//! ## Responsibilities
//! - Define the `StorageBackend` capability (put / get)
//! - Adapt each engine to it without leaking engine types or schema
//! - Open each adapter on its own directory
//! - Clear a previous run's files, and only those, before a fresh run
//!
//! ## Adapters
//! ```text
//!                 ┌──────────────────┐
//!                 │  StorageBackend  │
//!                 └────────┬─────────┘
//!           ┌──────────────┴──────────────┐
//!           ▼                             ▼
//!   ┌───────────────┐             ┌───────────────┐
//!   │ LogStore      │             │ Relational    │
//!   │ (fjall LSM)   │             │ (SQLite table)│
//!   └───────────────┘             └───────────────┘
//! ```

mod logstore;
mod relational;

pub use logstore::LogStoreAdapter;
pub use relational::{ReadOrder, RelationalAdapter};

use std::fmt;
use std::path::Path;

use bytes::Bytes;
use clap::ValueEnum;

use crate::config::Config;
use crate::error::Result;

/// A key-value store the harness can time
///
/// `get` returns `Ok(None)` for a key that was never written; `Err` is
/// reserved for engine faults.
pub trait StorageBackend {
    /// Name used in reports and diagnostics
    fn name(&self) -> &str;

    /// Insert or overwrite the value for `key`
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<()>;

    /// Look up the value for `key`
    fn get(&mut self, key: &[u8]) -> Result<Option<Bytes>>;
}

/// The engines the harness knows how to open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum BackendKind {
    /// fjall LSM-tree
    #[value(name = "logstore")]
    LogStore,

    /// SQLite two-column table
    Relational,
}

impl BackendKind {
    pub fn name(&self) -> &'static str {
        match self {
            BackendKind::LogStore => "logstore",
            BackendKind::Relational => "relational",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Open the adapter for `kind` at its configured location
pub fn open_backend(kind: BackendKind, config: &Config) -> Result<Box<dyn StorageBackend>> {
    let path = config.backend_path(kind);
    tracing::info!("Opening {} backend at {}", kind, path.display());

    let backend: Box<dyn StorageBackend> = match kind {
        BackendKind::LogStore => Box::new(LogStoreAdapter::open(&path)?),
        BackendKind::Relational => Box::new(RelationalAdapter::open(&path, config.read_order)?),
    };
    Ok(backend)
}

/// Remove what a previous `kind` store left in `path`
pub fn reset_backend(kind: BackendKind, path: &Path) -> Result<()> {
    match kind {
        BackendKind::LogStore => LogStoreAdapter::reset(path),
        BackendKind::Relational => RelationalAdapter::reset(path),
    }
}
