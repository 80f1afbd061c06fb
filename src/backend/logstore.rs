//! Log-structured store adapter
//!
//! Maps put/get straight onto a single fjall partition. No batching or
//! transactions are layered on top.

use std::fs;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};

use crate::error::{BenchError, Result};

use super::{BackendKind, StorageBackend};

/// `StorageBackend` over a fjall keyspace
pub struct LogStoreAdapter {
    /// Keyspace directory
    path: PathBuf,

    keyspace: Keyspace,

    /// The one partition all records go to
    partition: PartitionHandle,
}

impl LogStoreAdapter {
    const PARTITION: &'static str = "kv";

    /// File fjall writes at the root of every keyspace it creates
    const KEYSPACE_MARKER: &'static str = "version";

    /// Open or create a store in `path`
    pub fn open(path: &Path) -> Result<Self> {
        fs::create_dir_all(path)?;

        let keyspace = fjall::Config::new(path).open()?;
        let partition = keyspace.open_partition(Self::PARTITION, PartitionCreateOptions::default())?;

        Ok(Self {
            path: path.to_path_buf(),
            keyspace,
            partition,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Empty a previous store in `path`
    ///
    /// Only a directory fjall laid out (it holds the keyspace marker) is
    /// cleared. An empty or missing directory is left alone, and any other
    /// non-empty directory is refused.
    pub fn reset(path: &Path) -> Result<()> {
        if !path.is_dir() {
            return Ok(());
        }

        if path.join(Self::KEYSPACE_MARKER).is_file() {
            tracing::debug!("Clearing log store at {}", path.display());
            for entry in fs::read_dir(path)? {
                let entry = entry?;
                if entry.file_type()?.is_dir() {
                    fs::remove_dir_all(entry.path())?;
                } else {
                    fs::remove_file(entry.path())?;
                }
            }
            return Ok(());
        }

        if fs::read_dir(path)?.next().is_some() {
            return Err(BenchError::Config(format!(
                "refusing to reset {}: directory is not empty and holds no log store",
                path.display()
            )));
        }
        Ok(())
    }

    /// Sync the journal to disk
    pub fn persist(&self) -> Result<()> {
        self.keyspace.persist(PersistMode::SyncAll)?;
        Ok(())
    }
}

impl StorageBackend for LogStoreAdapter {
    fn name(&self) -> &str {
        BackendKind::LogStore.name()
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        self.partition.insert(key, value)?;
        Ok(())
    }

    fn get(&mut self, key: &[u8]) -> Result<Option<Bytes>> {
        Ok(self
            .partition
            .get(key)?
            .map(|value| Bytes::copy_from_slice(&value)))
    }
}
