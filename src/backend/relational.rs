//! Relational store adapter
//!
//! Stores records in a single SQLite table:
//!
//! ```text
//! key_values
//! ┌──────────────┬──────────────┐
//! │ key   BLOB   │ value  BLOB  │   INDEX idx_key_values_key (key), non-unique
//! └──────────────┴──────────────┘
//! ```
//!
//! ## Semantics
//! - `put` is a plain single-row INSERT. Writing a key twice leaves two rows.
//! - `get` returns one matching row, chosen by insertion (rowid) order
//!   according to `ReadOrder`. The default, `FirstWrite`, returns the oldest
//!   row, so overwrites are NOT visible. `LastWrite` returns the newest.
//!
//! ## Benchmark configuration
//! The connection runs with `synchronous = OFF` and `journal_mode = OFF` and
//! without explicit transactions, which puts SQLite on a similar footing to
//! the log store's buffered writes. A crash mid-run can corrupt the database
//! file. These settings are for throughput comparison only and are not a
//! durability recommendation.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use clap::ValueEnum;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::Result;

use super::{BackendKind, StorageBackend};

/// Which row `get` returns when a key has been written more than once
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReadOrder {
    /// Oldest row wins
    #[default]
    FirstWrite,

    /// Newest row wins
    LastWrite,
}

impl fmt::Display for ReadOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadOrder::FirstWrite => write!(f, "first-write"),
            ReadOrder::LastWrite => write!(f, "last-write"),
        }
    }
}

// =============================================================================
// Row Mapping
// =============================================================================

/// One row of `key_values`
#[derive(Debug)]
struct KeyValueRow {
    key: Vec<u8>,
    value: Vec<u8>,
}

impl KeyValueRow {
    const CREATE_TABLE: &'static str =
        r#"CREATE TABLE IF NOT EXISTS key_values ("key" BLOB, "value" BLOB)"#;
    const CREATE_INDEX: &'static str =
        r#"CREATE INDEX IF NOT EXISTS idx_key_values_key ON key_values ("key")"#;
    const INSERT: &'static str = r#"INSERT INTO key_values ("key", "value") VALUES (?1, ?2)"#;
    const SELECT_FIRST: &'static str =
        r#"SELECT "key", "value" FROM key_values WHERE "key" = ?1 ORDER BY rowid ASC LIMIT 1"#;
    const SELECT_LAST: &'static str =
        r#"SELECT "key", "value" FROM key_values WHERE "key" = ?1 ORDER BY rowid DESC LIMIT 1"#;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            key: row.get(0)?,
            value: row.get(1)?,
        })
    }

    fn migrate(conn: &Connection) -> rusqlite::Result<()> {
        conn.execute(Self::CREATE_TABLE, [])?;
        conn.execute(Self::CREATE_INDEX, [])?;
        Ok(())
    }

    fn insert(conn: &Connection, key: &[u8], value: &[u8]) -> rusqlite::Result<()> {
        let mut stmt = conn.prepare_cached(Self::INSERT)?;
        stmt.execute(params![key, value])?;
        Ok(())
    }

    fn find(conn: &Connection, key: &[u8], order: ReadOrder) -> rusqlite::Result<Option<Self>> {
        let sql = match order {
            ReadOrder::FirstWrite => Self::SELECT_FIRST,
            ReadOrder::LastWrite => Self::SELECT_LAST,
        };
        let mut stmt = conn.prepare_cached(sql)?;
        stmt.query_row(params![key], Self::from_row).optional()
    }
}

// =============================================================================
// Adapter
// =============================================================================

/// `StorageBackend` over a SQLite database file
pub struct RelationalAdapter {
    /// Directory holding the database file
    path: PathBuf,

    conn: Connection,

    read_order: ReadOrder,
}

impl RelationalAdapter {
    const DB_FILENAME: &'static str = "kv.sqlite";

    /// Sidecar files SQLite may leave next to the database
    const DB_SIDECARS: [&'static str; 3] = ["-journal", "-wal", "-shm"];

    /// Open or create the database in directory `path`
    pub fn open(path: &Path, read_order: ReadOrder) -> Result<Self> {
        fs::create_dir_all(path)?;

        let conn = Connection::open(path.join(Self::DB_FILENAME))?;
        Self::configure(&conn)?;
        KeyValueRow::migrate(&conn)?;

        Ok(Self {
            path: path.to_path_buf(),
            conn,
            read_order,
        })
    }

    /// Delete the database file in `path`, and its sidecars
    ///
    /// Anything else in the directory is left untouched.
    pub fn reset(path: &Path) -> Result<()> {
        let db = path.join(Self::DB_FILENAME);
        let sidecars = Self::DB_SIDECARS
            .iter()
            .map(|suffix| path.join(format!("{}{}", Self::DB_FILENAME, suffix)));

        for file in std::iter::once(db).chain(sidecars) {
            if file.is_file() {
                tracing::debug!("Removing {}", file.display());
                fs::remove_file(&file)?;
            }
        }
        Ok(())
    }

    /// Disable synchronous commits and the rollback journal
    fn configure(conn: &Connection) -> Result<()> {
        conn.execute_batch("PRAGMA synchronous = OFF")?;

        // Setting journal_mode reports the resulting mode as a row
        let mode: String = conn.query_row("PRAGMA journal_mode = OFF", [], |row| row.get(0))?;
        if !mode.eq_ignore_ascii_case("off") {
            tracing::warn!("SQLite kept journal_mode={} instead of off", mode);
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_order(&self) -> ReadOrder {
        self.read_order
    }

    /// Current `PRAGMA journal_mode`
    pub fn journal_mode(&self) -> Result<String> {
        Ok(self.conn.query_row("PRAGMA journal_mode", [], |row| row.get(0))?)
    }

    /// Current `PRAGMA synchronous` (0 = OFF)
    pub fn synchronous(&self) -> Result<i64> {
        Ok(self.conn.query_row("PRAGMA synchronous", [], |row| row.get(0))?)
    }

    /// Total rows stored, duplicates included
    pub fn row_count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM key_values", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

impl StorageBackend for RelationalAdapter {
    fn name(&self) -> &str {
        BackendKind::Relational.name()
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        KeyValueRow::insert(&self.conn, key, value)?;
        Ok(())
    }

    fn get(&mut self, key: &[u8]) -> Result<Option<Bytes>> {
        match KeyValueRow::find(&self.conn, key, self.read_order)? {
            Some(row) => {
                debug_assert_eq!(row.key, key);
                Ok(Some(Bytes::from(row.value)))
            }
            None => Ok(None),
        }
    }
}
