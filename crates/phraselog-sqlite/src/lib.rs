//! Durable SQLite backend for the phraselog cursor store.
//!
//! [`SqliteStore`] implements [`EntryStore`] over a single table:
//!
//! ```text
//! entries (
//!     id   INTEGER PRIMARY KEY,   -- the entry's ordinal
//!     text TEXT NOT NULL
//! )
//! ```
//!
//! SQLite assigns `id` as `max(id) + 1`, so ordinals are 1-based and
//! contiguous as long as rows are only written through this crate. Each
//! trait call is a single short-lived statement on a connection the store
//! owns; the owner controls the lifecycle by constructing and dropping the
//! store. There is no process-wide handle to share.
//!
//! # Concurrency
//!
//! Not safe for concurrent multi-writer use. At most one logical
//! reader/writer session per store is assumed; no locking is layered on top
//! of SQLite's own.

use std::path::{Path, PathBuf};

use phraselog::{Entry, EntryStore, Ordinal, StoreError};
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};

/// Schema applied on every open. `IF NOT EXISTS` keeps existing data.
const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS entries (
    id   INTEGER PRIMARY KEY,
    text TEXT NOT NULL
)";

/// Configuration for opening a [`SqliteStore`].
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// Location of the database file.
    pub path: PathBuf,
    /// Create the file when it does not exist yet. When `false`, opening a
    /// missing file fails with [`StoreError::Unavailable`].
    pub create_if_missing: bool,
}

impl SqliteConfig {
    /// Configuration that creates `path` if missing.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            create_if_missing: true,
        }
    }
}

/// Single-table SQLite entry store.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the database at `config.path`, keeping any
    /// existing entries.
    pub fn open(config: &SqliteConfig) -> Result<Self, StoreError> {
        let mut flags = OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        if config.create_if_missing {
            flags |= OpenFlags::SQLITE_OPEN_CREATE;
        }

        let conn = Connection::open_with_flags(&config.path, flags)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Self::init(conn, Some(config.path.as_path()))
    }

    /// Deletes any database at `config.path` and opens a fresh, empty one.
    ///
    /// Mirrors a sample-data lifecycle where every run starts blank. Use
    /// [`open`](Self::open) to keep data across sessions.
    pub fn recreate(config: &SqliteConfig) -> Result<Self, StoreError> {
        for suffix in ["", "-wal", "-shm"] {
            let mut file = config.path.clone().into_os_string();
            file.push(suffix);
            match std::fs::remove_file(&file) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(StoreError::Unavailable(e.to_string())),
            }
        }

        let conn = Connection::open(&config.path)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Self::init(conn, Some(config.path.as_path()))
    }

    /// Opens a private in-memory database. Dropped with the store; useful
    /// for tests and throwaway sessions.
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Self::init(conn, None)
    }

    fn init(conn: Connection, path: Option<&Path>) -> Result<Self, StoreError> {
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        conn.execute_batch(SCHEMA)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        tracing::info!(path = ?path, "opened sqlite entry store");
        Ok(Self { conn })
    }
}

impl EntryStore for SqliteStore {
    fn bounds(&self) -> Result<Option<(Ordinal, Ordinal)>, StoreError> {
        let (min, max): (Option<i64>, Option<i64>) = self
            .conn
            .query_row("SELECT MIN(id), MAX(id) FROM entries", [], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .map_err(read_err)?;

        match (min, max) {
            (Some(min), Some(max)) => Ok(Some((to_ordinal(min)?, to_ordinal(max)?))),
            _ => Ok(None),
        }
    }

    fn get(&self, ordinal: Ordinal) -> Result<Option<String>, StoreError> {
        let id = i64::try_from(ordinal.get()).map_err(|e| StoreError::ReadFailed(e.to_string()))?;
        self.conn
            .query_row("SELECT text FROM entries WHERE id = ?1", params![id], |row| {
                row.get(0)
            })
            .optional()
            .map_err(read_err)
    }

    fn append(&mut self, text: &str) -> Result<Ordinal, StoreError> {
        self.conn
            .execute("INSERT INTO entries (text) VALUES (?1)", params![text])
            .map_err(write_err)?;

        let ordinal = to_ordinal(self.conn.last_insert_rowid())?;
        tracing::debug!(ordinal = %ordinal, "inserted entry row");
        Ok(ordinal)
    }

    fn len(&self) -> Result<u64, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))
            .map_err(read_err)?;
        u64::try_from(count).map_err(|e| StoreError::ReadFailed(e.to_string()))
    }

    fn entries(&self) -> Result<Vec<Entry>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, text FROM entries ORDER BY id")
            .map_err(read_err)?;

        let rows = stmt
            .query_map([], |row| {
                let id: i64 = row.get(0)?;
                let text: String = row.get(1)?;
                Ok((id, text))
            })
            .map_err(read_err)?;

        let mut entries = Vec::new();
        for row in rows {
            let (id, text) = row.map_err(read_err)?;
            entries.push(Entry {
                ordinal: to_ordinal(id)?,
                text,
            });
        }
        Ok(entries)
    }
}

fn to_ordinal(id: i64) -> Result<Ordinal, StoreError> {
    let id = u64::try_from(id)
        .map_err(|_| StoreError::ReadFailed(format!("non-positive row id {id}")))?;
    Ok(Ordinal::new(id))
}

fn read_err(e: rusqlite::Error) -> StoreError {
    StoreError::ReadFailed(e.to_string())
}

fn write_err(e: rusqlite::Error) -> StoreError {
    StoreError::WriteFailed(e.to_string())
}
