//! Storage backend abstraction and the transient in-memory backend.
//!
//! The cursor state machine in [`Cursor`](crate::Cursor) is written once
//! against [`EntryStore`]; backends only answer three questions: what the first and
//! last ordinals are, what text sits at a given ordinal, and what ordinal a
//! freshly appended entry received.
//!
//! Two interchangeable implementations exist:
//! - [`MemoryStore`] (this module): transient ordered list.
//! - `SqliteStore` (the `phraselog-sqlite` crate): durable single-table
//!   store keyed by integer ordinal.

use crate::error::StoreError;
use crate::types::{Entry, Ordinal};

/// Abstraction over ordered entry storage.
///
/// Ordinals are 1-based and assigned contiguously in insertion order.
/// Implementations never delete or reorder entries through this trait.
///
/// Implementations are not required to be safe for concurrent use; at most
/// one logical reader/writer session is assumed, with each call acting as a
/// single short-lived transaction.
pub trait EntryStore {
    /// Returns the first and last ordinals, or `None` when the store is
    /// empty.
    fn bounds(&self) -> Result<Option<(Ordinal, Ordinal)>, StoreError>;

    /// Returns the text at `ordinal`, or `None` when no entry exists there.
    fn get(&self, ordinal: Ordinal) -> Result<Option<String>, StoreError>;

    /// Appends an entry and returns the ordinal it was assigned.
    ///
    /// Text validation happens in the cursor layer; backends store what
    /// they are given.
    fn append(&mut self, text: &str) -> Result<Ordinal, StoreError>;

    /// Returns the number of stored entries.
    fn len(&self) -> Result<u64, StoreError>;

    /// True when the store holds no entries.
    fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Returns every entry in ordinal order.
    ///
    /// The default walks the ordinal range and skips gaps; backends with a
    /// cheaper full scan override it.
    fn entries(&self) -> Result<Vec<Entry>, StoreError> {
        let Some((first, last)) = self.bounds()? else {
            return Ok(Vec::new());
        };

        let mut entries = Vec::new();
        let mut ordinal = first;
        while ordinal <= last {
            if let Some(text) = self.get(ordinal)? {
                entries.push(Entry { ordinal, text });
            }
            ordinal = ordinal.next();
        }
        Ok(entries)
    }
}

/// Transient in-memory backend.
///
/// Entry `i` (0-based) holds ordinal `i + 1`, so bounds and lookups are
/// index arithmetic and no operation can fail.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Vec<String>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl EntryStore for MemoryStore {
    fn bounds(&self) -> Result<Option<(Ordinal, Ordinal)>, StoreError> {
        if self.entries.is_empty() {
            return Ok(None);
        }
        Ok(Some((Ordinal::FIRST, Ordinal::new(self.entries.len() as u64))))
    }

    fn get(&self, ordinal: Ordinal) -> Result<Option<String>, StoreError> {
        if ordinal.get() == 0 {
            return Ok(None);
        }
        let index = usize::try_from(ordinal.get() - 1)
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?;
        Ok(self.entries.get(index).cloned())
    }

    fn append(&mut self, text: &str) -> Result<Ordinal, StoreError> {
        self.entries.push(text.to_owned());
        Ok(Ordinal::new(self.entries.len() as u64))
    }

    fn len(&self) -> Result<u64, StoreError> {
        Ok(self.entries.len() as u64)
    }
}
