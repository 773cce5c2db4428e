//! # Phraselog
//!
//! Ordered, resumable access to a growable list of short text entries, with
//! read progress reported as an integer percentage.
//!
//! The library is built around one state machine and one seam:
//!
//! - [`Cursor`] — walks forward through the sequence, one entry per call,
//!   until exhausted; supports reset-to-start and append-with-growth.
//! - [`EntryStore`] — the storage backend trait. [`MemoryStore`] (this
//!   crate) keeps entries in a transient ordered list; `SqliteStore` (the
//!   `phraselog-sqlite` crate) persists them in a single SQLite table. The
//!   two are interchangeable.
//!
//! # Quick start
//!
//! ```
//! use phraselog::{Cursor, MemoryStore, seed::DAY_PHRASES};
//!
//! let mut cursor = Cursor::open(MemoryStore::new(), DAY_PHRASES)?;
//!
//! while let Ok(entry) = cursor.next() {
//!     println!("{} ({}%)", entry.text, entry.progress_percent);
//! }
//!
//! cursor.add_text("Quiet day")?;
//! assert_eq!(cursor.next()?.text, "Quiet day");
//! # Ok::<(), phraselog::CursorError>(())
//! ```
//!
//! # Concurrency
//!
//! Single-threaded, synchronous, call-and-return: no operation suspends or
//! blocks indefinitely, and at most one logical reader/writer session is
//! assumed. Backends are not safe for concurrent multi-writer use.

mod broadcast;
mod cursor;
mod error;
pub mod seed;
mod store;
mod types;

pub use broadcast::{CursorBroadcast, CursorEvent, EventSink};
pub use cursor::Cursor;
pub use error::{CursorError, InvalidText, StoreError};
pub use store::{EntryStore, MemoryStore};
pub use types::{Entry, MAX_TEXT_LEN, NextEntry, Ordinal, validate_text};

#[cfg(test)]
mod tests;
