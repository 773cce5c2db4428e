//! The sequential cursor state machine.
//!
//! A [`Cursor`] owns a storage backend and walks forward through its
//! entries, reporting read progress as an integer percentage. The state
//! machine lives here once, generic over [`EntryStore`], so both the
//! in-memory and the durable backend share one exhaustion policy.
//!
//! # State
//!
//! The cursor tracks the next ordinal to read (`current`) and the last
//! ordinal known to exist (`last`, `None` while the store is empty).
//! `current` only moves forward except on [`reset`](Cursor::reset). Once
//! `current > last` the cursor is exhausted: every read fails with
//! [`CursorError::Exhausted`] until a reset rewinds it or an append extends
//! the sequence.
//!
//! # Gap policy
//!
//! A gap (no entry at exactly `current`) can only arise from out-of-contract
//! external mutation of a durable backend. Hitting one advances `current`
//! straight to `last + 1`: the cursor exhausts immediately and stays
//! exhausted, rather than making the tail entry readable again.

use crate::broadcast::{CursorBroadcast, CursorEvent, EventSink};
use crate::error::CursorError;
use crate::store::EntryStore;
use crate::types::{NextEntry, Ordinal, validate_text};

/// Ordered, resumable access to a growable list of short text entries.
///
/// Construct with [`Cursor::open`], which seeds an empty backend and anchors
/// the read position at the first entry. The backend is owned: callers that
/// need the backend afterwards take it back with [`Cursor::into_store`].
///
/// # Example
///
/// ```
/// use phraselog::{Cursor, MemoryStore};
///
/// let seed = ["Nice day", "Wonderful day", "Joyful day"];
/// let mut cursor = Cursor::open(MemoryStore::new(), seed)?;
///
/// let first = cursor.next()?;
/// assert_eq!(first.text, "Nice day");
/// assert_eq!(first.progress_percent, 33);
///
/// cursor.next()?;
/// assert_eq!(cursor.next()?.progress_percent, 100);
/// assert!(cursor.next().unwrap_err().is_exhausted());
///
/// cursor.reset()?;
/// assert_eq!(cursor.next()?.text, "Nice day");
/// # Ok::<(), phraselog::CursorError>(())
/// ```
#[derive(Debug)]
pub struct Cursor<S> {
    store: S,
    /// Next ordinal to read.
    current: Ordinal,
    /// Last ordinal known to exist. `None` iff the store is empty.
    last: Option<Ordinal>,
    broadcast: CursorBroadcast,
}

impl<S: EntryStore> Cursor<S> {
    /// Opens a cursor over `store`, seeding it with `seed` if it is empty.
    ///
    /// A non-empty store is left untouched and the seed ignored, so a
    /// durable backend keeps whatever it accumulated in earlier sessions.
    /// The read position is anchored at the first existing entry.
    ///
    /// # Errors
    ///
    /// Fails with [`CursorError::InvalidText`] if a seed string violates the
    /// entry rules, and propagates backend faults as
    /// [`CursorError::Store`]. Both are fatal to construction: storage
    /// availability is a precondition, not a recoverable runtime event.
    pub fn open<I>(mut store: S, seed: I) -> Result<Self, CursorError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        if store.is_empty()? {
            let mut seeded = 0u64;
            for text in seed {
                let text = text.as_ref();
                validate_text(text)?;
                store.append(text)?;
                seeded += 1;
            }
            if seeded > 0 {
                tracing::info!(entries = seeded, "seeded empty store");
            }
        }

        let (current, last) = match store.bounds()? {
            Some((first, last)) => (first, Some(last)),
            None => (Ordinal::FIRST, None),
        };

        Ok(Self {
            store,
            current,
            last,
            broadcast: CursorBroadcast::new(),
        })
    }

    /// Reads the entry at the cursor position and advances past it.
    ///
    /// Progress is `floor(100 * position / last)` with integer division, so
    /// the first of three entries reads 33 and the final entry of any
    /// sequence reads 100. A single-entry sequence reads 100 on its only
    /// read.
    ///
    /// # Errors
    ///
    /// [`CursorError::Exhausted`] when the store is empty, the sequence has
    /// been read to the end, or a gap was found at the cursor position (see
    /// the module docs for the gap policy). Backend faults propagate as
    /// [`CursorError::Store`].
    pub fn next(&mut self) -> Result<NextEntry, CursorError> {
        let Some(last) = self.last else {
            return Err(CursorError::Exhausted);
        };
        if self.current > last {
            return Err(CursorError::Exhausted);
        }

        match self.store.get(self.current)? {
            Some(text) => {
                let ordinal = self.current;
                let progress_percent = progress_percent(ordinal, last);
                self.current = ordinal.next();

                tracing::debug!(
                    ordinal = %ordinal,
                    progress_percent,
                    "read entry"
                );
                self.broadcast.send(&CursorEvent::EntryRead {
                    ordinal,
                    progress_percent,
                });

                Ok(NextEntry {
                    text,
                    progress_percent,
                })
            }
            None => {
                // Gap: exhaust now and stay exhausted.
                tracing::debug!(
                    ordinal = %self.current,
                    last = %last,
                    "no entry at cursor position, exhausting"
                );
                self.current = last.next();
                Err(CursorError::Exhausted)
            }
        }
    }

    /// Appends `text` to the end of the sequence and returns its ordinal.
    ///
    /// The read position is unaffected, so an exhausted cursor becomes
    /// readable again and its next read returns exactly this entry.
    ///
    /// # Errors
    ///
    /// [`CursorError::InvalidText`] when `text` is empty or longer than
    /// [`MAX_TEXT_LEN`](crate::MAX_TEXT_LEN) characters; the backend is not
    /// touched. Backend faults propagate as [`CursorError::Store`].
    pub fn add_text(&mut self, text: &str) -> Result<Ordinal, CursorError> {
        validate_text(text)?;

        let ordinal = self.store.append(text)?;
        self.last = Some(self.last.map_or(ordinal, |l| l.max(ordinal)));

        tracing::debug!(ordinal = %ordinal, "appended entry");
        self.broadcast.send(&CursorEvent::EntryAppended { ordinal });

        Ok(ordinal)
    }

    /// Rewinds the read position to the first existing entry.
    ///
    /// The first ordinal is re-queried from the backend; entries and the
    /// recorded end of the sequence are untouched.
    pub fn reset(&mut self) -> Result<(), CursorError> {
        self.current = match self.store.bounds()? {
            Some((first, _)) => first,
            None => Ordinal::FIRST,
        };

        tracing::debug!(current = %self.current, "cursor reset");
        self.broadcast.send(&CursorEvent::Reset);

        Ok(())
    }

    /// Registers a sink for [`CursorEvent`] notifications.
    pub fn subscribe(&mut self, sink: Box<dyn EventSink>) {
        self.broadcast.subscribe(sink);
    }

    /// True when the next read would fail with
    /// [`CursorError::Exhausted`], assuming no gaps.
    pub fn is_exhausted(&self) -> bool {
        match self.last {
            Some(last) => self.current > last,
            None => true,
        }
    }

    /// Number of entries remaining before the cursor exhausts, assuming no
    /// gaps.
    pub fn remaining(&self) -> u64 {
        match self.last {
            Some(last) if self.current <= last => last.get() - self.current.get() + 1,
            _ => 0,
        }
    }

    /// Number of entries in the backing store.
    pub fn len(&self) -> Result<u64, CursorError> {
        Ok(self.store.len()?)
    }

    /// True when the backing store holds no entries.
    pub fn is_empty(&self) -> Result<bool, CursorError> {
        Ok(self.store.is_empty()?)
    }

    /// Borrows the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the cursor and returns the backing store.
    pub fn into_store(self) -> S {
        self.store
    }
}

/// Integer-division progress through the sequence.
///
/// Ordinals are 1-based, so `last >= 1` whenever a read succeeds; the zero
/// guard keeps the arithmetic total anyway.
fn progress_percent(position: Ordinal, last: Ordinal) -> u8 {
    if last.get() == 0 {
        return 0;
    }
    ((100 * position.get()) / last.get()) as u8
}
