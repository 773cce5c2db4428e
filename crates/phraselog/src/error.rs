//! Error taxonomy for the cursor and its storage backends.
//!
//! [`CursorError::Exhausted`] is an expected terminal condition, not a
//! fault: callers reach it whenever the sequence has been read to the end.
//! [`InvalidText`] is rejected locally with no mutation. Everything else is
//! a backend fault surfaced through [`StoreError`] and propagated unchanged;
//! no operation retries.

use crate::types::MAX_TEXT_LEN;

/// Faults raised by a storage backend.
///
/// Variants carry backend-specific detail as text so the core crate stays
/// independent of any particular backend's error types.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backend could not be opened or has become unusable.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A read operation failed inside the backend.
    #[error("store read failed: {0}")]
    ReadFailed(String),

    /// A write operation failed inside the backend.
    #[error("store write failed: {0}")]
    WriteFailed(String),
}

/// Rejection reasons for text passed to an append or a seed.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidText {
    /// The text was empty.
    #[error("text is empty")]
    Empty,

    /// The text exceeded the length limit.
    #[error("text is {len} characters, limit is {MAX_TEXT_LEN}")]
    TooLong {
        /// Observed length in `char`s.
        len: usize,
    },
}

/// Errors returned by cursor operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CursorError {
    /// No further entries are available to read.
    ///
    /// Cleared by [`reset`](crate::Cursor::reset) or by a successful
    /// [`add_text`](crate::Cursor::add_text) that extends the sequence.
    #[error("no further entries to read")]
    Exhausted,

    /// The supplied text was rejected before reaching the backend.
    #[error("invalid text: {0}")]
    InvalidText(#[from] InvalidText),

    /// The backend reported a fault.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CursorError {
    /// True when this is the expected end-of-sequence condition rather than
    /// a fault.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, CursorError::Exhausted)
    }
}
