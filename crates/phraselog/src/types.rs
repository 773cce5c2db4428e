//! Core value types shared by the cursor and its storage backends.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Maximum accepted length of an entry's text, counted in `char`s.
///
/// Longer text is rejected by [`validate_text`] before it reaches a backend.
pub const MAX_TEXT_LEN: usize = 64;

/// Position of an entry within the sequence, 1-based.
///
/// Ordinals are assigned contiguously in insertion order and define the read
/// order of the store. They are never reused: entries are not deleted or
/// reordered through this contract.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Ordinal(u64);

impl Ordinal {
    /// The ordinal of the first entry in any sequence.
    pub const FIRST: Ordinal = Ordinal(1);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw position value.
    pub fn get(self) -> u64 {
        self.0
    }

    /// Returns the ordinal immediately after this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl Display for Ordinal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Ordinal {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Ordinal> for u64 {
    fn from(ordinal: Ordinal) -> Self {
        ordinal.0
    }
}

/// A single stored entry: its position and its text.
///
/// Entries are immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Position of this entry within the sequence.
    pub ordinal: Ordinal,
    /// The entry's text, at most [`MAX_TEXT_LEN`] characters.
    pub text: String,
}

/// A successful read: the entry's text plus how far through the sequence the
/// cursor is after this read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextEntry {
    /// The text of the entry at the cursor position.
    pub text: String,
    /// `floor(100 * position / last)` using integer division, so the final
    /// entry always reads 100.
    pub progress_percent: u8,
}

/// Checks that `text` is acceptable as an entry.
///
/// Rejects empty text and text longer than [`MAX_TEXT_LEN`] characters. The
/// limit counts `char`s, so multi-byte text is measured by what a reader
/// sees rather than by encoded size.
pub fn validate_text(text: &str) -> Result<(), crate::InvalidText> {
    if text.is_empty() {
        return Err(crate::InvalidText::Empty);
    }
    let len = text.chars().count();
    if len > MAX_TEXT_LEN {
        return Err(crate::InvalidText::TooLong { len });
    }
    Ok(())
}
