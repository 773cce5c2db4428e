//! Unit tests for the cursor state machine over the in-memory backend.

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use test_case::test_case;

use crate::{
    Cursor, CursorError, CursorEvent, EntryStore, InvalidText, MAX_TEXT_LEN, MemoryStore, Ordinal,
    seed::DAY_PHRASES, validate_text,
};

fn open(seed: &[&str]) -> Cursor<MemoryStore> {
    Cursor::open(MemoryStore::new(), seed).expect("open in-memory cursor")
}

// ============================================================================
// Read Sequence Tests
// ============================================================================

#[test]
fn reads_seed_in_order_then_exhausts() {
    let seed = ["Nice day", "Wonderful day", "Joyful day"];
    let mut cursor = open(&seed);

    for expected in seed {
        assert_eq!(cursor.next().unwrap().text, expected);
    }
    assert!(matches!(cursor.next(), Err(CursorError::Exhausted)));
}

#[test]
fn progress_matches_documented_scenario() {
    let mut cursor = open(&["Nice day", "Wonderful day", "Joyful day"]);

    let first = cursor.next().unwrap();
    assert_eq!((first.text.as_str(), first.progress_percent), ("Nice day", 33));

    let second = cursor.next().unwrap();
    assert_eq!(second.progress_percent, 66);

    let third = cursor.next().unwrap();
    assert_eq!((third.text.as_str(), third.progress_percent), ("Joyful day", 100));

    assert!(cursor.next().unwrap_err().is_exhausted());
}

#[test]
fn single_entry_reads_full_progress() {
    let mut cursor = open(&["Nice day"]);
    assert_eq!(cursor.next().unwrap().progress_percent, 100);
    assert!(cursor.next().unwrap_err().is_exhausted());
}

#[test]
fn empty_seed_exhausts_immediately() {
    let mut cursor =
        Cursor::open(MemoryStore::new(), std::iter::empty::<&str>()).expect("open empty");

    assert!(cursor.is_empty().unwrap());
    assert!(cursor.is_exhausted());
    assert!(matches!(cursor.next(), Err(CursorError::Exhausted)));
    // Still deterministic on repeated calls.
    assert!(matches!(cursor.next(), Err(CursorError::Exhausted)));
}

#[test]
fn default_seed_reads_all_seventeen_phrases() {
    let mut cursor = open(&DAY_PHRASES);

    let mut texts = Vec::new();
    while let Ok(entry) = cursor.next() {
        texts.push(entry.text);
    }
    assert_eq!(texts, DAY_PHRASES);
}

#[test]
fn remaining_counts_down_to_zero() {
    let mut cursor = open(&["a day", "b day", "c day"]);
    assert_eq!(cursor.remaining(), 3);

    cursor.next().unwrap();
    assert_eq!(cursor.remaining(), 2);

    cursor.next().unwrap();
    cursor.next().unwrap();
    assert_eq!(cursor.remaining(), 0);
    assert!(cursor.is_exhausted());
}

// ============================================================================
// Reset Tests
// ============================================================================

#[test]
fn reset_replays_full_sequence() {
    let seed = ["Nice day", "Wonderful day", "Joyful day"];
    let mut cursor = open(&seed);

    cursor.next().unwrap();
    cursor.next().unwrap();
    cursor.reset().unwrap();

    let mut texts = Vec::new();
    while let Ok(entry) = cursor.next() {
        texts.push(entry.text);
    }
    assert_eq!(texts, seed);
}

#[test]
fn reset_after_exhaustion_rewinds() {
    let mut cursor = open(&["Nice day"]);
    cursor.next().unwrap();
    assert!(cursor.is_exhausted());

    cursor.reset().unwrap();
    assert!(!cursor.is_exhausted());
    assert_eq!(cursor.next().unwrap().text, "Nice day");
}

#[test]
fn reset_on_empty_store_stays_exhausted() {
    let mut cursor =
        Cursor::open(MemoryStore::new(), std::iter::empty::<&str>()).expect("open empty");
    cursor.reset().unwrap();
    assert!(matches!(cursor.next(), Err(CursorError::Exhausted)));
}

// ============================================================================
// Append Tests
// ============================================================================

#[test]
fn append_revives_exhausted_cursor() {
    let mut cursor = open(&["Nice day"]);
    cursor.next().unwrap();
    assert!(cursor.next().unwrap_err().is_exhausted());

    let ordinal = cursor.add_text("Quiet day").unwrap();
    assert_eq!(ordinal, Ordinal::new(2));
    assert_eq!(cursor.next().unwrap().text, "Quiet day");
    assert!(cursor.next().unwrap_err().is_exhausted());
}

#[test]
fn append_does_not_move_read_position() {
    let mut cursor = open(&["Nice day", "Wonderful day"]);
    cursor.add_text("Quiet day").unwrap();

    assert_eq!(cursor.next().unwrap().text, "Nice day");
    assert_eq!(cursor.len().unwrap(), 3);
}

#[test]
fn rejected_append_leaves_store_unchanged() {
    let mut cursor = open(&["Nice day"]);
    let too_long = "x".repeat(MAX_TEXT_LEN + 1);

    let err = cursor.add_text(&too_long).unwrap_err();
    assert!(matches!(
        err,
        CursorError::InvalidText(InvalidText::TooLong { len: 65 })
    ));
    assert_eq!(cursor.len().unwrap(), 1);
    assert_eq!(cursor.remaining(), 1);
}

#[test_case("" => matches Err(InvalidText::Empty); "empty text")]
#[test_case("Nice day" => matches Ok(()); "short text")]
#[test_case(&"x".repeat(MAX_TEXT_LEN) => matches Ok(()); "exactly at limit")]
#[test_case(&"x".repeat(MAX_TEXT_LEN + 1) => matches Err(InvalidText::TooLong { len: 65 }); "one over limit")]
fn text_validation(text: &str) -> Result<(), InvalidText> {
    validate_text(text)
}

#[test]
fn length_limit_counts_chars_not_bytes() {
    // 64 multi-byte characters: within the limit despite the byte count.
    let text = "é".repeat(MAX_TEXT_LEN);
    assert!(text.len() > MAX_TEXT_LEN);
    assert!(validate_text(&text).is_ok());
}

#[test]
fn invalid_seed_fails_open() {
    let result = Cursor::open(MemoryStore::new(), ["Nice day", ""]);
    assert!(matches!(
        result,
        Err(CursorError::InvalidText(InvalidText::Empty))
    ));
}

// ============================================================================
// Event Fan-out Tests
// ============================================================================

#[test]
fn events_fire_in_mutation_order() {
    let seen: Rc<RefCell<Vec<CursorEvent>>> = Rc::default();
    let sink = Rc::clone(&seen);

    let mut cursor = open(&["Nice day"]);
    cursor.subscribe(Box::new(move |event: &CursorEvent| {
        sink.borrow_mut().push(event.clone());
    }));

    cursor.next().unwrap();
    cursor.add_text("Quiet day").unwrap();
    cursor.reset().unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![
            CursorEvent::EntryRead {
                ordinal: Ordinal::new(1),
                progress_percent: 100,
            },
            CursorEvent::EntryAppended {
                ordinal: Ordinal::new(2),
            },
            CursorEvent::Reset,
        ]
    );
}

#[test]
fn failed_operations_emit_no_events() {
    let count = Rc::new(RefCell::new(0usize));
    let sink = Rc::clone(&count);

    let mut cursor = open(&["Nice day"]);
    cursor.next().unwrap();
    cursor.subscribe(Box::new(move |_: &CursorEvent| {
        *sink.borrow_mut() += 1;
    }));

    assert!(cursor.next().is_err());
    assert!(cursor.add_text("").is_err());
    assert_eq!(*count.borrow(), 0);
}

#[test]
fn events_serialize_with_type_tag() {
    let event = CursorEvent::EntryRead {
        ordinal: Ordinal::new(3),
        progress_percent: 50,
    };
    let json = serde_json::to_string(&event).unwrap();
    assert_eq!(
        json,
        r#"{"type":"entryRead","ordinal":3,"progress_percent":50}"#
    );
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Exactly `len(seed)` reads succeed, in seed order, before exhaustion.
    #[test]
    fn read_count_equals_entry_count(seed in prop::collection::vec("[a-zA-Z ]{1,64}", 1..32)) {
        let mut cursor = Cursor::open(MemoryStore::new(), &seed).unwrap();

        for expected in &seed {
            let entry = cursor.next().unwrap();
            prop_assert_eq!(&entry.text, expected);
        }
        prop_assert!(cursor.next().unwrap_err().is_exhausted());
    }

    /// Progress never decreases across a full read-out and ends at 100.
    #[test]
    fn progress_is_monotone_and_ends_at_100(seed in prop::collection::vec("[a-z]{1,8}", 1..32)) {
        let mut cursor = Cursor::open(MemoryStore::new(), &seed).unwrap();

        let mut previous = 0u8;
        let mut latest = 0u8;
        while let Ok(entry) = cursor.next() {
            prop_assert!(entry.progress_percent >= previous);
            previous = entry.progress_percent;
            latest = entry.progress_percent;
        }
        prop_assert_eq!(latest, 100);
    }

    /// Reset after an arbitrary number of reads replays the original
    /// sequence from the start.
    #[test]
    fn reset_restores_original_sequence(
        seed in prop::collection::vec("[a-z ]{1,16}", 1..16),
        reads in 0usize..32,
    ) {
        let mut cursor = Cursor::open(MemoryStore::new(), &seed).unwrap();

        for _ in 0..reads {
            let _ = cursor.next();
        }
        cursor.reset().unwrap();

        let mut texts = Vec::new();
        while let Ok(entry) = cursor.next() {
            texts.push(entry.text);
        }
        prop_assert_eq!(texts, seed);
    }
}

// ============================================================================
// Backend Trait Tests
// ============================================================================

#[test]
fn entries_lists_in_ordinal_order() {
    let cursor = open(&["Nice day", "Wonderful day"]);
    let entries = cursor.store().entries().unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].ordinal, Ordinal::new(1));
    assert_eq!(entries[0].text, "Nice day");
    assert_eq!(entries[1].ordinal, Ordinal::new(2));
    assert_eq!(entries[1].text, "Wonderful day");
}

#[test]
fn memory_store_assigns_contiguous_ordinals() {
    let mut store = MemoryStore::new();
    assert_eq!(store.bounds().unwrap(), None);

    assert_eq!(store.append("a").unwrap(), Ordinal::new(1));
    assert_eq!(store.append("b").unwrap(), Ordinal::new(2));
    assert_eq!(
        store.bounds().unwrap(),
        Some((Ordinal::new(1), Ordinal::new(2)))
    );
    assert_eq!(store.get(Ordinal::new(2)).unwrap().as_deref(), Some("b"));
    assert_eq!(store.get(Ordinal::new(3)).unwrap(), None);
    assert_eq!(store.get(Ordinal::new(0)).unwrap(), None);
}
