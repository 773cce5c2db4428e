//! Change-notification fan-out for cursor mutations.
//!
//! Every successful mutation on a [`Cursor`](crate::Cursor) is published to
//! registered sinks as a [`CursorEvent`]. This is the seam a presentation
//! layer hangs off: instead of a framework-specific property-changed event,
//! observers implement [`EventSink`] (any `FnMut(&CursorEvent)` closure
//! qualifies) and receive explicit, typed notifications.
//!
//! Delivery is synchronous and in registration order; the core is
//! single-threaded, so there is no buffering or lag handling.

use serde::{Deserialize, Serialize};

use crate::types::Ordinal;

/// Events emitted after successful cursor mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CursorEvent {
    /// An entry was read and the cursor advanced past it.
    EntryRead {
        ordinal: Ordinal,
        progress_percent: u8,
    },
    /// An entry was appended to the end of the sequence.
    EntryAppended { ordinal: Ordinal },
    /// The cursor was rewound to the first entry.
    Reset,
}

/// Receiver of cursor events.
pub trait EventSink {
    /// Called once per event, after the mutation has taken effect.
    fn on_event(&mut self, event: &CursorEvent);
}

impl<F: FnMut(&CursorEvent)> EventSink for F {
    fn on_event(&mut self, event: &CursorEvent) {
        self(event);
    }
}

/// Fans cursor events out to registered sinks.
#[derive(Default)]
pub struct CursorBroadcast {
    sinks: Vec<Box<dyn EventSink>>,
}

impl CursorBroadcast {
    /// Creates a broadcaster with no sinks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a sink. Sinks receive all future events, in registration
    /// order.
    pub fn subscribe(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// Delivers `event` to every sink and returns how many received it.
    pub fn send(&mut self, event: &CursorEvent) -> usize {
        for sink in &mut self.sinks {
            sink.on_event(event);
        }
        self.sinks.len()
    }

    /// Returns the number of registered sinks.
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }
}

impl std::fmt::Debug for CursorBroadcast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CursorBroadcast")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}
