// Copyright 2026 the Lazyframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and keeps an owned
//! [`RecordedEvent`] for every call, in arrival order. Recordings can be
//! inspected in tests or written out with [`json::export`](crate::json::export).

use lazyframe_core::frame::{FrameKind, FrameState};
use lazyframe_core::trace::{
    Level, LogRecord, RecheckCause, RecheckEvent, RecheckOutcome, TraceSink, TransitionEvent,
};

// ---------------------------------------------------------------------------
// RecordedEvent
// ---------------------------------------------------------------------------

/// An owned copy of one trace event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedEvent {
    /// A log record.
    Log {
        /// Severity.
        level: Level,
        /// Component kind.
        kind: FrameKind,
        /// Instance id.
        uuid: String,
        /// Message text.
        message: String,
    },
    /// A lifecycle state transition.
    Transition {
        /// Component kind.
        kind: FrameKind,
        /// Instance id.
        uuid: String,
        /// State before.
        from: FrameState,
        /// State after.
        to: FrameState,
    },
    /// A visibility re-check.
    Recheck {
        /// Component kind.
        kind: FrameKind,
        /// Instance id.
        uuid: String,
        /// What triggered it.
        cause: RecheckCause,
        /// Whether the placeholder was visible.
        visible: bool,
        /// What it did.
        outcome: RecheckOutcome,
    },
}

impl RecordedEvent {
    /// Instance id the event belongs to.
    #[must_use]
    pub fn uuid(&self) -> &str {
        match self {
            Self::Log { uuid, .. } | Self::Transition { uuid, .. } | Self::Recheck { uuid, .. } => {
                uuid
            }
        }
    }

    /// Component kind the event belongs to.
    #[must_use]
    pub fn kind(&self) -> FrameKind {
        match self {
            Self::Log { kind, .. } | Self::Transition { kind, .. } | Self::Recheck { kind, .. } => {
                *kind
            }
        }
    }
}

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that stores every event in memory.
#[derive(Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Consumes the recorder and returns the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<RecordedEvent> {
        self.events
    }

    /// Discards everything recorded so far.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Events of one instance, oldest first.
    pub fn for_instance<'a>(&'a self, uuid: &'a str) -> impl Iterator<Item = &'a RecordedEvent> {
        self.events.iter().filter(move |e| e.uuid() == uuid)
    }

    /// The sequence of states one instance has moved through, starting with
    /// the state it left on its first transition.
    #[must_use]
    pub fn states_of(&self, uuid: &str) -> Vec<FrameState> {
        let mut states = Vec::new();
        for event in self.for_instance(uuid) {
            if let RecordedEvent::Transition { from, to, .. } = event {
                if states.is_empty() {
                    states.push(*from);
                }
                states.push(*to);
            }
        }
        states
    }
}

impl TraceSink for RecorderSink {
    fn on_log(&mut self, record: &LogRecord<'_>) {
        self.events.push(RecordedEvent::Log {
            level: record.level,
            kind: record.kind,
            uuid: record.uuid.as_str().to_owned(),
            message: record.message.to_owned(),
        });
    }

    fn on_transition(&mut self, e: &TransitionEvent<'_>) {
        self.events.push(RecordedEvent::Transition {
            kind: e.kind,
            uuid: e.uuid.as_str().to_owned(),
            from: e.from,
            to: e.to,
        });
    }

    fn on_recheck(&mut self, e: &RecheckEvent<'_>) {
        self.events.push(RecordedEvent::Recheck {
            kind: e.kind,
            uuid: e.uuid.as_str().to_owned(),
            cause: e.cause,
            visible: e.visible,
            outcome: e.outcome,
        });
    }
}
