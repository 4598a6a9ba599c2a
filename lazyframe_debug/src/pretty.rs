// Copyright 2026 the Lazyframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use lazyframe_core::trace::{LogRecord, RecheckEvent, TraceSink, TransitionEvent};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the destination.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_log(&mut self, record: &LogRecord<'_>) {
        let _ = writeln!(
            self.writer,
            "[log:{}] {} {}: {}",
            record.level,
            record.kind.component(),
            record.uuid,
            record.message,
        );
    }

    fn on_transition(&mut self, e: &TransitionEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[state] {} {}: {} -> {}",
            e.kind.component(),
            e.uuid,
            e.from,
            e.to,
        );
    }

    fn on_recheck(&mut self, e: &RecheckEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[recheck] {} {}: cause={} visible={} outcome={}",
            e.kind.component(),
            e.uuid,
            e.cause.as_str(),
            e.visible,
            e.outcome.as_str(),
        );
    }
}
