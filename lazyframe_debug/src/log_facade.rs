// Copyright 2026 the Lazyframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Forwarding to the [`log`] crate.
//!
//! [`LogFacadeSink`] lets a host that already installed a `log` backend
//! (`env_logger`, `console_log`, ...) receive lazyframe diagnostics. The log
//! target is the component name, so `RUST_LOG=esb-page-framer=debug` style
//! filtering works. Transitions go out at `debug`, re-checks at `trace`.

use lazyframe_core::trace::{Level, LogRecord, RecheckEvent, TraceSink, TransitionEvent};

/// Maps a lazyframe [`Level`] to the `log` crate's level.
#[must_use]
pub fn log_level(level: Level) -> log::Level {
    match level {
        Level::Error => log::Level::Error,
        Level::Warn => log::Level::Warn,
        Level::Info => log::Level::Info,
        Level::Debug => log::Level::Debug,
    }
}

/// A [`TraceSink`] that forwards every event to the global `log` logger.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogFacadeSink;

impl TraceSink for LogFacadeSink {
    fn on_log(&mut self, record: &LogRecord<'_>) {
        log::log!(
            target: record.kind.component(),
            log_level(record.level),
            "{}: {}",
            record.uuid,
            record.message
        );
    }

    fn on_transition(&mut self, e: &TransitionEvent<'_>) {
        log::debug!(target: e.kind.component(), "{}: {} -> {}", e.uuid, e.from, e.to);
    }

    fn on_recheck(&mut self, e: &RecheckEvent<'_>) {
        log::trace!(
            target: e.kind.component(),
            "{}: recheck cause={} visible={} outcome={}",
            e.uuid,
            e.cause.as_str(),
            e.visible,
            e.outcome.as_str()
        );
    }
}
