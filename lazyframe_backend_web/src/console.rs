// Copyright 2026 the Lazyframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser console logging.

use lazyframe_core::trace::{Level, LogRecord, TraceSink};
use wasm_bindgen::JsValue;

/// A [`TraceSink`] that writes log records to the browser console.
///
/// Records above `max_level` are dropped. Lifecycle events are ignored; use
/// the debug crate's sinks to inspect those.
#[derive(Clone, Copy, Debug)]
pub struct ConsoleSink {
    max_level: Level,
}

impl ConsoleSink {
    /// Logs records up to and including `max_level`.
    #[must_use]
    pub const fn new(max_level: Level) -> Self {
        Self { max_level }
    }

    /// Returns `true` if records at `level` are written.
    #[must_use]
    pub fn enabled(&self, level: Level) -> bool {
        level <= self.max_level
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new(Level::Info)
    }
}

impl TraceSink for ConsoleSink {
    fn on_log(&mut self, record: &LogRecord<'_>) {
        if !self.enabled(record.level) {
            return;
        }
        let message = JsValue::from_str(record.message);
        match record.level {
            Level::Error => web_sys::console::error_1(&message),
            Level::Warn => web_sys::console::warn_1(&message),
            Level::Info => web_sys::console::info_1(&message),
            Level::Debug => web_sys::console::debug_1(&message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_hides_debug_records() {
        let sink = ConsoleSink::default();
        assert!(sink.enabled(Level::Error));
        assert!(sink.enabled(Level::Info));
        assert!(!sink.enabled(Level::Debug));
        assert!(ConsoleSink::new(Level::Debug).enabled(Level::Debug));
    }
}
