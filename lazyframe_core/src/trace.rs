// Copyright 2026 the Lazyframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Logging and lifecycle tracing.
//!
//! Core never prints. Every diagnostic goes through a [`TraceSink`] passed
//! into the controller: log records (errors, info messages) and structured
//! lifecycle events (state transitions, visibility re-checks). All methods
//! default to no-ops, so a sink implements only the events it cares about.
//!
//! Sinks shipped elsewhere:
//!
//! - `lazyframe_backend_web::ConsoleSink`: browser console.
//! - `lazyframe_debug::pretty::PrettyPrintSink`: one line per event.
//! - `lazyframe_debug::recorder::RecorderSink`: in-memory recording.
//! - `lazyframe_debug::log_facade::LogFacadeSink`: the `log` crate.

use core::fmt;

use crate::frame::{FrameKind, FrameState, InstanceId};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Severity of a [`LogRecord`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// The instance cannot do what it was asked to; it stays inert.
    Error,
    /// Unexpected but recoverable.
    Warn,
    /// Noteworthy normal behavior.
    Info,
    /// Fine-grained detail.
    Debug,
}

impl Level {
    /// Lower-case name, as used in log output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a visibility re-check ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecheckCause {
    /// The readiness signal resolved.
    Ready,
    /// A scroll event arrived outside a cool-down window.
    Scroll,
    /// A resize event arrived outside a cool-down window.
    Resize,
    /// A scroll cool-down window expired.
    ScrollCooldownExpired,
    /// A resize cool-down window expired.
    ResizeCooldownExpired,
}

impl RecheckCause {
    /// Short kebab-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Scroll => "scroll",
            Self::Resize => "resize",
            Self::ScrollCooldownExpired => "scroll-cooldown-expired",
            Self::ResizeCooldownExpired => "resize-cooldown-expired",
        }
    }
}

/// What a re-check did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecheckOutcome {
    /// Visible and not yet loading; a load was started.
    Loaded,
    /// Invisible while loaded with unload enabled; the iframe was unloaded.
    Unloaded,
    /// Nothing to do.
    Unchanged,
}

impl RecheckOutcome {
    /// Short lower-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Loaded => "loaded",
            Self::Unloaded => "unloaded",
            Self::Unchanged => "unchanged",
        }
    }
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// A log message from one instance.
#[derive(Clone, Copy, Debug)]
pub struct LogRecord<'a> {
    /// Severity.
    pub level: Level,
    /// Component of the emitting instance.
    pub kind: FrameKind,
    /// Emitting instance.
    pub uuid: &'a InstanceId,
    /// Human-readable message.
    pub message: &'a str,
}

/// Emitted on every lifecycle state change.
#[derive(Clone, Copy, Debug)]
pub struct TransitionEvent<'a> {
    /// Component of the instance.
    pub kind: FrameKind,
    /// Instance.
    pub uuid: &'a InstanceId,
    /// State before.
    pub from: FrameState,
    /// State after.
    pub to: FrameState,
}

/// Emitted after each visibility re-check.
#[derive(Clone, Copy, Debug)]
pub struct RecheckEvent<'a> {
    /// Component of the instance.
    pub kind: FrameKind,
    /// Instance.
    pub uuid: &'a InstanceId,
    /// What triggered the check.
    pub cause: RecheckCause,
    /// Result of the visibility test.
    pub visible: bool,
    /// Action taken.
    pub outcome: RecheckOutcome,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives log records and lifecycle events.
pub trait TraceSink {
    /// Called for each log message.
    fn on_log(&mut self, record: &LogRecord<'_>) {
        _ = record;
    }

    /// Called when an instance changes state.
    fn on_transition(&mut self, e: &TransitionEvent<'_>) {
        _ = e;
    }

    /// Called after a visibility re-check.
    fn on_recheck(&mut self, e: &RecheckEvent<'_>) {
        _ = e;
    }
}

/// A [`TraceSink`] that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}
