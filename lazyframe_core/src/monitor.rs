// Copyright 2026 the Lazyframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll/resize monitoring with per-event cool-down windows.
//!
//! The [`Monitor`] turns raw `scroll` and `resize` events into visibility
//! re-checks. The first event of a type triggers an immediate re-check and
//! opens a cool-down window; further events of that type are dropped until
//! the window expires, at which point exactly one final re-check runs and the
//! gate reopens. Scroll and resize are gated independently.
//!
//! The monitor never touches timers itself. [`Monitor::on_event`] hands back
//! a [`Cooldown`] describing the timer the backend must arm, and the backend
//! reports expiry with the token it was given.
//!
//! # Usage
//!
//! ```rust
//! use lazyframe_core::monitor::{Monitor, MonitorConfig, MonitorEvent};
//!
//! let mut monitor = Monitor::new(MonitorConfig::page_framer());
//! let first = monitor.on_event(MonitorEvent::Scroll).expect("gate is open");
//! assert!(monitor.on_event(MonitorEvent::Scroll).is_none(), "cooling down");
//!
//! // ... `first.delay` later ...
//! assert!(monitor.on_expired(first.event, first.token));
//! assert!(monitor.on_event(MonitorEvent::Scroll).is_some());
//! ```

use core::fmt;

use crate::time::Duration;

/// The two monitored DOM event types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MonitorEvent {
    /// `scroll` on an ancestor or the window.
    Scroll,
    /// `resize` on an ancestor or the window.
    Resize,
}

impl MonitorEvent {
    /// Both event types, in listener-attachment order.
    pub const ALL: [Self; 2] = [Self::Scroll, Self::Resize];

    /// DOM event name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Scroll => "scroll",
            Self::Resize => "resize",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Scroll => 0,
            Self::Resize => 1,
        }
    }
}

impl fmt::Display for MonitorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Configuration for a [`Monitor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Length of the window during which repeated events are ignored.
    pub cooldown: Duration,
}

impl MonitorConfig {
    /// Page-framer preset: 2 s cool-down.
    #[must_use]
    pub const fn page_framer() -> Self {
        Self {
            cooldown: Duration::from_millis(2000),
        }
    }

    /// Page-viewer preset: 1 s cool-down.
    #[must_use]
    pub const fn page_viewer() -> Self {
        Self {
            cooldown: Duration::from_millis(1000),
        }
    }
}

/// Identifies one armed cool-down timer.
///
/// Tokens are unique per monitor, so a stale expiry (one whose window was
/// already closed) can be told apart from the current one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CooldownToken(pub u64);

/// A cool-down timer the backend must arm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cooldown {
    /// Which gate the timer belongs to.
    pub event: MonitorEvent,
    /// Token to report back through [`Monitor::on_expired`].
    pub token: CooldownToken,
    /// Delay until expiry.
    pub delay: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Gate {
    Idle,
    CoolingDown(CooldownToken),
}

/// Per-instance scroll/resize gate state machine.
///
/// Attachment only controls whether new events are accepted. Detaching does
/// not close an open window: its expiry still yields the final re-check.
#[derive(Debug)]
pub struct Monitor {
    config: MonitorConfig,
    gates: [Gate; 2],
    attached: bool,
    next_token: u64,
}

impl Monitor {
    /// Creates an attached monitor with both gates idle.
    #[must_use]
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            config,
            gates: [Gate::Idle; 2],
            attached: true,
            next_token: 0,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Returns `true` while events are accepted.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Returns `true` while `event`'s window is open.
    #[must_use]
    pub fn is_cooling_down(&self, event: MonitorEvent) -> bool {
        matches!(self.gates[event.index()], Gate::CoolingDown(_))
    }

    /// Starts accepting events again. Returns `false` if already attached.
    pub fn attach(&mut self) -> bool {
        !core::mem::replace(&mut self.attached, true)
    }

    /// Stops accepting events. Returns `false` if already detached.
    pub fn detach(&mut self) -> bool {
        core::mem::replace(&mut self.attached, false)
    }

    /// Feeds one DOM event.
    ///
    /// Returns `Some` when the caller must re-check visibility now and arm
    /// the returned timer. Returns `None` while cooling down or detached.
    pub fn on_event(&mut self, event: MonitorEvent) -> Option<Cooldown> {
        if !self.attached {
            return None;
        }
        let gate = &mut self.gates[event.index()];
        if *gate != Gate::Idle {
            return None;
        }
        let token = CooldownToken(self.next_token);
        self.next_token += 1;
        *gate = Gate::CoolingDown(token);
        Some(Cooldown {
            event,
            token,
            delay: self.config.cooldown,
        })
    }

    /// Reports that a timer armed for `event` fired.
    ///
    /// Returns `true` when the caller must run the final re-check. A token
    /// that does not match the open window is ignored.
    pub fn on_expired(&mut self, event: MonitorEvent, token: CooldownToken) -> bool {
        let gate = &mut self.gates[event.index()];
        if *gate == Gate::CoolingDown(token) {
            *gate = Gate::Idle;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_keep_distinct_cooldowns() {
        assert_eq!(MonitorConfig::page_framer().cooldown, Duration(2000));
        assert_eq!(MonitorConfig::page_viewer().cooldown, Duration(1000));
    }

    #[test]
    fn burst_yields_one_immediate_and_one_deferred_check() {
        let mut m = Monitor::new(MonitorConfig::page_framer());
        let first = m.on_event(MonitorEvent::Scroll);
        let second = m.on_event(MonitorEvent::Scroll);
        let first = first.expect("first event passes the gate");
        assert!(second.is_none(), "second event is inside the window");
        assert_eq!(first.delay, Duration(2000));
        assert!(m.on_expired(MonitorEvent::Scroll, first.token));
        assert!(!m.is_cooling_down(MonitorEvent::Scroll));
    }

    #[test]
    fn gates_are_independent_per_event() {
        let mut m = Monitor::new(MonitorConfig::page_viewer());
        let scroll = m.on_event(MonitorEvent::Scroll).unwrap();
        let resize = m.on_event(MonitorEvent::Resize).unwrap();
        assert_ne!(scroll.token, resize.token);
        assert!(m.on_expired(MonitorEvent::Resize, resize.token));
        assert!(m.is_cooling_down(MonitorEvent::Scroll));
        assert!(m.on_event(MonitorEvent::Resize).is_some());
    }

    #[test]
    fn stale_or_foreign_tokens_are_ignored() {
        let mut m = Monitor::new(MonitorConfig::page_framer());
        let scroll = m.on_event(MonitorEvent::Scroll).unwrap();
        assert!(!m.on_expired(MonitorEvent::Resize, scroll.token));
        assert!(m.on_expired(MonitorEvent::Scroll, scroll.token));
        assert!(
            !m.on_expired(MonitorEvent::Scroll, scroll.token),
            "already closed"
        );
    }

    #[test]
    fn detach_drops_events_but_keeps_open_window() {
        let mut m = Monitor::new(MonitorConfig::page_framer());
        let scroll = m.on_event(MonitorEvent::Scroll).unwrap();
        assert!(m.detach());
        assert!(!m.detach());
        assert!(m.on_event(MonitorEvent::Resize).is_none());
        assert!(
            m.on_expired(MonitorEvent::Scroll, scroll.token),
            "final check still due"
        );
        assert!(m.attach());
        assert!(m.on_event(MonitorEvent::Scroll).is_some());
    }
}
