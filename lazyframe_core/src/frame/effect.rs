// Copyright 2026 the Lazyframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Work the controller hands to the backend, and what comes back.

use alloc::string::String;
use alloc::vec::Vec;

use super::Signal;
use crate::error::FrameError;
use crate::monitor::{Cooldown, CooldownToken, MonitorEvent};

/// One asynchronous action for the backend to perform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Attach an `event` listener to the scrollable ancestor at index
    /// `ancestor`. Events are reported as [`FrameEvent::Monitor`].
    Listen {
        /// Index into [`Frame::ancestors`](super::Frame::ancestors).
        ancestor: usize,
        /// Event type.
        event: MonitorEvent,
    },
    /// Remove a listener previously attached with [`Effect::Listen`].
    Unlisten {
        /// Index into [`Frame::ancestors`](super::Frame::ancestors).
        ancestor: usize,
        /// Event type.
        event: MonitorEvent,
    },
    /// Arm a one-shot timer; report it as [`FrameEvent::CooldownExpired`].
    ScheduleCooldown(Cooldown),
    /// Listen on the document for the two per-instance signal events and
    /// report them as [`FrameEvent::Signal`].
    WatchSignals {
        /// Event name forcing a load.
        load: String,
        /// Event name forcing an unload.
        unload: String,
    },
    /// Install a native `load` handler on the current iframe node, reported
    /// as [`FrameEvent::IframeLoaded`]. Issued again after every rebuild.
    BindLoadHandler,
    /// Wait for the readiness signal and report [`FrameEvent::Ready`] or
    /// [`FrameEvent::ReadyFailed`].
    AwaitReady,
}

/// An ordered batch of [`Effect`]s.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Effects(Vec<Effect>);

impl Effects {
    /// An empty batch.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends one effect.
    pub fn push(&mut self, effect: Effect) {
        self.0.push(effect);
    }

    /// Appends every effect of `other`.
    pub fn append(&mut self, mut other: Self) {
        self.0.append(&mut other.0);
    }

    /// Iterates in execution order.
    pub fn iter(&self) -> core::slice::Iter<'_, Effect> {
        self.0.iter()
    }

    /// Number of effects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there is nothing to do.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for Effects {
    type Item = Effect;
    type IntoIter = alloc::vec::IntoIter<Effect>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Effects {
    type Item = &'a Effect;
    type IntoIter = core::slice::Iter<'a, Effect>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Extend<Effect> for Effects {
    fn extend<I: IntoIterator<Item = Effect>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

/// Something that happened, fed back into
/// [`Frame::handle`](super::Frame::handle).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrameEvent {
    /// The readiness signal resolved.
    Ready,
    /// The readiness signal rejected or timed out.
    ReadyFailed(FrameError),
    /// A monitored ancestor fired `scroll` or `resize`.
    Monitor(MonitorEvent),
    /// A timer armed by [`Effect::ScheduleCooldown`] fired.
    CooldownExpired {
        /// Gate the timer belongs to.
        event: MonitorEvent,
        /// Token the timer was armed with.
        token: CooldownToken,
    },
    /// The iframe fired its native `load` event.
    IframeLoaded,
    /// A per-instance signal event was dispatched.
    Signal(Signal),
}
