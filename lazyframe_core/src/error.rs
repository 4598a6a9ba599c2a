// Copyright 2026 the Lazyframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-instance failure conditions.
//!
//! None of these are fatal to the page: a failing instance logs through its
//! [`TraceSink`](crate::trace::TraceSink) and stays inert while every other
//! instance carries on.

use core::fmt;

use crate::frame::FrameState;
use crate::time::Duration;

/// Errors from [`Frame`](crate::frame::Frame) operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameError {
    /// The primary reference attribute was absent or empty, so there is no
    /// iframe to load.
    NoIframeSource,
    /// After replacing the original element, no node carried the instance id.
    PlaceholderNotFound,
    /// The operation needs the placeholder to be injected first.
    NotInjected,
    /// The placeholder was already injected; injection is one-shot.
    AlreadyInjected(FrameState),
    /// The readiness signal did not fire within its threshold.
    ReadinessTimedOut {
        /// The configured threshold.
        timeout: Duration,
    },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoIframeSource => f.write_str("no iframe src is set"),
            Self::PlaceholderNotFound => {
                f.write_str("placeholder element not found after injection")
            }
            Self::NotInjected => f.write_str("placeholder has not been injected"),
            Self::AlreadyInjected(state) => {
                write!(f, "placeholder already injected (state {state:?})")
            }
            Self::ReadinessTimedOut { timeout } => write!(
                f,
                "readiness signal did not fire within the timeout threshold of: {timeout}"
            ),
        }
    }
}

impl core::error::Error for FrameError {}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn timeout_message_names_threshold() {
        let err = FrameError::ReadinessTimedOut {
            timeout: Duration::from_millis(4000),
        };
        assert!(err.to_string().ends_with("threshold of: 4000ms"));
    }
}
