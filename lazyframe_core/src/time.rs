// Copyright 2026 the Lazyframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Millisecond durations for cool-down windows and readiness timeouts.
//!
//! Browser timers (`setTimeout`) and the readiness threshold are expressed in
//! whole milliseconds, so [`Duration`] stores exactly that. It is deliberately
//! not `core::time::Duration`: the value crosses into JavaScript as an `i32`
//! delay and is printed in log messages as `<n>ms`.

use core::fmt;

/// A span of time in whole milliseconds.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duration(pub u64);

impl Duration {
    /// The zero-length duration.
    pub const ZERO: Self = Self(0);

    /// Creates a duration from a millisecond count.
    #[inline]
    #[must_use]
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// Returns the delay as a `setTimeout`-compatible `i32`, saturating at
    /// `i32::MAX`.
    #[inline]
    #[must_use]
    pub const fn as_timeout_ms(self) -> i32 {
        if self.0 > i32::MAX as u64 {
            i32::MAX
        } else {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "bounds checked against i32::MAX above"
            )]
            let ms = self.0 as i32;
            ms
        }
    }
}

impl fmt::Debug for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Duration({}ms)", self.0)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}
