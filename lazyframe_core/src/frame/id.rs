// Copyright 2026 the Lazyframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Instance identity.

use alloc::string::String;
use core::fmt;

/// Opaque, page-unique identifier of one frame instance.
///
/// The identifier is written into the placeholder as `data-esb-uuid` so the
/// live node can be found again after an outer-HTML replacement, and it
/// scopes the per-instance load/unload signal names. Generation is the
/// caller's job (the web backend uses v4 UUIDs); core treats the value as
/// an opaque string and never changes it.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstanceId(String);

impl InstanceId {
    /// Wraps an already-generated identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InstanceId({})", self.0)
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
