// Copyright 2026 the Lazyframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Out-of-band load/unload signals.
//!
//! Any script on the page can force an instance to load or unload by
//! dispatching a custom document event named
//! `load-<component>-<uuid>` or `unload-<component>-<uuid>`.

use alloc::string::String;

use super::{FrameKind, InstanceId};

/// A forced lifecycle request addressed to one instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Signal {
    /// Load now, ignoring visibility and readiness.
    Load,
    /// Unload now.
    Unload,
}

impl Signal {
    const fn verb(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Unload => "unload",
        }
    }

    /// The document event name addressing `uuid`.
    #[must_use]
    pub fn event_name(self, kind: FrameKind, uuid: &InstanceId) -> String {
        alloc::format!("{}-{}-{uuid}", self.verb(), kind.component())
    }
}
