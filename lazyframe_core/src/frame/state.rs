// Copyright 2026 the Lazyframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle states.

use alloc::string::String;
use core::fmt;

use super::FrameKind;

/// Where an instance is in its lifecycle.
///
/// ```text
/// Constructed ──► PlaceholderInjected ──► Loading ──► Loaded
///                                            ▲           │
///                                            └─ Unloaded ◄┘
/// ```
///
/// `Unloaded` is also reachable straight from `Loading`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameState {
    /// Options resolved and markup built; the document is untouched.
    Constructed,
    /// The original element has been replaced by the placeholder.
    PlaceholderInjected,
    /// The iframe `src` has been set; the browser is fetching.
    Loading,
    /// The iframe fired its native `load` event.
    Loaded,
    /// The iframe was rebuilt without `src`; eligible to load again.
    Unloaded,
}

impl FrameState {
    /// The CSS state marker for this state, if it has one.
    #[must_use]
    pub const fn marker(self) -> Option<&'static str> {
        match self {
            Self::Loading => Some("loading"),
            Self::Loaded => Some("loaded"),
            _ => None,
        }
    }

    /// The CSS class applied to the placeholder for this state, e.g.
    /// `esb-page-framer--is-loading`.
    #[must_use]
    pub fn css_class(self, kind: FrameKind) -> Option<String> {
        self.marker()
            .map(|marker| alloc::format!("{}--is-{marker}", kind.component()))
    }

    /// Returns `true` once the iframe has a `src`.
    #[must_use]
    pub const fn has_source(self) -> bool {
        matches!(self, Self::Loading | Self::Loaded)
    }
}

impl fmt::Display for FrameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Constructed => "constructed",
            Self::PlaceholderInjected => "placeholder-injected",
            Self::Loading => "loading",
            Self::Loaded => "loaded",
            Self::Unloaded => "unloaded",
        })
    }
}
