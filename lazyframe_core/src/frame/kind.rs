// Copyright 2026 the Lazyframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The two frame-like components and their fixed naming surface.

use crate::monitor::MonitorConfig;
use crate::options::OptionTable;

/// Which component an instance belongs to.
///
/// Both kinds share the same lifecycle; they differ in option table,
/// attribute naming, markup, and cool-down length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameKind {
    /// Scaled, captioned preview of a sub-page (`data-esb-page-framer`).
    PageFramer,
    /// Plain embedded sub-page (`data-esb-page-viewer`).
    PageViewer,
}

impl FrameKind {
    /// All kinds, in mounting order.
    pub const ALL: [Self; 2] = [Self::PageFramer, Self::PageViewer];

    /// Component name, used as the placeholder class and CSS state prefix.
    #[must_use]
    pub const fn component(self) -> &'static str {
        match self {
            Self::PageFramer => "esb-page-framer",
            Self::PageViewer => "esb-page-viewer",
        }
    }

    /// The primary reference attribute carrying the sub-page path or URL.
    #[must_use]
    pub const fn reference_attribute(self) -> &'static str {
        match self {
            Self::PageFramer => "data-esb-page-framer",
            Self::PageViewer => "data-esb-page-viewer",
        }
    }

    /// Prefix for per-element (and page-level) option attributes.
    #[must_use]
    pub const fn option_prefix(self) -> &'static str {
        match self {
            Self::PageFramer => "data-esb-",
            Self::PageViewer => "data-",
        }
    }

    /// Attribute that overrides the configured base path.
    #[must_use]
    pub const fn source_attribute(self) -> &'static str {
        match self {
            Self::PageFramer => "data-esb-source",
            Self::PageViewer => "data-source",
        }
    }

    /// Marker attribute identifying an ancestor page-level config element.
    #[must_use]
    pub const fn page_config_marker(self) -> &'static str {
        match self {
            Self::PageFramer => "data-esb-page-framer-config",
            Self::PageViewer => "data-esb-page-viewer-config",
        }
    }

    /// Section of the global configuration holding this kind's options.
    #[must_use]
    pub const fn config_section(self) -> &'static str {
        match self {
            Self::PageFramer => "page-framers",
            Self::PageViewer => "page-viewers",
        }
    }

    /// Human-readable name used in log messages.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::PageFramer => "EsbPageFramer",
            Self::PageViewer => "EsbPageViewer",
        }
    }

    /// The option table (names and hard defaults) for this kind.
    #[must_use]
    pub const fn option_table(self) -> OptionTable {
        match self {
            Self::PageFramer => OptionTable::PAGE_FRAMER,
            Self::PageViewer => OptionTable::PAGE_VIEWER,
        }
    }

    /// Scroll/resize monitoring configuration for this kind.
    #[must_use]
    pub const fn monitor_config(self) -> MonitorConfig {
        match self {
            Self::PageFramer => MonitorConfig::page_framer(),
            Self::PageViewer => MonitorConfig::page_viewer(),
        }
    }
}
