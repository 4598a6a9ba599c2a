// Copyright 2026 the Lazyframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Global configuration access.
//!
//! The global configuration is loaded once per page by the host and handed to
//! every instance at construction. It is organized in named sections
//! (`page-framers`, `page-viewers`), each a flat mapping from key to value.
//! Besides the option names, each section may carry a `source` key holding
//! the base path that relative sub-page references are resolved against.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

use crate::options::{OptionSource, OptionValue};

/// Key of the base path inside a configuration section.
pub const SOURCE_KEY: &str = "source";

/// A loaded configuration document.
pub trait ConfigSource {
    /// Returns the named section, if the configuration defines it.
    fn section(&self, name: &str) -> Option<&dyn ConfigSection>;
}

/// One section of a configuration document.
pub trait ConfigSection {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<OptionValue>;
}

/// Adapts a [`ConfigSection`] into the global precedence tier.
pub(crate) struct SectionTier<'a>(pub(crate) &'a dyn ConfigSection);

impl OptionSource for SectionTier<'_> {
    fn raw(&self, name: &str) -> Option<OptionValue> {
        self.0.get(name)
    }
}

/// A configuration with no sections.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyConfig;

impl ConfigSource for EmptyConfig {
    fn section(&self, _name: &str) -> Option<&dyn ConfigSection> {
        None
    }
}

/// A section backed by an ordered map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SectionMap {
    values: BTreeMap<String, OptionValue>,
}

impl SectionMap {
    /// Creates an empty section.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.values.insert(key.into(), value.into());
    }
}

impl ConfigSection for SectionMap {
    fn get(&self, key: &str) -> Option<OptionValue> {
        self.values.get(key).cloned()
    }
}

/// In-memory configuration assembled in code.
///
/// ```
/// use lazyframe_core::config::{ConfigMap, ConfigSource};
///
/// let config = ConfigMap::new()
///     .with("page-framers", "source", "components/pages")
///     .with("page-framers", "width", 320.0);
/// assert!(config.section("page-framers").is_some());
/// assert!(config.section("page-viewers").is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConfigMap {
    sections: BTreeMap<String, SectionMap>,
}

impl ConfigMap {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(
        mut self,
        section: &str,
        key: impl Into<String>,
        value: impl Into<OptionValue>,
    ) -> Self {
        self.insert(section, key, value);
        self
    }

    /// Sets `key` in `section`, creating the section if needed.
    pub fn insert(&mut self, section: &str, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(key, value);
    }
}

impl ConfigSource for ConfigMap {
    fn section(&self, name: &str) -> Option<&dyn ConfigSection> {
        self.sections
            .get(name)
            .map(|section| section as &dyn ConfigSection)
    }
}
