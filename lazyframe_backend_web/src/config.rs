// Copyright 2026 the Lazyframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Global configuration parsed from JSON.
//!
//! The host page supplies one JSON document for the whole page:
//!
//! ```json
//! {
//!   "page-framers": { "source": "components/pages", "width": 320 },
//!   "page-viewers": { "source": "components/pages" }
//! }
//! ```
//!
//! JSON booleans, numbers, and strings become option values. Nulls, arrays,
//! and nested objects are treated as undefined.

use std::collections::BTreeMap;

use lazyframe_core::config::{ConfigSection, ConfigSource};
use lazyframe_core::options::OptionValue;
use serde_json::{Map, Value};

/// One section of a [`JsonConfig`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JsonSection(Map<String, Value>);

impl ConfigSection for JsonSection {
    fn get(&self, key: &str) -> Option<OptionValue> {
        match self.0.get(key)? {
            Value::Bool(b) => Some(OptionValue::Bool(*b)),
            Value::Number(n) => n.as_f64().map(OptionValue::Num),
            Value::String(s) => Some(OptionValue::Str(s.clone())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

/// A configuration document loaded from JSON.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JsonConfig {
    sections: BTreeMap<String, JsonSection>,
}

impl JsonConfig {
    /// Parses a JSON document.
    ///
    /// Top-level keys whose values are objects become sections; everything
    /// else at the top level is ignored. A document that is not an object
    /// yields an empty configuration.
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Value>(json).map(Self::from_value)
    }

    /// Builds a configuration from an already-parsed value.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        let Value::Object(root) = value else {
            return Self::default();
        };
        let sections = root
            .into_iter()
            .filter_map(|(name, value)| match value {
                Value::Object(section) => Some((name, JsonSection(section))),
                _ => None,
            })
            .collect();
        Self { sections }
    }
}

impl ConfigSource for JsonConfig {
    fn section(&self, name: &str) -> Option<&dyn ConfigSection> {
        self.sections
            .get(name)
            .map(|section| section as &dyn ConfigSection)
    }
}
