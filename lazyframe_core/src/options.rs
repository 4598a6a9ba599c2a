// Copyright 2026 the Lazyframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layered option resolution.
//!
//! Every instance resolves a fixed table of named options once, at
//! construction, by cascading four tiers from lowest to highest precedence:
//!
//! ```text
//!   hard default  <  global config section  <  page-level element  <  element attribute
//! ```
//!
//! Each tier is an [`OptionSource`]; a tier that does not define an option
//! leaves the lower tier's value untouched. Raw values are passed through a
//! [`ValueNormalizer`] before they replace the previous value, so attribute
//! strings such as `"false"` or `"300"` become typed values.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

/// A typed option value.
#[derive(Clone, Debug, PartialEq)]
pub enum OptionValue {
    /// A boolean flag.
    Bool(bool),
    /// A number (sizes, ratios, scale factors).
    Num(f64),
    /// Free-form text (titles, captions, URLs).
    Str(String),
}

impl OptionValue {
    /// Returns whether the value counts as "set".
    ///
    /// `false`, `0`, `NaN`, and the empty string are unset; everything else
    /// is set. Flags such as `overlay` and optional sizes such as `height`
    /// (default `false`) are both tested this way.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Num(n) => *n != 0.0 && !n.is_nan(),
            Self::Str(s) => !s.is_empty(),
        }
    }

    /// Returns the value as a number, if it is one.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Num(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the value as a string slice, if it is text.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Num(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for OptionValue {
    fn from(n: f64) -> Self {
        Self::Num(n)
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

/// Hard-coded default for one option.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DefaultValue {
    /// A constant flag.
    Bool(bool),
    /// A constant number.
    Num(f64),
    /// A constant string.
    Str(&'static str),
    /// The instance's resolved iframe source, or `false` when there is none.
    IframeSrc,
}

impl DefaultValue {
    fn materialize(self, iframe_src: Option<&str>) -> OptionValue {
        match self {
            Self::Bool(b) => OptionValue::Bool(b),
            Self::Num(n) => OptionValue::Num(n),
            Self::Str(s) => OptionValue::Str(s.to_string()),
            Self::IframeSrc => match iframe_src {
                Some(src) => OptionValue::Str(src.to_string()),
                None => OptionValue::Bool(false),
            },
        }
    }
}

/// Name and default of one option.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OptionSpec {
    /// Option name, also the suffix of its attribute (`data-esb-<name>`).
    pub name: &'static str,
    /// Value used when no tier defines the option.
    pub default: DefaultValue,
}

const fn spec(name: &'static str, default: DefaultValue) -> OptionSpec {
    OptionSpec { name, default }
}

/// A fixed, ordered table of option names with their hard defaults.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OptionTable {
    specs: &'static [OptionSpec],
}

impl OptionTable {
    /// The page-framer table (13 options).
    pub const PAGE_FRAMER: Self = Self {
        specs: &[
            spec(names::LOAD_IMMEDIATELY, DefaultValue::Bool(false)),
            spec(names::UNLOAD_WHEN_NOT_VISIBLE, DefaultValue::Bool(false)),
            spec(names::TITLE, DefaultValue::Bool(false)),
            spec(names::CAPTION, DefaultValue::Bool(false)),
            spec(names::DIMENSIONS, DefaultValue::Bool(true)),
            spec(names::HREF, DefaultValue::IframeSrc),
            spec(names::SCROLLING, DefaultValue::Str("no")),
            spec(names::OVERLAY, DefaultValue::Bool(true)),
            spec(names::SCALE, DefaultValue::Bool(false)),
            spec(names::VIEWPORT_WIDTH, DefaultValue::Num(1000.0)),
            spec(names::VIEWPORT_ASPECT_RATIO, DefaultValue::Num(1.5)),
            spec(names::WIDTH, DefaultValue::Num(200.0)),
            spec(names::HEIGHT, DefaultValue::Bool(false)),
        ],
    };

    /// The page-viewer table (1 option).
    pub const PAGE_VIEWER: Self = Self {
        specs: &[spec(names::LOAD_IMMEDIATELY, DefaultValue::Bool(false))],
    };

    /// Returns the option specs in table order.
    #[must_use]
    pub const fn specs(&self) -> &'static [OptionSpec] {
        self.specs
    }

    /// Number of options in the table.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.specs.len()
    }

    /// Returns `true` if the table has no options.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

/// Option names shared by both tables.
pub mod names {
    /// Load as soon as the placeholder is injected.
    pub const LOAD_IMMEDIATELY: &str = "load-immediately";
    /// Unload the iframe again when it scrolls out of view.
    pub const UNLOAD_WHEN_NOT_VISIBLE: &str = "unload-when-not-visible";
    /// Title rendered above the frame.
    pub const TITLE: &str = "title";
    /// Caption rendered above the frame.
    pub const CAPTION: &str = "caption";
    /// Whether to render the dimensions annotation.
    pub const DIMENSIONS: &str = "dimensions";
    /// Link target wrapping the placeholder.
    pub const HREF: &str = "href";
    /// Value of the iframe's `scrolling` attribute.
    pub const SCROLLING: &str = "scrolling";
    /// Whether the placeholder carries the overlay class.
    pub const OVERLAY: &str = "overlay";
    /// Explicit visual scale factor.
    pub const SCALE: &str = "scale";
    /// Width the sub-page is laid out at before scaling.
    pub const VIEWPORT_WIDTH: &str = "viewport-width";
    /// Height-to-width ratio of the emulated viewport.
    pub const VIEWPORT_ASPECT_RATIO: &str = "viewport-aspect-ratio";
    /// Displayed width of the placeholder.
    pub const WIDTH: &str = "width";
    /// Displayed height of the placeholder.
    pub const HEIGHT: &str = "height";
}

/// One precedence tier: something that may define a raw value per option.
pub trait OptionSource {
    /// Returns the raw value for `name`, or `None` if this tier leaves it
    /// undefined.
    fn raw(&self, name: &str) -> Option<OptionValue>;
}

/// Converts raw tier values into typed option values.
///
/// This is the boolean/value normalizer collaborator: resolution only fixes
/// the precedence order and delegates parsing here.
pub trait ValueNormalizer {
    /// Normalizes `raw`, given the option's hard default.
    fn normalize(&self, raw: OptionValue, default: &OptionValue) -> OptionValue;
}

/// The default normalizer.
///
/// Non-string values pass through unchanged. The strings `"true"` and
/// `"false"` become booleans. When the default is not a string, a string that
/// parses as a finite number becomes a number. Anything else stays text.
#[derive(Clone, Copy, Debug, Default)]
pub struct BooleanOrValue;

impl ValueNormalizer for BooleanOrValue {
    fn normalize(&self, raw: OptionValue, default: &OptionValue) -> OptionValue {
        let OptionValue::Str(s) = raw else {
            return raw;
        };
        match s.trim() {
            "true" => return OptionValue::Bool(true),
            "false" => return OptionValue::Bool(false),
            _ => {}
        }
        if !matches!(default, OptionValue::Str(_))
            && let Ok(n) = s.trim().parse::<f64>()
            && n.is_finite()
        {
            return OptionValue::Num(n);
        }
        OptionValue::Str(s)
    }
}

/// Immutable result of option resolution for one instance.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedOptions {
    values: Vec<(&'static str, OptionValue)>,
}

impl ResolvedOptions {
    /// Returns the value of `name`, if it is in the table.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    /// Returns `true` if `name` is present and truthy.
    #[must_use]
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).is_some_and(OptionValue::is_truthy)
    }

    /// Returns `name` as a number, if it is present and numeric.
    #[must_use]
    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(OptionValue::as_number)
    }

    /// Returns `name` as a truthy number (unset values and zero are `None`).
    #[must_use]
    pub fn set_number(&self, name: &str) -> Option<f64> {
        self.get(name)
            .filter(|v| v.is_truthy())
            .and_then(OptionValue::as_number)
    }

    /// Returns the value of `name` rendered as text when it is truthy.
    ///
    /// Used for display options (`title`, `caption`, `href`) whose default
    /// `false` means "omit".
    #[must_use]
    pub fn text(&self, name: &str) -> Option<String> {
        self.get(name)
            .filter(|v| v.is_truthy())
            .map(ToString::to_string)
    }

    /// Iterates over `(name, value)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &OptionValue)> {
        self.values.iter().map(|(n, v)| (*n, v))
    }

    /// Number of resolved options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no options were resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Resolves every option in `table` across `tiers`, lowest precedence first.
///
/// `iframe_src` feeds the [`DefaultValue::IframeSrc`] default. Each tier is
/// consulted independently per option.
#[must_use]
pub fn resolve(
    table: OptionTable,
    iframe_src: Option<&str>,
    normalizer: &dyn ValueNormalizer,
    tiers: &[&dyn OptionSource],
) -> ResolvedOptions {
    let values = table
        .specs()
        .iter()
        .map(|spec| {
            let default = spec.default.materialize(iframe_src);
            let mut value = default.clone();
            for tier in tiers {
                if let Some(raw) = tier.raw(spec.name) {
                    value = normalizer.normalize(raw, &default);
                }
            }
            (spec.name, value)
        })
        .collect();
    ResolvedOptions { values }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;

    use super::*;

    #[derive(Default)]
    struct Tier(BTreeMap<&'static str, OptionValue>);

    impl Tier {
        fn with(mut self, name: &'static str, value: impl Into<OptionValue>) -> Self {
            self.0.insert(name, value.into());
            self
        }
    }

    impl OptionSource for Tier {
        fn raw(&self, name: &str) -> Option<OptionValue> {
            self.0.get(name).cloned()
        }
    }

    #[test]
    fn defaults_apply_without_tiers() {
        let opts = resolve(
            OptionTable::PAGE_FRAMER,
            Some("a.html"),
            &BooleanOrValue,
            &[],
        );
        assert_eq!(opts.len(), 13);
        assert_eq!(opts.get(names::WIDTH), Some(&OptionValue::Num(200.0)));
        assert_eq!(opts.get(names::HREF), Some(&OptionValue::from("a.html")));
        assert_eq!(opts.get(names::SCROLLING), Some(&OptionValue::from("no")));
        assert!(opts.flag(names::OVERLAY));
        assert!(!opts.flag(names::SCALE));
    }

    #[test]
    fn href_defaults_to_false_without_source() {
        let opts = resolve(OptionTable::PAGE_FRAMER, None, &BooleanOrValue, &[]);
        assert_eq!(opts.get(names::HREF), Some(&OptionValue::Bool(false)));
        assert_eq!(opts.text(names::HREF), None);
    }

    #[test]
    fn higher_tiers_win_per_option() {
        let global = Tier::default()
            .with(names::WIDTH, 300.0)
            .with(names::TITLE, "global title")
            .with(names::OVERLAY, false);
        let page = Tier::default()
            .with(names::WIDTH, "400")
            .with(names::CAPTION, "page caption");
        let element = Tier::default().with(names::WIDTH, "500");

        let opts = resolve(
            OptionTable::PAGE_FRAMER,
            Some("a.html"),
            &BooleanOrValue,
            &[&global, &page, &element],
        );

        assert_eq!(opts.number(names::WIDTH), Some(500.0), "element wins");
        assert_eq!(opts.text(names::TITLE).as_deref(), Some("global title"));
        assert_eq!(opts.text(names::CAPTION).as_deref(), Some("page caption"));
        assert!(!opts.flag(names::OVERLAY), "global overrides default");
        assert_eq!(opts.number(names::VIEWPORT_WIDTH), Some(1000.0));
    }

    #[test]
    fn every_tier_wins_over_all_lower_tiers() {
        let tiers_for = |n: usize| -> [Tier; 3] {
            let mut t = [Tier::default(), Tier::default(), Tier::default()];
            for (i, tier) in t.iter_mut().enumerate().take(n) {
                let v = match i {
                    0 => "global",
                    1 => "page",
                    _ => "element",
                };
                tier.0.insert(names::CAPTION, OptionValue::from(v));
            }
            t
        };
        let expected = ["default", "global", "page", "element"];
        for (n, want) in expected.iter().enumerate() {
            let [a, b, c] = tiers_for(n);
            let opts = resolve(
                OptionTable::PAGE_FRAMER,
                None,
                &BooleanOrValue,
                &[&a, &b, &c],
            );
            let got = opts
                .text(names::CAPTION)
                .unwrap_or_else(|| "default".into());
            assert_eq!(got, *want, "with {n} tiers defined");
        }
    }

    #[test]
    fn viewer_table_has_single_option() {
        let element = Tier::default().with(names::LOAD_IMMEDIATELY, "true");
        let opts = resolve(OptionTable::PAGE_VIEWER, None, &BooleanOrValue, &[&element]);
        assert_eq!(opts.len(), 1);
        assert!(opts.flag(names::LOAD_IMMEDIATELY));
        assert_eq!(opts.get(names::WIDTH), None);
    }

    #[test]
    fn normalizer_parses_flags_and_numbers() {
        let num_default = OptionValue::Num(1.0);
        let str_default = OptionValue::from("no");
        let norm = |raw: OptionValue, default: &OptionValue| BooleanOrValue.normalize(raw, default);
        assert_eq!(norm("true".into(), &num_default), OptionValue::Bool(true));
        assert_eq!(norm("false".into(), &str_default), OptionValue::Bool(false));
        assert_eq!(norm("0.25".into(), &num_default), OptionValue::Num(0.25));
        assert_eq!(
            norm("123".into(), &str_default),
            OptionValue::from("123"),
            "string-typed options keep numeric-looking text"
        );
        assert_eq!(norm("auto".into(), &num_default), OptionValue::from("auto"));
        assert_eq!(
            norm(OptionValue::Num(3.0), &str_default),
            OptionValue::Num(3.0)
        );
    }

    #[test]
    fn truthiness_follows_unset_rules() {
        assert!(!OptionValue::Bool(false).is_truthy());
        assert!(!OptionValue::Num(0.0).is_truthy());
        assert!(!OptionValue::Num(f64::NAN).is_truthy());
        assert!(!OptionValue::from("").is_truthy());
        assert!(OptionValue::Num(0.5).is_truthy());
        assert!(OptionValue::from("x").is_truthy());
    }

    #[test]
    fn set_number_skips_false_height() {
        let opts = resolve(OptionTable::PAGE_FRAMER, None, &BooleanOrValue, &[]);
        assert_eq!(opts.set_number(names::HEIGHT), None);
        assert_eq!(opts.set_number(names::WIDTH), Some(200.0));
    }
}
