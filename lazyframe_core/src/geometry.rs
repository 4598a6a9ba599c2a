// Copyright 2026 the Lazyframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Iframe sizing and scaling.
//!
//! A page-framer lays the sub-page out at `viewport-width` and shrinks it
//! visually with a CSS `transform: scale(..)`, so the inner iframe keeps its
//! full viewport size while the placeholder around it is displayed at the
//! (much smaller) option `width`.
//!
//! Three sizes are derived from the resolved options:
//!
//! - [`FrameGeometry`]: the inner iframe's unscaled width, height, and scale.
//! - [`placeholder_width`]: the outer placeholder's display width.
//! - [`wrap_size`]: the clipping wrapper's display size.

use alloc::format;
use alloc::string::String;

use kurbo::Size;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::options::{ResolvedOptions, names};

/// Unscaled iframe size plus the visual scale applied to it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameGeometry {
    /// Inner iframe width in CSS pixels (always the viewport width).
    pub width: f64,
    /// Inner iframe height in CSS pixels, before scaling.
    pub height: f64,
    /// Visual scale factor.
    pub scale: f64,
}

impl FrameGeometry {
    /// Derives the iframe geometry from resolved options.
    ///
    /// Returns `None` unless `viewport-width`, `viewport-aspect-ratio`, and
    /// `width` are all set; no sizing styles are emitted in that case. An
    /// explicit `scale` wins over the derived `width / viewport-width`. An
    /// explicit `height` is divided by the scale so that it is the displayed
    /// height; otherwise the height follows the viewport aspect ratio.
    #[must_use]
    pub fn from_options(options: &ResolvedOptions) -> Option<Self> {
        let viewport_width = options.set_number(names::VIEWPORT_WIDTH)?;
        let aspect_ratio = options.set_number(names::VIEWPORT_ASPECT_RATIO)?;
        let width = options.set_number(names::WIDTH)?;

        let scale = options
            .set_number(names::SCALE)
            .unwrap_or(width / viewport_width);
        let height = match options.set_number(names::HEIGHT) {
            Some(height) => height / scale,
            None => aspect_ratio * viewport_width,
        };

        Some(Self {
            width: viewport_width,
            height,
            scale,
        })
    }

    /// Returns the unscaled size.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns the size as it appears on screen after scaling.
    #[must_use]
    pub fn displayed_size(&self) -> Size {
        self.size() * self.scale
    }

    /// Formats the dimensions caption, e.g. `1000&times;1500px @ 20% scale`.
    ///
    /// Pixel sizes are rounded half-up to integers; the percentage keeps one
    /// decimal and drops a trailing `.0`.
    #[must_use]
    pub fn annotation(&self) -> String {
        let percent = round_half_up(self.scale * 1000.0) / 10.0;
        format!(
            "{}&times;{}px @ {}% scale",
            round_half_up(self.width),
            round_half_up(self.height),
            percent,
        )
    }
}

/// Display width of the outer placeholder.
///
/// `viewport-width * scale` when an explicit scale is set, else the raw
/// `width` option. `None` if neither yields a number.
#[must_use]
pub fn placeholder_width(options: &ResolvedOptions) -> Option<f64> {
    match options.set_number(names::SCALE) {
        Some(scale) => options
            .number(names::VIEWPORT_WIDTH)
            .map(|viewport_width| viewport_width * scale),
        None => options.number(names::WIDTH),
    }
}

/// Display size of the iframe wrapper.
///
/// Requires `viewport-aspect-ratio` and `width`. The width follows
/// [`placeholder_width`]; the height is the explicit `height` when set,
/// else `width * viewport-aspect-ratio`.
#[must_use]
pub fn wrap_size(options: &ResolvedOptions) -> Option<Size> {
    let aspect_ratio = options.set_number(names::VIEWPORT_ASPECT_RATIO)?;
    options.set_number(names::WIDTH)?;
    let width = placeholder_width(options)?;
    let height = options
        .set_number(names::HEIGHT)
        .unwrap_or(width * aspect_ratio);
    Some(Size::new(width, height))
}

/// Rounds to the nearest integer, with halves rounding toward +infinity.
#[must_use]
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{BooleanOrValue, OptionSource, OptionTable, OptionValue, resolve};
    use alloc::vec::Vec;

    struct Attrs(Vec<(&'static str, OptionValue)>);

    impl OptionSource for Attrs {
        fn raw(&self, name: &str) -> Option<OptionValue> {
            self.0
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, v)| v.clone())
        }
    }

    fn options(overrides: &[(&'static str, OptionValue)]) -> ResolvedOptions {
        let tier = Attrs(overrides.to_vec());
        resolve(
            OptionTable::PAGE_FRAMER,
            Some("a.html"),
            &BooleanOrValue,
            &[&tier],
        )
    }

    #[test]
    fn default_options_derive_scale_from_width() {
        let geometry = FrameGeometry::from_options(&options(&[])).unwrap();
        assert_eq!(geometry.width, 1000.0);
        assert_eq!(geometry.height, 1500.0);
        assert_eq!(geometry.scale, 0.2);
        assert_eq!(geometry.displayed_size(), Size::new(200.0, 300.0));
    }

    #[test]
    fn explicit_height_is_divided_by_scale() {
        let opts = options(&[(names::HEIGHT, OptionValue::Num(100.0))]);
        let geometry = FrameGeometry::from_options(&opts).unwrap();
        assert_eq!(geometry.height, 500.0);
    }

    #[test]
    fn explicit_scale_wins_over_derived() {
        let opts = options(&[(names::SCALE, OptionValue::Num(0.5))]);
        let geometry = FrameGeometry::from_options(&opts).unwrap();
        assert_eq!(geometry.scale, 0.5);
        assert_eq!(geometry.width, 1000.0);
        assert_eq!(placeholder_width(&opts), Some(500.0));
    }

    #[test]
    fn missing_input_yields_no_geometry() {
        let opts = options(&[(names::VIEWPORT_WIDTH, OptionValue::Bool(false))]);
        assert_eq!(FrameGeometry::from_options(&opts), None);
        let opts = options(&[(names::WIDTH, OptionValue::Bool(false))]);
        assert_eq!(FrameGeometry::from_options(&opts), None);
        assert_eq!(wrap_size(&opts), None);
    }

    #[test]
    fn wrap_size_uses_raw_height_when_given() {
        assert_eq!(wrap_size(&options(&[])), Some(Size::new(200.0, 300.0)));
        let opts = options(&[(names::HEIGHT, OptionValue::Num(120.0))]);
        assert_eq!(wrap_size(&opts), Some(Size::new(200.0, 120.0)));
    }

    #[test]
    fn annotation_rounds_for_display() {
        let geometry = FrameGeometry {
            width: 1000.0,
            height: 1500.0,
            scale: 0.2,
        };
        assert_eq!(geometry.annotation(), "1000&times;1500px @ 20% scale");

        let geometry = FrameGeometry {
            width: 999.5,
            height: 1234.4,
            scale: 1.0 / 3.0,
        };
        assert_eq!(geometry.annotation(), "1000&times;1234px @ 33.3% scale");
    }

    #[test]
    fn round_half_up_handles_halves_and_negatives() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(2.4), 2.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.6), -3.0);
        assert_eq!(round_half_up(0.0), 0.0);
        assert_eq!(round_half_up(1234.4), 1234.0);
        assert_eq!(round_half_up(1e300), 1e300, "already integral");
    }
}
