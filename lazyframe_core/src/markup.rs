// Copyright 2026 the Lazyframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placeholder and iframe markup.
//!
//! The placeholder replaces the original reference element wholesale. It
//! carries `data-esb-uuid` so the live node can be found again, and it wraps
//! an iframe that has only `data-src`: the real `src` is set when the
//! instance loads.
//!
//! The iframe markup is produced by its own function because unloading
//! swaps the iframe out for a fresh copy built from the same template.

use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt::Write as _;

use crate::frame::FrameKind;
use crate::geometry::{FrameGeometry, placeholder_width, wrap_size};
use crate::options::{ResolvedOptions, names};

/// Name of the attribute carrying the instance id on the placeholder.
pub const UUID_ATTRIBUTE: &str = "data-esb-uuid";

/// Name of the attribute carrying the deferred iframe source.
pub const DEFERRED_SRC_ATTRIBUTE: &str = "data-src";

/// Escapes a string for use inside a double-quoted attribute value.
#[must_use]
pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    if !value.contains(['"', '&', '<']) {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '"' => out.push_str("&quot;"),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Builds the not-yet-loaded iframe for `kind`.
#[must_use]
pub fn iframe_markup(kind: FrameKind, iframe_src: &str, options: &ResolvedOptions) -> String {
    let src = escape_attribute(iframe_src);
    match kind {
        FrameKind::PageViewer => {
            alloc::format!("<iframe {DEFERRED_SRC_ATTRIBUTE}=\"{src}\"></iframe>")
        }
        FrameKind::PageFramer => {
            let scrolling = options
                .get(names::SCROLLING)
                .map(alloc::string::ToString::to_string)
                .unwrap_or_default();
            let mut out = String::new();
            let _ = write!(
                out,
                "<iframe class=\"esb-page-framer-iframe\" {DEFERRED_SRC_ATTRIBUTE}=\"{src}\" scrolling=\"{}\"",
                escape_attribute(&scrolling),
            );
            if let Some(g) = FrameGeometry::from_options(options) {
                let _ = write!(
                    out,
                    " style=\"width:{}px; height:{}px; transform: scale({s}); -webkit-transform: scale({s});\"",
                    g.width,
                    g.height,
                    s = g.scale,
                );
            }
            out.push_str("></iframe>");
            out
        }
    }
}

/// Builds the full placeholder for `kind`.
///
/// `iframe` is the output of [`iframe_markup`], or `None` when the instance
/// has no resolvable source (the placeholder is then rendered without a
/// frame and the instance stays inert).
#[must_use]
pub fn placeholder_markup(
    kind: FrameKind,
    uuid: &str,
    options: &ResolvedOptions,
    iframe: Option<&str>,
) -> String {
    let uuid = escape_attribute(uuid);
    let iframe = iframe.unwrap_or_default();
    match kind {
        FrameKind::PageViewer => alloc::format!(
            "<div class=\"esb-page-viewer\" {UUID_ATTRIBUTE}=\"{uuid}\">{iframe}</div>"
        ),
        FrameKind::PageFramer => framer_placeholder(&uuid, options, iframe),
    }
}

fn framer_placeholder(uuid: &str, options: &ResolvedOptions, iframe: &str) -> String {
    let mut out = String::from("<div class=\"esb-page-framer");
    if options.flag(names::OVERLAY) {
        out.push_str(" esb-page-framer-has-overlay");
    }
    out.push('"');
    if let Some(width) = placeholder_width(options) {
        let _ = write!(out, " style=\"width:{width}px;\"");
    }
    let _ = write!(out, " {UUID_ATTRIBUTE}=\"{uuid}\">");

    let href = options.text(names::HREF);
    if let Some(href) = &href {
        let _ = write!(
            out,
            "<a class=\"esb-page-framer-link\" href=\"{}\">",
            escape_attribute(href)
        );
    }
    if let Some(title) = options.text(names::TITLE) {
        let _ = write!(out, "<h3 class=\"esb-page-framer-title\">{title}</h3>");
    }
    if let Some(caption) = options.text(names::CAPTION) {
        let _ = write!(out, "<p class=\"esb-page-framer-caption\">{caption}</p>");
    }
    if options.flag(names::DIMENSIONS)
        && let Some(geometry) = FrameGeometry::from_options(options)
    {
        let _ = write!(
            out,
            "<p class=\"esb-page-framer-dimensions-annotation\">{}</p>",
            geometry.annotation()
        );
    }

    out.push_str("<div class=\"esb-page-framer-iframe-wrap\"");
    if let Some(size) = wrap_size(options) {
        let _ = write!(
            out,
            " style=\"width:{}px; height:{}px;\"",
            size.width, size.height
        );
    }
    out.push('>');
    out.push_str("<div class=\"esb-loading-animation\"></div>");
    out.push_str(iframe);
    out.push_str("</div>");

    if href.is_some() {
        out.push_str("</a>");
    }
    out.push_str("</div>");
    out
}
