// Copyright 2026 the Lazyframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-visibility detection through nested scrollable containers.
//!
//! An instance is visible when it has a layout box and its bounding
//! rectangle overlaps, vertically, the *controlling* clip frame: the
//! scrollable ancestor with the smallest visible height. This is an
//! approximation of the true intersection of all ancestor clips. It can
//! report `true` when a taller, non-controlling ancestor is the one actually
//! clipping the element, and consumers may rely on that, so it is kept as is.
//!
//! The ancestor chain is captured once, right after the placeholder is
//! injected, by [`scrollable_ancestors`]. Later checks read current
//! geometry for that fixed list and never re-walk the tree.

use alloc::vec::Vec;

use kurbo::Rect;

use crate::backend::Dom;

/// One entry in an instance's scrollable-ancestor chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScrollAncestor<N> {
    /// A scroll-capable container element.
    Element(N),
    /// The root viewport (window/document). Always the last entry.
    Viewport,
}

/// The vertical window of one ancestor, in viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipFrame {
    /// Top edge.
    pub top: f64,
    /// Visible height.
    pub height: f64,
}

impl ClipFrame {
    /// Builds a frame from an element's bounding rectangle.
    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            top: rect.y0,
            height: rect.height(),
        }
    }

    /// The viewport frame: top at zero, `height` tall.
    #[must_use]
    pub fn viewport(height: f64) -> Self {
        Self { top: 0.0, height }
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Walks up from `element` and collects every scroll-capable ancestor,
/// closest first.
///
/// An ancestor is scroll-capable when its content height exceeds its
/// visible height. A scrollable `BODY` or `HTML` element stands for the
/// viewport. The result always ends with exactly one
/// [`ScrollAncestor::Viewport`] entry, so it is never empty.
pub fn scrollable_ancestors<D: Dom>(dom: &D, element: &D::Node) -> Vec<ScrollAncestor<D::Node>> {
    let mut ancestors = Vec::new();
    let mut current = dom.parent_element(element);
    while let Some(node) = current {
        let is_root = {
            let name = dom.node_name(&node);
            name.eq_ignore_ascii_case("BODY") || name.eq_ignore_ascii_case("HTML")
        };
        if !is_root && dom.scroll_height(&node) > dom.offset_height(&node) {
            ancestors.push(ScrollAncestor::Element(node.clone()));
        }
        current = dom.parent_element(&node);
    }
    ancestors.push(ScrollAncestor::Viewport);
    ancestors
}

/// Picks the frame with the smallest height; the first one wins ties.
#[must_use]
pub fn controlling_frame(frames: impl IntoIterator<Item = ClipFrame>) -> Option<ClipFrame> {
    frames.into_iter().fold(None, |best, frame| match best {
        Some(b) if b.height <= frame.height => Some(b),
        _ => Some(frame),
    })
}

/// Returns `true` if `element` vertically overlaps `frame`.
///
/// Touching edges do not count: an element whose top is exactly at the
/// frame's bottom, or whose bottom is exactly at the frame's top, is outside.
#[must_use]
pub fn overlaps(element: Rect, frame: ClipFrame) -> bool {
    !(element.y0 >= frame.bottom() || element.y1 <= frame.top)
}

/// Decides whether `element` is currently visible.
///
/// Pure: reads current geometry through `dom` and mutates nothing.
pub fn is_visible<D: Dom>(
    dom: &D,
    element: &D::Node,
    ancestors: &[ScrollAncestor<D::Node>],
) -> bool {
    if !dom.has_layout_box(element) {
        return false;
    }
    let frames = ancestors.iter().map(|ancestor| match ancestor {
        ScrollAncestor::Element(node) => ClipFrame::from_rect(dom.bounding_rect(node)),
        ScrollAncestor::Viewport => ClipFrame::viewport(dom.viewport_height()),
    });
    match controlling_frame(frames) {
        Some(frame) => overlaps(dom.bounding_rect(element), frame),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_dom::TestDom;

    fn clip(top: f64, height: f64) -> ClipFrame {
        ClipFrame { top, height }
    }

    #[test]
    fn controlling_frame_is_smallest() {
        let frames = [
            clip(50.0, 300.0),
            clip(0.0, 200.0),
            ClipFrame::viewport(800.0),
        ];
        assert_eq!(controlling_frame(frames), Some(frames[1]));
        assert_eq!(controlling_frame(core::iter::empty()), None);
    }

    #[test]
    fn ties_keep_the_closest_ancestor() {
        let near = clip(10.0, 100.0);
        let far = clip(500.0, 100.0);
        assert_eq!(controlling_frame([near, far]), Some(near));
    }

    #[test]
    fn overlap_edges_are_exclusive() {
        let frame = clip(100.0, 100.0);
        assert!(overlaps(Rect::new(0.0, 150.0, 10.0, 250.0), frame));
        assert!(
            !overlaps(Rect::new(0.0, 200.0, 10.0, 300.0), frame),
            "top at bottom edge"
        );
        assert!(
            !overlaps(Rect::new(0.0, 0.0, 10.0, 100.0), frame),
            "bottom at top edge"
        );
        assert!(overlaps(Rect::new(0.0, 0.0, 10.0, 101.0), frame));
    }

    #[test]
    fn ancestors_end_with_single_viewport() {
        let mut dom = TestDom::new();
        let body = dom.add_element(dom.root(), "body");
        dom.set_scroll_metrics(body, 5000.0, 800.0);
        let wrapper = dom.add_element(body, "div");
        dom.set_scroll_metrics(wrapper, 1000.0, 200.0);
        let plain = dom.add_element(wrapper, "div");
        let leaf = dom.add_element(plain, "div");

        let ancestors = scrollable_ancestors(&dom, &leaf);
        assert_eq!(
            ancestors,
            [ScrollAncestor::Element(wrapper), ScrollAncestor::Viewport]
        );
    }

    #[test]
    fn unscrollable_page_falls_back_to_viewport() {
        let mut dom = TestDom::new();
        let body = dom.add_element(dom.root(), "body");
        let leaf = dom.add_element(body, "div");
        assert_eq!(
            scrollable_ancestors(&dom, &leaf),
            [ScrollAncestor::Viewport]
        );
    }

    #[test]
    fn no_layout_box_is_never_visible() {
        let mut dom = TestDom::new();
        let body = dom.add_element(dom.root(), "body");
        let hidden = dom.add_element(body, "div");
        let leaf = dom.add_element(hidden, "div");
        dom.set_rect(leaf, Rect::new(0.0, 0.0, 100.0, 100.0));
        let ancestors = scrollable_ancestors(&dom, &leaf);

        dom.set_display_none(hidden, true);
        assert!(!is_visible(&dom, &leaf, &ancestors));
        dom.set_display_none(hidden, false);
        assert!(is_visible(&dom, &leaf, &ancestors));
    }

    #[test]
    fn element_below_smallest_ancestor_is_hidden() {
        let mut dom = TestDom::new();
        dom.set_viewport_height(800.0);
        let body = dom.add_element(dom.root(), "body");
        let wrapper = dom.add_element(body, "div");
        dom.set_scroll_metrics(wrapper, 2000.0, 200.0);
        dom.set_rect(wrapper, Rect::new(0.0, 100.0, 500.0, 300.0));
        let leaf = dom.add_element(wrapper, "div");
        dom.set_rect(leaf, Rect::new(0.0, 400.0, 200.0, 700.0));
        let ancestors = scrollable_ancestors(&dom, &leaf);

        assert!(!is_visible(&dom, &leaf, &ancestors), "below wrapper window");

        dom.set_rect(leaf, Rect::new(0.0, 250.0, 200.0, 550.0));
        assert!(is_visible(&dom, &leaf, &ancestors), "scrolled into wrapper");
    }
}
