// Copyright 2026 the Lazyframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for document integrations.
//!
//! Lazyframe splits document-specific work into *backend* crates. Core owns
//! option resolution, geometry, visibility, cool-down scheduling, and the
//! lifecycle state machine; a backend provides two things:
//!
//! - **Document access**: an implementation of [`Dom`] that reads attributes
//!   and geometry and performs the handful of mutations the lifecycle needs
//!   (outer-HTML replacement, attribute and class changes).
//!
//! - **Effect execution**: the controller returns
//!   [`Effects`](crate::frame::Effects) for everything asynchronous
//!   (attaching scroll/resize listeners, arming cool-down timers, waiting for
//!   the readiness signal, binding the iframe `load` handler). The backend
//!   performs them and feeds the resulting
//!   [`FrameEvent`](crate::frame::FrameEvent)s back into
//!   [`Frame::handle`](crate::frame::Frame::handle).
//!
//! # Event loop pseudocode
//!
//! ```rust,ignore
//! let mut frame = Frame::new(kind, element, uuid, &dom, &config, &BooleanOrValue, sink);
//! let effects = frame.inject_placeholder(&mut dom, sink)?;
//! execute(effects);
//!
//! // Later, from any listener, timer, or promise continuation:
//! fn on_event(event: FrameEvent) {
//!     let effects = frame.handle(&mut dom, sink, event);
//!     execute(effects);
//! }
//! ```

use alloc::string::String;
use core::fmt::Debug;

use kurbo::Rect;

/// Read and mutate access to the host document.
///
/// Node handles are cheap to clone and compare. A handle stays valid until
/// the node is replaced; the controller re-acquires handles after every
/// replacement rather than reusing stale ones.
pub trait Dom {
    /// Handle to an element node.
    type Node: Clone + PartialEq + Debug;

    /// Returns the attribute value, or `None` if the attribute is absent.
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    /// Sets an attribute, creating it if needed.
    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str);

    /// Returns the parent element, or `None` at the document root.
    fn parent_element(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Returns the node's tag name (e.g. `DIV`, `BODY`).
    fn node_name(&self, node: &Self::Node) -> String;

    /// Serializes the node including its own tag.
    fn outer_html(&self, node: &Self::Node) -> String;

    /// Replaces the node, in place, with the nodes parsed from `markup`.
    ///
    /// The old handle is dead afterwards.
    fn replace_with_markup(&mut self, node: &Self::Node, markup: &str);

    /// Finds the element carrying `data-esb-uuid="<uuid>"`.
    fn find_by_uuid(&self, uuid: &str) -> Option<Self::Node>;

    /// Finds the first `<iframe>` descendant of `within`.
    fn find_iframe(&self, within: &Self::Node) -> Option<Self::Node>;

    /// Adds a CSS class.
    fn add_class(&mut self, node: &Self::Node, class: &str);

    /// Removes a CSS class, if present.
    fn remove_class(&mut self, node: &Self::Node, class: &str);

    /// Returns `true` if the node currently has a layout box.
    ///
    /// A detached node, or one under a `display: none` ancestor, has none
    /// (in browsers: `offsetParent` is `null`).
    fn has_layout_box(&self, node: &Self::Node) -> bool;

    /// Returns the node's border box in viewport coordinates.
    fn bounding_rect(&self, node: &Self::Node) -> Rect;

    /// Returns the node's content height.
    fn scroll_height(&self, node: &Self::Node) -> f64;

    /// Returns the node's rendered height.
    fn offset_height(&self, node: &Self::Node) -> f64;

    /// Returns the current viewport height.
    fn viewport_height(&self) -> f64;
}
