// Copyright 2026 the Lazyframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Live document access.
//!
//! Implements [`Dom`] for `web_sys::Element` handles. Mutations that the
//! browser can reject (attribute names, class tokens) are best-effort: a
//! rejected write is dropped, as there is nothing the lifecycle could do
//! about it.

use kurbo::Rect;
use lazyframe_core::backend::Dom;
use lazyframe_core::markup::UUID_ATTRIBUTE;
use wasm_bindgen::JsCast as _;
use web_sys::{Document, Element, HtmlElement, Window};

/// [`Dom`] over the browser's document.
#[derive(Clone)]
pub struct WebDom {
    window: Window,
    document: Document,
}

impl core::fmt::Debug for WebDom {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WebDom")
            .field("window", &"Window")
            .field("document", &"Document")
            .finish()
    }
}

impl WebDom {
    /// Wraps an explicit window/document pair.
    #[must_use]
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    /// The global window and its document, if running in a browser page.
    #[must_use]
    pub fn current() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self::new(window, document))
    }

    /// The window, used as the viewport scroll/resize target.
    #[must_use]
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// The document, used as the signal event target.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl Dom for WebDom {
    type Node = Element;

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&mut self, node: &Element, name: &str, value: &str) {
        let _ = node.set_attribute(name, value);
    }

    fn parent_element(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn node_name(&self, node: &Element) -> String {
        node.node_name()
    }

    fn outer_html(&self, node: &Element) -> String {
        node.outer_html()
    }

    fn replace_with_markup(&mut self, node: &Element, markup: &str) {
        node.set_outer_html(markup);
    }

    fn find_by_uuid(&self, uuid: &str) -> Option<Element> {
        let selector = format!("*[{UUID_ATTRIBUTE}=\"{uuid}\"]");
        self.document.query_selector(&selector).ok().flatten()
    }

    fn find_iframe(&self, within: &Element) -> Option<Element> {
        within.query_selector("iframe").ok().flatten()
    }

    fn add_class(&mut self, node: &Element, class: &str) {
        let _ = node.class_list().add_1(class);
    }

    fn remove_class(&mut self, node: &Element, class: &str) {
        let _ = node.class_list().remove_1(class);
    }

    fn has_layout_box(&self, node: &Element) -> bool {
        node.dyn_ref::<HtmlElement>()
            .is_some_and(|el| el.offset_parent().is_some())
    }

    fn bounding_rect(&self, node: &Element) -> Rect {
        let r = node.get_bounding_client_rect();
        Rect::new(r.left(), r.top(), r.right(), r.bottom())
    }

    fn scroll_height(&self, node: &Element) -> f64 {
        f64::from(node.scroll_height())
    }

    fn offset_height(&self, node: &Element) -> f64 {
        node.dyn_ref::<HtmlElement>()
            .map_or(0.0, |el| f64::from(el.offset_height()))
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0)
    }
}
