// Copyright 2026 the Lazyframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for lazyframe.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`WebDom`]: [`Dom`] over live `web_sys::Element`s
//! - [`WebFrame`]: one mounted instance, executing controller effects with
//!   DOM listeners, `setTimeout`, and the readiness promise
//! - [`Readiness`]: the host page's readiness signal
//! - [`JsonConfig`]: global configuration parsed with `serde_json`
//! - [`ConsoleSink`]: browser console logging
//!
//! [`mount_all`] mounts every reference element in a document;
//! [`mount_page_frames`] is the same entry point exported to JavaScript.

mod config;
mod console;
mod dom;
mod host;
mod readiness;
mod timer;

use std::cell::RefCell;
use std::rc::Rc;

pub use config::{JsonConfig, JsonSection};
pub use console::ConsoleSink;
pub use dom::WebDom;
pub use host::{SharedSink, WebFrame};
pub use lazyframe_core::backend::Dom;
pub use readiness::Readiness;

use js_sys::Promise;
use lazyframe_core::config::ConfigSource;
use lazyframe_core::frame::{FrameKind, InstanceId};
use lazyframe_core::time::Duration;
use lazyframe_core::trace::{Level, LogRecord};
use uuid::Uuid;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

/// Every instance mounted on a page.
///
/// Instances stay alive, and keep reacting to scrolling and signals, for as
/// long as this value does.
#[wasm_bindgen]
#[derive(Debug, Default)]
pub struct PageFrames {
    frames: Vec<WebFrame>,
}

#[wasm_bindgen]
impl PageFrames {
    /// Number of mounted instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` if nothing was mounted.
    #[wasm_bindgen(js_name = "isEmpty")]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Instance ids, in mounting order.
    #[must_use]
    pub fn uuids(&self) -> Vec<String> {
        self.frames
            .iter()
            .map(|frame| frame.uuid().as_str().to_owned())
            .collect()
    }
}

impl PageFrames {
    /// Mounted instances, in mounting order.
    #[must_use]
    pub fn frames(&self) -> &[WebFrame] {
        &self.frames
    }

    /// Looks up an instance by id.
    #[must_use]
    pub fn find(&self, uuid: &str) -> Option<&WebFrame> {
        self.frames
            .iter()
            .find(|frame| frame.uuid().as_str() == uuid)
    }
}

/// CSS selector matching every reference element of `kind`.
fn reference_selector(kind: FrameKind) -> String {
    format!("[{}]", kind.reference_attribute())
}

fn reference_elements(document: &Document, kind: FrameKind) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(&reference_selector(kind)) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Mounts every page-framer, then every page-viewer, in `dom`'s document.
///
/// Each element gets a fresh v4 UUID. An instance that fails to mount is
/// logged to `sink` and skipped; the rest are unaffected.
pub fn mount_all(
    dom: &WebDom,
    config: &dyn ConfigSource,
    readiness: &Readiness,
    sink: &SharedSink,
) -> PageFrames {
    let mut frames = Vec::new();
    for kind in FrameKind::ALL {
        for element in reference_elements(dom.document(), kind) {
            let uuid = InstanceId::new(Uuid::new_v4().to_string());
            match WebFrame::mount(
                kind,
                element,
                uuid.clone(),
                dom.clone(),
                config,
                readiness.clone(),
                Rc::clone(sink),
            ) {
                Ok(frame) => frames.push(frame),
                Err(err) => {
                    let message =
                        format!("{} {uuid} could not be mounted: {err}", kind.display_name());
                    sink.borrow_mut().on_log(&LogRecord {
                        level: Level::Error,
                        kind,
                        uuid: &uuid,
                        message: &message,
                    });
                }
            }
        }
    }
    PageFrames { frames }
}

/// Mounts every reference element in the current document.
///
/// `config_json` is the page's global configuration (an empty string means
/// none). `ready` is the host's readiness promise; without one, instances
/// treat the page as ready immediately. `timeout_ms` is the readiness
/// threshold. Logs go to the browser console.
#[wasm_bindgen(js_name = "mountPageFrames")]
pub fn mount_page_frames(
    config_json: &str,
    ready: Option<Promise>,
    timeout_ms: u32,
) -> Result<PageFrames, JsValue> {
    let dom = WebDom::current()
        .ok_or_else(|| JsValue::from_str("no browser document"))?;
    let config = if config_json.trim().is_empty() {
        JsonConfig::default()
    } else {
        JsonConfig::parse(config_json)
            .map_err(|err| JsValue::from_str(&err.to_string()))?
    };
    let readiness = match ready {
        Some(promise) => Readiness::new(promise, Duration::from_millis(u64::from(timeout_ms))),
        None => Readiness::resolved(),
    };
    let sink: SharedSink = Rc::new(RefCell::new(ConsoleSink::default()));
    Ok(mount_all(&dom, &config, &readiness, &sink))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_match_primary_reference_attributes() {
        assert_eq!(
            reference_selector(FrameKind::PageFramer),
            "[data-esb-page-framer]"
        );
        assert_eq!(
            reference_selector(FrameKind::PageViewer),
            "[data-esb-page-viewer]"
        );
    }

    #[test]
    fn empty_registry_finds_nothing() {
        let frames = PageFrames::default();
        assert!(frames.is_empty());
        assert!(frames.find("missing").is_none());
        assert!(frames.uuids().is_empty());
    }
}
