// Copyright 2026 the Lazyframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot `setTimeout` timers.
//!
//! Cool-down windows and the readiness timeout are plain one-shot timers.
//! Nothing cancels them: an expiry that arrives after its instance was
//! dropped finds no instance to upgrade to and does nothing.

use lazyframe_core::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

// Direct global bindings instead of `web_sys::Window` methods, so arming a
// timer never has to fetch (and unwrap) the Window object.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "setTimeout")]
    fn set_timeout(callback: &JsValue, delay: i32) -> i32;
}

/// Runs `callback` once after `delay`. Returns the browser's timer id.
pub(crate) fn after(delay: Duration, callback: impl FnOnce() + 'static) -> i32 {
    // `once_into_js` hands ownership to the JS side; the closure frees
    // itself after its single call.
    let callback = Closure::once_into_js(callback);
    set_timeout(&callback, delay.as_timeout_ms())
}
