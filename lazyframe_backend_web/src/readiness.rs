// Copyright 2026 the Lazyframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host page's readiness signal.

use std::cell::Cell;
use std::rc::Rc;

use js_sys::Promise;
use lazyframe_core::error::FrameError;
use lazyframe_core::time::Duration;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

use crate::timer;

type Done = Box<dyn FnOnce(Result<(), FrameError>)>;

/// A promise that settles once the host page finished initializing.
///
/// Automatic loads wait for it. Rejection counts as a timeout. When
/// `timeout` is non-zero the wait is also cut off locally after that long,
/// so a promise that never settles still produces a failure.
#[derive(Clone, Debug)]
pub struct Readiness {
    /// The host's readiness promise.
    pub promise: Promise,
    /// The host's timeout threshold, reported in failure messages.
    pub timeout: Duration,
}

impl Readiness {
    /// Wraps a promise and its timeout threshold.
    #[must_use]
    pub fn new(promise: Promise, timeout: Duration) -> Self {
        Self { promise, timeout }
    }

    /// A readiness signal that has already fired.
    #[must_use]
    pub fn resolved() -> Self {
        Self::new(Promise::resolve(&JsValue::UNDEFINED), Duration::ZERO)
    }

    /// Waits for the promise, calling `done` exactly once with the outcome.
    pub(crate) fn wait(&self, done: impl FnOnce(Result<(), FrameError>) + 'static) {
        let failure = FrameError::ReadinessTimedOut {
            timeout: self.timeout,
        };
        let done: Rc<Cell<Option<Done>>> = Rc::new(Cell::new(Some(Box::new(done))));
        // Whichever of the promise and the local timeout settles first wins.
        let finish = move |result: Result<(), FrameError>| {
            if let Some(done) = done.take() {
                done(result);
            }
        };

        if self.timeout != Duration::ZERO {
            let finish = finish.clone();
            timer::after(self.timeout, move || finish(Err(failure)));
        }
        let future = JsFuture::from(self.promise.clone());
        wasm_bindgen_futures::spawn_local(async move {
            let result = future.await.map(drop).map_err(|_| failure);
            finish(result);
        });
    }
}
