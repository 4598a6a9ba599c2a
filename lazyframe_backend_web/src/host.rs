// Copyright 2026 the Lazyframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One mounted instance: a [`Frame`] plus the browser callbacks driving it.
//!
//! [`WebFrame`] executes the controller's [`Effects`] against the live
//! document and turns DOM events, timers, and the readiness promise back
//! into [`FrameEvent`]s. Every callback holds only a weak reference to the
//! instance, so dropping the `WebFrame` detaches everything.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use lazyframe_core::config::ConfigSource;
use lazyframe_core::error::FrameError;
use lazyframe_core::frame::{
    Effect, Effects, Frame, FrameEvent, FrameKind, FrameState, InstanceId, Signal,
};
use lazyframe_core::monitor::MonitorEvent;
use lazyframe_core::options::BooleanOrValue;
use lazyframe_core::trace::TraceSink;
use lazyframe_core::visibility::ScrollAncestor;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, Event, EventTarget};

use crate::dom::WebDom;
use crate::readiness::Readiness;
use crate::timer;

/// A [`TraceSink`] shared by every instance on a page.
pub type SharedSink = Rc<RefCell<dyn TraceSink>>;

type Handler = Closure<dyn FnMut(Event)>;

/// An attached event listener. Detaching consumes it and frees the closure.
struct Binding {
    target: EventTarget,
    name: String,
    handler: Handler,
}

impl Binding {
    fn attach(target: EventTarget, name: impl Into<String>, handler: Handler) -> Self {
        let name = name.into();
        let _ = target.add_event_listener_with_callback(&name, handler.as_ref().unchecked_ref());
        Self {
            target,
            name,
            handler,
        }
    }

    fn detach(self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(&self.name, self.handler.as_ref().unchecked_ref());
    }
}

struct FrameInner {
    frame: RefCell<Frame<WebDom>>,
    dom: RefCell<WebDom>,
    sink: SharedSink,
    readiness: Readiness,

    /// Events raised while a dispatch is running wait here.
    queue: RefCell<VecDeque<FrameEvent>>,
    dispatching: Cell<bool>,

    monitors: RefCell<Vec<(usize, MonitorEvent, Binding)>>,
    signals: RefCell<Vec<Binding>>,
    load: RefCell<Option<Binding>>,
}

impl FrameInner {
    fn dispatch(self: &Rc<Self>, event: FrameEvent) {
        self.queue.borrow_mut().push_back(event);
        if self.dispatching.replace(true) {
            return;
        }
        loop {
            let Some(event) = self.queue.borrow_mut().pop_front() else {
                break;
            };
            let effects = {
                let mut frame = self.frame.borrow_mut();
                let mut dom = self.dom.borrow_mut();
                let mut sink = self.sink.borrow_mut();
                frame.handle(&mut dom, &mut *sink, event)
            };
            self.execute(effects);
        }
        self.dispatching.set(false);
    }

    fn execute(self: &Rc<Self>, effects: Effects) {
        for effect in effects {
            match effect {
                Effect::Listen { ancestor, event } => self.listen(ancestor, event),
                Effect::Unlisten { ancestor, event } => self.unlisten(ancestor, event),
                Effect::ScheduleCooldown(cooldown) => {
                    let weak = Rc::downgrade(self);
                    timer::after(cooldown.delay, move || {
                        if let Some(inner) = weak.upgrade() {
                            inner.dispatch(FrameEvent::CooldownExpired {
                                event: cooldown.event,
                                token: cooldown.token,
                            });
                        }
                    });
                }
                Effect::WatchSignals { load, unload } => self.watch_signals(load, unload),
                Effect::BindLoadHandler => self.bind_load_handler(),
                Effect::AwaitReady => {
                    let weak = Rc::downgrade(self);
                    self.readiness.wait(move |result| {
                        if let Some(inner) = weak.upgrade() {
                            inner.dispatch(match result {
                                Ok(()) => FrameEvent::Ready,
                                Err(err) => FrameEvent::ReadyFailed(err),
                            });
                        }
                    });
                }
            }
        }
    }

    fn handler(self: &Rc<Self>, event: FrameEvent) -> Handler {
        let weak = Rc::downgrade(self);
        Closure::wrap(Box::new(move |_: Event| {
            if let Some(inner) = weak.upgrade() {
                inner.dispatch(event.clone());
            }
        }) as Box<dyn FnMut(Event)>)
    }

    /// Event target for an ancestor index: the element itself, or the window
    /// for the viewport.
    fn target(&self, ancestor: usize) -> Option<EventTarget> {
        let frame = self.frame.borrow();
        Some(match frame.ancestors().get(ancestor)? {
            ScrollAncestor::Element(el) => EventTarget::from(el.clone()),
            ScrollAncestor::Viewport => EventTarget::from(self.dom.borrow().window().clone()),
        })
    }

    fn listen(self: &Rc<Self>, ancestor: usize, event: MonitorEvent) {
        let Some(target) = self.target(ancestor) else {
            return;
        };
        let binding = Binding::attach(
            target,
            event.name(),
            self.handler(FrameEvent::Monitor(event)),
        );
        self.monitors.borrow_mut().push((ancestor, event, binding));
    }

    fn unlisten(&self, ancestor: usize, event: MonitorEvent) {
        let mut monitors = self.monitors.borrow_mut();
        if let Some(i) = monitors
            .iter()
            .position(|(a, e, _)| *a == ancestor && *e == event)
        {
            monitors.swap_remove(i).2.detach();
        }
    }

    fn watch_signals(self: &Rc<Self>, load: String, unload: String) {
        let document = EventTarget::from(self.dom.borrow().document().clone());
        let mut signals = self.signals.borrow_mut();
        for (name, signal) in [(load, Signal::Load), (unload, Signal::Unload)] {
            let handler = self.handler(FrameEvent::Signal(signal));
            signals.push(Binding::attach(document.clone(), name, handler));
        }
    }

    /// (Re)binds `load` on the current iframe node.
    fn bind_load_handler(self: &Rc<Self>) {
        let Some(iframe) = self.frame.borrow().iframe().cloned() else {
            return;
        };
        let binding = Binding::attach(
            iframe.into(),
            "load",
            self.handler(FrameEvent::IframeLoaded),
        );
        if let Some(old) = self.load.replace(Some(binding)) {
            old.detach();
        }
    }
}

impl Drop for FrameInner {
    fn drop(&mut self) {
        // JS must never call into a freed closure.
        for (_, _, binding) in self.monitors.get_mut().drain(..) {
            binding.detach();
        }
        for binding in self.signals.get_mut().drain(..) {
            binding.detach();
        }
        if let Some(binding) = self.load.get_mut().take() {
            binding.detach();
        }
    }
}

/// A mounted instance.
///
/// Created by [`WebFrame::mount`], usually through
/// [`mount_all`](crate::mount_all). The instance lives as long as this value;
/// dropping it removes every listener it attached.
pub struct WebFrame {
    inner: Rc<FrameInner>,
}

impl WebFrame {
    /// Builds the instance for `element`, injects its placeholder, and
    /// starts executing effects.
    pub fn mount(
        kind: FrameKind,
        element: Element,
        uuid: InstanceId,
        mut dom: WebDom,
        config: &dyn ConfigSource,
        readiness: Readiness,
        sink: SharedSink,
    ) -> Result<Self, FrameError> {
        let (frame, effects) = {
            let mut log = sink.borrow_mut();
            let mut frame = Frame::new(
                kind,
                element,
                uuid,
                &dom,
                config,
                &BooleanOrValue,
                &mut *log,
            );
            let effects = frame.inject_placeholder(&mut dom, &mut *log)?;
            (frame, effects)
        };
        let inner = Rc::new(FrameInner {
            frame: RefCell::new(frame),
            dom: RefCell::new(dom),
            sink,
            readiness,
            queue: RefCell::new(VecDeque::new()),
            dispatching: Cell::new(false),
            monitors: RefCell::new(Vec::new()),
            signals: RefCell::new(Vec::new()),
            load: RefCell::new(None),
        });
        inner.execute(effects);
        Ok(Self { inner })
    }

    /// Feeds an event, as if it came from the document.
    pub fn dispatch(&self, event: FrameEvent) {
        self.inner.dispatch(event);
    }

    /// Forces a load, ignoring visibility and readiness.
    pub fn load(&self) {
        self.dispatch(FrameEvent::Signal(Signal::Load));
    }

    /// Forces an unload.
    pub fn unload(&self) {
        self.dispatch(FrameEvent::Signal(Signal::Unload));
    }

    /// Component kind.
    #[must_use]
    pub fn kind(&self) -> FrameKind {
        self.inner.frame.borrow().kind()
    }

    /// Instance id.
    #[must_use]
    pub fn uuid(&self) -> InstanceId {
        self.inner.frame.borrow().uuid().clone()
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> FrameState {
        self.inner.frame.borrow().state()
    }
}

impl core::fmt::Debug for WebFrame {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let frame = self.inner.frame.borrow();
        f.debug_struct("WebFrame")
            .field("kind", &frame.kind())
            .field("uuid", frame.uuid())
            .field("state", &frame.state())
            .field("listeners", &self.inner.monitors.borrow().len())
            .finish_non_exhaustive()
    }
}
