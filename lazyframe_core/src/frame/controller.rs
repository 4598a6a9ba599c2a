// Copyright 2026 the Lazyframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-instance lifecycle controller.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use super::{Effect, Effects, FrameEvent, FrameKind, FrameState, IframeSource, InstanceId, Signal};
use crate::backend::Dom;
use crate::config::{ConfigSource, SOURCE_KEY, SectionTier};
use crate::error::FrameError;
use crate::markup::{self, DEFERRED_SRC_ATTRIBUTE};
use crate::monitor::{Monitor, MonitorEvent};
use crate::options::{self, OptionSource, OptionValue, ResolvedOptions, ValueNormalizer, names};
use crate::trace::{
    Level, LogRecord, RecheckCause, RecheckEvent, RecheckOutcome, TraceSink, TransitionEvent,
};
use crate::visibility::{self, ScrollAncestor};

/// Option attributes read off one element, e.g. `data-esb-width`.
struct ElementTier<'a, D: Dom> {
    dom: &'a D,
    node: &'a D::Node,
    prefix: &'static str,
}

impl<D: Dom> OptionSource for ElementTier<'_, D> {
    fn raw(&self, name: &str) -> Option<OptionValue> {
        self.dom
            .attribute(self.node, &format!("{}{name}", self.prefix))
            .map(OptionValue::Str)
    }
}

/// Closest ancestor of `element` carrying `marker`.
fn page_config_element<D: Dom>(dom: &D, element: &D::Node, marker: &str) -> Option<D::Node> {
    let mut current = dom.parent_element(element);
    while let Some(node) = current {
        if dom.attribute(&node, marker).is_some() {
            return Some(node);
        }
        current = dom.parent_element(&node);
    }
    None
}

fn emit_log(
    sink: &mut dyn TraceSink,
    level: Level,
    kind: FrameKind,
    uuid: &InstanceId,
    message: &str,
) {
    sink.on_log(&LogRecord {
        level,
        kind,
        uuid,
        message,
    });
}

/// One lazily loaded frame instance.
///
/// A `Frame` is built from the original reference element, replaces it with
/// a placeholder, and from then on is driven by [`FrameEvent`]s. Everything
/// asynchronous is returned to the caller as [`Effects`]; see the
/// [`backend`](crate::backend) module for the loop.
///
/// The controller only ever touches nodes inside its own placeholder. Node
/// handles are re-acquired after every replacement.
pub struct Frame<D: Dom> {
    kind: FrameKind,
    uuid: InstanceId,
    original: D::Node,
    original_markup: String,
    options: ResolvedOptions,
    source: IframeSource,
    placeholder: String,
    state: FrameState,
    ancestors: Vec<ScrollAncestor<D::Node>>,
    viewer: Option<D::Node>,
    iframe: Option<D::Node>,
    loaded: bool,
    ready: bool,
    monitor: Monitor,
}

impl<D: Dom> fmt::Debug for Frame<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("kind", &self.kind)
            .field("uuid", &self.uuid)
            .field("state", &self.state)
            .field("source", &self.source)
            .field("ancestors", &self.ancestors.len())
            .field("loaded", &self.loaded)
            .field("ready", &self.ready)
            .finish_non_exhaustive()
    }
}

impl<D: Dom> Frame<D> {
    /// Builds an instance for `original` without touching the document.
    ///
    /// Resolves the iframe source and every option (hard default, then the
    /// configuration section, then the closest page-level config element,
    /// then `original`'s own attributes) and renders the placeholder. An
    /// instance without a usable reference logs an error and stays inert.
    pub fn new(
        kind: FrameKind,
        original: D::Node,
        uuid: InstanceId,
        dom: &D,
        config: &dyn ConfigSource,
        normalizer: &dyn ValueNormalizer,
        sink: &mut dyn TraceSink,
    ) -> Self {
        let section = config.section(kind.config_section());
        let configured_base = section
            .and_then(|s| s.get(SOURCE_KEY))
            .map(|v| v.to_string());
        let reference = dom.attribute(&original, kind.reference_attribute());
        let explicit_base = dom.attribute(&original, kind.source_attribute());
        let source = IframeSource::resolve(
            reference.as_deref(),
            explicit_base.as_deref(),
            configured_base.as_deref(),
        );
        match &source {
            IframeSource::Qualified(src) => emit_log(
                sink,
                Level::Info,
                kind,
                &uuid,
                &format!(
                    "Fully qualified url found for page viewer: {src}, {} uuid: {uuid}",
                    kind.component()
                ),
            ),
            IframeSource::Missing => emit_log(
                sink,
                Level::Error,
                kind,
                &uuid,
                &format!(
                    "{} cannot create placeholder iframe because no iframe src is set.",
                    kind.display_name()
                ),
            ),
            IframeSource::Relative(_) => {}
        }

        let page = page_config_element(dom, &original, kind.page_config_marker());
        let global_tier = section.map(SectionTier);
        let page_tier = page.as_ref().map(|node| ElementTier {
            dom,
            node,
            prefix: kind.option_prefix(),
        });
        let element_tier = ElementTier {
            dom,
            node: &original,
            prefix: kind.option_prefix(),
        };
        let mut tiers: Vec<&dyn OptionSource> = Vec::with_capacity(3);
        if let Some(tier) = &global_tier {
            tiers.push(tier);
        }
        if let Some(tier) = &page_tier {
            tiers.push(tier);
        }
        tiers.push(&element_tier);
        let options = options::resolve(kind.option_table(), source.as_str(), normalizer, &tiers);

        let iframe = source
            .as_str()
            .map(|src| markup::iframe_markup(kind, src, &options));
        let placeholder =
            markup::placeholder_markup(kind, uuid.as_str(), &options, iframe.as_deref());
        let original_markup = dom.outer_html(&original);

        Self {
            kind,
            uuid,
            original,
            original_markup,
            options,
            source,
            placeholder,
            state: FrameState::Constructed,
            ancestors: Vec::new(),
            viewer: None,
            iframe: None,
            loaded: false,
            ready: false,
            monitor: Monitor::new(kind.monitor_config()),
        }
    }

    /// Component kind.
    #[must_use]
    pub fn kind(&self) -> FrameKind {
        self.kind
    }

    /// Instance id.
    #[must_use]
    pub fn uuid(&self) -> &InstanceId {
        &self.uuid
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> FrameState {
        self.state
    }

    /// Resolved options.
    #[must_use]
    pub fn options(&self) -> &ResolvedOptions {
        &self.options
    }

    /// The resolved iframe source, or `None` for an inert instance.
    #[must_use]
    pub fn iframe_src(&self) -> Option<&str> {
        self.source.as_str()
    }

    /// The placeholder markup that replaces the original element.
    #[must_use]
    pub fn placeholder_markup(&self) -> &str {
        &self.placeholder
    }

    /// Outer HTML of the original element, captured at construction.
    #[must_use]
    pub fn original_markup(&self) -> &str {
        &self.original_markup
    }

    /// Scrollable ancestors captured at injection, closest first, ending
    /// with the viewport. Empty before injection.
    #[must_use]
    pub fn ancestors(&self) -> &[ScrollAncestor<D::Node>] {
        &self.ancestors
    }

    /// Live placeholder node.
    #[must_use]
    pub fn viewer(&self) -> Option<&D::Node> {
        self.viewer.as_ref()
    }

    /// Live iframe node.
    #[must_use]
    pub fn iframe(&self) -> Option<&D::Node> {
        self.iframe.as_ref()
    }

    /// Returns `true` once the iframe fired its native `load` event, until
    /// the next unload.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Returns `true` once the readiness signal resolved.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Returns `true` if the instance has no iframe to manage.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.state != FrameState::Constructed && self.iframe.is_none()
    }

    /// Scroll/resize gate state.
    #[must_use]
    pub fn monitor(&self) -> &Monitor {
        &self.monitor
    }

    fn loads_immediately(&self) -> bool {
        self.options.get(names::LOAD_IMMEDIATELY) == Some(&OptionValue::Bool(true))
    }

    fn unloads_when_hidden(&self) -> bool {
        self.options.flag(names::UNLOAD_WHEN_NOT_VISIBLE)
    }

    fn log(&self, sink: &mut dyn TraceSink, level: Level, message: &str) {
        emit_log(sink, level, self.kind, &self.uuid, message);
    }

    fn transition(&mut self, to: FrameState, sink: &mut dyn TraceSink) {
        let from = core::mem::replace(&mut self.state, to);
        if from != to {
            sink.on_transition(&TransitionEvent {
                kind: self.kind,
                uuid: &self.uuid,
                from,
                to,
            });
        }
    }

    fn listener_effects(&self, attach: bool) -> Effects {
        let mut effects = Effects::new();
        for ancestor in 0..self.ancestors.len() {
            for event in MonitorEvent::ALL {
                effects.push(if attach {
                    Effect::Listen { ancestor, event }
                } else {
                    Effect::Unlisten { ancestor, event }
                });
            }
        }
        effects
    }

    fn handle_error(&self) -> FrameError {
        if self.state == FrameState::Constructed {
            FrameError::NotInjected
        } else {
            FrameError::NoIframeSource
        }
    }

    /// Replaces the original element with the placeholder.
    ///
    /// One-shot. Re-acquires the placeholder and iframe nodes, captures the
    /// scrollable ancestors, and returns the effects that start monitoring,
    /// signal handling, and load tracking. With `load-immediately` the load
    /// starts here; otherwise the returned effects wait for readiness. An
    /// inert instance gets its placeholder and no effects.
    pub fn inject_placeholder(
        &mut self,
        dom: &mut D,
        sink: &mut dyn TraceSink,
    ) -> Result<Effects, FrameError> {
        if self.state != FrameState::Constructed {
            return Err(FrameError::AlreadyInjected(self.state));
        }
        dom.replace_with_markup(&self.original, &self.placeholder);
        self.transition(FrameState::PlaceholderInjected, sink);

        let viewer = dom
            .find_by_uuid(self.uuid.as_str())
            .ok_or(FrameError::PlaceholderNotFound)?;
        self.ancestors = visibility::scrollable_ancestors(dom, &viewer);
        self.iframe = dom.find_iframe(&viewer);
        self.viewer = Some(viewer);
        if self.iframe.is_none() {
            return Ok(Effects::new());
        }

        let mut effects = self.listener_effects(true);
        effects.push(Effect::WatchSignals {
            load: Signal::Load.event_name(self.kind, &self.uuid),
            unload: Signal::Unload.event_name(self.kind, &self.uuid),
        });
        effects.push(Effect::BindLoadHandler);
        if self.loads_immediately() {
            self.load_iframe(dom, sink)?;
        } else {
            effects.push(Effect::AwaitReady);
        }
        Ok(effects)
    }

    /// Copies `data-src` into `src`, starting the fetch.
    ///
    /// Returns `Ok(false)` without touching anything if the iframe already
    /// has a `src`, so repeated loads are harmless.
    pub fn load_iframe(
        &mut self,
        dom: &mut D,
        sink: &mut dyn TraceSink,
    ) -> Result<bool, FrameError> {
        let (Some(viewer), Some(iframe)) = (&self.viewer, &self.iframe) else {
            return Err(self.handle_error());
        };
        if dom.attribute(iframe, "src").is_some() {
            return Ok(false);
        }
        let src = dom
            .attribute(iframe, DEFERRED_SRC_ATTRIBUTE)
            .unwrap_or_default();
        if let Some(class) = FrameState::Loading.css_class(self.kind) {
            dom.add_class(viewer, &class);
        }
        dom.set_attribute(iframe, "src", &src);
        let message = format!("{} {}: loading {src}", self.kind.display_name(), self.uuid);
        self.log(sink, Level::Debug, &message);
        self.transition(FrameState::Loading, sink);
        Ok(true)
    }

    /// Rebuilds the iframe without `src`, returning to a loadable state.
    ///
    /// The old iframe node is discarded (the browser aborts its fetch) and
    /// a fresh one is rendered from the same template. State markers are
    /// cleared and monitoring resumes if it had stopped. Does nothing unless
    /// the instance is loading or loaded.
    pub fn unload_iframe(
        &mut self,
        dom: &mut D,
        sink: &mut dyn TraceSink,
    ) -> Result<Effects, FrameError> {
        let (Some(viewer), Some(iframe)) = (self.viewer.clone(), self.iframe.clone()) else {
            return Err(self.handle_error());
        };
        if !self.state.has_source() {
            return Ok(Effects::new());
        }
        let src = self.source.as_str().ok_or(FrameError::NoIframeSource)?;
        let fresh = markup::iframe_markup(self.kind, src, &self.options);
        dom.replace_with_markup(&iframe, &fresh);
        self.iframe = dom.find_iframe(&viewer);
        for state in [FrameState::Loading, FrameState::Loaded] {
            if let Some(class) = state.css_class(self.kind) {
                dom.remove_class(&viewer, &class);
            }
        }
        self.loaded = false;
        self.transition(FrameState::Unloaded, sink);

        let mut effects = Effects::new();
        if self.iframe.is_some() {
            effects.push(Effect::BindLoadHandler);
        }
        if self.monitor.attach() {
            effects.append(self.listener_effects(true));
        }
        Ok(effects)
    }

    /// Returns `true` if the placeholder is currently visible.
    ///
    /// Always `false` before injection.
    #[must_use]
    pub fn is_visible(&self, dom: &D) -> bool {
        self.viewer
            .as_ref()
            .is_some_and(|v| visibility::is_visible(dom, v, &self.ancestors))
    }

    /// Advances the instance in response to `event`.
    ///
    /// Events arriving before injection are ignored. Failures are logged to
    /// `sink` and never escape: one instance cannot disturb another.
    pub fn handle(&mut self, dom: &mut D, sink: &mut dyn TraceSink, event: FrameEvent) -> Effects {
        if self.state == FrameState::Constructed {
            return Effects::new();
        }
        match event {
            FrameEvent::Ready => {
                self.ready = true;
                self.recheck(dom, sink, RecheckCause::Ready)
            }
            FrameEvent::ReadyFailed(err) => {
                let message = match err {
                    FrameError::ReadinessTimedOut { timeout } => format!(
                        "{} {} could not be loaded because Blocks Done did not fire within the \
                         Blocks Done Timeout Threshold of: {timeout}",
                        self.kind.display_name(),
                        self.uuid,
                    ),
                    other => format!(
                        "{} {} could not be loaded: {other}",
                        self.kind.display_name(),
                        self.uuid
                    ),
                };
                self.log(sink, Level::Error, &message);
                Effects::new()
            }
            FrameEvent::Monitor(event) => match self.monitor.on_event(event) {
                Some(cooldown) => {
                    let cause = match event {
                        MonitorEvent::Scroll => RecheckCause::Scroll,
                        MonitorEvent::Resize => RecheckCause::Resize,
                    };
                    let mut effects = self.recheck(dom, sink, cause);
                    effects.push(Effect::ScheduleCooldown(cooldown));
                    effects
                }
                None => Effects::new(),
            },
            FrameEvent::CooldownExpired { event, token } => {
                if !self.monitor.on_expired(event, token) {
                    return Effects::new();
                }
                let cause = match event {
                    MonitorEvent::Scroll => RecheckCause::ScrollCooldownExpired,
                    MonitorEvent::Resize => RecheckCause::ResizeCooldownExpired,
                };
                self.recheck(dom, sink, cause)
            }
            FrameEvent::IframeLoaded => self.on_iframe_loaded(dom, sink),
            FrameEvent::Signal(Signal::Load) => {
                if let Err(err) = self.load_iframe(dom, sink) {
                    self.log(sink, Level::Error, &format!("load signal ignored: {err}"));
                }
                Effects::new()
            }
            FrameEvent::Signal(Signal::Unload) => match self.unload_iframe(dom, sink) {
                Ok(effects) => effects,
                Err(err) => {
                    self.log(sink, Level::Error, &format!("unload signal ignored: {err}"));
                    Effects::new()
                }
            },
        }
    }

    /// Loads when visible and not loaded, or unloads when hidden, loaded,
    /// and `unload-when-not-visible` is set.
    fn recheck(&mut self, dom: &mut D, sink: &mut dyn TraceSink, cause: RecheckCause) -> Effects {
        let visible = self.is_visible(dom);
        let mut effects = Effects::new();
        let outcome = if !self.loaded {
            let may_load = self.ready || self.loads_immediately();
            if visible && may_load && matches!(self.load_iframe(dom, sink), Ok(true)) {
                RecheckOutcome::Loaded
            } else {
                RecheckOutcome::Unchanged
            }
        } else if !visible && self.unloads_when_hidden() {
            match self.unload_iframe(dom, sink) {
                Ok(unload) => {
                    effects = unload;
                    RecheckOutcome::Unloaded
                }
                Err(_) => RecheckOutcome::Unchanged,
            }
        } else {
            RecheckOutcome::Unchanged
        };
        sink.on_recheck(&RecheckEvent {
            kind: self.kind,
            uuid: &self.uuid,
            cause,
            visible,
            outcome,
        });
        effects
    }

    fn on_iframe_loaded(&mut self, dom: &mut D, sink: &mut dyn TraceSink) -> Effects {
        // A fresh iframe without `src` may report `about:blank` loads.
        if self.state != FrameState::Loading {
            return Effects::new();
        }
        let class = FrameState::Loaded.css_class(self.kind);
        if let (Some(viewer), Some(class)) = (&self.viewer, class) {
            dom.add_class(viewer, &class);
        }
        self.loaded = true;
        self.transition(FrameState::Loaded, sink);
        if !self.unloads_when_hidden() && self.monitor.detach() {
            self.listener_effects(false)
        } else {
            Effects::new()
        }
    }
}
