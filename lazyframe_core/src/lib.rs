// Copyright 2026 the Lazyframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for visibility-driven lazy loading of framed sub-pages.
//!
//! `lazyframe_core` turns reference elements such as
//! `<div data-esb-page-framer="pages/home.html">` into placeholders whose
//! iframe only receives a `src` once it scrolls into view. It is `no_std`
//! compatible (with `alloc`) and never touches a real document: all
//! document access goes through the [`Dom`](backend::Dom) trait, and all
//! asynchronous work is returned as [`Effects`](frame::Effects).
//!
//! # Architecture
//!
//! ```text
//!   reference element ──► options::resolve() ──► ResolvedOptions
//!                                                     │
//!                       geometry / markup ◄───────────┘
//!                               │
//!                               ▼
//!   Frame::new() ──► Frame::inject_placeholder() ──► Effects ──► backend
//!                                                                  │
//!                 ┌────────────── FrameEvent ◄─────────────────────┘
//!                 ▼
//!   Frame::handle() ──► Monitor gate ──► visibility::is_visible()
//!                 │
//!                 └──► load / unload ──► Effects ──► backend
//! ```
//!
//! **[`options`]**: four-tier option resolution (hard default, global
//! configuration, page-level element, per-element attributes) with a
//! pluggable [`ValueNormalizer`](options::ValueNormalizer).
//!
//! **[`config`]**: the [`ConfigSource`](config::ConfigSource) collaborator
//! and an in-memory [`ConfigMap`](config::ConfigMap).
//!
//! **[`geometry`]**: scaled iframe dimensions from viewport width, aspect
//! ratio, and displayed width.
//!
//! **[`markup`]**: placeholder and iframe markup.
//!
//! **[`visibility`]**: scrollable-ancestor capture and the smallest-frame
//! visibility test.
//!
//! **[`monitor`]**: per-event scroll/resize cool-down gates.
//!
//! **[`frame`]**: the per-instance lifecycle controller.
//!
//! **[`backend`]**: the [`Dom`](backend::Dom) trait backends implement.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) for logs and lifecycle
//! events.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod config;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod markup;
pub mod monitor;
pub mod options;
pub mod time;
pub mod trace;
pub mod visibility;

#[cfg(test)]
mod test_dom;
