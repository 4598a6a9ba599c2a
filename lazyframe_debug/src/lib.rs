// Copyright 2026 the Lazyframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, JSON export, and log forwarding for lazyframe
//! diagnostics.
//!
//! This crate provides [`TraceSink`](lazyframe_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: in-memory recording of every event.
//! - [`json::export`]: writes recorded events as a JSON array.
//! - [`log_facade::LogFacadeSink`]: forwards to the `log` crate.

pub mod json;
pub mod log_facade;
pub mod pretty;
pub mod recorder;
