// Copyright 2026 the Lazyframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame instances and their lifecycle.
//!
//! [`Frame`] is the lifecycle controller for one instance. It is driven by
//! [`FrameEvent`]s and answers with [`Effects`]. [`FrameState`] tracks where
//! it is, [`FrameKind`] fixes its naming surface, and [`Signal`] covers the
//! out-of-band load/unload requests.

mod controller;
mod effect;
mod id;
mod kind;
mod signal;
mod source;
mod state;

pub use controller::Frame;
pub use effect::{Effect, Effects, FrameEvent};
pub use id::InstanceId;
pub use kind::FrameKind;
pub use signal::Signal;
pub use source::IframeSource;
pub use state::FrameState;
