// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Platform-neutral state machines for interactive landing pages.
//!
//! `glint_core` holds every decision a landing page makes about motion and
//! gestures, with none of the DOM plumbing. It is `no_std` compatible (with
//! `alloc`) so the same logic runs in the browser and in native unit tests.
//!
//! # Architecture
//!
//! Two independent engines sit on top of a small backend contract:
//!
//! ```text
//!   Backend (rAF, clock, capability queries)
//!       │
//!       ├──► FrameLoop ──► AmbientDriver::frame() ──► AmbientSurface
//!       │
//!       └──► pointer / key events ──► Lightbox ──► LightboxView
//!                                        ▲             │
//!                                        └── Settle ◄──┘ (transition end)
//! ```
//!
//! **[`ambient`]**: Layered-sine drift of the background light, throttled by
//! a [`FrameGate`](pacing::FrameGate) and written only past per-channel
//! epsilons. An optional turbulence step runs on capable devices.
//!
//! **[`lightbox`]**: Circular image browsing with a drag gesture classified
//! by distance or velocity into a slide or a snap-back.
//!
//! **[`pacing`]**: Single-outstanding-request frame loop and interval gate.
//!
//! **[`capability`]**: Session-wide capability flags and the derived
//! high-fidelity mode.
//!
//! **[`backend`]**: Traits that platform backends implement.
//!
//! **[`menu`]**, **[`language`]**, **[`reveal`]**, **[`touch`]**: Smaller
//! page features: navigation menu, language toggle, staggered reveal, and
//! zoom suppression.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types, with
//! a zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod ambient;
pub mod backend;
pub mod capability;
pub mod input;
pub mod language;
pub mod lightbox;
pub mod menu;
pub mod pacing;
pub mod reveal;
pub mod time;
pub mod touch;
pub mod trace;
