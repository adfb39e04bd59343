// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for glint.
//!
//! This crate binds the `glint_core` state machines to browser APIs:
//!
//! - [`RafLoop`]: `requestAnimationFrame` loop with a single outstanding
//!   request
//! - [`detect_capabilities`]: one-shot media and navigator queries
//! - [`AmbientLight`]: ambient drift on CSS custom properties, following page
//!   visibility
//! - [`GalleryLightbox`] / [`DomLightbox`]: swipeable image overlay
//! - [`NavMenu`], [`LanguageToggle`], [`reveal_sections`],
//!   [`install_zoom_lock`]: smaller page features
//! - [`ConsoleSink`]: trace events on the browser console
//!
//! Every installer looks up its anchors through [`Selectors`] and returns
//! `Ok(None)` when they are missing, so a page only pays for the features it
//! marks up.
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Enables `glint_core/trace`, so installed
//!   sinks actually receive events.

#![no_std]

extern crate alloc;

mod ambient;
mod capability;
mod config;
mod console;
mod language;
mod lightbox;
mod listener;
mod menu;
mod raf;
mod reveal;
mod scroll;
mod touch;
mod transition;

pub use ambient::{AmbientLight, DomAmbientSurface, drift_property};
pub use capability::detect_capabilities;
pub use config::{CapabilityQueries, Selectors};
pub use console::{ConsoleSink, warn};
pub use language::LanguageToggle;
pub use lightbox::{DomLightbox, GalleryLightbox};
pub use menu::NavMenu;
pub use raf::RafLoop;
pub use reveal::reveal_sections;
pub use scroll::{ScrollLease, ScrollLock};
pub use touch::install_zoom_lock;
pub use transition::transition_end;

use alloc::vec::Vec;

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use glint_core::time::HostTime;

/// Returns the current host time from `performance.now()`.
///
/// The returned [`HostTime`] is in microsecond ticks on the same clock as
/// `requestAnimationFrame` timestamps.
#[must_use]
pub fn now() -> HostTime {
    HostTime::from_millis_f64(raf::performance_now())
}

/// `querySelector` narrowed to `HtmlElement`; errors and mismatches are
/// `None`.
pub(crate) fn query_html(document: &Document, selector: &str) -> Option<HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()?
        .dyn_into::<HtmlElement>()
        .ok()
}

/// `querySelectorAll` in document order, keeping nodes of type `T`.
pub(crate) fn query_all<T: JsCast>(document: &Document, selector: &str) -> Vec<T> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}
