// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Demo: every glint feature installed on one landing page.
//!
//! Build with: `wasm-pack build --target web demos/landing_page`
//!
//! Then serve `demos/landing_page/` and open `index.html` in a browser. Build
//! with `--features trace` to see loop, gesture, and navigation events in the
//! console.

// This crate only runs in the browser; suppress dead-code warnings when
// cargo-checking on a native host target.
#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::boxed::Box;
use alloc::format;

use wasm_bindgen::prelude::*;

use glint_backend_web::{
    AmbientLight, CapabilityQueries, GalleryLightbox, LanguageToggle, NavMenu, ScrollLock,
    Selectors, detect_capabilities, install_zoom_lock, reveal_sections,
};
use glint_core::lightbox::LightboxConfig;
use glint_core::touch::DoubleTapConfig;
use glint_core::trace::TraceSink;

/// Entry point: called automatically by `wasm_bindgen(start)`.
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    #[cfg(feature = "console-panic")]
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let selectors = Selectors::default();
    let queries = CapabilityQueries::default();
    let caps = detect_capabilities(&window, &queries);

    report(
        "ambient",
        AmbientLight::install(&window, &document, &caps, &selectors, sink()),
    );

    // Overlays share one scroll lock so closing either restores the page only
    // once both are closed.
    let scroll = ScrollLock::new(&document);
    if let Some(scroll) = &scroll {
        report(
            "lightbox",
            GalleryLightbox::install(
                &window,
                &document,
                &selectors,
                LightboxConfig::default(),
                scroll.lease(),
                sink(),
            ),
        );
        report(
            "menu",
            NavMenu::install(&window, &document, &selectors, &queries, scroll.lease()),
        );
    }

    report("language", LanguageToggle::install(&document, &selectors));
    reveal_sections(&document, &caps, &selectors);
    if let Err(err) = install_zoom_lock(&document, &caps, DoubleTapConfig::default()) {
        warn_failed("zoom lock", &err);
    }
    Ok(())
}

/// Logs a failed installer. Missing anchors are not failures.
fn report<T>(feature: &str, result: Result<Option<T>, JsValue>) {
    if let Err(err) = result {
        warn_failed(feature, &err);
    }
}

fn warn_failed(feature: &str, err: &JsValue) {
    glint_backend_web::warn(&format!("[glint] {feature} disabled: {err:?}"));
}

fn sink() -> Box<dyn TraceSink> {
    #[cfg(feature = "trace")]
    {
        Box::new(glint_backend_web::ConsoleSink)
    }
    #[cfg(not(feature = "trace"))]
    {
        Box::new(glint_core::trace::NoopSink)
    }
}
