// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Staggered reveal on the DOM.

use alloc::format;
use alloc::vec::Vec;

use wasm_bindgen::closure::Closure;
use web_sys::{Document, HtmlElement};

use glint_core::capability::Capabilities;
use glint_core::reveal::RevealConfig;

use crate::config::Selectors;
use crate::raf::request_animation_frame;

/// Gives each reveal target its stagger delay and marks all of them visible
/// on the next animation frame.
///
/// Returns the number of elements scheduled.
pub fn reveal_sections(
    document: &Document,
    caps: &Capabilities,
    selectors: &Selectors,
) -> usize {
    let config = RevealConfig::for_capabilities(caps);
    let targets: Vec<HtmlElement> = crate::query_all(document, selectors.reveal);
    for (index, el) in targets.iter().enumerate() {
        let delay = config.stagger_delay(index).as_millis();
        let _ = el.style().set_property("transition-delay", &format!("{delay}ms"));
    }

    let count = targets.len();
    if count > 0 {
        // The delays must be styled before the class flips, or the browser
        // coalesces both and skips the transition.
        let reveal = Closure::once_into_js(move || {
            for el in &targets {
                let _ = el.class_list().add_1("is-visible");
            }
        });
        request_animation_frame(&reveal);
    }
    count
}
