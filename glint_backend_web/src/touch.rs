// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zoom suppression on touch-constrained browsers.

use alloc::rc::Rc;
use core::cell::RefCell;

use wasm_bindgen::JsValue;
use web_sys::{Document, Event, TouchEvent};

use glint_core::capability::Capabilities;
use glint_core::touch::{DoubleTapConfig, DoubleTapGuard, suppress_touch_move};

use crate::listener::listen_active;

/// Blocks pinch and double-tap zoom.
///
/// Does nothing unless the environment is constrained. Returns `Ok(true)` if
/// the listeners were installed.
pub fn install_zoom_lock(
    document: &Document,
    caps: &Capabilities,
    config: DoubleTapConfig,
) -> Result<bool, JsValue> {
    if !caps.constrained_environment {
        return Ok(false);
    }

    // Safari's proprietary pinch events.
    for kind in ["gesturestart", "gesturechange"] {
        listen_active(document, kind, |e: Event| e.prevent_default())?;
    }

    let guard = Rc::new(RefCell::new(DoubleTapGuard::new(config)));
    listen_active(document, "touchend", move |e: TouchEvent| {
        if guard.borrow_mut().touch_end(crate::now()) {
            e.prevent_default();
        }
    })?;

    listen_active(document, "touchmove", |e: TouchEvent| {
        if suppress_touch_move(e.touches().length()) {
            e.prevent_default();
        }
    })?;
    Ok(true)
}
