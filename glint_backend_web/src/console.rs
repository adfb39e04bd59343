// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser console output.

use alloc::format;
use alloc::string::String;

use wasm_bindgen::JsValue;
use web_sys::console;

use glint_core::trace::{AmbientFrameEvent, GestureEvent, LoopEvent, NavigationEvent, TraceSink};

/// A [`TraceSink`] that writes one `console.debug` line per event.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleSink;

impl TraceSink for ConsoleSink {
    fn on_ambient_frame(&mut self, e: &AmbientFrameEvent) {
        debug(&format_ambient_frame(e));
    }

    fn on_loop(&mut self, e: &LoopEvent) {
        debug(&format!(
            "[glint] ambient loop {} ({:?}) at {:?}",
            if e.running { "started" } else { "stopped" },
            e.cause,
            e.now,
        ));
    }

    fn on_gesture(&mut self, e: &GestureEvent) {
        debug(&format!("[glint] lightbox {:?} -> {:?}", e.from, e.to));
    }

    fn on_navigation(&mut self, e: &NavigationEvent) {
        debug(&format!("[glint] lightbox item {}/{}", e.index + 1, e.len));
    }
}

fn format_ambient_frame(e: &AmbientFrameEvent) -> String {
    let turbulence = if e.turbulence { " +turbulence" } else { "" };
    if !e.updated {
        return format!("[glint] ambient {:?} skipped{turbulence}", e.now);
    }
    let flag = |written: bool, name: char| if written { name } else { '-' };
    format!(
        "[glint] ambient {:?} wrote {}{}{}{turbulence}",
        e.now,
        flag(e.written[0], 'x'),
        flag(e.written[1], 'y'),
        flag(e.written[2], 'r'),
    )
}

fn debug(message: &str) {
    console::debug_1(&JsValue::from_str(message));
}

/// Writes a `console.warn` line.
pub fn warn(message: &str) {
    console::warn_1(&JsValue::from_str(message));
}
