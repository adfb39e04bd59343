// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ambient light on the DOM.
//!
//! Drift is published as CSS custom properties on the ambient element so the
//! page stylesheet decides how to use it:
//!
//! ```css
//! .ambient { transform: translate3d(var(--ambient-x), var(--ambient-y), 0)
//!                       rotate(var(--ambient-rotate)); }
//! ```
//!
//! Turbulence is written to the `baseFrequency` attribute of an SVG
//! `feTurbulence` primitive, if the page has one.

use alloc::boxed::Box;
use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use core::cell::RefCell;

use kurbo::Vec2;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, Event, HtmlElement, Window};

use glint_core::ambient::{AmbientConfig, AmbientDriver};
use glint_core::backend::{AmbientSurface, DriftChannel};
use glint_core::capability::Capabilities;
use glint_core::pacing::Visibility;
use glint_core::trace::{LoopCause, LoopEvent, TraceSink, Tracer};

use crate::config::Selectors;
use crate::listener::listen;
use crate::raf::RafLoop;

/// Custom property carrying `channel`.
#[must_use]
pub const fn drift_property(channel: DriftChannel) -> &'static str {
    match channel {
        DriftChannel::X => "--ambient-x",
        DriftChannel::Y => "--ambient-y",
        DriftChannel::Rotation => "--ambient-rotate",
    }
}

fn drift_value(channel: DriftChannel, value: f64) -> String {
    match channel {
        DriftChannel::X | DriftChannel::Y => format!("{value:.2}px"),
        DriftChannel::Rotation => format!("{value:.3}deg"),
    }
}

fn turbulence_value(frequency: Vec2) -> String {
    format!("{:.5} {:.5}", frequency.x, frequency.y)
}

/// [`AmbientSurface`] writing to DOM styles and attributes.
#[derive(Debug)]
pub struct DomAmbientSurface {
    target: HtmlElement,
    turbulence: Option<Element>,
}

impl DomAmbientSurface {
    /// Creates a surface over the drift target and optional turbulence
    /// primitive.
    #[must_use]
    pub fn new(target: HtmlElement, turbulence: Option<Element>) -> Self {
        Self { target, turbulence }
    }
}

impl AmbientSurface for DomAmbientSurface {
    fn write_drift(&mut self, channel: DriftChannel, value: f64) {
        let _ = self
            .target
            .style()
            .set_property(drift_property(channel), &drift_value(channel, value));
    }

    fn write_turbulence(&mut self, frequency: Vec2) {
        if let Some(el) = &self.turbulence {
            let _ = el.set_attribute("baseFrequency", &turbulence_value(frequency));
        }
    }
}

struct AmbientState {
    driver: AmbientDriver,
    surface: DomAmbientSurface,
    sink: Box<dyn TraceSink>,
}

/// The installed ambient light: a driver bound to a [`RafLoop`] that follows
/// page visibility.
pub struct AmbientLight {
    raf: RafLoop,
    state: Rc<RefCell<AmbientState>>,
}

impl core::fmt::Debug for AmbientLight {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AmbientLight")
            .field("raf", &self.raf)
            .finish_non_exhaustive()
    }
}

impl AmbientLight {
    /// Finds the ambient element, starts the loop if the page is visible, and
    /// wires `visibilitychange`, `pagehide`, and `pageshow`.
    ///
    /// Returns `Ok(None)` if the page has no ambient element.
    pub fn install(
        window: &Window,
        document: &Document,
        caps: &Capabilities,
        selectors: &Selectors,
        sink: Box<dyn TraceSink>,
    ) -> Result<Option<Rc<Self>>, JsValue> {
        let Some(target) = crate::query_html(document, selectors.ambient) else {
            return Ok(None);
        };
        let turbulence = document.query_selector(selectors.turbulence).ok().flatten();

        let mut config = AmbientConfig::for_capabilities(caps);
        if turbulence.is_none() {
            config = config.without_turbulence();
        }

        let state = Rc::new(RefCell::new(AmbientState {
            driver: AmbientDriver::new(config, crate::now()),
            surface: DomAmbientSurface::new(target, turbulence),
            sink,
        }));

        let state_cb = Rc::clone(&state);
        let raf = RafLoop::new(move |now| {
            let state = &mut *state_cb.borrow_mut();
            let mut tracer = Tracer::new(&mut *state.sink);
            state.driver.frame(now, &mut state.surface, &mut tracer);
        });

        let light = Rc::new(Self { raf, state });
        light.set_visibility(Visibility::from_hidden(document.hidden()), LoopCause::Startup);
        light.watch_lifecycle(window, document)?;
        Ok(Some(light))
    }

    /// Whether the loop is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.raf.is_running()
    }

    /// Starts or stops the loop. Returns `true` if the running state changed.
    pub fn set_visibility(&self, visibility: Visibility, cause: LoopCause) -> bool {
        let changed = self.raf.sync_visibility(visibility);
        if changed {
            let state = &mut *self.state.borrow_mut();
            Tracer::new(&mut *state.sink).loop_state(&LoopEvent {
                now: crate::now(),
                running: self.raf.is_running(),
                cause,
            });
        }
        changed
    }

    fn watch_lifecycle(
        self: &Rc<Self>,
        window: &Window,
        document: &Document,
    ) -> Result<(), JsValue> {
        let light = Rc::clone(self);
        let doc = document.clone();
        listen(document, "visibilitychange", move |_: Event| {
            let visibility = Visibility::from_hidden(doc.hidden());
            let cause = match visibility {
                Visibility::Visible => LoopCause::Shown,
                Visibility::Hidden => LoopCause::Hidden,
            };
            light.set_visibility(visibility, cause);
        })?;

        let light = Rc::clone(self);
        listen(window, "pagehide", move |_: Event| {
            light.set_visibility(Visibility::Hidden, LoopCause::PageHide);
        })?;

        // Back/forward cache restores fire `pageshow` without a visibility
        // change. The first frame after a restore rewrites every channel.
        let light = Rc::clone(self);
        let doc = document.clone();
        listen(window, "pageshow", move |_: Event| {
            light.state.borrow_mut().driver.invalidate_writes();
            if !doc.hidden() {
                light.set_visibility(Visibility::Visible, LoopCause::PageShow);
            }
        })?;
        Ok(())
    }
}
