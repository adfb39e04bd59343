// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Image lightbox on the DOM.
//!
//! [`DomLightbox`] applies [`Lightbox`] output to an overlay element and its
//! `<img>`. [`GalleryLightbox`] discovers the gallery, owns the state machine,
//! and routes pointer, keyboard, and button events into it. Every animated
//! step is awaited by a local task that feeds completion back into the state
//! machine, so the gesture never outlives its animation.

use alloc::boxed::Box;
use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use web_sys::{
    Document, HtmlElement, HtmlImageElement, KeyboardEvent, MouseEvent, PointerEvent,
    Window,
};

use glint_core::backend::{ImagePlacement, LightboxView, Motion};
use glint_core::input::{Key, PointerId, PointerSample};
use glint_core::lightbox::{Lightbox, LightboxConfig, LightboxItem, Settle};
use glint_core::trace::{NavigationEvent, TraceSink, Tracer};

use crate::config::Selectors;
use crate::listener::{listen, listen_capture};
use crate::scroll::ScrollLease;
use crate::transition::transition_end;

/// The transitioned property whose end completes a step. Opacity runs
/// alongside it and is not awaited.
const SETTLE_PROPERTY: &str = "transform";

fn transform_value(offset_x: f64) -> String {
    format!("translate3d({offset_x:.1}px, 0, 0)")
}

fn transition_value(motion: Motion) -> String {
    match motion {
        Motion::Immediate => String::from("none"),
        Motion::Animated(duration) => {
            let ms = duration.as_millis();
            format!(
                "{SETTLE_PROPERTY} {ms}ms cubic-bezier(0.22, 0.61, 0.36, 1), opacity {ms}ms ease"
            )
        }
    }
}

/// [`LightboxView`] over an overlay element and the `<img>` inside it.
#[derive(Debug)]
pub struct DomLightbox {
    root: HtmlElement,
    image: HtmlImageElement,
    scroll: ScrollLease,
}

impl DomLightbox {
    /// Creates a view. The image opts out of browser touch panning so
    /// horizontal drags reach the pointer handlers.
    #[must_use]
    pub fn new(root: HtmlElement, image: HtmlImageElement, scroll: ScrollLease) -> Self {
        let _ = image.style().set_property("touch-action", "none");
        Self {
            root,
            image,
            scroll,
        }
    }

    /// The displayed image.
    #[must_use]
    pub fn image(&self) -> &HtmlImageElement {
        &self.image
    }
}

impl LightboxView for DomLightbox {
    type Trigger = HtmlElement;

    fn set_open(&mut self, open: bool) {
        let _ = self.root.class_list().toggle_with_force("is-open", open);
        let _ = self
            .root
            .set_attribute("aria-hidden", if open { "false" } else { "true" });
    }

    fn lock_scroll(&mut self, locked: bool) {
        self.scroll.set(locked);
    }

    fn show_image(&mut self, src: &str) {
        self.image.set_src(src);
    }

    fn preload(&mut self, src: &str) {
        if let Ok(img) = HtmlImageElement::new() {
            img.set_src(src);
        }
    }

    fn place_image(&mut self, placement: ImagePlacement) {
        let style = self.image.style();
        let _ = style.set_property("transition", &transition_value(placement.motion));
        let _ = style.set_property("transform", &transform_value(placement.offset_x));
        let _ = style.set_property("opacity", &format!("{:.3}", placement.opacity));
        if placement.motion == Motion::Immediate {
            // Flush styles so a following animated placement starts here.
            let _ = self.image.offset_width();
        }
    }

    fn restore_focus(&mut self, trigger: &HtmlElement) {
        let _ = trigger.focus();
    }
}

struct LightboxState {
    lightbox: Lightbox<HtmlElement>,
    view: DomLightbox,
    sink: Box<dyn TraceSink>,
}

impl LightboxState {
    /// Runs `f` and reports any gesture phase or item change it caused.
    fn traced<R>(
        &mut self,
        f: impl FnOnce(&mut Lightbox<HtmlElement>, &mut DomLightbox) -> R,
    ) -> R {
        let phase = self.lightbox.phase();
        let index = self.lightbox.index();
        let was_open = self.lightbox.is_open();

        let result = f(&mut self.lightbox, &mut self.view);

        let mut tracer = Tracer::new(&mut *self.sink);
        tracer.gesture(phase, self.lightbox.phase());
        if self.lightbox.is_open() && (index != self.lightbox.index() || !was_open) {
            tracer.navigation(&NavigationEvent {
                index: self.lightbox.index(),
                len: self.lightbox.len(),
            });
        }
        result
    }
}

/// A gallery of `[data-lightbox-item]` triggers opening a shared overlay.
pub struct GalleryLightbox {
    state: Rc<RefCell<LightboxState>>,
}

impl core::fmt::Debug for GalleryLightbox {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("GalleryLightbox")
            .field("len", &state.lightbox.len())
            .field("index", &state.lightbox.index())
            .field("open", &state.lightbox.is_open())
            .finish_non_exhaustive()
    }
}

impl GalleryLightbox {
    /// Discovers the gallery and wires all events.
    ///
    /// Returns `Ok(None)` if the overlay, its image, or every gallery item is
    /// missing.
    pub fn install(
        window: &Window,
        document: &Document,
        selectors: &Selectors,
        config: LightboxConfig,
        scroll: ScrollLease,
        sink: Box<dyn TraceSink>,
    ) -> Result<Option<Rc<Self>>, JsValue> {
        let Some(root) = crate::query_html(document, selectors.lightbox) else {
            return Ok(None);
        };
        let Some(image) = root
            .query_selector(selectors.lightbox_image)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
        else {
            return Ok(None);
        };

        let (triggers, items): (Vec<_>, Vec<_>) =
            discover_items(document, selectors.lightbox_item).into_iter().unzip();
        let Some(lightbox) = Lightbox::new(items, config) else {
            return Ok(None);
        };

        let gallery = Rc::new(Self {
            state: Rc::new(RefCell::new(LightboxState {
                lightbox,
                view: DomLightbox::new(root.clone(), image.clone(), scroll),
                sink,
            })),
        });

        for (index, trigger) in triggers.into_iter().enumerate() {
            let state = Rc::clone(&gallery.state);
            let target = trigger.clone();
            listen(&trigger, "click", move |e: MouseEvent| {
                e.prevent_default();
                state
                    .borrow_mut()
                    .traced(|lb, view| lb.open(index, target.clone(), view));
            })?;
        }

        // Capture phase: the overlay sits above the page, so it claims keys
        // before the menu's document listener sees them.
        let state = Rc::clone(&gallery.state);
        listen_capture(document, "keydown", move |e: KeyboardEvent| {
            let key = Key::from_dom_key(&e.key());
            if state.borrow_mut().traced(|lb, view| lb.handle_key(key, view)) {
                e.prevent_default();
            }
        })?;

        gallery.wire_buttons(&root, selectors)?;
        gallery.wire_pointer(window, &image)?;
        Ok(Some(gallery))
    }

    /// Number of gallery items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.borrow().lightbox.len()
    }

    /// Always `false`; an installed gallery has at least one item.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.borrow().lightbox.is_empty()
    }

    /// Whether the overlay is shown.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.borrow().lightbox.is_open()
    }

    fn wire_buttons(&self, root: &HtmlElement, selectors: &Selectors) -> Result<(), JsValue> {
        type Action = fn(&mut Lightbox<HtmlElement>, &mut DomLightbox) -> bool;
        fn close(lb: &mut Lightbox<HtmlElement>, view: &mut DomLightbox) -> bool {
            lb.close(view)
        }
        fn prev(lb: &mut Lightbox<HtmlElement>, view: &mut DomLightbox) -> bool {
            lb.prev(view)
        }
        fn next(lb: &mut Lightbox<HtmlElement>, view: &mut DomLightbox) -> bool {
            lb.next(view)
        }
        let buttons: [(&str, Action); 3] = [
            (selectors.lightbox_close, close),
            (selectors.lightbox_prev, prev),
            (selectors.lightbox_next, next),
        ];
        for (selector, action) in buttons {
            let Some(button) = root.query_selector(selector).ok().flatten() else {
                continue;
            };
            let state = Rc::clone(&self.state);
            listen(&button, "click", move |_: MouseEvent| {
                state.borrow_mut().traced(action);
            })?;
        }

        // Clicking the backdrop itself closes.
        let state = Rc::clone(&self.state);
        let backdrop = JsValue::from(root.clone());
        listen(root, "click", move |e: MouseEvent| {
            if e.target().is_some_and(|t| JsValue::from(t) == backdrop) {
                state.borrow_mut().traced(|lb, view| lb.close(view));
            }
        })
    }

    fn wire_pointer(&self, window: &Window, image: &HtmlImageElement) -> Result<(), JsValue> {
        let state = Rc::clone(&self.state);
        let captured = image.clone();
        listen(image, "pointerdown", move |e: PointerEvent| {
            let started = state
                .borrow_mut()
                .traced(|lb, _| lb.pointer_down(sample(&e), crate::now()));
            if started {
                e.prevent_default();
                let _ = captured.set_pointer_capture(e.pointer_id());
            }
        })?;

        let state = Rc::clone(&self.state);
        let win = window.clone();
        listen(image, "pointermove", move |e: PointerEvent| {
            let width = viewport_width(&win);
            state
                .borrow_mut()
                .traced(|lb, view| lb.pointer_move(sample(&e), width, view));
        })?;

        for kind in ["pointerup", "pointercancel"] {
            let state = Rc::clone(&self.state);
            let win = window.clone();
            listen(image, kind, move |e: PointerEvent| {
                let width = viewport_width(&win);
                let settle = state
                    .borrow_mut()
                    .traced(|lb, view| lb.pointer_up(sample(&e), crate::now(), width, view));
                if let Some(settle) = settle {
                    spawn_settle(Rc::clone(&state), win.clone(), settle);
                }
            })?;
        }
        Ok(())
    }
}

/// Awaits each animated step and advances the state machine past it.
fn spawn_settle(state: Rc<RefCell<LightboxState>>, window: Window, first: Settle) {
    wasm_bindgen_futures::spawn_local(async move {
        let mut next = Some(first);
        while let Some(settle) = next {
            let image = state.borrow().view.image().clone();
            transition_end(&image, SETTLE_PROPERTY, settle.timeout).await;
            let width = viewport_width(&window);
            next = state
                .borrow_mut()
                .traced(|lb, view| lb.transition_finished(settle.token, width, view));
        }
    });
}

fn sample(e: &PointerEvent) -> PointerSample {
    PointerSample::new(
        PointerId(e.pointer_id()),
        f64::from(e.client_x()),
        f64::from(e.client_y()),
    )
}

fn viewport_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0)
}

/// Gallery triggers in document order, paired with their items.
///
/// The source comes from `data-src`, the element's own `src` if it is an
/// image, or its first descendant image. `data-full` supplies the
/// full-resolution source. Triggers without any source are skipped.
fn discover_items(document: &Document, selector: &str) -> Vec<(HtmlElement, LightboxItem)> {
    crate::query_all::<HtmlElement>(document, selector)
        .into_iter()
        .filter_map(|el| {
            let item = item_for(&el)?;
            Some((el, item))
        })
        .collect()
}

fn item_for(el: &HtmlElement) -> Option<LightboxItem> {
    let src = el
        .get_attribute("data-src")
        .or_else(|| el.dyn_ref::<HtmlImageElement>().map(HtmlImageElement::src))
        .or_else(|| {
            el.query_selector("img")
                .ok()
                .flatten()
                .and_then(|img| img.get_attribute("src"))
        })
        .filter(|src| !src.is_empty())?;
    let item = LightboxItem::new(src);
    Some(match el.get_attribute("data-full") {
        Some(full) => item.with_full_src(full),
        None => item,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::time::Duration;

    #[test]
    fn placement_styles() {
        assert_eq!(transform_value(-1000.0), "translate3d(-1000.0px, 0, 0)");
        assert_eq!(transform_value(12.345), "translate3d(12.3px, 0, 0)");
        assert_eq!(transition_value(Motion::Immediate), "none");
        assert_eq!(
            transition_value(Motion::Animated(Duration::from_millis(240))),
            "transform 240ms cubic-bezier(0.22, 0.61, 0.36, 1), opacity 240ms ease"
        );
    }
}
