// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mobile navigation menu on the DOM.

use alloc::rc::Rc;
use core::cell::RefCell;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, Event, HtmlElement, KeyboardEvent, MouseEvent, Window};

use glint_core::input::Key;
use glint_core::menu::MenuState;

use crate::capability::media_matches;
use crate::config::{CapabilityQueries, Selectors};
use crate::listener::listen;
use crate::scroll::ScrollLease;

/// A key another handler already consumed reaches the menu as
/// [`Key::Other`].
fn unclaimed_key(key: &str, default_prevented: bool) -> Key {
    if default_prevented {
        Key::Other
    } else {
        Key::from_dom_key(key)
    }
}

struct MenuBinding {
    state: MenuState,
    toggle: HtmlElement,
    panel: HtmlElement,
    body: Option<HtmlElement>,
    scroll: ScrollLease,
}

impl MenuBinding {
    /// Mirrors `state` onto the toggle, the panel, and the body.
    fn apply(&mut self) {
        let open = self.state.is_open();
        let _ = self
            .toggle
            .set_attribute("aria-expanded", if open { "true" } else { "false" });
        let _ = self.panel.class_list().toggle_with_force("is-open", open);
        if let Some(body) = &self.body {
            let _ = body.class_list().toggle_with_force("menu-open", open);
        }
        self.scroll.set(open);
    }

    fn update(&mut self, f: impl FnOnce(&mut MenuState) -> bool) -> bool {
        let changed = f(&mut self.state);
        if changed {
            self.apply();
        }
        changed
    }
}

/// A toggle button opening a navigation panel on compact viewports.
pub struct NavMenu {
    binding: Rc<RefCell<MenuBinding>>,
}

impl core::fmt::Debug for NavMenu {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NavMenu")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl NavMenu {
    /// Wires the toggle, Escape, in-panel link clicks, and viewport resizes.
    ///
    /// Returns `Ok(None)` if the toggle or the panel is missing.
    pub fn install(
        window: &Window,
        document: &Document,
        selectors: &Selectors,
        queries: &CapabilityQueries,
        scroll: ScrollLease,
    ) -> Result<Option<Rc<Self>>, JsValue> {
        let (Some(toggle), Some(panel)) = (
            crate::query_html(document, selectors.menu_toggle),
            crate::query_html(document, selectors.menu_panel),
        ) else {
            return Ok(None);
        };

        let mut binding = MenuBinding {
            state: MenuState::Closed,
            toggle: toggle.clone(),
            panel: panel.clone(),
            body: document.body(),
            scroll,
        };
        binding.apply();
        let menu = Rc::new(Self {
            binding: Rc::new(RefCell::new(binding)),
        });

        let binding = Rc::clone(&menu.binding);
        listen(&toggle, "click", move |_: MouseEvent| {
            binding.borrow_mut().update(|state| {
                state.toggle();
                true
            });
        })?;

        let binding = Rc::clone(&menu.binding);
        listen(document, "keydown", move |e: KeyboardEvent| {
            let key = unclaimed_key(&e.key(), e.default_prevented());
            binding.borrow_mut().update(|state| state.handle_key(key));
        })?;

        let binding = Rc::clone(&menu.binding);
        listen(&panel, "click", move |e: MouseEvent| {
            let on_link = e
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .is_some_and(|el| el.closest("a").ok().flatten().is_some());
            if on_link {
                binding.borrow_mut().update(MenuState::close);
            }
        })?;

        let binding = Rc::clone(&menu.binding);
        let win = window.clone();
        let compact_query = queries.compact_viewport;
        listen(window, "resize", move |_: Event| {
            let compact = media_matches(&win, compact_query);
            binding
                .borrow_mut()
                .update(|state| state.viewport_changed(compact));
        })?;

        Ok(Some(menu))
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> MenuState {
        self.binding.borrow().state
    }

    /// Closes the panel. Returns `true` if it was open.
    pub fn close(&self) -> bool {
        self.binding.borrow_mut().update(MenuState::close)
    }
}
