// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Language toggle on the DOM.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use wasm_bindgen::JsValue;
use web_sys::{Document, Element, HtmlElement, MouseEvent};

use glint_core::language::LanguageSelection;

use crate::config::Selectors;
use crate::listener::listen;

/// Attribute name inside a `[name]` or `[name=value]` selector.
fn attribute_of(selector: &str) -> Option<&str> {
    let inner = selector.strip_prefix('[')?.strip_suffix(']')?;
    let name = inner.split('=').next()?.trim();
    (!name.is_empty()).then_some(name)
}

struct LanguageBinding {
    selection: LanguageSelection,
    html: Element,
    buttons: Vec<(Element, Option<String>)>,
    contents: Vec<(HtmlElement, Option<String>)>,
}

impl LanguageBinding {
    fn apply(&self) {
        let _ = self.html.set_attribute("lang", self.selection.active());
        for (button, tag) in &self.buttons {
            let pressed = tag.as_deref().is_some_and(|t| self.selection.matches(t));
            let _ = button.set_attribute("aria-pressed", if pressed { "true" } else { "false" });
        }
        for (content, tag) in &self.contents {
            let shown = tag.as_deref().is_some_and(|t| self.selection.matches(t));
            content.set_hidden(!shown);
        }
    }
}

/// Buttons switching the visible language of the page.
pub struct LanguageToggle {
    binding: Rc<RefCell<LanguageBinding>>,
}

impl core::fmt::Debug for LanguageToggle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LanguageToggle")
            .field("active", &self.binding.borrow().selection.active())
            .finish_non_exhaustive()
    }
}

impl LanguageToggle {
    /// Collects language buttons and content blocks and applies the initial
    /// language from `<html lang>` (falling back to the first button).
    ///
    /// Returns `Ok(None)` if the page has no language buttons.
    pub fn install(
        document: &Document,
        selectors: &Selectors,
    ) -> Result<Option<Rc<Self>>, JsValue> {
        let Some(html) = document.document_element() else {
            return Ok(None);
        };
        let button_attr = attribute_of(selectors.language_button).unwrap_or("data-lang");
        let content_attr =
            attribute_of(selectors.language_content).unwrap_or("data-lang-content");

        let buttons: Vec<(Element, Option<String>)> =
            crate::query_all::<Element>(document, selectors.language_button)
                .into_iter()
                .map(|el| {
                    let tag = el.get_attribute(button_attr);
                    (el, tag)
                })
                .collect();
        if buttons.is_empty() {
            return Ok(None);
        }
        let contents = crate::query_all::<HtmlElement>(document, selectors.language_content)
            .into_iter()
            .map(|el| {
                let tag = el.get_attribute(content_attr);
                (el, tag)
            })
            .collect();

        let initial = html.get_attribute("lang").unwrap_or_default();
        let fallback = buttons[0].1.clone().unwrap_or_default();
        let binding = LanguageBinding {
            selection: LanguageSelection::new(&initial, &fallback),
            html,
            buttons,
            contents,
        };
        binding.apply();
        let toggle = Rc::new(Self {
            binding: Rc::new(RefCell::new(binding)),
        });

        let handles: Vec<_> = toggle
            .binding
            .borrow()
            .buttons
            .iter()
            .map(|(button, tag)| (button.clone(), tag.clone()))
            .collect();
        for (button, tag) in handles {
            let Some(tag) = tag else {
                continue;
            };
            let binding = Rc::clone(&toggle.binding);
            listen(&button, "click", move |_: MouseEvent| {
                let mut binding = binding.borrow_mut();
                if binding.selection.select(&tag) {
                    binding.apply();
                }
            })?;
        }
        Ok(Some(toggle))
    }

    /// Switches to `tag`. Returns `true` if the language changed.
    pub fn select(&self, tag: &str) -> bool {
        let mut binding = self.binding.borrow_mut();
        let changed = binding.selection.select(tag);
        if changed {
            binding.apply();
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_from_selector() {
        assert_eq!(attribute_of("[data-lang]"), Some("data-lang"));
        assert_eq!(attribute_of("[data-lang=en]"), Some("data-lang"));
        assert_eq!(attribute_of(".lang"), None);
        assert_eq!(attribute_of("[]"), None);
    }
}
