// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Awaiting the end of a CSS transition.

use alloc::boxed::Box;
use alloc::string::String;

use js_sys::{Function, Promise};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlElement, TransitionEvent};

use glint_core::time::Duration;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "setTimeout")]
    fn set_timeout(handler: &JsValue, timeout_ms: i32) -> i32;

    #[wasm_bindgen(js_name = "clearTimeout")]
    fn clear_timeout(id: i32);
}

/// Resolves when `target` finishes transitioning `property`, or after
/// `timeout`.
///
/// Only `transitionend` events for `property` whose target is `target` itself
/// count. Other properties finishing on the same element and events bubbling
/// up from descendants are ignored. The listener and the timer are removed
/// before returning.
pub async fn transition_end(target: &HtmlElement, property: &str, timeout: Duration) {
    let mut resolver: Option<Function> = None;
    let promise = Promise::new(&mut |resolve, _reject| resolver = Some(resolve));
    let Some(resolve) = resolver else {
        return;
    };

    let element = JsValue::from(target.clone());
    let property = String::from(property);
    let resolve_end = resolve.clone();
    let on_end = Closure::wrap(Box::new(move |event: TransitionEvent| {
        if is_awaited(&event.property_name(), &property)
            && event.target().is_some_and(|t| JsValue::from(t) == element)
        {
            let _ = resolve_end.call0(&JsValue::UNDEFINED);
        }
    }) as Box<dyn FnMut(TransitionEvent)>);
    let on_timeout = Closure::once(move || {
        let _ = resolve.call0(&JsValue::UNDEFINED);
    });

    let listener: &Function = on_end.as_ref().unchecked_ref();
    let _ = target.add_event_listener_with_callback("transitionend", listener);
    let timer = set_timeout(on_timeout.as_ref(), timeout_ms(timeout));

    let _ = JsFuture::from(promise).await;

    let _ = target.remove_event_listener_with_callback("transitionend", listener);
    clear_timeout(timer);
}

/// `all` waits for any property; otherwise the names must match.
fn is_awaited(finished: &str, property: &str) -> bool {
    property == "all" || finished == property
}

fn timeout_ms(timeout: Duration) -> i32 {
    i32::try_from(timeout.as_millis()).unwrap_or(i32::MAX)
}
