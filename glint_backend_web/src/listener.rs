// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event listener registration.
//!
//! Listeners installed here live for the rest of the page: the closure is
//! handed to the JS garbage collector with [`Closure::forget`].

use alloc::boxed::Box;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{AddEventListenerOptions, EventTarget};

/// Adds a permanent listener for `kind` on `target`.
pub(crate) fn listen<E>(
    target: &EventTarget,
    kind: &str,
    handler: impl FnMut(E) + 'static,
) -> Result<(), JsValue>
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Like [`listen`], but registered as non-passive so the handler may call
/// `preventDefault` on touch and wheel events.
pub(crate) fn listen_active<E>(
    target: &EventTarget,
    kind: &str,
    handler: impl FnMut(E) + 'static,
) -> Result<(), JsValue>
where
    E: FromWasmAbi + 'static,
{
    let options = AddEventListenerOptions::new();
    options.set_passive(false);
    listen_with_options(target, kind, &options, handler)
}

/// Like [`listen`], but runs in the capture phase, ahead of every bubbling
/// listener on `target`.
pub(crate) fn listen_capture<E>(
    target: &EventTarget,
    kind: &str,
    handler: impl FnMut(E) + 'static,
) -> Result<(), JsValue>
where
    E: FromWasmAbi + 'static,
{
    let options = AddEventListenerOptions::new();
    options.set_capture(true);
    listen_with_options(target, kind, &options, handler)
}

fn listen_with_options<E>(
    target: &EventTarget,
    kind: &str,
    options: &AddEventListenerOptions,
    handler: impl FnMut(E) + 'static,
) -> Result<(), JsValue>
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        kind,
        closure.as_ref().unchecked_ref(),
        options,
    )?;
    closure.forget();
    Ok(())
}
