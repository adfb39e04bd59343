// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `requestAnimationFrame` loop.
//!
//! [`RafLoop`] drives a [`FrameLoop`] with the browser's
//! `requestAnimationFrame` API. Each callback receives a
//! [`DOMHighResTimeStamp`][mdn] (milliseconds on the `performance.now()`
//! clock), which is converted to microsecond [`HostTime`] ticks.
//!
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/API/DOMHighResTimeStamp

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use glint_core::backend::{FrameHandle, FrameScheduler};
use glint_core::pacing::{FrameLoop, Visibility};
use glint_core::time::HostTime;

// Direct global bindings instead of `web_sys::Window` methods: avoids
// fetching (and unwrapping) the Window/Performance objects on every frame.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    pub(crate) fn performance_now() -> f64;

    #[wasm_bindgen(js_name = "requestAnimationFrame")]
    pub(crate) fn request_animation_frame(callback: &JsValue) -> i32;

    #[wasm_bindgen(js_name = "cancelAnimationFrame")]
    fn cancel_animation_frame(id: i32);
}

/// [`FrameScheduler`] that registers one JS callback with
/// `requestAnimationFrame`.
struct RafScheduler<'a> {
    callback: &'a JsValue,
}

impl FrameScheduler for RafScheduler<'_> {
    fn request_frame(&mut self) -> FrameHandle {
        FrameHandle(request_animation_frame(self.callback))
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        cancel_animation_frame(handle.0);
    }
}

/// A `requestAnimationFrame` loop that calls back with the frame time.
///
/// Create with [`RafLoop::new`], then call [`start`](Self::start) to begin
/// receiving callbacks. The loop re-registers itself each frame until
/// [`stop`](Self::stop) is called or the `RafLoop` is dropped. At most one
/// request is ever outstanding.
pub struct RafLoop {
    inner: Rc<RafInner>,
}

type RafClosure = Closure<dyn FnMut(f64)>;

struct RafInner {
    /// The JS closure registered with `requestAnimationFrame`.
    ///
    /// Created lazily on the first start and reused across restarts.
    closure: RefCell<Option<RafClosure>>,

    /// The user-supplied callback.
    callback: RefCell<Box<dyn FnMut(HostTime)>>,

    /// Outstanding request, if running.
    frame_loop: Cell<FrameLoop>,
}

impl RafInner {
    /// Runs `f` against the loop state with a scheduler bound to our closure.
    fn with_scheduler<R>(
        &self,
        f: impl FnOnce(&mut FrameLoop, &mut RafScheduler<'_>) -> R,
    ) -> Option<R> {
        let closure = self.closure.borrow();
        let callback = closure.as_ref()?.as_ref();
        let mut frame_loop = self.frame_loop.get();
        let result = f(&mut frame_loop, &mut RafScheduler { callback });
        self.frame_loop.set(frame_loop);
        Some(result)
    }
}

impl RafLoop {
    /// Creates a new `RafLoop` that is **not yet running**.
    ///
    /// `callback` receives the frame time on each animation frame once
    /// [`start`](Self::start) is called.
    pub fn new(callback: impl FnMut(HostTime) + 'static) -> Self {
        Self {
            inner: Rc::new(RafInner {
                closure: RefCell::new(None),
                callback: RefCell::new(Box::new(callback)),
                frame_loop: Cell::new(FrameLoop::new()),
            }),
        }
    }

    /// Starts the loop. Returns `false` if it was already running.
    pub fn start(&self) -> bool {
        if self.inner.frame_loop.get().is_running() {
            return false;
        }
        self.ensure_closure();
        self.inner
            .with_scheduler(|frame_loop, scheduler| frame_loop.start(scheduler))
            .unwrap_or(false)
    }

    /// Stops the loop, cancelling the pending callback.
    ///
    /// Returns `false` if it was already stopped. Can be restarted by calling
    /// [`start`](Self::start) again.
    pub fn stop(&self) -> bool {
        self.inner
            .with_scheduler(|frame_loop, scheduler| frame_loop.stop(scheduler))
            .unwrap_or(false)
    }

    /// Starts or stops the loop to match page visibility.
    ///
    /// Returns `true` if the running state changed.
    pub fn sync_visibility(&self, visibility: Visibility) -> bool {
        if visibility == Visibility::Visible {
            self.ensure_closure();
        }
        self.inner
            .with_scheduler(|frame_loop, scheduler| {
                frame_loop.sync_visibility(visibility, scheduler)
            })
            .unwrap_or(false)
    }

    /// Returns `true` if the loop is currently running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.frame_loop.get().is_running()
    }

    fn ensure_closure(&self) {
        if self.inner.closure.borrow().is_some() {
            return;
        }
        let inner = Rc::clone(&self.inner);
        let closure = Closure::wrap(Box::new(move |timestamp_ms: f64| {
            if !inner.frame_loop.get().is_running() {
                return;
            }

            // The borrow is scoped so the callback may stop the loop.
            inner.callback.borrow_mut()(HostTime::from_millis_f64(timestamp_ms));

            inner.with_scheduler(|frame_loop, scheduler| frame_loop.rearm(scheduler));
        }) as Box<dyn FnMut(f64)>);
        *self.inner.closure.borrow_mut() = Some(closure);
    }
}

impl Drop for RafLoop {
    fn drop(&mut self) {
        self.stop();
        // Drop the JS closure so it doesn't leak.
        self.inner.closure.borrow_mut().take();
    }
}

impl core::fmt::Debug for RafLoop {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RafLoop")
            .field("running", &self.is_running())
            .field("pending", &self.inner.frame_loop.get().pending())
            .finish_non_exhaustive()
    }
}
