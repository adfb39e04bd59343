// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page scroll suppression shared by overlays.

use alloc::rc::Rc;
use alloc::string::String;
use core::cell::RefCell;

use wasm_bindgen::JsCast as _;
use web_sys::{Document, HtmlElement};

/// Reference-counted `overflow: hidden` on the document element.
///
/// The first holder saves the previous inline `overflow` value, the last
/// holder to release restores it. Clones share the count.
#[derive(Clone)]
pub struct ScrollLock {
    inner: Rc<RefCell<ScrollLockInner>>,
}

struct ScrollLockInner {
    root: HtmlElement,
    holders: u32,
    saved: String,
}

impl ScrollLock {
    /// Binds to `document.documentElement`.
    #[must_use]
    pub fn new(document: &Document) -> Option<Self> {
        let root = document.document_element()?.dyn_into::<HtmlElement>().ok()?;
        Some(Self {
            inner: Rc::new(RefCell::new(ScrollLockInner {
                root,
                holders: 0,
                saved: String::new(),
            })),
        })
    }

    /// A lease that holds this lock at most once.
    #[must_use]
    pub fn lease(&self) -> ScrollLease {
        ScrollLease {
            lock: self.clone(),
            held: false,
        }
    }

    /// Whether any holder currently suppresses scrolling.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.inner.borrow().holders > 0
    }

    fn acquire(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.holders == 0 {
            let style = inner.root.style();
            inner.saved = style.get_property_value("overflow").unwrap_or_default();
            let _ = style.set_property("overflow", "hidden");
        }
        inner.holders += 1;
    }

    fn release(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.holders == 0 {
            return;
        }
        inner.holders -= 1;
        if inner.holders == 0 {
            let style = inner.root.style();
            if inner.saved.is_empty() {
                let _ = style.remove_property("overflow");
            } else {
                let _ = style.set_property("overflow", &inner.saved);
            }
        }
    }
}

impl core::fmt::Debug for ScrollLock {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ScrollLock")
            .field("holders", &inner.holders)
            .field("saved", &inner.saved)
            .finish_non_exhaustive()
    }
}

/// One holder's claim on a [`ScrollLock`]. Setting it twice is a no-op.
///
/// Dropping a held lease releases it.
#[derive(Debug)]
pub struct ScrollLease {
    lock: ScrollLock,
    held: bool,
}

impl ScrollLease {
    /// Holds or releases the lock.
    pub fn set(&mut self, held: bool) {
        if held == self.held {
            return;
        }
        self.held = held;
        if held {
            self.lock.acquire();
        } else {
            self.lock.release();
        }
    }
}

impl Drop for ScrollLease {
    fn drop(&mut self) {
        self.set(false);
    }
}
