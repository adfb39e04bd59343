// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Platform-neutral input samples.

use kurbo::Point;

/// Stable identity of one pointer (finger, pen, mouse) for the duration of a
/// contact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PointerId(pub i32);

/// A pointer event reduced to what the gesture engine consumes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    /// Which pointer produced the event.
    pub id: PointerId,
    /// Client-space position in CSS pixels.
    pub position: Point,
}

impl PointerSample {
    /// Creates a sample.
    #[must_use]
    pub const fn new(id: PointerId, x: f64, y: f64) -> Self {
        Self {
            id,
            position: Point::new(x, y),
        }
    }
}

/// Keys the page features react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// `Escape` (also the legacy `Esc`).
    Escape,
    /// `ArrowLeft` (also the legacy `Left`).
    ArrowLeft,
    /// `ArrowRight` (also the legacy `Right`).
    ArrowRight,
    /// Anything else.
    Other,
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => Self::Escape,
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            _ => Self::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_key_names() {
        assert_eq!(Key::from_dom_key("Escape"), Key::Escape);
        assert_eq!(Key::from_dom_key("Esc"), Key::Escape);
        assert_eq!(Key::from_dom_key("ArrowLeft"), Key::ArrowLeft);
        assert_eq!(Key::from_dom_key("Right"), Key::ArrowRight);
        assert_eq!(Key::from_dom_key("a"), Key::Other);
        assert_eq!(Key::from_dom_key("escape"), Key::Other, "case sensitive");
    }
}
