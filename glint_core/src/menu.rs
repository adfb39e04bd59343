// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mobile navigation menu.

use crate::input::Key;

/// Open/closed state of the navigation panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MenuState {
    /// Panel hidden.
    #[default]
    Closed,
    /// Panel shown.
    Open,
}

impl MenuState {
    /// Whether the panel is shown.
    #[inline]
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    /// Flips the state and returns the new one.
    pub fn toggle(&mut self) -> Self {
        *self = match self {
            Self::Closed => Self::Open,
            Self::Open => Self::Closed,
        };
        *self
    }

    /// Closes the panel. Returns `true` if it was open.
    pub fn close(&mut self) -> bool {
        core::mem::replace(self, Self::Closed).is_open()
    }

    /// Closes on Escape. Returns `true` if the key closed the panel.
    pub fn handle_key(&mut self, key: Key) -> bool {
        key == Key::Escape && self.close()
    }

    /// Closes when the viewport grows past the compact breakpoint, where the
    /// full navigation is always visible.
    pub fn viewport_changed(&mut self, compact: bool) -> bool {
        !compact && self.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_alternates() {
        let mut menu = MenuState::default();
        assert_eq!(menu.toggle(), MenuState::Open);
        assert!(menu.is_open());
        assert_eq!(menu.toggle(), MenuState::Closed);
    }

    #[test]
    fn close_reports_change() {
        let mut menu = MenuState::Open;
        assert!(menu.close());
        assert!(!menu.close(), "already closed");
    }

    #[test]
    fn escape_closes_only_when_open() {
        let mut menu = MenuState::Closed;
        assert!(!menu.handle_key(Key::Escape));
        menu.toggle();
        assert!(!menu.handle_key(Key::ArrowLeft), "other keys ignored");
        assert!(menu.handle_key(Key::Escape));
        assert_eq!(menu, MenuState::Closed);
    }

    #[test]
    fn leaving_compact_viewport_closes() {
        let mut menu = MenuState::Open;
        assert!(!menu.viewport_changed(true), "still compact");
        assert!(menu.is_open());
        assert!(menu.viewport_changed(false));
        assert!(!menu.is_open());
    }
}
