// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM anchors and media queries.

/// CSS selectors every feature looks up.
///
/// A feature whose required anchor is missing stays inert.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selectors {
    /// Element receiving the ambient drift custom properties.
    pub ambient: &'static str,
    /// `feTurbulence` filter primitive driven by the turbulence step.
    pub turbulence: &'static str,
    /// Lightbox overlay container.
    pub lightbox: &'static str,
    /// `<img>` inside the overlay.
    pub lightbox_image: &'static str,
    /// Close button inside the overlay.
    pub lightbox_close: &'static str,
    /// Previous-item button inside the overlay.
    pub lightbox_prev: &'static str,
    /// Next-item button inside the overlay.
    pub lightbox_next: &'static str,
    /// Gallery triggers, in document order.
    pub lightbox_item: &'static str,
    /// Menu toggle button.
    pub menu_toggle: &'static str,
    /// Navigation panel opened by the toggle.
    pub menu_panel: &'static str,
    /// Language buttons; the attribute value is the language tag.
    pub language_button: &'static str,
    /// Localized content blocks; the attribute value is the language tag.
    pub language_content: &'static str,
    /// Sections revealed on load.
    pub reveal: &'static str,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            ambient: "[data-ambient]",
            turbulence: "[data-ambient-turbulence]",
            lightbox: "[data-lightbox]",
            lightbox_image: "[data-lightbox-image]",
            lightbox_close: "[data-lightbox-close]",
            lightbox_prev: "[data-lightbox-prev]",
            lightbox_next: "[data-lightbox-next]",
            lightbox_item: "[data-lightbox-item]",
            menu_toggle: "[data-menu-toggle]",
            menu_panel: "[data-menu]",
            language_button: "[data-lang]",
            language_content: "[data-lang-content]",
            reveal: "[data-reveal]",
        }
    }
}

/// Inputs to [`detect_capabilities`](crate::detect_capabilities).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CapabilityQueries {
    /// Media query for the reduced-motion preference.
    pub reduced_motion: &'static str,
    /// Media query matching compact viewports.
    pub compact_viewport: &'static str,
    /// Media query matching touch-primary devices.
    pub coarse_pointer: &'static str,
    /// Devices reporting this many logical cores or fewer are low
    /// concurrency.
    pub low_concurrency_cores: u32,
}

impl Default for CapabilityQueries {
    fn default() -> Self {
        Self {
            reduced_motion: "(prefers-reduced-motion: reduce)",
            compact_viewport: "(max-width: 768px)",
            coarse_pointer: "(hover: none) and (pointer: coarse)",
            low_concurrency_cores: 4,
        }
    }
}
