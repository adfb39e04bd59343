// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Language toggle state.
//!
//! Tags are compared by their primary subtag only, lowercased: `"EN-us"`,
//! `"en_GB"` and `"en"` all select the same content.

use alloc::string::String;

/// Reduces a language tag to its lowercase primary subtag.
///
/// Returns `None` for tags with an empty or non-alphabetic primary subtag.
#[must_use]
pub fn normalize_tag(tag: &str) -> Option<String> {
    let primary = tag.trim().split(['-', '_']).next()?;
    if primary.is_empty() || !primary.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some(primary.to_ascii_lowercase())
}

/// The active page language.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageSelection {
    active: String,
}

impl LanguageSelection {
    /// Starts with `initial`, falling back to `fallback` if it does not
    /// normalize.
    #[must_use]
    pub fn new(initial: &str, fallback: &str) -> Self {
        let active = normalize_tag(initial)
            .or_else(|| normalize_tag(fallback))
            .unwrap_or_else(|| String::from("en"));
        Self { active }
    }

    /// Active primary subtag.
    #[must_use]
    pub fn active(&self) -> &str {
        &self.active
    }

    /// Whether `tag` selects the active language.
    #[must_use]
    pub fn matches(&self, tag: &str) -> bool {
        normalize_tag(tag).is_some_and(|t| t == self.active)
    }

    /// Switches to `tag`. Returns `true` if the active language changed.
    pub fn select(&mut self, tag: &str) -> bool {
        match normalize_tag(tag) {
            Some(tag) if tag != self.active => {
                self.active = tag;
                true
            }
            _ => false,
        }
    }
}
