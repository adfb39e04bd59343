// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot capability detection.

use web_sys::{Navigator, Window};

use glint_core::capability::Capabilities;

use crate::config::CapabilityQueries;

/// Queries media features and the navigator once.
///
/// Any query the browser cannot answer counts as "not matched", which errs
/// towards full fidelity.
#[must_use]
pub fn detect_capabilities(window: &Window, queries: &CapabilityQueries) -> Capabilities {
    let navigator = window.navigator();
    Capabilities {
        reduced_motion: media_matches(window, queries.reduced_motion),
        compact_viewport: media_matches(window, queries.compact_viewport),
        constrained_environment: media_matches(window, queries.coarse_pointer)
            || navigator_is_ios(&navigator),
        low_concurrency: is_low_concurrency(
            navigator.hardware_concurrency(),
            queries.low_concurrency_cores,
        ),
    }
}

/// Evaluates a media query, treating failures as no match.
pub(crate) fn media_matches(window: &Window, query: &str) -> bool {
    window
        .match_media(query)
        .ok()
        .flatten()
        .is_some_and(|list| list.matches())
}

fn navigator_is_ios(navigator: &Navigator) -> bool {
    let user_agent = navigator.user_agent().unwrap_or_default();
    let platform = navigator.platform().unwrap_or_default();
    is_ios_like(&user_agent, &platform, navigator.max_touch_points())
}

/// iOS and iPadOS detection. iPadOS reports itself as a touch-capable Mac.
fn is_ios_like(user_agent: &str, platform: &str, max_touch_points: i32) -> bool {
    ["iPad", "iPhone", "iPod"]
        .iter()
        .any(|device| user_agent.contains(device))
        || (platform == "MacIntel" && max_touch_points > 1)
}

/// `hardwareConcurrency` of 0 (or anything non-finite) means unknown.
fn is_low_concurrency(cores: f64, threshold: u32) -> bool {
    cores.is_finite() && cores >= 1.0 && cores <= f64::from(threshold)
}
