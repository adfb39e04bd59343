// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Staggered reveal of page sections on load.

use crate::capability::Capabilities;
use crate::time::Duration;

/// Stagger timing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealConfig {
    /// Delay added per element, in document order.
    pub step: Duration,
    /// Upper bound on any single delay.
    pub max_delay: Duration,
}

impl RevealConfig {
    /// 80 ms steps capped at 640 ms, or no stagger at all under reduced
    /// motion.
    #[must_use]
    pub const fn for_capabilities(caps: &Capabilities) -> Self {
        if caps.reduced_motion {
            Self {
                step: Duration::ZERO,
                max_delay: Duration::ZERO,
            }
        } else {
            Self {
                step: Duration::from_millis(80),
                max_delay: Duration::from_millis(640),
            }
        }
    }

    /// Transition delay of the `index`th element.
    #[must_use]
    pub fn stagger_delay(&self, index: usize) -> Duration {
        let index = u64::try_from(index).unwrap_or(u64::MAX);
        let delay = Duration(self.step.ticks().saturating_mul(index));
        delay.min(self.max_delay)
    }
}
