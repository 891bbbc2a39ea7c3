//! Stability Detector
//!
//! Declares an element "stable" once its on-screen position stops changing
//! across a required number of consecutive samples. Used before interacting
//! with elements that slide or animate into place.

use std::cell::Cell;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::driver::{Driver, ElementHandle, Position};
use crate::error::Result;
use crate::poll::{poll, PollConfig, ProbeOutcome};
use crate::timeouts::SMALL_TIMEOUT_MS;

/// Options for [`wait_for_stable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilityOptions {
    /// Total budget, measured from the initial sample. The settle delay
    /// counts against it.
    pub timeout_ms: u64,
    /// Consecutive unchanged samples required.
    pub required_consecutive_hits: u32,
    /// Spacing between comparison samples.
    pub sample_delay_ms: u64,
    /// Pause between the initial sample and the first comparison, giving
    /// animations a moment to start moving the element.
    pub settle_delay_ms: u64,
    /// When true, two consecutive samples with no bounding box compare as
    /// equal, so an element that animates out of view can count as stable.
    /// Off by default: a missing box never contributes to the streak.
    pub treat_missing_as_stable: bool,
}

impl Default for StabilityOptions {
    fn default() -> Self {
        Self {
            timeout_ms: SMALL_TIMEOUT_MS,
            required_consecutive_hits: 3,
            sample_delay_ms: 100,
            settle_delay_ms: 200,
            treat_missing_as_stable: false,
        }
    }
}

impl StabilityOptions {
    /// Default options with a custom budget.
    pub fn with_timeout(timeout_ms: u64) -> Self {
        Self {
            timeout_ms,
            ..Default::default()
        }
    }
}

fn samples_match(previous: Option<Position>, current: Option<Position>, missing_ok: bool) -> bool {
    match (previous, current) {
        (Some(a), Some(b)) => a == b,
        (None, None) => missing_ok,
        _ => false,
    }
}

/// Wait until the element's position is unchanged for
/// `required_consecutive_hits` consecutive samples.
///
/// Each sample is compared to the previous one, not to the first: an element
/// that drifts and then settles still stabilizes. A changed position resets
/// the streak to zero.
///
/// Returns `Ok(false)` on timeout (with an error-level diagnostic), never a
/// timeout error. Driver failures while measuring propagate.
pub async fn wait_for_stable(
    driver: &dyn Driver,
    element: &ElementHandle,
    options: &StabilityOptions,
) -> Result<bool> {
    let initial = driver.measure_position(element).await?;
    tokio::time::sleep(Duration::from_millis(options.settle_delay_ms)).await;

    let previous = Cell::new(initial);
    let previous_ref = &previous;
    let missing_ok = options.treat_missing_as_stable;

    let config = PollConfig {
        interval_ms: options.sample_delay_ms,
        // The settle delay spends part of the budget.
        timeout_ms: options.timeout_ms.saturating_sub(options.settle_delay_ms),
        required_consecutive_hits: options.required_consecutive_hits,
    };

    let result = poll(
        move || async move {
            let current = driver.measure_position(element).await?;
            let matched = samples_match(previous_ref.get(), current, missing_ok);
            previous_ref.set(current);
            Ok(if matched {
                ProbeOutcome::Hit(current)
            } else {
                ProbeOutcome::Miss(current)
            })
        },
        &config,
    )
    .await?;

    if !result.succeeded {
        tracing::error!(
            element = %element,
            timeout_ms = options.timeout_ms,
            last_position = ?result.last_value.flatten(),
            "element did not stabilize within budget"
        );
    }
    Ok(result.succeeded)
}
