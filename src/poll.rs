//! Condition Poller
//!
//! The shared primitive under every wait in this crate: sample a probe at a
//! fixed interval until it reports success enough times in a row, or the
//! deadline passes. Timeouts are a normal negative result, never an error;
//! only a failing probe raises.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::error::{Error, Result};
use crate::timeouts::{DEFAULT_POLL_INTERVAL_MS, SMALL_TIMEOUT_MS};

/// One probe sample: did the condition hold, and what was observed.
///
/// The value travels with the outcome so a failed poll can still report the
/// last thing it saw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProbeOutcome<T> {
    /// The condition held this sample.
    Hit(T),
    /// The condition did not hold this sample.
    Miss(T),
}

impl<T> ProbeOutcome<T> {
    /// The observed value, regardless of hit or miss.
    pub fn into_value(self) -> T {
        match self {
            ProbeOutcome::Hit(v) | ProbeOutcome::Miss(v) => v,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, ProbeOutcome::Hit(_))
    }
}

/// Budget and cadence for one poll invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Spacing between samples. Must be greater than zero.
    pub interval_ms: u64,
    /// Total budget, measured from the first sample.
    pub timeout_ms: u64,
    /// Consecutive hits required before the poll succeeds. Must be at least 1.
    pub required_consecutive_hits: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_POLL_INTERVAL_MS,
            timeout_ms: SMALL_TIMEOUT_MS,
            required_consecutive_hits: 1,
        }
    }
}

impl PollConfig {
    /// Single-hit config with the given budget and the default interval.
    pub fn with_timeout(timeout_ms: u64) -> Self {
        Self {
            timeout_ms,
            ..Default::default()
        }
    }

    /// Check the config invariants.
    pub fn validate(&self) -> Result<()> {
        if self.interval_ms == 0 {
            return Err(Error::InvalidConfig("interval_ms must be > 0".into()));
        }
        if self.required_consecutive_hits == 0 {
            return Err(Error::InvalidConfig(
                "required_consecutive_hits must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

/// Outcome of one poll invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollResult<T> {
    /// True only when the required consecutive hits were reached in budget.
    pub succeeded: bool,
    /// The most recently observed probe value, if any sample completed.
    pub last_value: Option<T>,
    /// Wall time from the first sample to the decision.
    pub elapsed_ms: u64,
}

/// Repeatedly sample `probe` until it hits `required_consecutive_hits` times
/// in a row or `timeout_ms` elapses.
///
/// The probe runs immediately, then every `interval_ms`. A miss resets the
/// hit streak to zero. The deadline is checked after each sample, so the
/// total elapsed time never exceeds the budget by more than one interval.
/// Samples are strictly sequential; between them the task yields to the
/// runtime via a cooperative sleep.
///
/// A timeout returns `succeeded = false` with the last observed value. Probe
/// errors propagate immediately and are never swallowed here; operations that
/// want swallow-and-retry semantics layer them on top (see the `is_element_*`
/// queries in [`crate::waiters`]).
pub async fn poll<T, F, Fut>(mut probe: F, config: &PollConfig) -> Result<PollResult<T>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<ProbeOutcome<T>>>,
{
    config.validate()?;

    let start = Instant::now();
    let deadline = start + Duration::from_millis(config.timeout_ms);
    let interval = Duration::from_millis(config.interval_ms);

    let mut streak: u32 = 0;
    let mut last_value: Option<T> = None;

    loop {
        match probe().await? {
            ProbeOutcome::Hit(value) => {
                streak += 1;
                last_value = Some(value);
                if streak >= config.required_consecutive_hits {
                    return Ok(PollResult {
                        succeeded: true,
                        last_value,
                        elapsed_ms: start.elapsed().as_millis() as u64,
                    });
                }
            }
            ProbeOutcome::Miss(value) => {
                streak = 0;
                last_value = Some(value);
            }
        }

        if Instant::now() >= deadline {
            return Ok(PollResult {
                succeeded: false,
                last_value,
                elapsed_ms: start.elapsed().as_millis() as u64,
            });
        }

        tokio::time::sleep(interval).await;
    }
}

/// Poll a boolean probe until it reports `true` once within the budget.
///
/// Convenience for the common single-hit case; the full [`poll`] contract
/// applies.
pub async fn poll_until<F, Fut>(mut probe: F, timeout_ms: u64, interval_ms: u64) -> Result<bool>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    let config = PollConfig {
        interval_ms,
        timeout_ms,
        required_consecutive_hits: 1,
    };
    let result = poll(
        move || {
            let fut = probe();
            async move {
                let hit = fut.await?;
                Ok(if hit {
                    ProbeOutcome::Hit(hit)
                } else {
                    ProbeOutcome::Miss(hit)
                })
            }
        },
        &config,
    )
    .await?;
    Ok(result.succeeded)
}
