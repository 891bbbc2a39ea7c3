//! Page/Frame Selector
//!
//! Tracks the active target (the focused tab) for one automation session and
//! switches between targets as they open and close. One session owns one
//! active-target reference; create a session per test worker instead of
//! sharing one process-wide.
//!
//! Single-writer discipline: the session is the only writer of the active
//! target, but any helper that caches `active()` across an `.await` may race a
//! concurrent `switch_to`. Re-read the active target after suspension points
//! when switches can happen concurrently.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::driver::{Driver, LoadState, TargetHandle};
use crate::error::{Error, Result};
use crate::poll::{poll, PollConfig, PollResult, ProbeOutcome};
use crate::timeouts::{DEFAULT_POLL_INTERVAL_MS, SMALL_TIMEOUT_MS};

/// What happens to focus after closing a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosePolicy {
    /// Always revert to the first target after a close.
    #[default]
    AlwaysRevert,
    /// Revert only when more than one target existed before the close.
    RevertIfMultiple,
}

/// Options for [`TargetSession::switch_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchOptions {
    /// Budget for the expected target to appear.
    pub timeout_ms: u64,
    /// Spacing between target-count samples.
    pub interval_ms: u64,
    /// Load milestone to await on the target before switching focus.
    pub load_state: LoadState,
}

impl Default for SwitchOptions {
    fn default() -> Self {
        Self {
            timeout_ms: SMALL_TIMEOUT_MS,
            interval_ms: DEFAULT_POLL_INTERVAL_MS,
            load_state: LoadState::default(),
        }
    }
}

impl SwitchOptions {
    pub fn with_timeout(timeout_ms: u64) -> Self {
        Self {
            timeout_ms,
            ..Default::default()
        }
    }
}

/// Active-target state for one automation session.
pub struct TargetSession {
    driver: Arc<dyn Driver>,
    active: Option<TargetHandle>,
    close_policy: ClosePolicy,
}

impl TargetSession {
    /// Create a session with no active target and the default close policy.
    pub fn new(driver: Arc<dyn Driver>) -> Self {
        Self {
            driver,
            active: None,
            close_policy: ClosePolicy::default(),
        }
    }

    /// Set the close policy.
    pub fn with_close_policy(mut self, policy: ClosePolicy) -> Self {
        self.close_policy = policy;
        self
    }

    /// The currently active target, if any.
    pub fn active(&self) -> Option<&TargetHandle> {
        self.active.as_ref()
    }

    /// The underlying driver.
    pub fn driver(&self) -> &Arc<dyn Driver> {
        &self.driver
    }

    /// Switch to the `index`-th target (1-based), waiting up to
    /// `options.timeout_ms` for it to exist.
    ///
    /// Targets open asynchronously, so the target count is polled every
    /// `options.interval_ms`. Once present, the target's load state is
    /// awaited before it becomes the active target. If the count is already
    /// sufficient on the first sample, no sleep happens.
    ///
    /// Fails with [`Error::Assertion`] when `index` is zero or the expected
    /// count never appears; the message names the expected count and the
    /// elapsed time.
    pub async fn switch_to(&mut self, index: usize, options: &SwitchOptions) -> Result<()> {
        if index == 0 {
            return Err(Error::assertion("target index must be >= 1"));
        }

        let config = PollConfig {
            interval_ms: options.interval_ms,
            timeout_ms: options.timeout_ms,
            required_consecutive_hits: 1,
        };
        let driver = &*self.driver;
        let result = poll(
            move || async move {
                let targets = driver.list_targets().await?;
                Ok(if targets.len() >= index {
                    ProbeOutcome::Hit(targets)
                } else {
                    ProbeOutcome::Miss(targets)
                })
            },
            &config,
        )
        .await?;

        let targets = match result {
            PollResult {
                succeeded: true,
                last_value: Some(targets),
                ..
            } => targets,
            PollResult {
                elapsed_ms,
                last_value,
                ..
            } => {
                return Err(Error::assertion(format!(
                    "target {} not found after {}ms (saw {} targets)",
                    index,
                    elapsed_ms,
                    last_value.map_or(0, |t| t.len())
                )));
            }
        };

        let target = targets[index - 1].clone();
        self.driver
            .await_load_state(&target, options.load_state)
            .await?;
        self.active = Some(target);
        Ok(())
    }

    /// Switch back to the first target, bringing it to the foreground.
    ///
    /// No-op when no targets are open. Idempotent.
    pub async fn switch_to_default(&mut self) -> Result<()> {
        let targets = self.driver.list_targets().await?;
        if let Some(first) = targets.first() {
            self.driver.bring_to_front(first).await?;
            self.active = Some(first.clone());
        }
        Ok(())
    }

    /// Close a target by 1-based index, or the active target when `index` is
    /// `None`, then revert focus per the session's [`ClosePolicy`].
    pub async fn close(&mut self, index: Option<usize>) -> Result<()> {
        let open_before = self.driver.list_targets().await?.len();

        match index {
            None => {
                let active = self
                    .active
                    .clone()
                    .ok_or_else(|| Error::assertion("no active target to close"))?;
                self.driver.close_target(&active).await?;
                self.active = None;
            }
            Some(0) => {
                return Err(Error::assertion("target index must be >= 1"));
            }
            Some(n) => {
                let targets = self.driver.list_targets().await?;
                let target = targets.get(n - 1).ok_or_else(|| {
                    Error::assertion(format!(
                        "cannot close target {}: only {} open",
                        n,
                        targets.len()
                    ))
                })?;
                let closing_active = self.active.as_ref() == Some(target);
                self.driver.close_target(target).await?;
                if closing_active {
                    self.active = None;
                }
            }
        }

        let revert = match self.close_policy {
            ClosePolicy::AlwaysRevert => true,
            ClosePolicy::RevertIfMultiple => open_before > 1,
        };
        if revert {
            self.switch_to_default().await?;
        }
        Ok(())
    }
}
