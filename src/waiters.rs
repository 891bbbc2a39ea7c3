//! Visibility/Attachment Waiters
//!
//! Two families over the same poller:
//!
//! - `wait_for_*`: assertive, raise [`Error::Timeout`] when the state is not
//!   reached in budget. For test steps that must succeed.
//! - `is_element_*`: boolean queries for use inside conditionals. They never
//!   raise; a probe failure is logged and collapses to `false`.
//!
//! [`check_element`] is the explicit middle layer: it distinguishes "condition
//! false" from "probe errored" so callers that care can tell them apart.

use serde::{Deserialize, Serialize};

use crate::driver::{Driver, ElementHandle, ElementState};
use crate::error::{Error, Result};
use crate::poll::{poll, PollConfig, ProbeOutcome};
use crate::timeouts::{DEFAULT_POLL_INTERVAL_MS, SMALL_TIMEOUT_MS};

/// Budget and cadence for a single waiter call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitOptions {
    pub timeout_ms: u64,
    pub interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: SMALL_TIMEOUT_MS,
            interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    pub fn with_timeout(timeout_ms: u64) -> Self {
        Self {
            timeout_ms,
            ..Default::default()
        }
    }
}

/// Outcome of a boolean element query, before collapsing to `bool`.
#[derive(Debug)]
pub enum QueryOutcome {
    /// The state was observed within the budget.
    Satisfied,
    /// The budget elapsed without observing the state.
    Unsatisfied,
    /// The driver itself failed while probing.
    ProbeFailed(Error),
}

impl QueryOutcome {
    /// Collapse to the conservative boolean answer, logging the error branch.
    ///
    /// `context` names the calling query in the diagnostic.
    pub fn into_bool(self, context: &str) -> bool {
        match self {
            QueryOutcome::Satisfied => true,
            QueryOutcome::Unsatisfied => false,
            QueryOutcome::ProbeFailed(err) => {
                tracing::warn!(query = context, error = %err, "probe failed, reporting false");
                false
            }
        }
    }
}

async fn poll_state(
    driver: &dyn Driver,
    element: &ElementHandle,
    state: ElementState,
    options: &WaitOptions,
) -> Result<bool> {
    let config = PollConfig {
        interval_ms: options.interval_ms,
        timeout_ms: options.timeout_ms,
        required_consecutive_hits: 1,
    };
    let result = poll(
        move || async move {
            let observed = driver.query_state(element, state).await?;
            Ok(if observed {
                ProbeOutcome::Hit(observed)
            } else {
                ProbeOutcome::Miss(observed)
            })
        },
        &config,
    )
    .await?;
    Ok(result.succeeded)
}

/// Wait until the element reaches `state`, or fail with [`Error::Timeout`].
pub async fn wait_for_state(
    driver: &dyn Driver,
    element: &ElementHandle,
    state: ElementState,
    options: &WaitOptions,
) -> Result<()> {
    if poll_state(driver, element, state, options).await? {
        return Ok(());
    }
    Err(Error::timeout(format!(
        "element '{}' did not become {} within {}ms",
        element, state, options.timeout_ms
    )))
}

/// Wait until the element is attached to the DOM.
pub async fn wait_for_attached(
    driver: &dyn Driver,
    element: &ElementHandle,
    options: &WaitOptions,
) -> Result<()> {
    wait_for_state(driver, element, ElementState::Attached, options).await
}

/// Wait until the element is visible.
pub async fn wait_for_visible(
    driver: &dyn Driver,
    element: &ElementHandle,
    options: &WaitOptions,
) -> Result<()> {
    wait_for_state(driver, element, ElementState::Visible, options).await
}

/// Wait until the element is hidden or gone.
pub async fn wait_for_hidden(
    driver: &dyn Driver,
    element: &ElementHandle,
    options: &WaitOptions,
) -> Result<()> {
    wait_for_state(driver, element, ElementState::Hidden, options).await
}

/// Wait until the element is detached from the DOM.
pub async fn wait_for_detached(
    driver: &dyn Driver,
    element: &ElementHandle,
    options: &WaitOptions,
) -> Result<()> {
    wait_for_state(driver, element, ElementState::Detached, options).await
}

/// Poll for `state` and report the outcome without collapsing errors.
pub async fn check_element(
    driver: &dyn Driver,
    element: &ElementHandle,
    state: ElementState,
    options: &WaitOptions,
) -> QueryOutcome {
    match poll_state(driver, element, state, options).await {
        Ok(true) => QueryOutcome::Satisfied,
        Ok(false) => QueryOutcome::Unsatisfied,
        Err(err) => QueryOutcome::ProbeFailed(err),
    }
}

/// Whether the element becomes attached within the budget. Never raises.
pub async fn is_element_attached(
    driver: &dyn Driver,
    element: &ElementHandle,
    options: &WaitOptions,
) -> bool {
    check_element(driver, element, ElementState::Attached, options)
        .await
        .into_bool("is_element_attached")
}

/// Whether the element becomes visible within the budget. Never raises.
pub async fn is_element_visible(
    driver: &dyn Driver,
    element: &ElementHandle,
    options: &WaitOptions,
) -> bool {
    check_element(driver, element, ElementState::Visible, options)
        .await
        .into_bool("is_element_visible")
}

/// Whether the element becomes hidden within the budget. Never raises.
pub async fn is_element_hidden(
    driver: &dyn Driver,
    element: &ElementHandle,
    options: &WaitOptions,
) -> bool {
    check_element(driver, element, ElementState::Hidden, options)
        .await
        .into_bool("is_element_hidden")
}

/// Whether a checkbox/radio is checked. Never raises.
///
/// Confirms visibility first; an element that never becomes visible within
/// the budget reports `false` without probing checked state. The checked
/// probe itself is a single sample.
pub async fn is_element_checked(
    driver: &dyn Driver,
    element: &ElementHandle,
    options: &WaitOptions,
) -> bool {
    if !is_element_visible(driver, element, options).await {
        return false;
    }
    match driver.query_state(element, ElementState::Checked).await {
        Ok(checked) => checked,
        Err(err) => {
            tracing::warn!(query = "is_element_checked", error = %err, "probe failed, reporting false");
            false
        }
    }
}
