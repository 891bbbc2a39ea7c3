//! # domwait
//!
//! Polling-based wait, stability, and target-selection primitives for browser
//! automation harnesses.
//!
//! The crate owns no browser plumbing. Everything that touches a page goes
//! through the [`Driver`] trait; this library layers reliability on top:
//!
//! - **Condition Poller** ([`poll`]) - sample a probe at an interval until it
//!   holds for N consecutive samples or the budget runs out. Timeouts are a
//!   normal negative result, not an error.
//! - **Stability Detector** ([`wait_for_stable`]) - an element is stable once
//!   its position stops changing across consecutive samples.
//! - **Waiters** ([`waiters`]) - assertive `wait_for_*` calls that raise on
//!   timeout, and `is_element_*` queries that never raise and are safe in
//!   conditionals.
//! - **Target Selector** ([`TargetSession`]) - per-session focused-tab state
//!   with count-polling `switch_to` and policy-driven close behavior.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use domwait::{
//!     is_element_visible, wait_for_stable, wait_for_visible, Driver, ElementHandle,
//!     StabilityOptions, SwitchOptions, TargetSession, WaitOptions,
//! };
//!
//! async fn example(driver: Arc<dyn Driver>) -> domwait::Result<()> {
//!     let button = ElementHandle::from("#submit");
//!
//!     // Assertive: raises Error::Timeout if the button never shows up.
//!     wait_for_visible(&*driver, &button, &WaitOptions::default()).await?;
//!
//!     // Let the slide-in animation finish before clicking.
//!     wait_for_stable(&*driver, &button, &StabilityOptions::default()).await?;
//!
//!     // Query form: safe inside conditionals, never raises.
//!     let banner = ElementHandle::from(".cookie-banner");
//!     if is_element_visible(&*driver, &banner, &WaitOptions::with_timeout(500)).await {
//!         // dismiss it...
//!     }
//!
//!     // Clicking the button opened a new tab; wait for it and focus it.
//!     let mut session = TargetSession::new(driver);
//!     session.switch_to(2, &SwitchOptions::default()).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Deterministic time
//!
//! All waiting goes through `tokio::time`, so tests can run under
//! `#[tokio::test(start_paused = true)]` and every polling delay resolves on
//! the virtual clock instead of the wall clock.

pub mod driver;
pub mod error;
pub mod poll;
pub mod selector;
pub mod stability;
pub mod timeouts;
pub mod waiters;

// Re-exports
pub use driver::{Driver, ElementHandle, ElementState, LoadState, Position, TargetHandle};
pub use error::{Error, Result};
pub use poll::{poll, poll_until, PollConfig, PollResult, ProbeOutcome};
pub use selector::{ClosePolicy, SwitchOptions, TargetSession};
pub use stability::{wait_for_stable, StabilityOptions};
pub use waiters::{
    check_element, is_element_attached, is_element_checked, is_element_hidden, is_element_visible,
    wait_for_attached, wait_for_detached, wait_for_hidden, wait_for_state, wait_for_visible,
    QueryOutcome, WaitOptions,
};
