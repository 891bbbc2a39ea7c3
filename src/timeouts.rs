//! Named timeout tiers
//!
//! Wait budgets used as defaults across the crate. Every operation also takes
//! an explicit budget, so these are conventions rather than limits.

/// For checks that should answer almost immediately (existence, counts).
pub const INSTANT_TIMEOUT_MS: u64 = 1_000;

/// Default budget for element waits and target switching.
pub const SMALL_TIMEOUT_MS: u64 = 5_000;

/// For actions that trigger navigation or slow rendering.
pub const STANDARD_TIMEOUT_MS: u64 = 15_000;

/// For full page loads on slow pages.
pub const BIG_TIMEOUT_MS: u64 = 30_000;

/// Upper bound for anything; waits longer than this indicate a broken page.
pub const MAX_TIMEOUT_MS: u64 = 60_000;

/// Default spacing between poll samples.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;
