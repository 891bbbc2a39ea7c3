//! Error types for domwait

use thiserror::Error;

/// Result type for domwait operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for domwait
#[derive(Debug, Error)]
pub enum Error {
    /// A wait did not reach its goal within the budget.
    ///
    /// Raised only by the assertive `wait_for_*` operations. Query-style
    /// operations report timeouts as a negative result instead.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// An explicit precondition was violated (bad target index, expected
    /// target count never reached). Never swallowed.
    #[error("Assertion failed: {0}")]
    Assertion(String),

    /// The underlying driver call itself errored, as opposed to the probed
    /// condition merely not being true yet.
    #[error("Driver error in {operation}: {message}")]
    Driver { operation: String, message: String },

    /// A poll configuration violated its invariants.
    #[error("Invalid poll config: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Create a timeout error
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout(message.into())
    }

    /// Create an assertion error
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::Assertion(message.into())
    }

    /// Create a driver error with operation context
    pub fn driver(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Driver {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Check if this is a timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout(_))
    }
}
