//! Result and error types for the probing library.

use thiserror::Error;

/// Result type for probe operations
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Errors that can occur while probing a page
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunchError {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    NavigationError {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// Page-level error (script evaluation, lost connection)
    #[error("Page error: {message}")]
    PageError {
        /// Error message
        message: String,
    },

    /// Form-control value could not be read from the element.
    ///
    /// Local to a single read attempt; [`read_value`](crate::read_value)
    /// recovers by falling back to text content.
    #[error("Value read failed: {message}")]
    ValueReadError {
        /// Error message
        message: String,
    },

    /// Input simulation error
    #[error("Input simulation failed: {message}")]
    InputError {
        /// Error message
        message: String,
    },

    /// Screenshot error
    #[error("Screenshot failed: {message}")]
    ScreenshotError {
        /// Error message
        message: String,
    },

    /// Output never satisfied the observation condition within the deadline
    #[error("Poll timed out after {ms}ms")]
    PollTimeout {
        /// Timeout in milliseconds
        ms: u64,
    },

    /// An empty candidate chain was passed to element resolution
    #[error("Candidate chain is empty")]
    NoCandidates,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProbeError {
    /// Whether this error is the bounded-poll deadline expiring.
    #[must_use]
    pub const fn is_poll_timeout(&self) -> bool {
        matches!(self, Self::PollTimeout { .. })
    }
}
