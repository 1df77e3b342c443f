//! Unified error types for the courier gateway.
//!
//! Two layers: [`ApiError`] covers everything that can go wrong talking to
//! the platform, and [`Error`] is what handlers and the gateway surface to
//! the failure sink.

use thiserror::Error;

// =============================================================================
// API Errors
// =============================================================================

/// Errors from the platform API boundary.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The HTTP request itself failed (connect, timeout, body read).
    #[error("http request failed: {0}")]
    Http(String),

    /// The platform answered with an error envelope.
    #[error("api error ({code}): {description}")]
    Telegram {
        /// Platform error code.
        code: i64,
        /// Human-readable description from the platform.
        description: String,
    },

    /// The response could not be decoded into the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

// =============================================================================
// Gateway Errors
// =============================================================================

/// Errors surfaced by the gateway and its handlers.
#[derive(Debug, Error)]
pub enum Error {
    /// The context carries no chat or sender to address a message to.
    #[error("recipient is missing")]
    BadRecipient,

    /// The context does not contain a message.
    #[error("context does not contain a message")]
    BadContext,

    /// A retrieval batch could not be fetched.
    #[error("could not fetch new updates")]
    CouldNotUpdate(#[source] ApiError),

    /// An outbound API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Application-defined handler failure.
    #[error("{0}")]
    Other(String),
}

/// Result type for gateway operations and handlers.
pub type Result<T> = std::result::Result<T, Error>;

/// Result type for platform API calls.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
