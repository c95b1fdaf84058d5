//! Error types for the client seam.
//!
//! Casters never surface these to their callers directly: the message locator
//! and the invite caster inspect them to decide between "no match" and
//! "stop searching". Framework-level errors (like `CastError`) are defined in
//! castkit-framework.

use thiserror::Error;

/// Message prefix the platform uses when it rejects a request as structurally
/// invalid.
pub const DEFAULT_MALFORMED_REQUEST_PREFIX: &str = "Invalid Form Body";

/// Error type for remote fetches performed through a [`Client`](crate::Client).
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The client is not connected.
    #[error("client is not connected")]
    NotConnected,

    /// The request timed out.
    #[error("request timed out")]
    Timeout,

    /// The requested object does not exist (or is not visible).
    #[error("Unknown {resource}")]
    NotFound {
        /// Kind of object that was requested, e.g. `"Message"`.
        resource: String,
    },

    /// The request was rate limited.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited {
        /// Suggested wait before retrying.
        retry_after_ms: u64,
    },

    /// The platform answered with an error status.
    ///
    /// The message is displayed verbatim so that message-prefix checks see
    /// exactly what the platform sent.
    #[error("{message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error message returned by the platform.
        message: String,
    },

    /// Failed to serialize/deserialize.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl ApiError {
    /// Creates a not-found error for the given resource kind.
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Creates an HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Returns `true` if the request itself was rejected as malformed.
    ///
    /// Detection is by message prefix only: such a request cannot succeed
    /// against any other target either.
    pub fn is_malformed_request(&self, prefix: &str) -> bool {
        !prefix.is_empty() && self.to_string().starts_with(prefix)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// Result type for remote fetches.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_request_detection() {
        let err = ApiError::http(
            400,
            "Invalid Form Body\nmessage_id: Value \"abc\" is not snowflake.",
        );
        assert!(err.is_malformed_request(DEFAULT_MALFORMED_REQUEST_PREFIX));

        let err = ApiError::not_found("Message");
        assert!(!err.is_malformed_request(DEFAULT_MALFORMED_REQUEST_PREFIX));
        assert_eq!(err.to_string(), "Unknown Message");
    }

    #[test]
    fn test_empty_prefix_never_matches() {
        let err = ApiError::http(400, "Invalid Form Body");
        assert!(!err.is_malformed_request(""));
    }
}
