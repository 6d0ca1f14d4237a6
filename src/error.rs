//! Client Error Types
//!
//! This module defines the error taxonomy for every API call the client makes.
//!
//! # Error Categories
//!
//! - `Network` - no response was received (connectivity, DNS, timeout)
//! - `Unauthenticated` - the session is no longer valid (HTTP 401 or a
//!   recognized auth-error message in the response body)
//! - `Api` - the service answered with an error; carries the most specific
//!   message the response body offered
//! - `Decode` - the response arrived but its payload could not be decoded
//!
//! # Thread Safety
//!
//! All error types are `Send + Sync` and can be safely shared across thread
//! boundaries.

use thiserror::Error;

/// Message shown for failures where no response was received.
pub const NETWORK_FAILURE_MESSAGE: &str = "网络错误，请检查网络连接";

/// Message recorded when the session has expired or the token is invalid.
pub const UNAUTHENTICATED_MESSAGE: &str = "登录已过期，请重新登录";

/// Generic fallback when the response body offers no usable message.
pub const GENERIC_FAILURE_MESSAGE: &str = "请求失败";

/// Normalized error for a single API call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No response received from the service
    #[error("{message}")]
    Network {
        /// Human-readable error message
        message: String,
    },

    /// The session is not (or no longer) authenticated
    #[error("{message}")]
    Unauthenticated {
        /// Human-readable error message
        message: String,
    },

    /// The service answered with an error status or error envelope
    #[error("{message}")]
    Api {
        /// HTTP status, if the failure came with one (`None` for a 2xx
        /// response whose envelope carried a non-success business code)
        status: Option<u16>,
        /// Human-readable error message
        message: String,
    },

    /// The response payload could not be decoded into the expected shape
    #[error("{message}")]
    Decode {
        /// Human-readable error message
        message: String,
    },
}

impl ApiError {
    /// Create a network error with the standard connectivity message
    pub fn network() -> Self {
        Self::Network {
            message: NETWORK_FAILURE_MESSAGE.to_string(),
        }
    }

    /// Create an unauthenticated error with the standard expiry message
    pub fn unauthenticated() -> Self {
        Self::Unauthenticated {
            message: UNAUTHENTICATED_MESSAGE.to_string(),
        }
    }

    /// Create a service error from a status and extracted message
    pub fn api(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// The human-readable message carried by this error
    pub fn message(&self) -> &str {
        match self {
            Self::Network { message }
            | Self::Unauthenticated { message }
            | Self::Api { message, .. }
            | Self::Decode { message } => message,
        }
    }

    /// Whether this error represents an authentication failure
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::decode(format!("Failed to parse response: {}", err))
        } else {
            // Connect errors, timeouts, and anything else where no usable
            // response came back all surface as the connectivity message.
            tracing::debug!("network failure: {}", err);
            Self::network()
        }
    }
}
