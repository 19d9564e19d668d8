//! Delivery error types.
//!
//! # Examples
//!
//! ```
//! use sendgrid_mcp_client::DeliveryError;
//!
//! let err = DeliveryError::Provider {
//!     status: 400,
//!     message: Some("Invalid recipient".to_string()),
//! };
//! assert_eq!(err.status(), Some(400));
//! assert!(err.is_provider_error());
//! ```

use thiserror::Error;

/// Delivery failure.
///
/// None of the variants carry the API key or the raw provider payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// The provider answered with a non-success status.
    #[error("provider rejected the message (status {status})")]
    Provider {
        /// HTTP status returned by the provider
        status: u16,
        /// First error message from the provider's error list, if any
        message: Option<String>,
    },

    /// The request never produced a provider response.
    ///
    /// Covers connection, DNS, TLS and body read failures; the provider
    /// status is unknown.
    #[error("transport error: {reason}")]
    Transport {
        /// Description of the failure
        reason: String,
    },

    /// The delivery call exceeded the configured bound.
    #[error("delivery timed out after {duration_secs}s")]
    Timeout {
        /// Configured bound in seconds
        duration_secs: u64,
    },

    /// Anything else, e.g. a request that could not be built.
    #[error("{message}")]
    Unexpected {
        /// Description of the failure
        message: String,
    },
}

impl DeliveryError {
    /// Returns the provider status, or `None` when it is unknown.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Provider { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if the provider rejected the message.
    #[must_use]
    pub const fn is_provider_error(&self) -> bool {
        matches!(self, Self::Provider { .. })
    }

    /// Returns `true` if the failure happened before a response arrived.
    #[must_use]
    pub const fn is_transport_error(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Returns `true` if the call timed out.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Result type alias for delivery operations.
pub type Result<T> = std::result::Result<T, DeliveryError>;
