//! Error types for the `SendGrid` MCP server.
//!
//! Each failure class of a `send_email` call has its own type so that the
//! dispatcher can map it to the right user-facing message:
//!
//! - [`ValidationError`]: caller input failed schema or semantic rules
//! - [`ConfigError`]: required startup configuration is missing or invalid
//! - [`EmailAddressError`]: a string is not an acceptable email address
//!
//! Delivery failures live next to the delivery client in
//! `sendgrid-mcp-client`.
//!
//! # Examples
//!
//! ```
//! use sendgrid_mcp_core::{FieldViolation, ValidationError};
//!
//! let err = ValidationError::new(vec![
//!     FieldViolation::new("to", "Invalid email address"),
//!     FieldViolation::new("subject", "Subject cannot be empty"),
//! ]);
//!
//! assert_eq!(
//!     err.to_string(),
//!     "to: Invalid email address; subject: Subject cannot be empty"
//! );
//! ```

use std::fmt;
use thiserror::Error;

/// Separator placed between violations when a [`ValidationError`] is rendered.
pub const VIOLATION_SEPARATOR: &str = "; ";

/// A single rule violated by one field of a tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Field path, or `(root)` for object-level rules
    pub path: String,

    /// Human-readable description of the violation
    pub message: String,
}

impl FieldViolation {
    /// Creates a new violation for `path`.
    #[must_use]
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Tool call arguments failed validation.
///
/// Carries every violation found, in reporting order, not just the first.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// Creates a validation error from the collected violations.
    #[must_use]
    pub const fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    /// Returns the violations in reporting order.
    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Returns `true` if any violation is reported for `path`.
    #[must_use]
    pub fn has_violation_for(&self, path: &str) -> bool {
        self.violations.iter().any(|v| v.path == path)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str(VIOLATION_SEPARATOR)?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

/// Startup configuration error.
///
/// Fatal for the server process outside of test mode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required value was not provided.
    #[error("missing required configuration value: {name}")]
    Missing {
        /// Name of the missing setting (environment variable name)
        name: &'static str,
    },

    /// A value was provided but is unusable.
    #[error("invalid configuration value for {name}: {reason}")]
    Invalid {
        /// Name of the rejected setting (environment variable name)
        name: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}

impl ConfigError {
    /// Returns the name of the offending setting.
    #[must_use]
    pub const fn setting(&self) -> &'static str {
        match self {
            Self::Missing { name } | Self::Invalid { name, .. } => name,
        }
    }
}

/// A string could not be parsed as an email address.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailAddressError {
    /// The input was empty.
    #[error("email address is empty")]
    Empty,

    /// The input does not match the address grammar.
    #[error("email address is invalid")]
    Invalid,

    /// The input is longer than an address may be.
    #[error("email address exceeds {max} characters")]
    TooLong {
        /// Maximum accepted length
        max: usize,
    },
}
