//! Core types, validation, sanitization and configuration for the `SendGrid`
//! MCP server.
//!
//! This crate holds everything the `send_email` pipeline needs that does not
//! touch the network or the MCP transport.
//!
//! # Architecture
//!
//! - Strong domain types (`EmailAddress`, `EmailRequest`, `DeliveryReceipt`)
//! - Validator turning raw tool arguments into an `EmailRequest`
//! - Idempotent HTML sanitizer for email bodies
//! - Immutable process configuration with startup validation
//! - Error taxonomy (`ValidationError`, `ConfigError`)
//!
//! # Examples
//!
//! ```
//! use sendgrid_mcp_core::validate_email_request;
//! use serde_json::json;
//!
//! let request = validate_email_request(&json!({
//!     "to": "user@example.com",
//!     "subject": "Welcome",
//!     "html": "<p>Hello</p><script>track()</script>",
//! }))
//! .unwrap()
//! .into_sanitized();
//!
//! assert_eq!(request.html(), Some("<p>Hello</p>"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod config;
mod error;
pub mod sanitize;
mod types;
pub mod validation;

pub use config::{Config, ConfigBuilder};
pub use error::{
    ConfigError, EmailAddressError, FieldViolation, VIOLATION_SEPARATOR, ValidationError,
};
pub use sanitize::sanitize_html;
pub use types::{DeliveryReceipt, EmailAddress, EmailRequest};
pub use validation::validate_email_request;
