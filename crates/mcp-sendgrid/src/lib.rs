//! `SendGrid` v3 delivery for the `SendGrid` MCP server.
//!
//! Provides the [`DeliveryClient`] seam used by the tool dispatcher, the
//! HTTP implementation talking to `POST /v3/mail/send`, and a dry-run
//! implementation for test mode.
//!
//! # Features
//!
//! - **Sender enforcement**: the `from` address always comes from
//!   configuration
//! - **Bounded calls**: optional timeout around the whole exchange
//! - **Tolerant response parsing**: malformed provider bodies degrade to a
//!   status-only error
//! - **Secret hygiene**: the API key only leaves the process in the
//!   `Authorization` header
//!
//! # Examples
//!
//! ```
//! use sendgrid_mcp_client::{DeliveryClient, DryRunClient};
//! use sendgrid_mcp_core::validate_email_request;
//! use serde_json::json;
//!
//! # async fn example() {
//! let request = validate_email_request(&json!({
//!     "to": "user@example.com",
//!     "subject": "Hello",
//!     "text": "Hi",
//! }))
//! .unwrap();
//!
//! let receipt = DryRunClient.send(&request).await.unwrap();
//! assert_eq!(receipt.status_code, 202);
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod client;
mod delivery;
mod error;
mod message;
pub mod response;

pub use client::{MAIL_SEND_PATH, SendGridClient};
#[cfg(any(test, feature = "mock"))]
pub use delivery::MockDeliveryClient;
pub use delivery::{DeliveryClient, DryRunClient};
pub use error::{DeliveryError, Result};
pub use message::{MailSendPayload, TEXT_HTML, TEXT_PLAIN};
