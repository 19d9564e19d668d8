//! Request pipeline behind the `send_email` tool.
//!
//! Validate, sanitize, deliver, and turn every outcome into a
//! [`CallToolResult`]. Failures are reported to the caller as `isError`
//! results, never as protocol errors.

use rmcp::model::{CallToolResult, Content};
use sendgrid_mcp_client::{DeliveryClient, DeliveryError};
use sendgrid_mcp_core::{DeliveryReceipt, ValidationError, validate_email_request};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Status placeholder used when the provider never answered.
const UNKNOWN_STATUS: &str = "unknown";

/// Runs one `send_email` call from raw arguments to tool result.
#[derive(Clone)]
pub struct Dispatcher {
    client: Arc<dyn DeliveryClient>,
}

impl Dispatcher {
    /// Creates a dispatcher delivering through `client`.
    #[must_use]
    pub const fn new(client: Arc<dyn DeliveryClient>) -> Self {
        Self { client }
    }

    /// Handles one call.
    ///
    /// The delivery client is only invoked for arguments that pass
    /// validation, and only with the sanitized request.
    pub async fn dispatch(&self, arguments: Value) -> CallToolResult {
        let request = match validate_email_request(&arguments) {
            Ok(request) => request.into_sanitized(),
            Err(err) => {
                tracing::info!(violations = err.violations().len(), "send_email rejected");
                return error_result(validation_message(&err));
            }
        };

        tracing::debug!(to = %request.to(), "delivering message");

        match self.client.send(&request).await {
            Ok(receipt) => CallToolResult::success(vec![Content::text(success_message(&receipt))]),
            Err(err) => {
                tracing::error!(error = %err, status = ?err.status(), "send_email failed");
                error_result(delivery_message(&err))
            }
        }
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

fn error_result(message: String) -> CallToolResult {
    CallToolResult::error(vec![Content::text(message)])
}

fn validation_message(err: &ValidationError) -> String {
    format!("Validation error: {err}")
}

fn success_message(receipt: &DeliveryReceipt) -> String {
    format!(
        "Email sent successfully! Status: {}, Message ID: {}",
        receipt.status_code, receipt.message_id
    )
}

fn delivery_message(err: &DeliveryError) -> String {
    match err {
        DeliveryError::Provider { status, message } => {
            sendgrid_message(&status.to_string(), message.as_deref())
        }
        DeliveryError::Transport { reason } => sendgrid_message(UNKNOWN_STATUS, Some(reason)),
        DeliveryError::Timeout { .. } | DeliveryError::Unexpected { .. } => {
            format!("Failed to send email: {err}")
        }
    }
}

fn sendgrid_message(status: &str, message: Option<&str>) -> String {
    match message {
        Some(message) => format!("SendGrid error (status: {status}): {message}"),
        None => format!("SendGrid error (status: {status})"),
    }
}
