//! Delivery seam between the dispatcher and the email provider.

use crate::error::Result;
use async_trait::async_trait;
use sendgrid_mcp_core::{DeliveryReceipt, EmailRequest};

/// Sends validated, sanitized email requests.
///
/// Implementations must be `Send + Sync`: one instance serves every tool
/// call, possibly concurrently. The sender address is fixed by the
/// implementation and never taken from the request.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use sendgrid_mcp_client::{DeliveryClient, Result};
/// use sendgrid_mcp_core::{DeliveryReceipt, EmailRequest};
///
/// struct AlwaysAccepts;
///
/// #[async_trait]
/// impl DeliveryClient for AlwaysAccepts {
///     async fn send(&self, _request: &EmailRequest) -> Result<DeliveryReceipt> {
///         Ok(DeliveryReceipt::new(202, None))
///     }
/// }
/// ```
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait DeliveryClient: Send + Sync {
    /// Delivers one message.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::DeliveryError`] if the provider rejects the
    /// message, the request cannot reach the provider, or the call times out.
    async fn send(&self, request: &EmailRequest) -> Result<DeliveryReceipt>;
}

/// Delivery client that never leaves the process.
///
/// Used in test mode when no API key is configured: every request is
/// logged and acknowledged with [`DryRunClient::STATUS`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunClient;

impl DryRunClient {
    /// Status reported for every accepted request.
    pub const STATUS: u16 = 202;

    /// Message id reported for every accepted request.
    pub const MESSAGE_ID: &'static str = "dry-run";
}

#[async_trait]
impl DeliveryClient for DryRunClient {
    async fn send(&self, request: &EmailRequest) -> Result<DeliveryReceipt> {
        tracing::info!(
            to = %request.to(),
            has_text = request.text().is_some(),
            has_html = request.html().is_some(),
            "dry run: message not sent"
        );
        Ok(DeliveryReceipt::new(
            Self::STATUS,
            Some(Self::MESSAGE_ID.to_string()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sendgrid_mcp_core::validate_email_request;
    use serde_json::json;

    #[tokio::test]
    async fn test_dry_run_acknowledges() {
        let request = validate_email_request(&json!({
            "to": "user@example.com",
            "subject": "Hi",
            "text": "hello",
        }))
        .unwrap();

        let receipt = DryRunClient.send(&request).await.unwrap();
        assert_eq!(receipt.status_code, 202);
        assert_eq!(receipt.message_id, "dry-run");
    }

    #[tokio::test]
    async fn test_mock_client_usable_as_trait_object() {
        let mut mock = MockDeliveryClient::new();
        mock.expect_send()
            .times(1)
            .returning(|_| Ok(DeliveryReceipt::new(202, Some("m-1".to_string()))));

        let client: Box<dyn DeliveryClient> = Box::new(mock);
        let request = validate_email_request(&json!({
            "to": "user@example.com",
            "subject": "Hi",
            "text": "hello",
        }))
        .unwrap();

        let receipt = client.send(&request).await.unwrap();
        assert_eq!(receipt.message_id, "m-1");
    }
}
