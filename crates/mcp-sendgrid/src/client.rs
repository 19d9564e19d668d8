//! `SendGrid` v3 HTTP delivery client.
//!
//! # Examples
//!
//! ```no_run
//! use sendgrid_mcp_client::{DeliveryClient, SendGridClient};
//! use sendgrid_mcp_core::{Config, validate_email_request};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::builder()
//!     .api_key("SG.xxxxx")
//!     .from_email("noreply@example.com")
//!     .build()?;
//! let client = SendGridClient::new(&config)?;
//!
//! let request = validate_email_request(&json!({
//!     "to": "user@example.com",
//!     "subject": "Hello",
//!     "text": "Hi there",
//! }))?;
//!
//! let receipt = client.send(&request).await?;
//! println!("{} {}", receipt.status_code, receipt.message_id);
//! # Ok(())
//! # }
//! ```

use crate::delivery::DeliveryClient;
use crate::error::{DeliveryError, Result};
use crate::message::MailSendPayload;
use crate::response::{first_error_message, message_id};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use sendgrid_mcp_core::{Config, DeliveryReceipt, EmailAddress, EmailRequest};
use std::time::Duration;

/// Path of the send endpoint relative to the API base URL.
pub const MAIL_SEND_PATH: &str = "/v3/mail/send";

/// Delivery client for the `SendGrid` v3 `mail/send` endpoint.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct SendGridClient {
    http: Client,
    endpoint: String,
    api_key: SecretString,
    from_email: EmailAddress,
    timeout: Option<Duration>,
}

impl SendGridClient {
    /// Creates a client from the process configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::Unexpected`] if the HTTP client cannot be
    /// initialized (e.g. no TLS backend available).
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("sendgrid-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DeliveryError::Unexpected {
                message: format!("failed to initialize HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            endpoint: format!("{}{MAIL_SEND_PATH}", config.api_base_url()),
            api_key: SecretString::from(config.api_key().expose_secret().to_owned()),
            from_email: config.from_email().clone(),
            timeout: config.request_timeout(),
        })
    }

    /// Full URL of the send endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post(&self, request: &EmailRequest) -> Result<DeliveryReceipt> {
        let payload = MailSendPayload::new(&self.from_email, request);

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .json(&payload)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if status.is_success() {
            let receipt = DeliveryReceipt::new(status.as_u16(), message_id(response.headers()));
            tracing::info!(
                status = receipt.status_code,
                message_id = %receipt.message_id,
                "message accepted by SendGrid"
            );
            return Ok(receipt);
        }

        // A body that cannot be read still leaves the status to report.
        let message = match response.bytes().await {
            Ok(body) => first_error_message(&body),
            Err(e) => {
                tracing::debug!(error = %e.without_url(), "failed to read SendGrid error body");
                None
            }
        };

        tracing::warn!(
            status = status.as_u16(),
            provider_message = message.as_deref().unwrap_or("<none>"),
            "SendGrid rejected message"
        );

        Err(DeliveryError::Provider {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl DeliveryClient for SendGridClient {
    async fn send(&self, request: &EmailRequest) -> Result<DeliveryReceipt> {
        let Some(timeout) = self.timeout else {
            return self.post(request).await;
        };

        tokio::time::timeout(timeout, self.post(request))
            .await
            .map_err(|_| {
                tracing::warn!(timeout_secs = timeout.as_secs(), "SendGrid call timed out");
                DeliveryError::Timeout {
                    duration_secs: timeout.as_secs(),
                }
            })?
    }
}

/// Maps a failed exchange to a delivery error.
///
/// URLs are stripped from the message; the credential only ever travels in
/// a header and is never part of an error.
fn map_reqwest_error(error: reqwest::Error) -> DeliveryError {
    let error = error.without_url();
    if error.is_builder() {
        return DeliveryError::Unexpected {
            message: format!("failed to build SendGrid request: {error}"),
        };
    }

    tracing::warn!(error = %error, "SendGrid request failed");
    DeliveryError::Transport {
        reason: error.to_string(),
    }
}
