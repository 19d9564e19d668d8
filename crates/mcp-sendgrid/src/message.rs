//! `SendGrid` v3 `mail/send` payload.
//!
//! Borrowed views over a validated [`EmailRequest`]; nothing is copied until
//! the payload is serialized. The sender always comes from configuration.
//!
//! # Examples
//!
//! ```
//! use sendgrid_mcp_client::MailSendPayload;
//! use sendgrid_mcp_core::{EmailAddress, validate_email_request};
//! use serde_json::json;
//!
//! let from = EmailAddress::parse("noreply@example.com").unwrap();
//! let request = validate_email_request(&json!({
//!     "to": "user@example.com",
//!     "subject": "Hi",
//!     "text": "Hello",
//! }))
//! .unwrap();
//!
//! let payload = serde_json::to_value(MailSendPayload::new(&from, &request)).unwrap();
//! assert_eq!(payload["from"]["email"], "noreply@example.com");
//! assert_eq!(payload["content"][0]["type"], "text/plain");
//! ```

use sendgrid_mcp_core::{EmailAddress, EmailRequest};
use serde::Serialize;

/// MIME type of the plain-text body.
pub const TEXT_PLAIN: &str = "text/plain";

/// MIME type of the HTML body.
pub const TEXT_HTML: &str = "text/html";

/// Request body for `POST /v3/mail/send`.
#[derive(Debug, Serialize)]
pub struct MailSendPayload<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: Address<'a>,
    subject: &'a str,
    content: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: Vec<Address<'a>>,
}

#[derive(Debug, Serialize)]
struct Address<'a> {
    email: &'a str,
}

/// `SendGrid` requires `text/plain` to come before `text/html`.
#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    content_type: &'static str,
    value: &'a str,
}

impl<'a> MailSendPayload<'a> {
    /// Builds the payload for `request`, sent from `from`.
    ///
    /// Absent bodies are omitted rather than sent empty.
    #[must_use]
    pub fn new(from: &'a EmailAddress, request: &'a EmailRequest) -> Self {
        let content = [(TEXT_PLAIN, request.text()), (TEXT_HTML, request.html())]
            .into_iter()
            .filter_map(|(content_type, value)| {
                value.map(|value| Content {
                    content_type,
                    value,
                })
            })
            .collect();

        Self {
            personalizations: vec![Personalization {
                to: vec![Address {
                    email: request.to().as_str(),
                }],
            }],
            from: Address {
                email: from.as_str(),
            },
            subject: request.subject(),
            content,
        }
    }

    /// Sender address placed in the payload.
    #[must_use]
    pub const fn from_email(&self) -> &str {
        self.from.email
    }
}
