//! Strong domain types for the `SendGrid` MCP server.
//!
//! # Examples
//!
//! ```
//! use sendgrid_mcp_core::{DeliveryReceipt, EmailAddress};
//!
//! let to = EmailAddress::parse("user@example.com").unwrap();
//! assert_eq!(to.as_str(), "user@example.com");
//!
//! let receipt = DeliveryReceipt::new(202, None);
//! assert_eq!(receipt.message_id, "unknown");
//! ```

use crate::error::EmailAddressError;
use crate::sanitize::sanitize_html;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

/// Local part and dotted domain with an alphabetic top-level label.
///
/// Leading and doubled dots in the local part are rejected separately since
/// the regex engine has no look-around.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@(?:[A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("valid regex")
});

/// Validated email address (newtype over String).
///
/// The address is stored exactly as given.
///
/// # Examples
///
/// ```
/// use sendgrid_mcp_core::EmailAddress;
///
/// assert!(EmailAddress::parse("first.last+tag@mail.example.org").is_ok());
/// assert!(EmailAddress::parse("not an email").is_err());
/// assert!(EmailAddress::parse("missing-domain@").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Maximum length of an address (RFC 5321 path limit minus brackets).
    pub const MAX_LEN: usize = 254;

    /// Parses and validates an email address.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than
    /// [`EmailAddress::MAX_LEN`], contains whitespace, or does not match
    /// the `local-part@domain` grammar.
    pub fn parse(raw: &str) -> Result<Self, EmailAddressError> {
        if raw.is_empty() {
            return Err(EmailAddressError::Empty);
        }

        if raw.len() > Self::MAX_LEN {
            return Err(EmailAddressError::TooLong { max: Self::MAX_LEN });
        }

        let local = raw.split('@').next().unwrap_or_default();
        if local.starts_with('.') || local.contains("..") || !EMAIL_REGEX.is_match(raw) {
            return Err(EmailAddressError::Invalid);
        }

        Ok(Self(raw.to_string()))
    }

    /// Returns the address as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated `send_email` request.
///
/// Only constructed by [`crate::validate_email_request`], which guarantees
/// that the recipient is a valid address, the subject is not blank and at
/// least one of `text` / `html` is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailRequest {
    pub(crate) to: EmailAddress,
    pub(crate) subject: String,
    pub(crate) text: Option<String>,
    pub(crate) html: Option<String>,
}

impl EmailRequest {
    /// Recipient address.
    #[must_use]
    pub const fn to(&self) -> &EmailAddress {
        &self.to
    }

    /// Subject line.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Plain-text body, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// HTML body, if any.
    #[must_use]
    pub fn html(&self) -> Option<&str> {
        self.html.as_deref()
    }

    /// Returns the request with its HTML body sanitized.
    ///
    /// The plain-text body is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use sendgrid_mcp_core::validate_email_request;
    /// use serde_json::json;
    ///
    /// let request = validate_email_request(&json!({
    ///     "to": "user@example.com",
    ///     "subject": "Hi",
    ///     "text": "<script>kept as text</script>",
    ///     "html": "<p>Hello</p><script>alert(1)</script>",
    /// }))
    /// .unwrap()
    /// .into_sanitized();
    ///
    /// assert_eq!(request.html(), Some("<p>Hello</p>"));
    /// assert_eq!(request.text(), Some("<script>kept as text</script>"));
    /// ```
    #[must_use]
    pub fn into_sanitized(mut self) -> Self {
        self.html = self.html.map(|html| sanitize_html(&html));
        self
    }
}

/// Outcome of a successful delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryReceipt {
    /// HTTP status returned by the provider
    pub status_code: u16,

    /// Provider message identifier, or [`DeliveryReceipt::UNKNOWN_MESSAGE_ID`]
    pub message_id: String,
}

impl DeliveryReceipt {
    /// Placeholder used when the provider does not return a message id.
    pub const UNKNOWN_MESSAGE_ID: &'static str = "unknown";

    /// Creates a receipt, substituting the placeholder for a missing id.
    #[must_use]
    pub fn new(status_code: u16, message_id: Option<String>) -> Self {
        Self {
            status_code,
            message_id: message_id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| Self::UNKNOWN_MESSAGE_ID.to_string()),
        }
    }
}
