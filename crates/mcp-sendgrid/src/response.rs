//! Extraction of delivery outcomes from `SendGrid` responses.
//!
//! `SendGrid` error bodies look like
//! `{"errors":[{"message":"...","field":"...","help":null}]}`, but nothing
//! guarantees that shape. Every level is checked for presence and type, and
//! anything unexpected degrades to `None` instead of failing.

use reqwest::header::HeaderMap;
use serde_json::Value;

/// Response header carrying the `SendGrid` message id.
pub const MESSAGE_ID_HEADER: &str = "x-message-id";

/// Provider messages longer than this are cut.
pub const MAX_ERROR_MESSAGE_CHARS: usize = 500;

/// Returns the message id from the response headers, if present and
/// readable.
///
/// # Examples
///
/// ```
/// use reqwest::header::{HeaderMap, HeaderValue};
/// use sendgrid_mcp_client::response::message_id;
///
/// let mut headers = HeaderMap::new();
/// headers.insert("x-message-id", HeaderValue::from_static("abc123"));
/// assert_eq!(message_id(&headers), Some("abc123".to_string()));
/// assert_eq!(message_id(&HeaderMap::new()), None);
/// ```
#[must_use]
pub fn message_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(MESSAGE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(ToOwned::to_owned)
}

/// Returns the first `errors[].message` of an error body.
///
/// # Examples
///
/// ```
/// use sendgrid_mcp_client::response::first_error_message;
///
/// let body = br#"{"errors":[{"message":"Invalid recipient","field":"to"}]}"#;
/// assert_eq!(first_error_message(body), Some("Invalid recipient".to_string()));
///
/// assert_eq!(first_error_message(b"<html>Bad Gateway</html>"), None);
/// ```
#[must_use]
pub fn first_error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    let message = value
        .get("errors")?
        .as_array()?
        .first()?
        .get("message")?
        .as_str()?
        .trim();

    if message.is_empty() {
        return None;
    }

    Some(truncate_chars(message, MAX_ERROR_MESSAGE_CHARS))
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s.to_string(),
    }
}
