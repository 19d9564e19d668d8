//! Validation of raw `send_email` arguments.
//!
//! The validator takes the untyped JSON arguments of a tool call and either
//! produces an [`EmailRequest`] or a [`ValidationError`] listing every
//! violated rule. Violations are reported in a fixed order:
//!
//! 1. recipient (`to`) format
//! 2. subject non-empty
//! 3. `text` / `html` types
//! 4. content presence (at least one of `text` / `html`)
//! 5. unrecognized fields, one per key in sorted order
//!
//! # Examples
//!
//! ```
//! use sendgrid_mcp_core::validate_email_request;
//! use serde_json::json;
//!
//! let request = validate_email_request(&json!({
//!     "to": "user@example.com",
//!     "subject": "Hello",
//!     "text": "Hi there",
//! }))
//! .unwrap();
//! assert_eq!(request.subject(), "Hello");
//!
//! let err = validate_email_request(&json!({
//!     "to": "nope",
//!     "subject": "",
//! }))
//! .unwrap_err();
//! assert_eq!(err.violations().len(), 3);
//! ```

use crate::error::{FieldViolation, ValidationError};
use crate::types::{EmailAddress, EmailRequest};
use serde_json::{Map, Value};

/// Path used for rules that apply to the whole argument object.
pub const ROOT_PATH: &str = "(root)";

/// Fields accepted by `send_email`.
pub const KNOWN_FIELDS: [&str; 4] = ["to", "subject", "text", "html"];

const REQUIRED: &str = "Required";
const INVALID_EMAIL: &str = "Invalid email address";
const EMPTY_SUBJECT: &str = "Subject cannot be empty";
const MISSING_CONTENT: &str = "Either text or html content must be provided";
const UNRECOGNIZED_FIELD: &str = "Unrecognized field";

/// Validates raw tool call arguments.
///
/// Whitespace-only subjects are rejected: the subject is trimmed before the
/// emptiness check but stored as given. Empty `text` / `html` strings are
/// treated as absent.
///
/// # Errors
///
/// Returns a [`ValidationError`] carrying one [`FieldViolation`] per
/// violated rule when the input is not an object, the recipient is missing
/// or malformed, the subject is missing or blank, a body has the wrong type,
/// neither body is present, or the input contains unknown fields.
pub fn validate_email_request(input: &Value) -> Result<EmailRequest, ValidationError> {
    let Some(fields) = input.as_object() else {
        return Err(ValidationError::new(vec![FieldViolation::new(
            ROOT_PATH,
            format!("Expected object, received {}", type_name(input)),
        )]));
    };

    let mut violations = Vec::new();

    let to = recipient(fields, &mut violations);
    let subject = subject(fields, &mut violations);
    let text = optional_body(fields, "text", &mut violations);
    let html = optional_body(fields, "html", &mut violations);

    if !has_content(fields) {
        violations.push(FieldViolation::new(ROOT_PATH, MISSING_CONTENT));
    }

    let mut unknown: Vec<&String> = fields
        .keys()
        .filter(|key| !KNOWN_FIELDS.contains(&key.as_str()))
        .collect();
    unknown.sort();
    violations.extend(
        unknown
            .into_iter()
            .map(|key| FieldViolation::new(key.as_str(), UNRECOGNIZED_FIELD)),
    );

    match (to, subject) {
        (Some(to), Some(subject)) if violations.is_empty() => Ok(EmailRequest {
            to,
            subject,
            text,
            html,
        }),
        _ => {
            tracing::debug!(count = violations.len(), "send_email arguments rejected");
            Err(ValidationError::new(violations))
        }
    }
}

fn recipient(fields: &Map<String, Value>, violations: &mut Vec<FieldViolation>) -> Option<EmailAddress> {
    match fields.get("to") {
        None | Some(Value::Null) => {
            violations.push(FieldViolation::new("to", REQUIRED));
            None
        }
        Some(Value::String(raw)) => EmailAddress::parse(raw)
            .inspect_err(|_| violations.push(FieldViolation::new("to", INVALID_EMAIL)))
            .ok(),
        Some(other) => {
            violations.push(expected_string("to", other));
            None
        }
    }
}

fn subject(fields: &Map<String, Value>, violations: &mut Vec<FieldViolation>) -> Option<String> {
    match fields.get("subject") {
        None | Some(Value::Null) => {
            violations.push(FieldViolation::new("subject", REQUIRED));
            None
        }
        Some(Value::String(s)) if s.trim().is_empty() => {
            violations.push(FieldViolation::new("subject", EMPTY_SUBJECT));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            violations.push(expected_string("subject", other));
            None
        }
    }
}

fn optional_body(
    fields: &Map<String, Value>,
    name: &'static str,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    match fields.get(name) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            violations.push(expected_string(name, other));
            None
        }
    }
}

/// Content presence looks at the raw values so that a mistyped body is
/// reported as a type error only, not also as missing content.
fn has_content(fields: &Map<String, Value>) -> bool {
    ["text", "html"].iter().any(|name| match fields.get(*name) {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    })
}

fn expected_string(path: &str, value: &Value) -> FieldViolation {
    FieldViolation::new(
        path,
        format!("Expected string, received {}", type_name(value)),
    )
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
