//! Parameter types for the `send_email` tool.
//!
//! [`SendEmailParams`] describes the arguments and drives the advertised
//! JSON Schema. The handler itself receives [`SendEmailArguments`], the raw
//! argument object, so that validation can report every violation at once
//! instead of stopping at the first deserialization error.

use schemars::{JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;

/// Arguments of the `send_email` tool.
///
/// # Examples
///
/// ```
/// use sendgrid_mcp_server::types::SendEmailParams;
///
/// let params = SendEmailParams {
///     to: "user@example.com".to_string(),
///     subject: "Welcome".to_string(),
///     text: Some("Hello!".to_string()),
///     html: None,
/// };
/// let args = serde_json::to_value(&params).unwrap();
/// assert!(args.get("html").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SendEmailParams {
    /// Recipient email address
    pub to: String,

    /// Subject line (must not be empty)
    pub subject: String,

    /// Plain text body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// HTML body (unsafe markup is removed before sending)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

/// Raw `send_email` arguments as received from the client.
///
/// Advertises the schema of [`SendEmailParams`] while keeping the original
/// JSON for the validator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct SendEmailArguments(pub Value);

impl SendEmailArguments {
    /// Returns the raw argument value.
    #[must_use]
    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl From<SendEmailParams> for SendEmailArguments {
    fn from(params: SendEmailParams) -> Self {
        // Serializing a struct of strings into a `Value` cannot fail.
        Self(serde_json::to_value(params).unwrap_or_default())
    }
}

impl JsonSchema for SendEmailArguments {
    fn schema_name() -> Cow<'static, str> {
        SendEmailParams::schema_name()
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        SendEmailParams::json_schema(generator)
    }
}
