//! Process-wide configuration for the `SendGrid` MCP server.
//!
//! The configuration is built once at process entry, validated, and then
//! handed by reference to the components built from it. Components never
//! read the environment themselves.
//!
//! # Examples
//!
//! ```
//! use sendgrid_mcp_core::Config;
//! use std::time::Duration;
//!
//! let config = Config::builder()
//!     .api_key("SG.test-key")
//!     .from_email("noreply@example.com")
//!     .request_timeout(Duration::from_secs(10))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.from_email().as_str(), "noreply@example.com");
//! assert_eq!(config.api_base_url(), "https://api.sendgrid.com");
//!
//! // Test mode accepts missing credentials
//! let config = Config::builder().test_mode(true).build().unwrap();
//! assert!(config.is_test_mode());
//! ```

use crate::error::ConfigError;
use crate::types::EmailAddress;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

/// Environment variable holding the `SendGrid` API key.
pub const API_KEY_ENV: &str = "SENDGRID_API_KEY";

/// Environment variable holding the fixed sender address.
pub const FROM_EMAIL_ENV: &str = "SENDGRID_FROM_EMAIL";

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "SENDGRID_API_URL";

/// Environment variable holding the outbound request timeout in seconds.
pub const TIMEOUT_ENV: &str = "SENDGRID_TIMEOUT_SECS";

/// Environment variable enabling test mode.
pub const TEST_MODE_ENV: &str = "SENDGRID_MCP_TEST_MODE";

/// Default `SendGrid` API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://api.sendgrid.com";

/// Sender used in test mode when none is configured.
pub const TEST_FROM_EMAIL: &str = "test@example.com";

/// Immutable server configuration.
///
/// The `Debug` output never contains the API key.
#[derive(Debug)]
pub struct Config {
    api_key: SecretString,
    from_email: EmailAddress,
    api_base_url: String,
    request_timeout: Option<Duration>,
    test_mode: bool,
}

impl Config {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// API key used to authenticate with `SendGrid`.
    #[must_use]
    pub const fn api_key(&self) -> &SecretString {
        &self.api_key
    }

    /// The only sender address the server will use.
    #[must_use]
    pub const fn from_email(&self) -> &EmailAddress {
        &self.from_email
    }

    /// `SendGrid` API base URL, without a trailing slash.
    #[must_use]
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Optional bound on a single outbound delivery call.
    #[must_use]
    pub const fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    /// Returns `true` when mandatory credential checks were bypassed.
    #[must_use]
    pub const fn is_test_mode(&self) -> bool {
        self.test_mode
    }

    /// Returns `true` when an API key is present.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        !self.api_key.expose_secret().is_empty()
    }
}

/// Builder for [`Config`].
///
/// Empty strings are treated as absent values, so an exported but empty
/// environment variable behaves like an unset one.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    api_key: Option<SecretString>,
    from_email: Option<String>,
    api_base_url: Option<String>,
    request_timeout: Option<Duration>,
    test_mode: bool,
}

impl ConfigBuilder {
    /// Sets the `SendGrid` API key.
    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(api_key.into()));
        self
    }

    /// Sets the `SendGrid` API key if one is present.
    #[must_use]
    pub fn maybe_api_key(self, api_key: Option<String>) -> Self {
        match api_key {
            Some(key) => self.api_key(key),
            None => self,
        }
    }

    /// Sets the sender address.
    #[must_use]
    pub fn from_email(mut self, from_email: impl Into<String>) -> Self {
        self.from_email = Some(from_email.into());
        self
    }

    /// Sets the sender address if one is present.
    #[must_use]
    pub fn maybe_from_email(mut self, from_email: Option<String>) -> Self {
        if from_email.is_some() {
            self.from_email = from_email;
        }
        self
    }

    /// Overrides the `SendGrid` API base URL.
    #[must_use]
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    /// Bounds each outbound delivery call.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Enables or disables test mode.
    ///
    /// In test mode a missing API key is replaced by an empty one and a
    /// missing sender by [`TEST_FROM_EMAIL`].
    #[must_use]
    pub const fn test_mode(mut self, enabled: bool) -> Self {
        self.test_mode = enabled;
        self
    }

    /// Validates the settings and builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The API key or sender is missing outside test mode
    /// - The sender is not a valid email address
    /// - The base URL is not an `http(s)://` URL
    /// - The request timeout is zero
    pub fn build(self) -> Result<Config, ConfigError> {
        let api_key = match self.api_key {
            Some(key) if !key.expose_secret().trim().is_empty() => key,
            _ if self.test_mode => SecretString::from(String::new()),
            _ => return Err(ConfigError::Missing { name: API_KEY_ENV }),
        };

        let from_email = match self.from_email.filter(|s| !s.trim().is_empty()) {
            Some(raw) => EmailAddress::parse(raw.trim()).map_err(|e| ConfigError::Invalid {
                name: FROM_EMAIL_ENV,
                reason: e.to_string(),
            })?,
            None if self.test_mode => EmailAddress::parse(TEST_FROM_EMAIL).map_err(|e| {
                ConfigError::Invalid {
                    name: FROM_EMAIL_ENV,
                    reason: e.to_string(),
                }
            })?,
            None => return Err(ConfigError::Missing { name: FROM_EMAIL_ENV }),
        };

        let api_base_url = match self.api_base_url.filter(|s| !s.trim().is_empty()) {
            Some(url) => normalize_base_url(&url)?,
            None => DEFAULT_API_BASE_URL.to_string(),
        };

        if self.request_timeout.is_some_and(|t| t.is_zero()) {
            return Err(ConfigError::Invalid {
                name: TIMEOUT_ENV,
                reason: "timeout must be greater than zero".to_string(),
            });
        }

        if self.test_mode {
            tracing::warn!("test mode enabled: credential checks are bypassed");
        }

        Ok(Config {
            api_key,
            from_email,
            api_base_url,
            request_timeout: self.request_timeout,
            test_mode: self.test_mode,
        })
    }
}

fn normalize_base_url(url: &str) -> Result<String, ConfigError> {
    let url = url.trim();
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        return Err(ConfigError::Invalid {
            name: API_URL_ENV,
            reason: "URL must start with http:// or https://".to_string(),
        });
    }
    Ok(url.trim_end_matches('/').to_string())
}
