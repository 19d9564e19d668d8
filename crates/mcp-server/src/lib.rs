//! MCP server library exposing a `send_email` tool backed by `SendGrid`.
//!
//! # Architecture
//!
//! A tool call flows through four stages:
//!
//! 1. **Validation** - raw arguments become an `EmailRequest` or a list of
//!    field violations
//! 2. **Sanitization** - unsafe markup is removed from the HTML body
//! 3. **Delivery** - the request goes to `SendGrid` (or the dry-run client in
//!    test mode)
//! 4. **Reporting** - every outcome becomes a text tool result
//!
//! # Examples
//!
//! ```no_run
//! use sendgrid_mcp_core::Config;
//! use sendgrid_mcp_server::service::EmailService;
//! use rmcp::ServiceExt;
//! use rmcp::transport::stdio;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::builder().test_mode(true).build()?;
//! let service = EmailService::from_config(&config)?.serve(stdio()).await?;
//! service.waiting().await?;
//! # Ok(())
//! # }
//! ```

pub mod dispatch;
pub mod service;
pub mod types;

pub use dispatch::Dispatcher;
pub use service::EmailService;
pub use types::{SendEmailArguments, SendEmailParams};
