//! MCP server exposing the `send_email` tool.
//!
//! The `EmailService` registers a single tool, `send_email`, whose calls are
//! handed to the [`Dispatcher`]. Every outcome, including validation and
//! delivery failures, is returned as a tool result.

use crate::dispatch::Dispatcher;
use crate::types::SendEmailArguments;
use rmcp::handler::server::ServerHandler;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo};
use rmcp::{ErrorData as McpError, tool, tool_handler, tool_router};
use sendgrid_mcp_client::{DeliveryClient, DeliveryError, DryRunClient, SendGridClient};
use sendgrid_mcp_core::Config;
use std::sync::Arc;

/// MCP server for sending email through `SendGrid`.
///
/// # Examples
///
/// ```no_run
/// use sendgrid_mcp_core::Config;
/// use sendgrid_mcp_server::service::EmailService;
/// use rmcp::ServiceExt;
/// use rmcp::transport::stdio;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::builder()
///     .api_key("SG.xxxxx")
///     .from_email("noreply@example.com")
///     .build()?;
/// let service = EmailService::from_config(&config)?.serve(stdio()).await?;
/// service.waiting().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct EmailService {
    /// Validation and delivery pipeline
    dispatcher: Dispatcher,

    /// Tool router for MCP protocol
    tool_router: ToolRouter<Self>,
}

impl EmailService {
    /// Creates a service delivering through `client`.
    #[must_use]
    pub fn new(client: Arc<dyn DeliveryClient>) -> Self {
        Self {
            dispatcher: Dispatcher::new(client),
            tool_router: Self::tool_router(),
        }
    }

    /// Creates a service with the delivery client selected by `config`.
    ///
    /// Test mode without an API key uses [`DryRunClient`]; everything else
    /// talks to `SendGrid`.
    ///
    /// # Errors
    ///
    /// Returns a [`DeliveryError`] if the HTTP client cannot be created.
    pub fn from_config(config: &Config) -> Result<Self, DeliveryError> {
        let client: Arc<dyn DeliveryClient> = if config.is_test_mode() && !config.has_api_key() {
            tracing::warn!("test mode without API key: messages will not be delivered");
            Arc::new(DryRunClient)
        } else {
            Arc::new(SendGridClient::new(config)?)
        };

        Ok(Self::new(client))
    }
}

#[tool_router]
impl EmailService {
    /// Send an email through `SendGrid`.
    ///
    /// Arguments are validated in full before anything is sent; HTML bodies
    /// are sanitized and the sender is always the configured address.
    #[tool(
        description = "Send an email via SendGrid. Requires `to` and `subject`, plus `text` and/or `html` content. The sender is fixed by server configuration; unsafe HTML is removed before sending."
    )]
    async fn send_email(
        &self,
        Parameters(args): Parameters<SendEmailArguments>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.dispatcher.dispatch(args.into_inner()).await)
    }
}

#[tool_handler]
impl ServerHandler for EmailService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Send email through SendGrid with the send_email tool. \
                 Provide a recipient, a subject and a text or HTML body."
                    .to_string(),
            ),
        }
    }
}
