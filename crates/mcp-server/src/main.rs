//! `SendGrid` MCP server entry point.
//!
//! # Usage
//!
//! Run the server via stdio transport:
//!
//! ```bash
//! SENDGRID_API_KEY=SG.xxx SENDGRID_FROM_EMAIL=noreply@example.com sendgrid-mcp
//! ```
//!
//! Or configure in `~/.config/claude/mcp.json`:
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "sendgrid": {
//!       "command": "sendgrid-mcp",
//!       "env": {
//!         "SENDGRID_API_KEY": "SG.xxx",
//!         "SENDGRID_FROM_EMAIL": "noreply@example.com"
//!       }
//!     }
//!   }
//! }
//! ```

use anyhow::Result;
use clap::Parser;
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use sendgrid_mcp_core::config::{
    API_KEY_ENV, API_URL_ENV, FROM_EMAIL_ENV, TEST_MODE_ENV, TIMEOUT_ENV,
};
use sendgrid_mcp_core::{Config, ConfigError};
use sendgrid_mcp_server::service::EmailService;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// MCP server exposing a `send_email` tool backed by `SendGrid`.
///
/// Every option can also be set through its environment variable.
#[derive(Parser, Debug)]
#[command(name = "sendgrid-mcp")]
#[command(version, about, long_about = None)]
struct ServerArgs {
    /// `SendGrid` API key
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,

    /// Verified sender address used for every message
    #[arg(long, env = FROM_EMAIL_ENV)]
    from_email: Option<String>,

    /// `SendGrid` API base URL
    #[arg(long, env = API_URL_ENV)]
    api_url: Option<String>,

    /// Upper bound for one delivery call, in seconds
    #[arg(long, env = TIMEOUT_ENV)]
    timeout_secs: Option<u64>,

    /// Allow missing credentials; without an API key nothing is sent
    #[arg(long, env = TEST_MODE_ENV)]
    test_mode: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    verbose: bool,
}

impl ServerArgs {
    fn into_config(self) -> Result<Config, ConfigError> {
        let mut builder = Config::builder()
            .maybe_api_key(self.api_key)
            .maybe_from_email(self.from_email)
            .test_mode(self.test_mode);

        if let Some(url) = self.api_url {
            builder = builder.api_base_url(url);
        }
        if let Some(secs) = self.timeout_secs {
            builder = builder.request_timeout(Duration::from_secs(secs));
        }

        builder.build()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = ServerArgs::parse();

    let default_filter = if args.verbose {
        "debug"
    } else {
        "info,sendgrid_mcp_server=debug"
    };

    // Initialize logging to stderr (stdout is for MCP protocol)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .init();

    tracing::info!("Starting sendgrid-mcp v{}", env!("CARGO_PKG_VERSION"));

    let config = match args.into_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(setting = e.setting(), "invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        from = %config.from_email(),
        api_base_url = config.api_base_url(),
        test_mode = config.is_test_mode(),
        "configuration loaded"
    );

    // Create and run the service with stdio transport
    let service = EmailService::from_config(&config)?.serve(stdio()).await?;
    service.waiting().await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
