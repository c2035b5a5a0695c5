//! Serve command - runs the MCP server on stdio.

use std::process::ExitCode;

use anyhow::Result;
use bear_domain::BearService;
use bear_mcp_server::McpServer;
use clap::Args;
use tracing::{error, info};

use super::Context;

/// Arguments for the serve command.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {}

/// Verify the store, then serve until stdin closes.
pub async fn run(_args: ServeArgs, ctx: &Context) -> Result<ExitCode> {
    let config = &ctx.config;
    let service = BearService::from_config(config);

    let status = service.verify_store();
    if !status.exists {
        error!(
            error = status.error.as_deref().unwrap_or("unknown error"),
            "Bear database unavailable, not starting server"
        );
        return Ok(ExitCode::FAILURE);
    }
    info!(app_running = service.is_app_running().await, "Bear database found");

    let server = McpServer::new(service, &config.server_name, &config.server_version);
    server.serve_stdio().await?;
    Ok(ExitCode::SUCCESS)
}
