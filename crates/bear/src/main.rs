//! bear-mcp - MCP server for the Bear notes app
//!
//! Main entry point for the `bear-mcp` binary.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};

mod commands;

use commands::{check, serve};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// bear-mcp - Model Context Protocol server for Bear notes
#[derive(Parser)]
#[command(name = "bear-mcp")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding config.toml and logs/
    #[arg(long, global = true, env = "BEAR_MCP_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve MCP over stdin/stdout (default)
    Serve(serve::ServeArgs),

    /// Check that the Bear database can be found
    Check(check::CheckArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config_dir = cli.config_dir.clone().or_else(bear_config::xdg_config_dir);
    let _guard = init_tracing(cli.verbose, config_dir.as_deref());

    let loaded = bear_config::load_config_with_options(config_dir.as_deref(), |key| {
        std::env::var(key).ok()
    })
    .context("failed to load configuration")?;
    for warning in &loaded.warnings {
        tracing::warn!("{warning}");
    }

    let ctx = commands::Context {
        config: loaded.config,
        verbose: cli.verbose,
    };

    match cli.command {
        Some(Commands::Serve(args)) => serve::run(args, &ctx).await,
        Some(Commands::Check(args)) => check::run(args, &ctx).await,
        None => serve::run(serve::ServeArgs::default(), &ctx).await,
    }
}

fn log_dir(config_dir: Option<&std::path::Path>) -> Option<PathBuf> {
    config_dir.map(|d| d.join("logs"))
}

/// Console logs go to stderr; stdout carries the MCP transport.
fn init_tracing(
    verbose: bool,
    config_dir: Option<&std::path::Path>,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::prelude::*;

    let filter = if verbose {
        "bear_mcp=debug,bear_mcp_server=debug,bear_domain=debug,bear_store=debug,bear_actions=debug,bear_config=debug,info"
    } else {
        "bear_mcp=info,bear_mcp_server=info,bear_domain=info,bear_store=info,bear_actions=info,warn"
    };

    // No file log without a config dir; the working directory belongs to the client.
    let file_appender = log_dir(config_dir).and_then(|dir| {
        RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("bear-mcp")
            .filename_suffix("log")
            .build(dir)
            .ok()
    });
    let (file_layer, guard) = match file_appender {
        Some(appender) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(tracing_subscriber::EnvFilter::new(
                    "bear_mcp=trace,bear_mcp_server=trace,bear_domain=trace,bear_store=trace,bear_actions=trace,bear_config=trace,info",
                ));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(tracing_subscriber::EnvFilter::new(filter)),
        )
        .with(file_layer)
        .init();

    guard
}
