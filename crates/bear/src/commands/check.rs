//! Check command - reports whether the Bear database is reachable.

use std::process::ExitCode;

use anyhow::Result;
use bear_domain::BearService;
use clap::Args;
use console::{Style, style};
use serde::Serialize;

use super::Context;

/// Arguments for the check command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Output as JSON (for scripting)
    #[arg(long)]
    pub json: bool,
}

/// Check result for JSON output.
#[derive(Debug, Serialize)]
struct CheckOutput<'a> {
    exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    database_path: String,
    app_running: bool,
}

/// Run the check command. Exits non-zero when the database is missing.
pub async fn run(args: CheckArgs, ctx: &Context) -> Result<ExitCode> {
    let service = BearService::from_config(&ctx.config);
    let status = service.verify_store();
    let app_running = service.is_app_running().await;
    let database_path = ctx.config.database_path.display().to_string();

    if args.json {
        let output = CheckOutput {
            exists: status.exists,
            error: status.error.as_deref(),
            database_path,
            app_running,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        let dim = Style::new().dim();

        println!();
        println!("{}", style("Bear Database Status").bold());
        println!("{}", dim.apply_to("─".repeat(40)));
        println!();
        if status.exists {
            println!(
                "  {} {}",
                dim.apply_to("Database:"),
                Style::new().green().apply_to("● found")
            );
        } else {
            println!(
                "  {} {}",
                dim.apply_to("Database:"),
                Style::new().red().apply_to("● missing")
            );
        }
        println!("  {} {}", dim.apply_to("Path:"), database_path);
        println!(
            "  {} {}",
            dim.apply_to("Bear app:"),
            if app_running { "running" } else { "not running" }
        );
        println!(
            "  {} {}",
            dim.apply_to("API token:"),
            if ctx.config.api_token.is_some() {
                "configured"
            } else {
                "not set"
            }
        );

        if let Some(error) = &status.error
            && ctx.verbose
        {
            println!();
            println!("  {} {}", dim.apply_to("Error:"), error);
        }
        println!();
    }

    Ok(if status.exists {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
