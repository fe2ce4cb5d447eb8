//! Tripfund CLI - Save for a trip, one category at a time
//!
//! Usage:
//!   tripfund plan --trip trip.toml      Savings plan with booking dates
//!   tripfund estimate --trip trip.toml  Per-category cost estimates
//!   tripfund recommend --total 3300     Recommended monthly savings
//!   tripfund serve --port 3000          Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Plan { trip, date, json } => {
            commands::cmd_plan(cli.config.as_deref(), &trip, date.as_deref(), json)
        }
        Commands::Estimate { trip, json } => {
            commands::cmd_estimate(cli.config.as_deref(), &trip, json)
        }
        Commands::Recommend { total, savings } => commands::cmd_recommend(total, savings),
        Commands::Points {
            flights,
            points,
            balance,
            disabled,
        } => commands::cmd_points(flights, points, balance, !disabled),
        Commands::Serve { port, host } => {
            commands::cmd_serve(cli.config.as_deref(), &host, port).await
        }
    }
}
