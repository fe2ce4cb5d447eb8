//! CLI argument definitions using clap
//!
//! The command implementations live in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tripfund - Save for a trip without going into debt
#[derive(Parser)]
#[command(name = "tripfund")]
#[command(about = "Trip savings planner with booking-date projections", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Estimator config file (defaults to the user config, then built-in rates)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a savings plan for a trip
    Plan {
        /// Trip file (TOML)
        #[arg(short, long)]
        trip: PathBuf,

        /// Reference date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Estimate per-category costs for a trip
    Estimate {
        /// Trip file (TOML)
        #[arg(short, long)]
        trip: PathBuf,

        /// Print the estimate as JSON
        #[arg(long)]
        json: bool,
    },

    /// Recommend a monthly savings amount
    Recommend {
        /// Total trip cost
        #[arg(long)]
        total: f64,

        /// Amount already saved
        #[arg(long, default_value = "0")]
        savings: f64,
    },

    /// Value a points redemption against flights
    Points {
        /// Flights cost before points
        #[arg(long)]
        flights: f64,

        /// Points the user wants to redeem
        #[arg(long)]
        points: f64,

        /// Connected account balance (caps the redemption)
        #[arg(long)]
        balance: Option<f64>,

        /// Show the result with redemption switched off
        #[arg(long)]
        disabled: bool,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}
