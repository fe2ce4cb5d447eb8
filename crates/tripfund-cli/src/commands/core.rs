//! Shared helpers for loading planner config and trip files

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tripfund_core::{CostEstimator, EstimatorConfig, TripInputs, TripPlanner};

/// Build a planner from an explicit config file, or the user override/defaults
pub fn load_planner(config_path: Option<&Path>) -> Result<TripPlanner> {
    let config = match config_path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            EstimatorConfig::load_from(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?
        }
        None => EstimatorConfig::load().context("Failed to load estimator config")?,
    };

    Ok(TripPlanner::new(CostEstimator::new(config)))
}

/// Read a trip file (TOML)
pub fn load_trip(path: &Path) -> Result<TripInputs> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read trip file {}", path.display()))?;

    TripInputs::from_toml(&content)
        .with_context(|| format!("Invalid trip file {}", path.display()))
}

/// Parse `--date`, defaulting to today
pub fn parse_reference_date(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .context("Invalid --date format (use YYYY-MM-DD)"),
        None => Ok(chrono::Local::now().date_naive()),
    }
}
