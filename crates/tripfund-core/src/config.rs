//! Estimator configuration
//!
//! Config is loaded with a two-layer resolution:
//! 1. Check for override in data dir (~/.local/share/tripfund/config/estimates.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Override files only need the values they change; everything else keeps
//! the default.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::{Category, Season, CATEGORY_COUNT};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/estimates.toml");

/// Rates and multipliers used by the fallback cost estimator
#[derive(Debug, Clone, PartialEq)]
pub struct EstimatorConfig {
    /// Base rate per category, indexed by priority position.
    /// The unit depends on the category (see `config/estimates.toml`).
    pub rates: [f64; CATEGORY_COUNT],
    pub season_multipliers: HashMap<Season, f64>,
    /// Range the per-destination price factor is mapped into
    pub min_destination_factor: f64,
    pub max_destination_factor: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            rates: [450.0, 140.0, 25.0, 40.0, 55.0, 75.0],
            season_multipliers: HashMap::from([
                (Season::Spring, 1.0),
                (Season::Summer, 1.25),
                (Season::Fall, 0.95),
                (Season::Winter, 1.1),
            ]),
            min_destination_factor: 0.8,
            max_destination_factor: 1.3,
        }
    }
}

impl EstimatorConfig {
    /// Load from the default override location, falling back to embedded defaults
    pub fn load() -> Result<Self> {
        load_config(None)
    }

    /// Load from an explicit path (embedded defaults if it doesn't exist)
    pub fn load_from(path: &Path) -> Result<Self> {
        load_config(Some(path))
    }

    /// Parse config from TOML content, layered over the defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        parse_config(content)
    }

    pub fn rate(&self, category: Category) -> f64 {
        self.rates[category.index()]
    }

    pub fn season_multiplier(&self, season: Season) -> f64 {
        self.season_multipliers.get(&season).copied().unwrap_or(1.0)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("tripfund").join("config").join("estimates.toml"))
}

/// Load configuration (override first, then default)
fn load_config(override_path: Option<&Path>) -> Result<EstimatorConfig> {
    let path = match override_path {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path(),
    };

    let content = match path {
        Some(path) if path.exists() => {
            tracing::debug!(path = %path.display(), "Loading estimator config override");
            fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?
        }
        _ => DEFAULT_CONFIG.to_string(),
    };

    parse_config(&content)
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    rates: Option<HashMap<String, f64>>,
    seasons: Option<HashMap<String, f64>>,
    destinations: Option<RawDestinations>,
}

#[derive(Debug, Deserialize)]
struct RawDestinations {
    min_factor: Option<f64>,
    max_factor: Option<f64>,
}

fn parse_config(content: &str) -> Result<EstimatorConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = EstimatorConfig::default();

    if let Some(rates) = raw.rates {
        for (name, rate) in rates {
            let Ok(category) = name.parse::<Category>() else {
                tracing::warn!(category = %name, "Skipping unknown category in estimator config");
                continue;
            };
            if !rate.is_finite() || rate < 0.0 {
                return Err(Error::Config(format!(
                    "Rate for {} must be a non-negative number",
                    category
                )));
            }
            config.rates[category.index()] = rate;
        }
    }

    if let Some(seasons) = raw.seasons {
        for (name, multiplier) in seasons {
            let Ok(season) = name.parse::<Season>() else {
                tracing::warn!(season = %name, "Skipping unknown season in estimator config");
                continue;
            };
            if !multiplier.is_finite() || multiplier <= 0.0 {
                return Err(Error::Config(format!(
                    "Multiplier for {} must be positive",
                    season
                )));
            }
            config.season_multipliers.insert(season, multiplier);
        }
    }

    if let Some(destinations) = raw.destinations {
        if let Some(min) = destinations.min_factor {
            config.min_destination_factor = min;
        }
        if let Some(max) = destinations.max_factor {
            config.max_destination_factor = max;
        }
    }

    if !(config.min_destination_factor > 0.0
        && config.min_destination_factor <= config.max_destination_factor)
    {
        return Err(Error::Config(format!(
            "Invalid destination factor range: {} to {}",
            config.min_destination_factor, config.max_destination_factor
        )));
    }

    Ok(config)
}
