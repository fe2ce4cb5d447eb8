//! Category cost estimation
//!
//! A cost the user entered always wins. Otherwise a deterministic fallback
//! estimate is built from the configured base rates:
//!
//! - flights: rate per traveler
//! - accommodations: rate per room per night, two travelers per room
//! - transportation, activities, food: rate per traveler per day
//! - preparation: rate per traveler
//!
//! Everything but preparation is then scaled by the season multiplier and a
//! destination price factor. The factor comes from a SHA-256 hash of each
//! destination name, so the same trip always prices the same.

use sha2::{Digest, Sha256};

use crate::config::EstimatorConfig;
use crate::models::{clamp_amount, Category, CategoryCosts, TripInputs, PRIORITY_ORDER};

/// Estimates per-category trip costs
#[derive(Debug, Clone, Default)]
pub struct CostEstimator {
    config: EstimatorConfig,
}

impl CostEstimator {
    pub fn new(config: EstimatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Cost for one category: the user's override if present, else the estimate
    pub fn estimate(&self, category: Category, inputs: &TripInputs) -> f64 {
        match inputs.override_for(category) {
            Some(amount) => clamp_amount(amount),
            None => self.fallback_estimate(category, inputs),
        }
    }

    /// Costs for all six categories
    pub fn estimate_all(&self, inputs: &TripInputs) -> CategoryCosts {
        let mut costs = CategoryCosts::new();
        for category in PRIORITY_ORDER {
            costs.set(category, self.estimate(category, inputs));
        }
        costs
    }

    /// Estimate ignoring any user override
    pub fn fallback_estimate(&self, category: Category, inputs: &TripInputs) -> f64 {
        if inputs.travelers == 0 || inputs.duration_days == 0 {
            return 0.0;
        }

        let travelers = f64::from(inputs.travelers);
        let days = f64::from(inputs.duration_days);
        let rate = self.config.rate(category);

        let base = match category {
            Category::Flights => rate * travelers,
            Category::Accommodations => {
                let nights = (days - 1.0).max(1.0);
                let rooms = f64::from(inputs.travelers.div_ceil(2));
                rate * nights * rooms
            }
            Category::Transportation | Category::Activities | Category::Food => {
                rate * travelers * days
            }
            Category::Preparation => return (rate * travelers).round(),
        };

        let scaled = base
            * self.config.season_multiplier(inputs.season)
            * self.destination_factor(&inputs.destinations);
        scaled.round()
    }

    /// Average price factor across destinations (1.0 with no destinations)
    pub fn destination_factor(&self, destinations: &[String]) -> f64 {
        let factors: Vec<f64> = destinations
            .iter()
            .map(|d| d.trim())
            .filter(|d| !d.is_empty())
            .map(|d| self.single_destination_factor(d))
            .collect();

        if factors.is_empty() {
            return 1.0;
        }
        factors.iter().sum::<f64>() / factors.len() as f64
    }

    fn single_destination_factor(&self, destination: &str) -> f64 {
        let digest = Sha256::digest(destination.to_lowercase().as_bytes());
        let bucket = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
        let fraction = f64::from(bucket) / f64::from(u32::MAX);

        let min = self.config.min_destination_factor;
        let max = self.config.max_destination_factor;
        min + fraction * (max - min)
    }
}
