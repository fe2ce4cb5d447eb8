//! Monthly savings recommendation
//!
//! Bigger trips get a longer payoff horizon:
//!
//! | Total trip cost | Target months |
//! |-----------------|---------------|
//! | < $2,000        | 6             |
//! | < $5,000        | 9             |
//! | < $10,000       | 12            |
//! | >= $10,000      | 15            |

use serde::{Deserialize, Serialize};

use crate::models::clamp_amount;

/// Upper cost bounds (exclusive) and the payoff horizon for trips below them
const PAYOFF_TIERS: [(f64, u32); 3] = [(2_000.0, 6), (5_000.0, 9), (10_000.0, 12)];

/// Payoff horizon for trips at or above the last tier
const MAX_TARGET_MONTHS: u32 = 15;

/// Months the recommender aims to have a trip paid off in
pub fn target_months(total_trip_cost: f64) -> u32 {
    PAYOFF_TIERS
        .iter()
        .find(|(limit, _)| total_trip_cost < *limit)
        .map(|(_, months)| *months)
        .unwrap_or(MAX_TARGET_MONTHS)
}

/// Recommended whole-dollar monthly savings to fund a trip on schedule
pub fn recommend_monthly_savings(total_trip_cost: f64, current_savings: f64) -> f64 {
    MonthlySavingsRecommendation::compute(total_trip_cost, current_savings).recommended_monthly
}

/// Where the monthly savings figure used for a plan came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthlySavingsSource {
    /// User entered a positive figure
    User,
    Recommended,
}

/// Pick the monthly savings figure: a positive user value wins, otherwise
/// the recommendation.
pub fn effective_monthly_savings(
    user_value: Option<f64>,
    recommended: f64,
) -> (f64, MonthlySavingsSource) {
    match user_value {
        Some(value) if value.is_finite() && value > 0.0 => (value, MonthlySavingsSource::User),
        _ => (recommended, MonthlySavingsSource::Recommended),
    }
}

/// Recommendation details for display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlySavingsRecommendation {
    pub total_trip_cost: f64,
    pub current_savings: f64,
    pub amount_to_save: f64,
    pub target_months: u32,
    pub recommended_monthly: f64,
}

impl MonthlySavingsRecommendation {
    pub fn compute(total_trip_cost: f64, current_savings: f64) -> Self {
        let total_trip_cost = clamp_amount(total_trip_cost);
        let current_savings = clamp_amount(current_savings);
        let target_months = target_months(total_trip_cost);
        let amount_to_save = (total_trip_cost - current_savings).max(0.0);

        let recommended_monthly = if total_trip_cost <= 0.0 {
            0.0
        } else {
            (amount_to_save / f64::from(target_months)).ceil()
        };

        Self {
            total_trip_cost,
            current_savings,
            amount_to_save,
            target_months,
            recommended_monthly,
        }
    }
}
