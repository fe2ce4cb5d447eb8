//! Loyalty points valuation
//!
//! Points are converted to dollars at a fixed rate and only ever offset the
//! flights category, before savings are allocated.

use serde::{Deserialize, Serialize};

use crate::models::clamp_amount;

/// Dollar value of a single loyalty point
pub const POINTS_CONVERSION_RATE: f64 = 0.012;

/// A user's point-redemption choice for a trip
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PointsRedemption {
    /// Redemption toggle. When off, stored points have no effect.
    pub use_points: bool,
    /// Whole points; any fraction is dropped at redemption
    pub points_to_use: f64,
    /// Balance reported by a connected card account, if any
    pub connected_balance: Option<f64>,
}

impl PointsRedemption {
    pub fn new(use_points: bool, points_to_use: f64, connected_balance: Option<f64>) -> Self {
        Self {
            use_points,
            points_to_use,
            connected_balance,
        }
    }

    /// Points that will actually be redeemed
    pub fn effective_points(&self) -> f64 {
        effective_points(self.points_to_use, self.use_points, self.connected_balance)
    }

    /// Dollar value of the redeemed points
    pub fn dollar_value(&self) -> f64 {
        self.effective_points() * POINTS_CONVERSION_RATE
    }

    /// Net flights cost after redemption
    pub fn apply(&self, flights_cost: f64) -> f64 {
        apply_points(
            flights_cost,
            self.points_to_use,
            self.use_points,
            self.connected_balance,
        )
    }
}

/// Points redeemed after the toggle and balance cap are applied.
///
/// Points are whole units, so fractions are dropped. A known positive
/// balance caps the points; without one, manual entry is taken as-is.
pub fn effective_points(points_to_use: f64, use_points: bool, connected_balance: Option<f64>) -> f64 {
    if !use_points {
        return 0.0;
    }

    let points = clamp_amount(points_to_use);
    let points = match connected_balance {
        Some(balance) if balance.is_finite() && balance > 0.0 => points.min(balance),
        _ => points,
    };
    points.floor()
}

/// Net flights cost after redeeming points. Never negative.
pub fn apply_points(
    flights_cost: f64,
    points_to_use: f64,
    use_points: bool,
    connected_balance: Option<f64>,
) -> f64 {
    let dollar_value =
        effective_points(points_to_use, use_points, connected_balance) * POINTS_CONVERSION_RATE;
    (clamp_amount(flights_cost) - dollar_value).max(0.0)
}
