//! Trip planner - runs the full savings pipeline for one trip
//!
//! estimate → points → allocate → recommend → project
//!
//! Every step works from the same `TripInputs` snapshot, and the monthly
//! savings figure is chosen once and reused for every category.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::allocation::{allocate, AllocationState};
use crate::estimate::CostEstimator;
use crate::models::{Category, CategoryCosts, TripInputs, PRIORITY_ORDER};
use crate::projection::{project, SavingsProjection};
use crate::recommend::{
    effective_monthly_savings, MonthlySavingsRecommendation, MonthlySavingsSource,
};

/// Booking state of a category within a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// User already booked it
    Booked,
    /// Funded, along with everything ahead of it, and bookable today
    Ready,
    /// Still saving, with a projected date
    Saving,
    /// Gap remains and no positive savings rate
    Blocked,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Booked => "booked",
            Self::Ready => "ready",
            Self::Saving => "saving",
            Self::Blocked => "blocked",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Booking status of one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBooking {
    pub category: Category,
    pub status: BookingStatus,
}

/// Headline numbers for a plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub total_cost: f64,
    pub total_funded: f64,
    pub total_gap: f64,
    /// Funded share of the trip, 0-100
    pub progress_percent: f64,
    pub is_debt_free: bool,
    /// First category in priority order that can be booked now and isn't yet
    pub next_to_book: Option<Category>,
}

/// Full savings plan for a trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripPlan {
    pub name: String,
    /// Costs before point redemption
    pub gross_costs: CategoryCosts,
    /// Costs the allocation ran against
    pub net_costs: CategoryCosts,
    /// Dollars of flights cost covered by points
    pub points_applied: f64,
    pub allocation: AllocationState,
    pub recommendation: MonthlySavingsRecommendation,
    pub monthly_savings: f64,
    pub monthly_savings_source: MonthlySavingsSource,
    pub projection: SavingsProjection,
    /// Per-category booking status, in priority order
    pub booking: Vec<CategoryBooking>,
    pub summary: PlanSummary,
}

impl TripPlan {
    pub fn booking_status(&self, category: Category) -> BookingStatus {
        self.booking[category.index()].status
    }
}

/// Builds `TripPlan`s from trip inputs
#[derive(Debug, Clone, Default)]
pub struct TripPlanner {
    estimator: CostEstimator,
}

impl TripPlanner {
    pub fn new(estimator: CostEstimator) -> Self {
        Self { estimator }
    }

    pub fn estimator(&self) -> &CostEstimator {
        &self.estimator
    }

    /// Compute the plan for `inputs` as of `reference_date`
    pub fn plan(&self, inputs: &TripInputs, reference_date: NaiveDate) -> TripPlan {
        let gross_costs = self.estimator.estimate_all(inputs);

        let gross_flights = gross_costs.get(Category::Flights);
        let net_flights = inputs.points.apply(gross_flights);
        let net_costs = gross_costs.with(Category::Flights, net_flights);

        let allocation = allocate(&net_costs, inputs.current_savings);
        let recommendation =
            MonthlySavingsRecommendation::compute(net_costs.total(), inputs.current_savings);
        let (monthly_savings, monthly_savings_source) =
            effective_monthly_savings(inputs.monthly_savings, recommendation.recommended_monthly);
        let projection = project(&allocation, monthly_savings, reference_date);

        let booking: Vec<CategoryBooking> = PRIORITY_ORDER
            .iter()
            .map(|c| CategoryBooking {
                category: *c,
                status: booking_status(*c, inputs, &projection),
            })
            .collect();

        let summary = summarize(&allocation, &booking);

        tracing::debug!(
            trip = %inputs.name,
            total_cost = summary.total_cost,
            total_gap = summary.total_gap,
            monthly_savings,
            source = ?monthly_savings_source,
            months_to_full_funding = %projection.months_to_full_funding(),
            "Trip plan computed"
        );

        TripPlan {
            name: inputs.name.clone(),
            gross_costs,
            net_costs,
            points_applied: gross_flights - net_flights,
            allocation,
            recommendation,
            monthly_savings,
            monthly_savings_source,
            projection,
            booking,
            summary,
        }
    }
}

fn booking_status(
    category: Category,
    inputs: &TripInputs,
    projection: &SavingsProjection,
) -> BookingStatus {
    if inputs.booked.contains(&category) {
        return BookingStatus::Booked;
    }

    // Savings reach a category only after every earlier one is covered
    let sequential = &projection.get(category).sequential;
    if sequential.is_bookable_now {
        BookingStatus::Ready
    } else if sequential.months_to_fund.is_unbounded() {
        BookingStatus::Blocked
    } else {
        BookingStatus::Saving
    }
}

fn summarize(allocation: &AllocationState, booking: &[CategoryBooking]) -> PlanSummary {
    let total_cost = allocation.total_cost();
    let total_funded = allocation.total_funded();
    let total_gap = allocation.total_gap();

    let progress_percent = if total_cost > 0.0 {
        (total_funded / total_cost * 100.0).min(100.0)
    } else {
        100.0
    };

    let next_to_book = booking
        .iter()
        .find(|b| b.status == BookingStatus::Ready)
        .map(|b| b.category);

    PlanSummary {
        total_cost,
        total_funded,
        total_gap,
        progress_percent,
        is_debt_free: total_gap == 0.0,
        next_to_book,
    }
}
