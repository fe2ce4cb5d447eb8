//! Tripfund Core Library
//!
//! Savings planning for a trip, from cost estimates to booking dates:
//! - Category cost estimation with user overrides
//! - Loyalty points valuation against flights
//! - Sequential savings allocation in a fixed category priority order
//! - Savings timeline projection with calendar-month booking dates
//! - Monthly savings recommendation
//! - Pluggable per-category advice providers

pub mod advice;
pub mod allocation;
pub mod config;
pub mod error;
pub mod estimate;
pub mod models;
pub mod planner;
pub mod points;
pub mod projection;
pub mod recommend;

pub use advice::{collect_advice, AdviceContext, RecommendationProvider, StaticAdviceProvider};
pub use allocation::{allocate, AllocationState, CategoryAllocation};
pub use config::EstimatorConfig;
pub use error::{Error, Result};
pub use estimate::CostEstimator;
pub use models::{Category, CategoryCosts, Season, TripInputs, PRIORITY_ORDER};
pub use planner::{BookingStatus, CategoryBooking, PlanSummary, TripPlan, TripPlanner};
pub use points::{apply_points, PointsRedemption, POINTS_CONVERSION_RATE};
pub use projection::{
    add_calendar_months, format_booking_date, project, CategoryProjection, FundingHorizon,
    MonthsToFund, SavingsProjection,
};
pub use recommend::{
    effective_monthly_savings, recommend_monthly_savings, MonthlySavingsRecommendation,
    MonthlySavingsSource,
};
