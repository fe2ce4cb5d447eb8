//! Trip plan handlers

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    Json,
};
use serde::{Deserialize, Serialize};

use tripfund_core::{collect_advice, Category, CategoryCosts, TripInputs, TripPlan};

use super::{parse_reference_date, read_json};
use crate::{AppError, AppState};

#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    pub trip: TripInputs,
    /// Defaults to today
    pub reference_date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AdviceResponse {
    pub plan: TripPlan,
    pub provider: &'static str,
    pub advice: BTreeMap<Category, String>,
}

#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub costs: CategoryCosts,
    pub total: f64,
    /// Categories whose cost came from the user rather than the estimator
    pub overridden: Vec<Category>,
}

/// POST /api/plan - Compute the full savings plan for a trip
pub async fn create_plan(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<TripPlan>, AppError> {
    let body: PlanRequest = read_json(request).await?;
    let reference_date = parse_reference_date(body.reference_date.as_deref())?;

    let plan = state.planner.plan(&body.trip, reference_date);
    Ok(Json(plan))
}

/// POST /api/advice - Plan a trip and attach per-category advice
pub async fn get_advice(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<AdviceResponse>, AppError> {
    let body: PlanRequest = read_json(request).await?;
    let reference_date = parse_reference_date(body.reference_date.as_deref())?;

    // Plan is fully computed before any provider call
    let plan = state.planner.plan(&body.trip, reference_date);
    let advice = collect_advice(state.advice.as_ref(), &body.trip, &plan).await;

    Ok(Json(AdviceResponse {
        plan,
        provider: state.advice.name(),
        advice,
    }))
}

/// POST /api/estimate - Estimate per-category costs for a trip
pub async fn estimate_costs(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<EstimateResponse>, AppError> {
    let trip: TripInputs = read_json(request).await?;

    let costs = state.planner.estimator().estimate_all(&trip);
    Ok(Json(EstimateResponse {
        total: costs.total(),
        costs,
        overridden: trip.overrides.keys().copied().collect(),
    }))
}
