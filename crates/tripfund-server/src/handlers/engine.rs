//! Engine step handlers
//!
//! Expose each planning step on its own so a client can recompute only what
//! changed (a points toggle, a savings edit).

use axum::{extract::Query, extract::Request, Json};
use serde::{Deserialize, Serialize};

use tripfund_core::{
    allocate, points, project, AllocationState, CategoryCosts, MonthlySavingsRecommendation,
    SavingsProjection, POINTS_CONVERSION_RATE,
};

use super::{parse_reference_date, read_json};
use crate::AppError;

#[derive(Debug, Deserialize)]
pub struct PointsRequest {
    pub flights_cost: f64,
    #[serde(default)]
    pub points_to_use: f64,
    #[serde(default)]
    pub use_points: bool,
    pub connected_balance: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct PointsResponse {
    pub effective_points: f64,
    pub conversion_rate: f64,
    pub dollar_value: f64,
    pub net_flights_cost: f64,
}

#[derive(Debug, Deserialize)]
pub struct AllocateRequest {
    pub costs: CategoryCosts,
    #[serde(default)]
    pub current_savings: f64,
}

#[derive(Debug, Deserialize)]
pub struct ProjectRequest {
    pub costs: CategoryCosts,
    #[serde(default)]
    pub current_savings: f64,
    #[serde(default)]
    pub monthly_savings: f64,
    pub reference_date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub allocation: AllocationState,
    pub projection: SavingsProjection,
}

#[derive(Debug, Deserialize)]
pub struct RecommendQuery {
    pub total_cost: f64,
    #[serde(default)]
    pub current_savings: f64,
}

/// POST /api/points - Value a points redemption against flights
pub async fn value_points(request: Request) -> Result<Json<PointsResponse>, AppError> {
    let body: PointsRequest = read_json(request).await?;

    let effective_points =
        points::effective_points(body.points_to_use, body.use_points, body.connected_balance);
    let net_flights_cost = points::apply_points(
        body.flights_cost,
        body.points_to_use,
        body.use_points,
        body.connected_balance,
    );

    Ok(Json(PointsResponse {
        effective_points,
        conversion_rate: POINTS_CONVERSION_RATE,
        dollar_value: effective_points * POINTS_CONVERSION_RATE,
        net_flights_cost,
    }))
}

/// POST /api/allocate - Allocate savings across category costs
pub async fn allocate_savings(request: Request) -> Result<Json<AllocationState>, AppError> {
    let body: AllocateRequest = read_json(request).await?;
    Ok(Json(allocate(&body.costs, body.current_savings)))
}

/// POST /api/project - Allocate savings and project booking dates
pub async fn project_timeline(request: Request) -> Result<Json<ProjectResponse>, AppError> {
    let body: ProjectRequest = read_json(request).await?;
    let reference_date = parse_reference_date(body.reference_date.as_deref())?;

    let allocation = allocate(&body.costs, body.current_savings);
    let projection = project(&allocation, body.monthly_savings, reference_date);

    Ok(Json(ProjectResponse {
        allocation,
        projection,
    }))
}

/// GET /api/recommend - Recommended monthly savings for a trip cost
pub async fn recommend_savings(
    Query(query): Query<RecommendQuery>,
) -> Json<MonthlySavingsRecommendation> {
    Json(MonthlySavingsRecommendation::compute(
        query.total_cost,
        query.current_savings,
    ))
}
