//! HTTP request handlers organized by domain
//!
//! - `plan` - full trip pipeline (plan, advice, estimate)
//! - `engine` - individual engine steps (points, allocate, project, recommend)

pub mod engine;
pub mod plan;

pub use engine::*;
pub use plan::*;

use axum::{extract::Request, Json};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;

use crate::{AppError, MAX_BODY_SIZE};

/// GET /api/health - Liveness check
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Read and parse a JSON request body
pub(crate) async fn read_json<T: DeserializeOwned>(request: Request) -> Result<T, AppError> {
    let bytes = axum::body::to_bytes(request.into_body(), MAX_BODY_SIZE)
        .await
        .map_err(|_| AppError::bad_request("Invalid request body"))?;

    serde_json::from_slice(&bytes).map_err(|e| {
        tracing::debug!(error = %e, "Rejected request body");
        AppError::bad_request(&format!("Invalid JSON: {}", e))
    })
}

/// Parse an optional `YYYY-MM-DD` reference date, defaulting to today
pub(crate) fn parse_reference_date(value: Option<&str>) -> Result<NaiveDate, AppError> {
    match value {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| AppError::bad_request("Invalid reference_date format (use YYYY-MM-DD)")),
        None => Ok(chrono::Local::now().date_naive()),
    }
}
