//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;
use tripfund_core::AdviceContext;

fn setup_test_app() -> Router {
    create_router(TripPlanner::default(), ServerConfig::default())
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn scenario_trip() -> serde_json::Value {
    serde_json::json!({
        "name": "Portugal",
        "destinations": ["Lisbon"],
        "travelers": 2,
        "duration_days": 8,
        "current_savings": 1500.0,
        "overrides": {
            "flights": 1200.0,
            "accommodations": 800.0,
            "transportation": 300.0,
            "activities": 400.0,
            "food": 500.0,
            "preparation": 100.0
        }
    })
}

/// Provider whose calls always fail
struct FailingProvider;

#[async_trait::async_trait]
impl RecommendationProvider for FailingProvider {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn category_advice(&self, _context: &AdviceContext) -> tripfund_core::Result<String> {
        Err(tripfund_core::Error::Advice("offline".to_string()))
    }
}

// ========== Health ==========

#[tokio::test]
async fn test_health() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_security_headers() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    assert_eq!(response.headers()["x-frame-options"], "DENY");
}

// ========== Plan API Tests ==========

#[tokio::test]
async fn test_create_plan() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/plan",
            serde_json::json!({
                "trip": scenario_trip(),
                "reference_date": "2024-01-15"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let categories = json["allocation"]["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 6);
    assert_eq!(categories[0]["category"], "flights");
    assert_eq!(categories[0]["funded"], 1200.0);
    assert_eq!(categories[1]["funded"], 300.0);
    assert_eq!(categories[1]["gap"], 500.0);

    assert_eq!(json["monthly_savings"], 200.0);
    assert_eq!(json["monthly_savings_source"], "recommended");
    assert_eq!(json["projection"]["full_funding"]["months_to_fund"], 9);
    assert_eq!(
        json["projection"]["full_funding"]["earliest_booking_date"],
        "2024-10-15"
    );
    assert_eq!(json["summary"]["next_to_book"], "flights");
}

#[tokio::test]
async fn test_create_plan_invalid_json() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/plan")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().starts_with("Invalid JSON"));
}

#[tokio::test]
async fn test_create_plan_invalid_date() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/plan",
            serde_json::json!({
                "trip": scenario_trip(),
                "reference_date": "15/01/2024"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_plan_unknown_category() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/plan",
            serde_json::json!({
                "trip": { "overrides": { "souvenirs": 50.0 } }
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_estimate_costs() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/estimate",
            serde_json::json!({
                "destinations": ["Kyoto"],
                "travelers": 2,
                "duration_days": 5,
                "overrides": { "activities": 0.0 }
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["costs"]["activities"], 0.0);
    assert!(json["costs"]["flights"].as_f64().unwrap() > 0.0);
    assert_eq!(json["overridden"], serde_json::json!(["activities"]));
}

#[tokio::test]
async fn test_advice() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/advice",
            serde_json::json!({
                "trip": scenario_trip(),
                "reference_date": "2024-01-15"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["provider"], "static");
    assert_eq!(json["advice"].as_object().unwrap().len(), 6);
    assert_eq!(json["plan"]["name"], "Portugal");
}

#[tokio::test]
async fn test_advice_provider_failure_still_returns_plan() {
    let state = AppState::new(TripPlanner::default(), ServerConfig::default())
        .with_advice(Arc::new(FailingProvider));
    let app = create_router_with_state(state);

    let response = app
        .oneshot(post_json(
            "/api/advice",
            serde_json::json!({ "trip": scenario_trip() }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["provider"], "failing");
    assert!(json["advice"].as_object().unwrap().is_empty());
    assert_eq!(json["plan"]["summary"]["total_cost"], 3300.0);
}

// ========== Engine Step Tests ==========

#[tokio::test]
async fn test_points_toggle_off() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/points",
            serde_json::json!({
                "flights_cost": 1000.0,
                "points_to_use": 50000,
                "use_points": false,
                "connected_balance": 80000
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["net_flights_cost"], 1000.0);
    assert_eq!(json["dollar_value"], 0.0);
}

#[tokio::test]
async fn test_points_redeemed() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/points",
            serde_json::json!({
                "flights_cost": 1200.0,
                "points_to_use": 50000,
                "use_points": true,
                "connected_balance": 80000
            }),
        ))
        .await
        .unwrap();

    let json = get_body_json(response).await;
    assert_eq!(json["effective_points"], 50000.0);
    assert_eq!(json["conversion_rate"], 0.012);
    assert_eq!(json["net_flights_cost"], 600.0);
}

#[tokio::test]
async fn test_allocate() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/allocate",
            serde_json::json!({
                "costs": { "flights": 1200.0, "accommodations": 800.0 },
                "current_savings": 1500.0
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["categories"][0]["is_funded"], true);
    assert_eq!(json["categories"][1]["funded"], 300.0);
    assert_eq!(json["categories"][2]["is_funded"], true);
    assert_eq!(json["remaining_savings"], 0.0);
}

#[tokio::test]
async fn test_project_unbounded() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/project",
            serde_json::json!({
                "costs": { "flights": 500.0 },
                "monthly_savings": 0.0,
                "reference_date": "2024-01-15"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    let flights = &json["projection"]["categories"][0];
    assert_eq!(flights["months_to_fund"], "unbounded");
    assert!(flights["earliest_booking_date"].is_null());
    assert_eq!(flights["is_bookable_now"], false);
}

#[tokio::test]
async fn test_project_dates() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/project",
            serde_json::json!({
                "costs": { "flights": 300.0 },
                "monthly_savings": 150.0,
                "reference_date": "2024-01-15"
            }),
        ))
        .await
        .unwrap();

    let json = get_body_json(response).await;
    let flights = &json["projection"]["categories"][0];
    assert_eq!(flights["months_to_fund"], 2);
    assert_eq!(flights["earliest_booking_date"], "2024-03-15");
}

#[tokio::test]
async fn test_recommend() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/recommend?total_cost=10000&current_savings=5000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["target_months"], 15);
    assert_eq!(json["recommended_monthly"], 334.0);
}

// ========== Error Mapping ==========

#[tokio::test]
async fn test_internal_error_hides_details() {
    let err: AppError = anyhow::anyhow!("config file unreadable").into();
    let response = err.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = get_body_json(response).await;
    assert_eq!(json["error"], "An internal error occurred");
}
