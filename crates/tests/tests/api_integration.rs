use std::path::PathBuf;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;
use wayfarer_api::build_app;

fn assets_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../assets")
}

#[tokio::test]
async fn health_is_public() {
    let app = build_app(assets_root()).await.expect("app should build");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(parsed["status"], "ok");
    assert!(parsed.get("catalog").is_some());
    assert!(parsed.get("metrics").is_some());
}

#[tokio::test]
async fn plan_requires_api_key() {
    let app = build_app(assets_root()).await.expect("app should build");

    let request = Request::builder()
        .method("POST")
        .uri("/v1/plan")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "location": "Jaipur",
                "days": 3,
                "budget": "moderate"
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn plan_returns_structured_payload() {
    let app = build_app(assets_root()).await.expect("app should build");

    let request = Request::builder()
        .method("POST")
        .uri("/v1/plan")
        .header("content-type", "application/json")
        .header("x-api-key", "dev-wayfarer-key")
        .body(Body::from(
            json!({
                "location": "Jaipur",
                "days": 3,
                "budget": "moderate"
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert!(parsed.get("trip_id").is_some());
    assert!(parsed.get("summary").is_some());
    assert!(parsed.get("day_plans").is_some());
    assert_eq!(parsed["metadata"]["days"], 3);
}

#[tokio::test]
async fn unknown_location_still_returns_a_result() {
    let app = build_app(assets_root()).await.expect("app should build");

    let request = Request::builder()
        .method("POST")
        .uri("/v1/plan")
        .header("content-type", "application/json")
        .header("x-api-key", "dev-wayfarer-key")
        .body(Body::from(
            json!({
                "location": "Nowhereland",
                "days": 2,
                "budget": "low"
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let summary = parsed["summary"].as_str().unwrap_or_default();
    assert!(summary.contains("not recognized"), "summary: {summary}");
}

#[tokio::test]
async fn planned_trips_show_up_in_the_list_and_can_be_deleted() {
    let app = build_app(assets_root()).await.expect("app should build");

    let plan_request = Request::builder()
        .method("POST")
        .uri("/v1/plan")
        .header("content-type", "application/json")
        .header("x-api-key", "dev-wayfarer-key")
        .body(Body::from(
            json!({
                "location": "Delhi",
                "days": 2,
                "budget": "high"
            })
            .to_string(),
        ))
        .unwrap();

    let plan_response = app.clone().oneshot(plan_request).await.unwrap();
    assert_eq!(plan_response.status(), StatusCode::OK);
    let body = to_bytes(plan_response.into_body(), usize::MAX).await.unwrap();
    let planned: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let trip_id = planned["trip_id"].as_str().expect("trip id").to_string();

    let list_request = Request::builder()
        .uri("/v1/trips")
        .header("x-api-key", "dev-wayfarer-key")
        .body(Body::empty())
        .unwrap();
    let list_response = app.clone().oneshot(list_request).await.unwrap();
    assert_eq!(list_response.status(), StatusCode::OK);
    let body = to_bytes(list_response.into_body(), usize::MAX).await.unwrap();
    let trips: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(trips.as_array().is_some_and(|list| !list.is_empty()));

    let get_request = Request::builder()
        .uri(format!("/v1/trips/{trip_id}"))
        .header("x-api-key", "dev-wayfarer-key")
        .body(Body::empty())
        .unwrap();
    let get_response = app.clone().oneshot(get_request).await.unwrap();
    assert_eq!(get_response.status(), StatusCode::OK);

    let delete_request = Request::builder()
        .method("DELETE")
        .uri(format!("/v1/trips/{trip_id}"))
        .header("x-api-key", "dev-wayfarer-key")
        .body(Body::empty())
        .unwrap();
    let delete_response = app.clone().oneshot(delete_request).await.unwrap();
    assert_eq!(delete_response.status(), StatusCode::OK);

    let missing_request = Request::builder()
        .uri(format!("/v1/trips/{trip_id}"))
        .header("x-api-key", "dev-wayfarer-key")
        .body(Body::empty())
        .unwrap();
    let missing_response = app.oneshot(missing_request).await.unwrap();
    assert_eq!(missing_response.status(), StatusCode::NOT_FOUND);
}
