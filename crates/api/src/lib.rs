mod rate_limit;

use std::env;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::body::Body;
use axum::extract::{Json, Path as AxumPath, State};
use axum::http::{Method, Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use wayfarer_catalog::load_bundle;
use wayfarer_core::TripPlanRequest;
use wayfarer_ml::MlStack;
use wayfarer_observability::AppMetrics;
use wayfarer_storage::Store;
use wayfarer_trips::TripService;

use crate::rate_limit::IpRateLimiter;

const MAX_PLAN_DAYS: i32 = 365;

#[derive(Clone)]
pub struct ApiState {
    pub service: Arc<TripService<Store>>,
    pub metrics: Arc<AppMetrics>,
    pub api_key: String,
    pub limiter: IpRateLimiter,
}

pub async fn build_app(assets_root: impl AsRef<Path>) -> Result<Router> {
    let metrics = AppMetrics::shared();
    let ml_stack = MlStack::load_default();
    let bundle = load_bundle(assets_root);

    let store = if let Ok(database_url) = env::var("WAYFARER_DATABASE_URL") {
        Store::sqlite(&database_url).await?
    } else {
        Store::memory()
    };

    let service = Arc::new(TripService::new(
        bundle,
        ml_stack,
        Arc::new(store),
        metrics.clone(),
    ));

    let api_key = env::var("WAYFARER_API_KEY").unwrap_or_else(|_| "dev-wayfarer-key".to_string());
    let rate_limit_window = Duration::from_secs(
        env::var("WAYFARER_RATE_LIMIT_WINDOW_SECONDS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(60),
    );
    let rate_limit_max = env::var("WAYFARER_RATE_LIMIT_MAX")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(80);

    let state = ApiState {
        service,
        metrics,
        api_key,
        limiter: IpRateLimiter::new(rate_limit_window, rate_limit_max),
    };

    Ok(build_router(state))
}

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/plan", post(plan))
        .route("/v1/trips", get(trips_list))
        .route("/v1/trips/:trip_id", get(trip_get).delete(trip_delete))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(RequestBodyLimitLayer::new(16 * 1024))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api_key_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .with_state(state)
}

fn is_public_endpoint(path: &str) -> bool {
    path == "/health"
}

async fn api_key_middleware(
    State(state): State<ApiState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if request.method() == Method::OPTIONS || is_public_endpoint(request.uri().path()) {
        return next.run(request).await;
    }

    let header_key = request
        .headers()
        .get("x-api-key")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if header_key != state.api_key {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "error": "unauthorized",
                "message": "missing or invalid x-api-key"
            })),
        )
            .into_response();
    }

    next.run(request).await
}

async fn rate_limit_middleware(
    State(state): State<ApiState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let client_key = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .map(|value| value.split(',').next().unwrap_or(value).trim().to_string())
        .unwrap_or_else(|| "local".to_string());

    if !state.limiter.allow(&client_key) {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(serde_json::json!({
                "error": "rate_limited",
                "message": "too many requests, slow down"
            })),
        )
            .into_response();
    }

    next.run(request).await
}

#[derive(Debug, serde::Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp_utc: String,
    scoring_model: &'static str,
    catalog: wayfarer_catalog::CatalogStats,
    metrics: wayfarer_observability::MetricsSnapshot,
}

async fn health(State(state): State<ApiState>) -> impl IntoResponse {
    let payload = HealthResponse {
        status: "ok",
        timestamp_utc: chrono::Utc::now().to_rfc3339(),
        scoring_model: state.service.scoring_model(),
        catalog: state.service.catalog_stats(),
        metrics: state.metrics.snapshot(),
    };
    (StatusCode::OK, Json(payload))
}

#[derive(Debug, Deserialize)]
struct PlanRequestBody {
    location: String,
    days: i32,
    budget: Option<String>,
}

async fn plan(
    State(state): State<ApiState>,
    Json(body): Json<PlanRequestBody>,
) -> Response {
    let request = TripPlanRequest {
        location: body.location,
        days: body.days.min(MAX_PLAN_DAYS),
        budget: body.budget.unwrap_or_default(),
    };

    match state.service.plan_trip(request).await {
        Ok(saved) => (StatusCode::OK, Json(saved)).into_response(),
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "plan request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": "plan_failed",
                    "message": "failed to generate itinerary"
                })),
            )
                .into_response()
        }
    }
}

async fn trips_list(State(state): State<ApiState>) -> Response {
    match state.service.list_trips().await {
        Ok(trips) => (StatusCode::OK, Json(trips)).into_response(),
        Err(err) => storage_error(err),
    }
}

async fn trip_get(
    State(state): State<ApiState>,
    AxumPath(trip_id): AxumPath<String>,
) -> Response {
    match state.service.load_trip(&trip_id).await {
        Ok(Some(record)) => {
            let itinerary = record
                .itinerary()
                .map(|result| serde_json::to_value(result).unwrap_or_default())
                .unwrap_or_default();
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "trip_id": record.trip_id,
                    "location": record.location,
                    "days": record.days,
                    "budget": record.budget,
                    "generated_at": record.generated_at,
                    "summary": record.summary,
                    "itinerary": itinerary,
                })),
            )
                .into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "error": "not_found",
                "message": "no trip with that id"
            })),
        )
            .into_response(),
        Err(err) => storage_error(err),
    }
}

async fn trip_delete(
    State(state): State<ApiState>,
    AxumPath(trip_id): AxumPath<String>,
) -> Response {
    match state.service.delete_trip(&trip_id).await {
        Ok(true) => (StatusCode::OK, Json(serde_json::json!({ "deleted": true }))).into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "error": "not_found",
                "message": "no trip with that id"
            })),
        )
            .into_response(),
        Err(err) => storage_error(err),
    }
}

fn storage_error(err: anyhow::Error) -> Response {
    tracing::error!(error = %format!("{err:#}"), "storage operation failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({
            "error": "storage_failed",
            "message": "storage operation failed"
        })),
    )
        .into_response()
}
