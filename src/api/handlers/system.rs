//! System endpoints: health check and vocabulary catalog.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::delivery::DeliveryStats;
use crate::domain::{Channel, EventType};

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
    subscribers: usize,
    streaming_clients: usize,
    delivery: DeliveryStats,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health, version, subscriber and streaming client counts, and delivery counters.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let service = &state.notification_service;
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            subscribers: service.count().await,
            streaming_clients: service.clients().len(),
            delivery: service.dispatcher().stats(),
        }),
    )
}

/// Accepted values for `channel` and `type`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct CatalogResponse {
    channels: Vec<Channel>,
    event_types: Vec<EventType>,
}

/// `GET /api/catalog` — List accepted channels and event types.
#[utoipa::path(
    get,
    path = "/api/catalog",
    tag = "System",
    summary = "List accepted channels and event types",
    responses(
        (status = 200, description = "Vocabulary catalog", body = CatalogResponse),
    )
)]
pub async fn catalog_handler() -> impl IntoResponse {
    Json(CatalogResponse {
        channels: Channel::ALL.to_vec(),
        event_types: vec![EventType::Created, EventType::Updated, EventType::Cancelled],
    })
}

/// System routes mounted at the root level.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_handler))
}

/// Catalog route, nested under `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/catalog", get(catalog_handler))
}
