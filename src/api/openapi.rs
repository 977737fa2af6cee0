//! OpenAPI document for the REST surface.

use axum::Json;
use axum::response::IntoResponse;
use utoipa::OpenApi;

use super::handlers::{publish, subscription, system};

/// Generated OpenAPI description of every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "herald-gateway",
        description = "Subscribe to notification channels, publish domain events, and stream rendered notifications."
    ),
    paths(
        subscription::subscribe,
        subscription::unsubscribe,
        subscription::list_subscribers,
        publish::publish,
        system::health_handler,
        system::catalog_handler,
    ),
    tags(
        (name = "Subscriptions", description = "Subscriber registry"),
        (name = "Events", description = "Event publishing"),
        (name = "System", description = "Health and metadata"),
    )
)]
pub struct ApiDoc;

/// `GET /api-docs/openapi.json` — Serve the OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
