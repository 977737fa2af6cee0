//! REST API layer: route handlers, DTOs, and router composition.
//!
//! Resource endpoints are mounted under `/api`; the streaming endpoints
//! (`/events`, `/ws`) and `/health` sit at the root.

pub mod dto;
pub mod handlers;
pub mod openapi;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::sse::handler::sse_handler;
use crate::ws::handler::ws_handler;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api", handlers::routes())
        .merge(handlers::system::routes())
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
}

/// Builds the full application: REST, SSE, WebSocket, and HTTP layers.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(build_router())
        .route("/events", get(sse_handler))
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
