//! Event publishing handler.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{PublishRequest, PublishResponse, required};
use crate::app_state::AppState;
use crate::domain::EventType;
use crate::error::{ErrorResponse, GatewayError};

/// `POST /api/publish` — Publish a domain event.
///
/// Returns after fan-out; notifications reach streaming clients later.
///
/// # Errors
///
/// Returns [`GatewayError`] if `title` is blank or `type` is not
/// recognized.
#[utoipa::path(
    post,
    path = "/api/publish",
    tag = "Events",
    summary = "Publish an event",
    description = "Creates a domain event, renders one notification per subscriber, and schedules delivery to all streaming clients.",
    request_body = PublishRequest,
    responses(
        (status = 200, description = "Event published", body = PublishResponse),
        (status = 400, description = "Blank title or unknown type", body = ErrorResponse),
    )
)]
pub async fn publish(
    State(state): State<AppState>,
    payload: Result<Json<PublishRequest>, JsonRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Json(req) = payload?;
    let title = required("title", req.title)?;
    let event_type: EventType = required("type", req.event_type)?.parse()?;

    let outcome = state
        .notification_service
        .publish(&title, event_type)
        .await?;

    Ok(Json(PublishResponse::from(outcome)))
}

/// Publishing routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/publish", post(publish))
}
