//! Subscription handlers: subscribe, unsubscribe, list.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    SubscribeRequest, SubscribeResponse, SubscriberListResponse, UnsubscribeRequest,
    UnsubscribeResponse, required,
};
use crate::app_state::AppState;
use crate::domain::{Channel, SubscriberId};
use crate::error::{ErrorResponse, GatewayError};

/// `POST /api/subscribe` — Register a subscriber on a channel.
///
/// # Errors
///
/// Returns [`GatewayError`] if `name` is blank or `channel` is not
/// recognized. Nothing is registered in that case.
#[utoipa::path(
    post,
    path = "/api/subscribe",
    tag = "Subscriptions",
    summary = "Subscribe",
    description = "Registers a subscriber who will receive a rendered notification for every published event.",
    request_body = SubscribeRequest,
    responses(
        (status = 201, description = "Subscriber registered", body = SubscribeResponse),
        (status = 400, description = "Blank name or unknown channel", body = ErrorResponse),
    )
)]
pub async fn subscribe(
    State(state): State<AppState>,
    payload: Result<Json<SubscribeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Json(req) = payload?;
    let name = required("name", req.name)?;
    let channel: Channel = required("channel", req.channel)?.parse()?;

    let (subscriber, total) = state
        .notification_service
        .subscribe(&name, channel)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SubscribeResponse { subscriber, total }),
    ))
}

/// `POST /api/unsubscribe` — Remove a subscriber.
///
/// Unknown ids, including strings that are not valid ids at all, succeed
/// without changing anything.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] if `id` is missing or blank.
#[utoipa::path(
    post,
    path = "/api/unsubscribe",
    tag = "Subscriptions",
    summary = "Unsubscribe",
    description = "Removes a subscriber. Idempotent: unknown ids return success.",
    request_body = UnsubscribeRequest,
    responses(
        (status = 200, description = "Subscriber removed or was not present", body = UnsubscribeResponse),
        (status = 400, description = "Missing id", body = ErrorResponse),
    )
)]
pub async fn unsubscribe(
    State(state): State<AppState>,
    payload: Result<Json<UnsubscribeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Json(req) = payload?;
    let raw = required("id", req.id)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(GatewayError::InvalidRequest("id is required".to_string()));
    }

    let service = &state.notification_service;
    let total = match raw.parse::<SubscriberId>() {
        Ok(id) => service.unsubscribe(id).await,
        Err(_) => {
            tracing::debug!(id = raw, "unsubscribe with malformed id treated as unknown");
            service.count().await
        }
    };

    Ok(Json(UnsubscribeResponse { ok: true, total }))
}

/// `GET /api/subscribers` — List active subscribers.
#[utoipa::path(
    get,
    path = "/api/subscribers",
    tag = "Subscriptions",
    summary = "List subscribers",
    description = "Returns all active subscribers in subscription order.",
    responses(
        (status = 200, description = "Subscriber list", body = SubscriberListResponse),
    )
)]
pub async fn list_subscribers(State(state): State<AppState>) -> impl IntoResponse {
    let service = &state.notification_service;
    let subscribers = service.list().await;
    let total = service.count().await;
    Json(SubscriberListResponse { subscribers, total })
}

/// Subscription routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/subscribe", post(subscribe))
        .route("/unsubscribe", post(unsubscribe))
        .route("/subscribers", get(list_subscribers))
}
