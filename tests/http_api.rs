//! REST endpoint tests driven through the full router without a socket.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use herald_gateway::api::build_app;
use herald_gateway::app_state::AppState;
use herald_gateway::config::GatewayConfig;

fn app() -> Router {
    build_app(AppState::from_config(&GatewayConfig::default()))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

#[tokio::test]
async fn subscribe_returns_created_with_subscriber() {
    let app = app();
    let (status, body) = post(&app, "/api/subscribe", json!({"name": "Ana", "channel": "email"})).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["subscriber"]["name"], "Ana");
    assert_eq!(body["subscriber"]["channel"], "email");
    assert!(body["subscriber"]["id"].is_string());
    assert_eq!(body["total"], 1);
}

#[tokio::test]
async fn subscribe_trims_name() {
    let app = app();
    let (status, body) = post(&app, "/api/subscribe", json!({"name": "  Bo ", "channel": "sms"})).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["subscriber"]["name"], "Bo");
}

#[tokio::test]
async fn subscribe_rejects_unknown_channel() {
    let app = app();
    let (status, body) = post(&app, "/api/subscribe", json!({"name": "Ana", "channel": "fax"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 1002);

    let (_, list) = get(&app, "/api/subscribers").await;
    assert_eq!(list["total"], 0);
}

#[tokio::test]
async fn subscribe_rejects_blank_or_missing_name() {
    let app = app();
    let (blank, _) = post(&app, "/api/subscribe", json!({"name": "   ", "channel": "email"})).await;
    let (missing, body) = post(&app, "/api/subscribe", json!({"channel": "email"})).await;

    assert_eq!(blank, StatusCode::BAD_REQUEST);
    assert_eq!(missing, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 1001);
}

#[tokio::test]
async fn malformed_json_uses_error_envelope() {
    let app = app();
    let request = Request::post("/api/subscribe")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 1001);
    assert!(body["error"]["message"].is_string());
}

#[tokio::test]
async fn list_preserves_insertion_order() {
    let app = app();
    post(&app, "/api/subscribe", json!({"name": "Ana", "channel": "email"})).await;
    post(&app, "/api/subscribe", json!({"name": "Bo", "channel": "push"})).await;

    let (status, body) = get(&app, "/api/subscribers").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(body["subscribers"][0]["name"], "Ana");
    assert_eq!(body["subscribers"][1]["name"], "Bo");
}

#[tokio::test]
async fn list_total_tracks_unsubscribe() {
    let app = app();
    let (_, ana) = post(&app, "/api/subscribe", json!({"name": "Ana", "channel": "email"})).await;
    post(&app, "/api/subscribe", json!({"name": "Bo", "channel": "sms"})).await;
    post(&app, "/api/unsubscribe", json!({ "id": ana["subscriber"]["id"] })).await;

    let (_, body) = get(&app, "/api/subscribers").await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["subscribers"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["subscribers"][0]["name"], "Bo");
}

#[tokio::test]
async fn unsubscribe_removes_subscriber() {
    let app = app();
    let (_, created) = post(&app, "/api/subscribe", json!({"name": "Ana", "channel": "email"})).await;
    let id = created["subscriber"]["id"].clone();

    let (status, body) = post(&app, "/api/unsubscribe", json!({ "id": id })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn unsubscribe_unknown_or_malformed_id_succeeds() {
    let app = app();
    post(&app, "/api/subscribe", json!({"name": "Ana", "channel": "email"})).await;

    let unknown = uuid::Uuid::new_v4().to_string();
    let (status, body) = post(&app, "/api/unsubscribe", json!({ "id": unknown })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);

    let (status, body) = post(&app, "/api/unsubscribe", json!({"id": "not-a-uuid"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["total"], 1);
}

#[tokio::test]
async fn unsubscribe_requires_id() {
    let app = app();
    let (status, body) = post(&app, "/api/unsubscribe", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 1001);
}

#[tokio::test]
async fn publish_reports_fan_out() {
    let app = app();
    post(&app, "/api/subscribe", json!({"name": "Ana", "channel": "email"})).await;
    post(&app, "/api/subscribe", json!({"name": "Bo", "channel": "sms"})).await;

    let (status, body) = post(&app, "/api/publish", json!({"title": "Launch", "type": "UPDATED"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["event"]["title"], "Launch");
    assert_eq!(body["event"]["type"], "UPDATED");
    assert!(body["event"]["createdAt"].is_string());
    assert_eq!(body["totalSubscribers"], 2);
    assert_eq!(body["scheduled"], 2);
    assert_eq!(body["failed"], 0);
}

#[tokio::test]
async fn publish_without_subscribers_still_creates_event() {
    let app = app();
    let (status, body) = post(&app, "/api/publish", json!({"title": "Alone", "type": "CREATED"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalSubscribers"], 0);
    assert_eq!(body["scheduled"], 0);
}

#[tokio::test]
async fn publish_rejects_bad_input() {
    let app = app();
    let (blank, _) = post(&app, "/api/publish", json!({"title": " ", "type": "CREATED"})).await;
    let (bad_type, body) = post(&app, "/api/publish", json!({"title": "X", "type": "DELETED"})).await;

    assert_eq!(blank, StatusCode::BAD_REQUEST);
    assert_eq!(bad_type, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 1003);
}

#[tokio::test]
async fn health_reports_counts() {
    let app = app();
    post(&app, "/api/subscribe", json!({"name": "Ana", "channel": "push"})).await;

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["subscribers"], 1);
    assert_eq!(body["streamingClients"], 0);
    assert!(body["delivery"].is_object());
}

#[tokio::test]
async fn catalog_lists_vocabulary() {
    let app = app();
    let (status, body) = get(&app, "/api/catalog").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["channels"], json!(["email", "sms", "push"]));
    assert_eq!(body["eventTypes"], json!(["CREATED", "UPDATED", "CANCELLED"]));
}

#[tokio::test]
async fn openapi_document_lists_paths() {
    let app = app();
    let (status, body) = get(&app, "/api-docs/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/publish"].is_object());
    assert!(body["paths"]["/api/subscribe"].is_object());
}
