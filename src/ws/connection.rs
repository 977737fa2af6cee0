//! WebSocket connection loop.
//!
//! Forwards stream frames from a [`StreamingClient`] to the socket and
//! handles filter commands from the client.

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};

use super::filter::ChannelFilter;
use super::messages::{WsCommand, WsMessage, WsMessageType};
use crate::delivery::StreamingClient;
use crate::domain::Channel;

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads commands from the client and answers them.
/// - Forwards frames admitted by the connection's [`ChannelFilter`].
///
/// Returns when either side closes; dropping `client` on return removes it
/// from the client set.
pub async fn run_connection(socket: WebSocket, mut client: StreamingClient) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut filter = ChannelFilter::new();

    loop {
        tokio::select! {
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let response = handle_text_message(&text, &mut filter);
                        if let Some(resp_json) = response
                            && ws_tx.send(Message::text(resp_json)).await.is_err() {
                                break;
                            }
                    }
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    _ => {}
                }
            }
            frame = client.recv() => {
                let Some(frame) = frame else { break };
                if !filter.admits(&frame) {
                    continue;
                }
                let json = match WsMessage::from_frame(&frame).and_then(|m| serde_json::to_string(&m)) {
                    Ok(json) => json,
                    Err(err) => {
                        tracing::warn!(client_id = %client.id(), error = %err, "failed to serialize ws frame");
                        continue;
                    }
                };
                if ws_tx.send(Message::text(json)).await.is_err() {
                    break;
                }
            }
        }
    }

    tracing::debug!(client_id = %client.id(), "ws connection closed");
}

/// Handles a text message from the client, returning an optional JSON response.
fn handle_text_message(text: &str, filter: &mut ChannelFilter) -> Option<String> {
    let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
        return serde_json::to_string(&WsMessage::error(String::new(), 400, "malformed JSON")).ok();
    };

    if msg.msg_type != WsMessageType::Command {
        return serde_json::to_string(&WsMessage::error(msg.id, 400, "expected a command")).ok();
    }

    let response = match serde_json::from_value::<WsCommand>(msg.payload) {
        Ok(WsCommand::Filter { channels }) => apply_filter(msg.id, &channels, filter),
        Err(_) => WsMessage::error(msg.id, 404, "unknown command"),
    };
    serde_json::to_string(&response).ok()
}

fn apply_filter(id: String, names: &[String], filter: &mut ChannelFilter) -> WsMessage {
    let mut channels = Vec::with_capacity(names.len());
    let mut wildcard = false;
    for name in names {
        if name == "*" {
            wildcard = true;
            continue;
        }
        match name.parse::<Channel>() {
            Ok(channel) => channels.push(channel),
            Err(err) => return WsMessage::error(id, 400, &err.to_string()),
        }
    }

    filter.set(&channels, wildcard);
    WsMessage::reply(
        id,
        WsMessageType::Response,
        serde_json::json!({
            "all": filter.is_all(),
            "channels": filter.channels(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(payload: serde_json::Value) -> String {
        serde_json::json!({
            "id": "c-1",
            "type": "command",
            "timestamp": chrono::Utc::now(),
            "payload": payload,
        })
        .to_string()
    }

    fn parse(response: Option<String>) -> serde_json::Value {
        response
            .and_then(|r| serde_json::from_str(&r).ok())
            .unwrap_or_default()
    }

    #[test]
    fn malformed_json_is_an_error() {
        let mut filter = ChannelFilter::new();
        let resp = parse(handle_text_message("{nope", &mut filter));
        assert_eq!(resp["type"], "error");
    }

    #[test]
    fn filter_command_restricts_channels() {
        let mut filter = ChannelFilter::new();
        let resp = parse(handle_text_message(
            &command(serde_json::json!({ "command": "filter", "channels": ["email", "push"] })),
            &mut filter,
        ));
        assert_eq!(resp["type"], "response");
        assert_eq!(resp["id"], "c-1");
        assert_eq!(resp["payload"]["all"], false);
        assert!(filter.matches(Channel::Email));
        assert!(!filter.matches(Channel::Sms));
    }

    #[test]
    fn invalid_channel_leaves_filter_untouched() {
        let mut filter = ChannelFilter::new();
        let resp = parse(handle_text_message(
            &command(serde_json::json!({ "command": "filter", "channels": ["fax"] })),
            &mut filter,
        ));
        assert_eq!(resp["type"], "error");
        assert!(filter.is_all());
    }

    #[test]
    fn unknown_command_is_404() {
        let mut filter = ChannelFilter::new();
        let resp = parse(handle_text_message(
            &command(serde_json::json!({ "command": "swap" })),
            &mut filter,
        ));
        assert_eq!(resp["payload"]["code"], 404);
    }
}
