//! `GET /events` — Server-Sent Events stream of notifications.

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures_util::Stream;

use crate::app_state::AppState;
use crate::delivery::StreamFrame;

/// Opens a notification stream.
///
/// The first event is `hello`; every later event is a `notification`
/// carrying a serialized `NotificationMessage`. When the client goes
/// away Axum drops the stream, which removes the client from the set.
pub async fn sse_handler(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let client = state.notification_service.clients().connect();

    let stream = futures_util::stream::unfold(client, |mut client| async move {
        let frame = client.recv().await?;
        Some((Ok(to_sse_event(&frame)), client))
    });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(state.sse_keep_alive))
}

/// Converts a frame into a named SSE event with a JSON data line.
fn to_sse_event(frame: &StreamFrame) -> Event {
    let event = Event::default().event(frame.event_name());
    let event = match frame {
        StreamFrame::Notification(msg) => event.id(msg.id.to_string()),
        StreamFrame::Hello(_) => event,
    };
    match frame.payload_json() {
        Ok(json) => event.data(json),
        Err(err) => {
            tracing::warn!(error = %err, "failed to serialize stream frame");
            Event::default().event("error").data("serialization failed")
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::delivery::Hello;
    use crate::domain::notification::build;
    use crate::domain::{Channel, DomainEvent, EventType, Subscriber};

    #[test]
    fn hello_frame_becomes_hello_event() {
        let rendered = format!("{:?}", to_sse_event(&StreamFrame::Hello(Hello::connected())));
        assert!(rendered.contains("hello"));
    }

    #[test]
    fn notification_frame_carries_id() {
        let msg = build(
            &Subscriber::new("Ana", Channel::Email),
            &DomainEvent::new("X", EventType::Created),
        );
        let id = msg.id.to_string();
        let rendered = format!(
            "{:?}",
            to_sse_event(&StreamFrame::Notification(Arc::new(msg)))
        );
        assert!(rendered.contains("notification"));
        assert!(rendered.contains(&id));
    }
}
