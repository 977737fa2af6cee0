//! Shared application state injected into all Axum handlers.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::config::GatewayConfig;
use crate::delivery::{ClientSet, DeliveryDispatcher};
use crate::domain::SubscriberRegistry;
use crate::service::NotificationService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Notification service for all business logic.
    pub notification_service: Arc<NotificationService>,
    /// Interval between SSE keep-alive comments.
    pub sse_keep_alive: Duration,
    /// Cancelled once at shutdown; stops pending deliveries and ends every
    /// open stream.
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Wires registry, client set, dispatcher, and service from `config`.
    #[must_use]
    pub fn from_config(config: &GatewayConfig) -> Self {
        let shutdown = CancellationToken::new();
        let registry = Arc::new(SubscriberRegistry::new());
        let clients = ClientSet::with_shutdown(config.client_channel_capacity, shutdown.clone());
        let dispatcher =
            DeliveryDispatcher::with_shutdown(clients, config.delivery_max_delay, shutdown.clone());

        Self {
            notification_service: Arc::new(NotificationService::new(registry, dispatcher)),
            sse_keep_alive: config.sse_keep_alive,
            shutdown,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{Channel, EventType};

    #[tokio::test(start_paused = true)]
    async fn shutdown_token_stops_delivery_and_streams() {
        let state = AppState::from_config(&GatewayConfig::default());
        let service = &state.notification_service;
        let mut client = service.clients().connect();
        let _ = client.recv().await;

        let Ok(_) = service.subscribe("Ana", Channel::Email).await else {
            panic!("subscribe failed");
        };
        let Ok(outcome) = service.publish("X", EventType::Created).await else {
            panic!("publish failed");
        };
        assert_eq!(outcome.scheduled, 1);

        state.shutdown.cancel();
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert!(client.recv().await.is_none());
        let stats = service.dispatcher().stats();
        assert_eq!(stats.cancelled, 1);
        assert_eq!(stats.delivered, 0);
    }
}
