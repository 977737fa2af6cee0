//! Single source of truth for who is listening.
//!
//! [`SubscriberRegistry`] stores subscribers and the [`FanoutBus`] behind
//! one [`tokio::sync::RwLock`]. Every mutation touches both under the same
//! write guard, so a publish can never observe a subscriber without a
//! listener or a listener without a subscriber.
//!
//! # Concurrency
//!
//! - Subscribe and unsubscribe serialize on the write lock.
//! - Publish holds the read lock only long enough to clone the bus.
//! - Fan-out runs on that snapshot, outside the lock.

use std::sync::Arc;

use tokio::sync::RwLock;

use super::fanout_bus::FanoutBus;
use super::listener::Listener;
use super::notification::NotificationBuilder;
use super::{Channel, Subscriber, SubscriberId};

#[derive(Debug, Default)]
struct RegistryState {
    /// Insertion order.
    subscribers: Vec<Subscriber>,
    bus: FanoutBus,
}

/// Registry of active subscribers and their listeners.
#[derive(Debug, Default)]
pub struct SubscriberRegistry {
    state: RwLock<RegistryState>,
}

impl SubscriberRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new subscriber with a [`NotificationBuilder`] listener.
    pub async fn add(&self, name: impl Into<String>, channel: Channel) -> Subscriber {
        self.add_with(name, channel, |subscriber| {
            Arc::new(NotificationBuilder::new(subscriber.clone()))
        })
        .await
    }

    /// Registers a new subscriber whose listener is built by `make_listener`.
    ///
    /// The subscriber entry and its listener become visible together.
    pub async fn add_with<F>(
        &self,
        name: impl Into<String>,
        channel: Channel,
        make_listener: F,
    ) -> Subscriber
    where
        F: FnOnce(&Subscriber) -> Arc<dyn Listener>,
    {
        let mut state = self.state.write().await;
        let mut subscriber = Subscriber::new(name, channel);
        // v4 collisions are astronomically unlikely; regenerate rather than
        // break the one-listener-per-id invariant.
        while state.bus.contains(subscriber.id) {
            subscriber.id = SubscriberId::new();
        }
        let listener = make_listener(&subscriber);
        state.bus.register(subscriber.id, listener);
        state.subscribers.push(subscriber.clone());

        tracing::debug!(
            subscriber_id = %subscriber.id,
            channel = %subscriber.channel,
            total = state.bus.len(),
            "subscriber registered"
        );
        subscriber
    }

    /// Removes a subscriber and its listener. Unknown ids are a no-op.
    ///
    /// Returns `true` if a subscriber was removed.
    pub async fn remove(&self, id: SubscriberId) -> bool {
        let mut state = self.state.write().await;
        let had_listener = state.bus.unregister(id);
        let before = state.subscribers.len();
        state.subscribers.retain(|s| s.id != id);
        let had_entry = state.subscribers.len() != before;
        debug_assert_eq!(had_listener, had_entry);
        had_entry
    }

    /// Returns the subscriber with the given id, if registered.
    pub async fn get(&self, id: SubscriberId) -> Option<Subscriber> {
        let state = self.state.read().await;
        state.subscribers.iter().find(|s| s.id == id).cloned()
    }

    /// Snapshot of all subscribers in insertion order.
    pub async fn list(&self) -> Vec<Subscriber> {
        self.state.read().await.subscribers.clone()
    }

    /// Number of active listeners in the bus.
    pub async fn count(&self) -> usize {
        self.state.read().await.bus.len()
    }

    /// Returns `true` if nobody is subscribed.
    pub async fn is_empty(&self) -> bool {
        self.state.read().await.bus.is_empty()
    }

    /// Clones the bus so fan-out can run without holding the lock.
    pub async fn snapshot(&self) -> FanoutBus {
        self.state.read().await.bus.clone()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{DomainEvent, EventType, ListenerError, NotificationMessage};

    #[derive(Debug)]
    struct AlwaysFails(SubscriberId);

    impl Listener for AlwaysFails {
        fn on_event(&self, _event: &DomainEvent) -> Result<NotificationMessage, ListenerError> {
            Err(ListenerError::Render {
                subscriber_id: self.0,
                reason: "boom".to_string(),
            })
        }
    }

    async fn assert_in_lockstep(registry: &SubscriberRegistry) {
        let listed: Vec<SubscriberId> = registry.list().await.iter().map(|s| s.id).collect();
        let snapshot = registry.snapshot().await;
        let bus_ids: Vec<SubscriberId> = snapshot.ids().collect();
        assert_eq!(listed, bus_ids);
    }

    #[tokio::test]
    async fn add_and_get() {
        let registry = SubscriberRegistry::new();
        let sub = registry.add("Ana", Channel::Email).await;

        assert_eq!(registry.get(sub.id).await, Some(sub.clone()));
        assert_eq!(registry.count().await, 1);
        assert!(!registry.is_empty().await);
        assert_in_lockstep(&registry).await;
    }

    #[tokio::test]
    async fn count_is_adds_minus_removes() {
        let registry = SubscriberRegistry::new();
        let mut ids = Vec::new();
        for i in 0..5 {
            ids.push(registry.add(format!("user-{i}"), Channel::Sms).await.id);
        }
        for id in ids.iter().take(2) {
            assert!(registry.remove(*id).await);
        }

        assert_eq!(registry.count().await, 3);
        assert_eq!(registry.list().await.len(), 3);
        assert_in_lockstep(&registry).await;
    }

    #[tokio::test]
    async fn remove_unknown_is_noop() {
        let registry = SubscriberRegistry::new();
        registry.add("Ana", Channel::Email).await;

        assert!(!registry.remove(SubscriberId::new()).await);
        assert_eq!(registry.count().await, 1);
    }

    #[tokio::test]
    async fn remove_twice_is_idempotent() {
        let registry = SubscriberRegistry::new();
        let sub = registry.add("Ana", Channel::Push).await;

        assert!(registry.remove(sub.id).await);
        assert!(!registry.remove(sub.id).await);
        assert!(registry.is_empty().await);
        assert_eq!(registry.get(sub.id).await, None);
        assert_in_lockstep(&registry).await;
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let registry = SubscriberRegistry::new();
        registry.add("Ana", Channel::Email).await;
        registry.add("Bo", Channel::Sms).await;
        registry.add("Cy", Channel::Push).await;

        let names: Vec<String> = registry.list().await.into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["Ana", "Bo", "Cy"]);
    }

    #[tokio::test]
    async fn add_with_uses_custom_listener() {
        let registry = SubscriberRegistry::new();
        registry.add("Ana", Channel::Email).await;
        registry
            .add_with("Broken", Channel::Sms, |s| Arc::new(AlwaysFails(s.id)))
            .await;

        let report = registry
            .snapshot()
            .await
            .fan_out(&DomainEvent::new("X", EventType::Created));

        assert_eq!(report.notifications.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(registry.count().await, 2);
    }

    #[tokio::test]
    async fn snapshot_survives_concurrent_remove() {
        let registry = SubscriberRegistry::new();
        let a = registry.add("Ana", Channel::Email).await;
        registry.add("Bo", Channel::Sms).await;

        let snapshot = registry.snapshot().await;
        registry.remove(a.id).await;

        let batch = snapshot.notify_all(&DomainEvent::new("X", EventType::Created));
        assert_eq!(batch.len(), 2);
        assert_eq!(registry.count().await, 1);
    }

    #[tokio::test]
    async fn concurrent_mutation_keeps_lockstep() {
        let registry = Arc::new(SubscriberRegistry::new());
        let mut handles = Vec::new();
        for i in 0..20 {
            let registry = Arc::clone(&registry);
            handles.push(tokio::spawn(async move {
                let sub = registry.add(format!("u{i}"), Channel::Push).await;
                if i % 2 == 0 {
                    registry.remove(sub.id).await;
                }
            }));
        }
        for handle in handles {
            let Ok(()) = handle.await else {
                panic!("task failed");
            };
        }

        assert_eq!(registry.count().await, 10);
        assert_in_lockstep(&registry).await;
    }
}
