//! Event Bus
//!
//! In-process broadcast channel carrying resource change notifications.
//! Admin mutations publish here and the public SSE endpoint subscribes,
//! so open browsers refresh without polling.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 256;

/// Resource change notification
///
/// `version` is a per-resource monotonic counter so subscribers can
/// discard stale events after a reconnect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncEvent {
    /// Resource type ("menu_item", "category", "gallery", "review", "settings")
    pub resource: String,
    /// Change type ("created", "updated", "deleted")
    pub action: String,
    /// Resource record id
    pub id: String,
    pub version: u64,
    /// Post-change row, absent for deletions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Broadcast bus for [`SyncEvent`]s. Cloning shares the same channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<SyncEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.tx.subscribe()
    }

    /// Publish a change. Events sent with no subscribers are dropped.
    pub fn publish(&self, event: SyncEvent) {
        let receivers = self.tx.receiver_count();
        if let Err(_e) = self.tx.send(event) {
            tracing::trace!(receivers, "Sync event dropped (no subscribers)");
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(resource: &str, action: &str) -> SyncEvent {
        SyncEvent {
            resource: resource.to_string(),
            action: action.to_string(),
            id: "menu_item:test".to_string(),
            version: 1,
            data: None,
        }
    }

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        bus.publish(event("menu_item", "created"));

        let received = rx.recv().await.unwrap();
        assert_eq!(received.resource, "menu_item");
        assert_eq!(received.action, "created");
    }

    #[test]
    fn publish_without_subscribers_does_not_panic() {
        let bus = EventBus::new();
        bus.publish(event("category", "deleted"));
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn each_subscriber_gets_every_event() {
        let bus = EventBus::new();
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();

        bus.publish(event("review", "created"));

        assert_eq!(a.recv().await.unwrap().resource, "review");
        assert_eq!(b.recv().await.unwrap().resource, "review");
    }
}
