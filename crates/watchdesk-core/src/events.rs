//! Client event types and event bus.
//!
//! The request pipeline and the upload tray publish lifecycle notifications
//! onto a single broadcast channel. Downstream consumers (a UI shell, a TUI,
//! tests) subscribe independently; events are dropped when nobody listens.

use serde::Serialize;
use tokio::sync::broadcast;

/// Events emitted by the client stack.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Credentials were cleared because the refresh procedure failed.
    SessionExpired { reason: String },
    /// The caller should navigate to the given route path.
    Navigate { path: String },
    /// A batch upload finished with the given aggregate counts.
    UploadFinished { succeeded: usize, failed: usize },
    /// The comment poller fetched a fresh page for an incident.
    CommentsRefreshed { incident_id: i64, count: usize },
}

/// Broadcast bus for [`ClientEvent`]s.
///
/// Cloning the bus shares the underlying channel.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<ClientEvent>,
}

impl EventBus {
    /// Create a new event bus with the given buffer capacity.
    ///
    /// Recommended: 256 for production, 32 for tests.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Emit an event to all subscribers.
    ///
    /// If there are no active subscribers, the event is silently dropped.
    pub fn emit(&self, event: ClientEvent) {
        let subscriber_count = self.tx.receiver_count();
        tracing::debug!(?event, subscriber_count, "EventBus emit");
        let _ = self.tx.send(event);
    }

    /// Subscribe to receive events. Each subscriber gets its own stream.
    pub fn subscribe(&self) -> broadcast::Receiver<ClientEvent> {
        self.tx.subscribe()
    }

    /// Returns the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_event_bus_emit_subscribe() {
        let bus = EventBus::new(32);
        let mut rx = bus.subscribe();

        bus.emit(ClientEvent::Navigate {
            path: "/login".to_string(),
        });

        let event = rx.recv().await.unwrap();
        assert_eq!(
            event,
            ClientEvent::Navigate {
                path: "/login".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_event_bus_multiple_subscribers() {
        let bus = EventBus::new(32);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        bus.emit(ClientEvent::UploadFinished {
            succeeded: 2,
            failed: 1,
        });

        assert!(rx1.recv().await.is_ok());
        assert!(rx2.recv().await.is_ok());
    }

    #[test]
    fn test_emit_without_subscribers_is_silent() {
        let bus = EventBus::new(32);
        // Must not panic or error.
        bus.emit(ClientEvent::SessionExpired {
            reason: "refresh failed".to_string(),
        });
    }
}
