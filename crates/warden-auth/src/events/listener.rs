//! Listener trait and the built-in listeners.

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::info;

use warden_core::events::DomainEvent;

/// Receives lifecycle events from the passport flows.
///
/// Listeners observe only. They cannot fail the flow that emitted the
/// event.
#[async_trait]
pub trait PassportListener: Send + Sync + std::fmt::Debug {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Handles one event.
    async fn on_event(&self, event: &DomainEvent);
}

/// Writes every event to the audit log target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingListener;

#[async_trait]
impl PassportListener for TracingListener {
    fn name(&self) -> &str {
        "audit-log"
    }

    async fn on_event(&self, event: &DomainEvent) {
        info!(
            target: "warden::audit",
            event_id = %event.id,
            event = event.payload.name(),
            actor_id = event.actor_id.as_deref().unwrap_or("-"),
            timestamp = %event.timestamp,
            "Passport event"
        );
    }
}

/// Republishes events on a broadcast channel for in-process subscribers.
#[derive(Debug, Clone)]
pub struct ChannelListener {
    sender: broadcast::Sender<DomainEvent>,
}

impl ChannelListener {
    /// Creates a listener whose channel buffers up to `capacity` events.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Subscribes to events emitted from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }
}

#[async_trait]
impl PassportListener for ChannelListener {
    fn name(&self) -> &str {
        "channel"
    }

    async fn on_event(&self, event: &DomainEvent) {
        // No receivers is not an error.
        let _ = self.sender.send(event.clone());
    }
}
