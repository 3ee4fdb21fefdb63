//! Fans out passport events to every registered listener.
//!
//! Listeners run in registration order. Each call is bounded by a
//! timeout; a slow listener is logged and skipped.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use warden_core::events::{DomainEvent, PassportEvent};

use super::listener::PassportListener;

const LISTENER_TIMEOUT: Duration = Duration::from_secs(5);

/// Delivers events to the configured listeners.
#[derive(Debug, Clone, Default)]
pub struct EventDispatcher {
    listeners: Vec<Arc<dyn PassportListener>>,
}

impl EventDispatcher {
    /// Creates a dispatcher with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a listener.
    pub fn with_listener(mut self, listener: Arc<dyn PassportListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Wraps `payload` in a [`DomainEvent`] and delivers it.
    pub async fn emit(&self, actor_id: Option<String>, payload: PassportEvent) {
        if self.listeners.is_empty() {
            return;
        }

        let event = DomainEvent::new(actor_id, payload);
        debug!(
            event = event.payload.name(),
            listener_count = self.listeners.len(),
            "Dispatching passport event"
        );

        for listener in &self.listeners {
            if tokio::time::timeout(LISTENER_TIMEOUT, listener.on_event(&event))
                .await
                .is_err()
            {
                warn!(
                    event = event.payload.name(),
                    listener = listener.name(),
                    "Listener timed out"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::listener::{ChannelListener, TracingListener};

    #[tokio::test]
    async fn test_emit_reaches_channel_subscribers() {
        let channel = ChannelListener::new(8);
        let mut rx = channel.subscribe();
        let dispatcher = EventDispatcher::new()
            .with_listener(Arc::new(TracingListener))
            .with_listener(Arc::new(channel));
        assert_eq!(dispatcher.listener_count(), 2);

        dispatcher
            .emit(
                Some("1".into()),
                PassportEvent::LoggedOut {
                    admin_id: "1".into(),
                },
            )
            .await;

        let event = rx.recv().await.unwrap();
        assert_eq!(event.actor_id.as_deref(), Some("1"));
        assert_eq!(
            event.payload,
            PassportEvent::LoggedOut {
                admin_id: "1".into()
            }
        );
    }

    #[tokio::test]
    async fn test_emit_without_listeners_is_noop() {
        EventDispatcher::new()
            .emit(None, PassportEvent::LoginAttempted { name: "x".into() })
            .await;
    }
}
