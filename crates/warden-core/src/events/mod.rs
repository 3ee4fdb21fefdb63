//! Domain events emitted by the passport flows.
//!
//! Events are handed to the registered listeners (audit log, metrics,
//! external subscribers). Listeners observe; they never influence the
//! outcome of the flow that emitted the event.

pub mod passport;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use passport::PassportEvent;

/// Wrapper for all domain events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The admin who caused the event, once known.
    pub actor_id: Option<String>,
    /// The event payload.
    pub payload: PassportEvent,
}

impl DomainEvent {
    /// Create a new domain event.
    pub fn new(actor_id: Option<String>, payload: PassportEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            actor_id,
            payload,
        }
    }
}
