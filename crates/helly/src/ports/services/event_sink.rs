//! Event Sink Port
//!
//! Receives domain events when feedback is created.
//! Delivery is fire-and-forget from the caller's perspective.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::FeedbackCreated;

/// Why an event could not be handed to the sink
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventSinkError {
    /// Transient: the sink or its downstream is not reachable right now
    #[error("Event sink unavailable: {0}")]
    Unavailable(String),

    /// Permanent: the sink is set up wrong and will keep failing
    #[error("Event sink misconfigured: {0}")]
    Misconfigured(String),
}

/// Event publication interface
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Hand an event to the sink without waiting for downstream acknowledgment
    async fn publish(&self, event: &FeedbackCreated) -> Result<(), EventSinkError>;
}
