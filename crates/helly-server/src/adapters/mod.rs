//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod ai_gateway;
pub mod postgres;
pub mod webhook;

// Re-exports
pub use ai_gateway::HttpAiGateway;
pub use postgres::{PgFeedbackRepository, PgTeamMemberRepository};
pub use webhook::WebhookEventSink;
