//! In-process Adapters
//!
//! Port implementations with no external infrastructure.
//! Network and database adapters live in `helly-server`.

mod event_sinks;
mod in_memory;

pub use event_sinks::{LoggingEventSink, QueuedEventSink};
pub use in_memory::{InMemoryFeedbackRepository, InMemoryTeamMemberRepository};
