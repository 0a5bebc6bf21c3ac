//! Service Ports
//!
//! Abstract interfaces for external services.

mod ai_gateway;
mod entity_resolver;
mod event_sink;

pub use ai_gateway::*;
pub use entity_resolver::*;
pub use event_sink::*;
