//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the domain layer
//! interacts with external systems (repositories, services).
//!
//! In-process implementations live in `adapters`; database and network
//! implementations live in the server crate.

pub mod repositories;
pub mod services;

// Re-exports
pub use repositories::*;
pub use services::*;
