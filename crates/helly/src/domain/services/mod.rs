//! Domain Services
//!
//! Stateless domain logic that spans entities.

mod roster_resolver;

pub use roster_resolver::*;
