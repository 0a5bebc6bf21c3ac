//! Repository Ports
//!
//! Abstract interfaces for data persistence operations.

mod feedback_repository;
mod team_member_repository;

pub use feedback_repository::*;
pub use team_member_repository::*;
