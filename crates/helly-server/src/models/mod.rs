//! API Models
//!
//! Request/response DTOs for the HTTP API (camelCase on the wire).

pub mod ask;
pub mod feedback;
pub mod team_member;
pub mod timestamp;

pub use ask::*;
pub use feedback::*;
pub use team_member::*;
