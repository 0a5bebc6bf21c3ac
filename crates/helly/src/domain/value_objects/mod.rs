//! Value Objects
//!
//! Immutable value types without identity.

mod hint;
mod time_window;

pub use hint::*;
pub use time_window::*;
