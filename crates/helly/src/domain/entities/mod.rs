//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - TeamMember: Identity of a person receiving feedback
//! - Feedback: Append-only observation about one member
//! - FeedbackCreated: Event announcing a persisted Feedback
//! - AskResponse: Answer and citations returned by the AI service

mod answer;
mod feedback;
mod team_member;

pub use answer::*;
pub use feedback::*;
pub use team_member::*;
