//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates between
//! repositories and external services.

mod ask_service;
mod feedback_service;
mod team_member_service;

pub use ask_service::{AskQuestion, AskService};
pub use feedback_service::{
    CorpusSync, EventDelivery, FeedbackService, SubmitFeedback, SubmitOutcome,
};
pub use team_member_service::TeamMemberService;
