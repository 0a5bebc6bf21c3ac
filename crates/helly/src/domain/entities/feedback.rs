//! Feedback - An observation about one team member
//!
//! Pure domain entity without infrastructure dependencies.
//! Feedback is append-only: there is no update or delete path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Feedback - free text attached to exactly one team member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// Unique identifier for the feedback
    pub id: String,
    /// The team member this feedback is about
    pub team_member_id: String,
    /// The free text content
    pub content: String,
    /// When the observation was made
    pub created_at: DateTime<Utc>,
}

impl Feedback {
    /// Create new feedback with a generated ID.
    ///
    /// `created_at` defaults to now when the caller did not supply one.
    pub fn new(
        team_member_id: String,
        content: String,
        created_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            team_member_id,
            content,
            created_at: created_at.unwrap_or_else(Utc::now),
        }
    }
}

/// Event emitted once a Feedback record has been persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackCreated {
    pub id: String,
    pub team_member_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Feedback> for FeedbackCreated {
    fn from(feedback: &Feedback) -> Self {
        Self {
            id: feedback.id.clone(),
            team_member_id: feedback.team_member_id.clone(),
            created_at: feedback.created_at,
        }
    }
}
