//! Feedback Repository Port
//!
//! Abstract interface for Feedback persistence operations.
//! Feedback is append-only, so there is no update or delete.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, Feedback, TimeWindow};

/// Filter for feedback listing
#[derive(Debug, Default, Clone)]
pub struct FeedbackFilter {
    /// Exact match on the owning team member
    pub team_member_id: Option<String>,
    /// Inclusive bounds on `created_at`, compared as instants
    pub window: TimeWindow,
}

impl FeedbackFilter {
    pub fn for_member(team_member_id: impl Into<String>) -> Self {
        Self {
            team_member_id: Some(team_member_id.into()),
            window: TimeWindow::unbounded(),
        }
    }

    pub fn with_window(mut self, window: TimeWindow) -> Self {
        self.window = window;
        self
    }

    /// Whether a record passes every present constraint
    pub fn matches(&self, feedback: &Feedback) -> bool {
        self.team_member_id
            .as_deref()
            .map_or(true, |id| feedback.team_member_id == id)
            && self.window.contains(&feedback.created_at)
    }
}

/// Repository interface for Feedback entities
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Persist a new feedback record atomically
    async fn create(&self, feedback: &Feedback) -> Result<Feedback, DomainError>;

    /// List feedback matching the filter, ascending by `created_at`
    async fn list(&self, filter: &FeedbackFilter) -> Result<Vec<Feedback>, DomainError>;
}
