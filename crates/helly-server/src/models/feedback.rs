//! Feedback DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use helly::application::{CorpusSync, EventDelivery, SubmitOutcome};
use helly::Feedback;

/// Submit feedback request
///
/// `teamMemberId` is used as-is when it names an existing member;
/// `personHint` is free text used to disambiguate.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeedbackRequest {
    pub content: String,
    pub created_at: Option<String>,
    pub person_hint: Option<String>,
    pub team_member_id: Option<String>,
}

/// Stored feedback
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    pub id: String,
    pub team_member_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<Feedback> for FeedbackResponse {
    fn from(feedback: Feedback) -> Self {
        Self {
            id: feedback.id,
            team_member_id: feedback.team_member_id,
            content: feedback.content,
            created_at: feedback.created_at,
        }
    }
}

/// Result of a submission
///
/// The feedback is durably stored whenever this is returned;
/// `corpusSynced: false` only means the AI corpus lags behind.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFeedbackResponse {
    pub id: String,
    pub team_member_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub event_published: bool,
    pub corpus_synced: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corpus_sync_error: Option<String>,
}

impl From<SubmitOutcome> for SubmitFeedbackResponse {
    fn from(outcome: SubmitOutcome) -> Self {
        let corpus_sync_error = match outcome.corpus_sync {
            CorpusSync::Synced => None,
            CorpusSync::Failed(reason) => Some(reason),
        };

        Self {
            id: outcome.feedback.id,
            team_member_id: outcome.feedback.team_member_id,
            content: outcome.feedback.content,
            created_at: outcome.feedback.created_at,
            event_published: outcome.event == EventDelivery::Published,
            corpus_synced: corpus_sync_error.is_none(),
            corpus_sync_error,
        }
    }
}

/// Feedback list query
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FeedbackQuery {
    /// Only feedback for this team member
    pub member_id: Option<String>,
    /// Inclusive lower bound (ISO-8601)
    pub from: Option<String>,
    /// Inclusive upper bound (ISO-8601)
    pub to: Option<String>,
}
