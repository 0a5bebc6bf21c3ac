//! AI Gateway Port
//!
//! Network boundary to the external corpus/query service.
//! The service keeps a per-member corpus of feedback items and answers
//! natural-language questions with citations into that corpus.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{errors::DomainError, AskResponse, Feedback, TimeWindow};

/// A question forwarded to the AI service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub question: String,
    pub window: TimeWindow,
    pub person_hint: Option<String>,
}

/// One feedback item as the corpus sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusItem {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Feedback> for CorpusItem {
    fn from(feedback: &Feedback) -> Self {
        Self {
            id: feedback.id.clone(),
            content: feedback.content.clone(),
            created_at: feedback.created_at,
        }
    }
}

/// Items to ingest into one member's corpus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestRequest {
    pub team_member_ref: String,
    pub items: Vec<CorpusItem>,
    pub window: TimeWindow,
    /// Replace the member's existing corpus instead of appending
    pub wipe_existing: bool,
}

impl IngestRequest {
    /// Append a single freshly created item (non-destructive)
    pub fn incremental(feedback: &Feedback) -> Self {
        Self {
            team_member_ref: feedback.team_member_id.clone(),
            items: vec![CorpusItem::from(feedback)],
            window: TimeWindow::unbounded(),
            wipe_existing: false,
        }
    }
}

/// AI service interface
///
/// Implementations report every transport or service failure as
/// [`DomainError::GatewayUnavailable`]. A response without an answer is a
/// failure, never an empty answer.
#[async_trait]
pub trait AiGateway: Send + Sync {
    /// Ask a question and return the service's answer verbatim
    async fn query(&self, request: &QueryRequest) -> Result<AskResponse, DomainError>;

    /// Push feedback items into a member's corpus
    async fn ingest(&self, request: &IngestRequest) -> Result<(), DomainError>;
}
