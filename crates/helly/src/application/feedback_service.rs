//! Feedback Application Service (Use Case)
//!
//! Coordinates resolution, storage, event emission, and corpus sync for
//! feedback submissions. Steps run strictly in order:
//!
//! 1. resolve the team member (failure aborts, nothing stored)
//! 2. build the record
//! 3. persist it (failure aborts, no event and no ingest)
//! 4. publish `FeedbackCreated` (best-effort, never aborts)
//! 5. ingest into the member's AI corpus (failure degrades, never aborts)

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{DomainError, Feedback, FeedbackCreated, Hint, TimeWindow};
use crate::ports::{
    AiGateway, CorpusItem, EntityResolver, EventSink, EventSinkError, FeedbackFilter,
    FeedbackRepository, IngestRequest,
};

/// Input for a single feedback submission
#[derive(Debug, Clone)]
pub struct SubmitFeedback {
    pub content: String,
    pub created_at: Option<DateTime<Utc>>,
    pub hint: Hint,
}

/// What happened to the `FeedbackCreated` event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventDelivery {
    Published,
    Unavailable(String),
    Misconfigured(String),
}

/// Whether the AI corpus received the new item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorpusSync {
    Synced,
    /// Feedback is stored but the corpus may be stale
    Failed(String),
}

/// Result of a successful submission. The feedback is always durably stored.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub feedback: Feedback,
    pub event: EventDelivery,
    pub corpus_sync: CorpusSync,
}

impl SubmitOutcome {
    /// True when the feedback was stored but side effects did not all land
    pub fn is_degraded(&self) -> bool {
        self.event != EventDelivery::Published || self.corpus_sync != CorpusSync::Synced
    }
}

/// Application service for Feedback operations
pub struct FeedbackService {
    repo: Arc<dyn FeedbackRepository>,
    events: Arc<dyn EventSink>,
    resolver: Arc<dyn EntityResolver>,
    gateway: Arc<dyn AiGateway>,
}

impl FeedbackService {
    pub fn new(
        repo: Arc<dyn FeedbackRepository>,
        events: Arc<dyn EventSink>,
        resolver: Arc<dyn EntityResolver>,
        gateway: Arc<dyn AiGateway>,
    ) -> Self {
        Self {
            repo,
            events,
            resolver,
            gateway,
        }
    }

    /// Submit a piece of feedback
    pub async fn submit(&self, input: SubmitFeedback) -> Result<SubmitOutcome, DomainError> {
        if input.content.trim().is_empty() {
            return Err(DomainError::validation("feedback content must not be empty"));
        }

        let team_member_id = self.resolver.resolve(&input.content, &input.hint).await?;

        let feedback = Feedback::new(team_member_id, input.content, input.created_at);
        let saved = self.repo.create(&feedback).await?;

        tracing::info!(
            "Created Feedback: {} for team member {}",
            saved.id,
            saved.team_member_id
        );

        let event = self.publish_created(&saved).await;
        let corpus_sync = self.sync_new_item(&saved).await;

        Ok(SubmitOutcome {
            feedback: saved,
            event,
            corpus_sync,
        })
    }

    /// List stored feedback
    pub async fn list(&self, filter: &FeedbackFilter) -> Result<Vec<Feedback>, DomainError> {
        self.repo.list(filter).await
    }

    /// Replace a member's AI corpus with everything stored for them in `window`.
    ///
    /// Returns the number of items sent.
    pub async fn resync_member(
        &self,
        team_member_id: &str,
        window: TimeWindow,
    ) -> Result<usize, DomainError> {
        let items: Vec<CorpusItem> = self
            .repo
            .list(&FeedbackFilter::for_member(team_member_id).with_window(window))
            .await?
            .iter()
            .map(CorpusItem::from)
            .collect();

        let count = items.len();
        let request = IngestRequest {
            team_member_ref: team_member_id.to_string(),
            items,
            window,
            wipe_existing: true,
        };
        self.gateway.ingest(&request).await?;

        tracing::info!(
            "Resynced corpus for team member {} ({} items)",
            team_member_id,
            count
        );

        Ok(count)
    }

    async fn publish_created(&self, feedback: &Feedback) -> EventDelivery {
        match self.events.publish(&FeedbackCreated::from(feedback)).await {
            Ok(()) => EventDelivery::Published,
            Err(EventSinkError::Unavailable(reason)) => {
                tracing::warn!(
                    "FeedbackCreated for {} not published, sink unavailable: {}",
                    feedback.id,
                    reason
                );
                EventDelivery::Unavailable(reason)
            }
            Err(EventSinkError::Misconfigured(reason)) => {
                tracing::error!(
                    "FeedbackCreated for {} not published, sink misconfigured: {}",
                    feedback.id,
                    reason
                );
                EventDelivery::Misconfigured(reason)
            }
        }
    }

    async fn sync_new_item(&self, feedback: &Feedback) -> CorpusSync {
        match self.gateway.ingest(&IngestRequest::incremental(feedback)).await {
            Ok(()) => CorpusSync::Synced,
            Err(e) => {
                tracing::warn!(
                    "Feedback {} stored but corpus sync failed: {}",
                    feedback.id,
                    e
                );
                CorpusSync::Failed(e.to_string())
            }
        }
    }
}
