//! Port doubles shared by the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use helly::adapters::{InMemoryFeedbackRepository, InMemoryTeamMemberRepository};
use helly::application::{AskService, FeedbackService, TeamMemberService};
use helly::{
    AiGateway, AskResponse, Citation, DomainError, EventSink, EventSinkError, Feedback,
    FeedbackCreated, FeedbackFilter, FeedbackRepository, IngestRequest, QueryRequest,
    RosterEntityResolver,
};

/// AI gateway that records calls and answers from a script
pub struct StubGateway {
    pub answer: AskResponse,
    pub fail_ingest: bool,
    pub fail_query: bool,
    pub ingests: Mutex<Vec<IngestRequest>>,
    pub queries: Mutex<Vec<QueryRequest>>,
}

impl StubGateway {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: AskResponse {
                answer: answer.to_string(),
                citations: vec![Citation {
                    id: "f-cited".to_string(),
                    created_at: "2024-06-01T10:00:00Z".to_string(),
                    snippet: "Max improved the API performance significantly.".to_string(),
                }],
            },
            fail_ingest: false,
            fail_query: false,
            ingests: Mutex::new(Vec::new()),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_ingest() -> Self {
        Self {
            fail_ingest: true,
            ..Self::answering("unused")
        }
    }

    pub fn failing_query() -> Self {
        Self {
            fail_query: true,
            ..Self::answering("unused")
        }
    }
}

#[async_trait]
impl AiGateway for StubGateway {
    async fn query(&self, request: &QueryRequest) -> Result<AskResponse, DomainError> {
        self.queries.lock().await.push(request.clone());
        if self.fail_query {
            return Err(DomainError::GatewayUnavailable("connection refused".into()));
        }
        Ok(self.answer.clone())
    }

    async fn ingest(&self, request: &IngestRequest) -> Result<(), DomainError> {
        self.ingests.lock().await.push(request.clone());
        if self.fail_ingest {
            return Err(DomainError::GatewayUnavailable("ingest returned 503".into()));
        }
        Ok(())
    }
}

/// Event sink that records events, or fails with a fixed error
#[derive(Default)]
pub struct RecordingSink {
    pub failure: Option<EventSinkError>,
    pub events: Mutex<Vec<FeedbackCreated>>,
}

impl RecordingSink {
    pub fn failing(error: EventSinkError) -> Self {
        Self {
            failure: Some(error),
            events: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl EventSink for RecordingSink {
    async fn publish(&self, event: &FeedbackCreated) -> Result<(), EventSinkError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        self.events.lock().await.push(event.clone());
        Ok(())
    }
}

/// Feedback store whose writes always fail
pub struct BrokenFeedbackRepository;

#[async_trait]
impl FeedbackRepository for BrokenFeedbackRepository {
    async fn create(&self, _feedback: &Feedback) -> Result<Feedback, DomainError> {
        Err(DomainError::StoreFailure("database is read-only".into()))
    }

    async fn list(&self, _filter: &FeedbackFilter) -> Result<Vec<Feedback>, DomainError> {
        Ok(Vec::new())
    }
}

/// Fully wired services over in-memory stores
pub struct Harness {
    pub members: TeamMemberService,
    pub feedback: FeedbackService,
    pub ask: AskService,
    pub member_repo: Arc<InMemoryTeamMemberRepository>,
    pub feedback_repo: Arc<dyn FeedbackRepository>,
    pub gateway: Arc<StubGateway>,
    pub sink: Arc<RecordingSink>,
}

impl Harness {
    pub fn new(gateway: StubGateway, sink: RecordingSink) -> Self {
        Self::with_feedback_repo(gateway, sink, Arc::new(InMemoryFeedbackRepository::new()))
    }

    pub fn with_feedback_repo(
        gateway: StubGateway,
        sink: RecordingSink,
        feedback_repo: Arc<dyn FeedbackRepository>,
    ) -> Self {
        let member_repo = Arc::new(InMemoryTeamMemberRepository::new());
        let gateway = Arc::new(gateway);
        let sink = Arc::new(sink);
        let resolver = Arc::new(RosterEntityResolver::new(member_repo.clone()));

        Self {
            members: TeamMemberService::new(member_repo.clone()),
            feedback: FeedbackService::new(
                feedback_repo.clone(),
                sink.clone(),
                resolver,
                gateway.clone(),
            ),
            ask: AskService::new(gateway.clone()),
            member_repo,
            feedback_repo,
            gateway,
            sink,
        }
    }

    pub async fn add_member(&self, name: &str) -> String {
        self.members
            .create(
                name.to_string(),
                "Engineer".to_string(),
                "reports".to_string(),
                "2024-01-01".to_string(),
            )
            .await
            .unwrap()
            .id
    }
}
