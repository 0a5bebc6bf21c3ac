//! Ask Application Service (Use Case)
//!
//! Forwards questions to the AI gateway and returns the answer verbatim.
//! One round trip per call: no retries, no caching, no fallback answer.

use std::sync::Arc;

use crate::domain::{AskResponse, DomainError, TimeWindow};
use crate::ports::{AiGateway, QueryRequest};

/// A question about the team
#[derive(Debug, Clone)]
pub struct AskQuestion {
    pub question: String,
    pub window: TimeWindow,
    pub person_hint: Option<String>,
}

impl AskQuestion {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            window: TimeWindow::unbounded(),
            person_hint: None,
        }
    }
}

/// Application service for questions
pub struct AskService {
    gateway: Arc<dyn AiGateway>,
}

impl AskService {
    pub fn new(gateway: Arc<dyn AiGateway>) -> Self {
        Self { gateway }
    }

    pub async fn ask(&self, input: AskQuestion) -> Result<AskResponse, DomainError> {
        if input.question.trim().is_empty() {
            return Err(DomainError::validation("question must not be empty"));
        }

        let request = QueryRequest {
            question: input.question,
            window: input.window,
            person_hint: input.person_hint,
        };

        let response = self.gateway.query(&request).await?;

        tracing::debug!("Answered question with {} citations", response.citations.len());

        Ok(response)
    }
}
