//! HTTP AI Gateway
//!
//! Talks to the external AI service over JSON:
//! - `POST /v1/query` answers a question with citations
//! - `POST /v1/ingest/member-corpus` pushes feedback into a member's corpus
//!
//! Every transport error, non-2xx status or malformed body becomes
//! `DomainError::GatewayUnavailable`.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use helly::{AiGateway, AskResponse, Citation, DomainError, IngestRequest, QueryRequest};

/// reqwest-backed implementation of AiGateway
pub struct HttpAiGateway {
    client: Client,
    base_url: String,
}

impl HttpAiGateway {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("helly/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<reqwest::Response, DomainError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| DomainError::GatewayUnavailable(format!("POST {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(DomainError::GatewayUnavailable(format!(
                "POST {} returned {}: {}",
                url, status, text
            )));
        }

        Ok(response)
    }
}

fn wire_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

// ============================================
// Wire types (snake_case, as the AI service expects)
// ============================================

#[derive(Debug, Serialize)]
struct QueryBody<'a> {
    text: &'a str,
    #[serde(rename = "from_", skip_serializing_if = "Option::is_none")]
    from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    person_hint: Option<&'a str>,
}

impl<'a> From<&'a QueryRequest> for QueryBody<'a> {
    fn from(request: &'a QueryRequest) -> Self {
        Self {
            text: &request.question,
            from: request.window.from.as_ref().map(wire_timestamp),
            to: request.window.to.as_ref().map(wire_timestamp),
            person_hint: request.person_hint.as_deref(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct QueryReply {
    answer: Option<String>,
    #[serde(default)]
    citations: Option<Vec<CitationReply>>,
}

#[derive(Debug, Deserialize)]
struct CitationReply {
    id: String,
    created_at: String,
    snippet: String,
}

impl TryFrom<QueryReply> for AskResponse {
    type Error = DomainError;

    fn try_from(reply: QueryReply) -> Result<Self, Self::Error> {
        let answer = reply.answer.ok_or_else(|| {
            DomainError::GatewayUnavailable("malformed query response: missing answer".into())
        })?;

        Ok(AskResponse {
            answer,
            citations: reply
                .citations
                .unwrap_or_default()
                .into_iter()
                .map(|c| Citation {
                    id: c.id,
                    created_at: c.created_at,
                    snippet: c.snippet,
                })
                .collect(),
        })
    }
}

#[derive(Debug, Serialize)]
struct IngestBody<'a> {
    team_member_ref: &'a str,
    items: Vec<IngestItem<'a>>,
    #[serde(rename = "from_", skip_serializing_if = "Option::is_none")]
    from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<String>,
    wipe_existing: bool,
}

#[derive(Debug, Serialize)]
struct IngestItem<'a> {
    id: &'a str,
    content: &'a str,
    created_at: String,
}

impl<'a> From<&'a IngestRequest> for IngestBody<'a> {
    fn from(request: &'a IngestRequest) -> Self {
        Self {
            team_member_ref: &request.team_member_ref,
            items: request
                .items
                .iter()
                .map(|item| IngestItem {
                    id: &item.id,
                    content: &item.content,
                    created_at: wire_timestamp(&item.created_at),
                })
                .collect(),
            from: request.window.from.as_ref().map(wire_timestamp),
            to: request.window.to.as_ref().map(wire_timestamp),
            wipe_existing: request.wipe_existing,
        }
    }
}

#[async_trait]
impl AiGateway for HttpAiGateway {
    async fn query(&self, request: &QueryRequest) -> Result<AskResponse, DomainError> {
        let reply: QueryReply = self
            .post("/v1/query", &QueryBody::from(request))
            .await?
            .json()
            .await
            .map_err(|e| {
                DomainError::GatewayUnavailable(format!("malformed query response: {}", e))
            })?;

        reply.try_into()
    }

    async fn ingest(&self, request: &IngestRequest) -> Result<(), DomainError> {
        self.post("/v1/ingest/member-corpus", &IngestBody::from(request))
            .await?;

        tracing::debug!(
            "Ingested {} item(s) for team member {} (wipe_existing={})",
            request.items.len(),
            request.team_member_ref,
            request.wipe_existing
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
    use chrono::TimeZone;
    use helly::{CorpusItem, TimeWindow};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    type Captured = Arc<Mutex<Vec<serde_json::Value>>>;

    /// Serve a canned reply for both endpoints and record request bodies
    async fn stub_service(status: StatusCode, reply: serde_json::Value) -> (String, Captured) {
        let captured: Captured = Arc::default();

        let handler = move |State(seen): State<Captured>, Json(body): Json<serde_json::Value>| {
            let reply = reply.clone();
            async move {
                seen.lock().await.push(body);
                (status, Json(reply))
            }
        };

        let app = Router::new()
            .route("/v1/query", post(handler.clone()))
            .route("/v1/ingest/member-corpus", post(handler))
            .with_state(captured.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}", addr), captured)
    }

    fn gateway(base_url: &str) -> HttpAiGateway {
        HttpAiGateway::new(base_url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_query_sends_wire_body_and_returns_answer_verbatim() {
        let (url, captured) = stub_service(
            StatusCode::OK,
            serde_json::json!({
                "answer": "Discuss API performance.",
                "citations": [
                    { "id": "f-1", "created_at": "2024-06-01T10:00:00Z", "snippet": "Max improved the API" }
                ]
            }),
        )
        .await;

        let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let response = gateway(&url)
            .query(&QueryRequest {
                question: "What should I discuss with Max?".into(),
                window: TimeWindow::new(Some(from), None).unwrap(),
                person_hint: Some("Max".into()),
            })
            .await
            .unwrap();

        assert_eq!(response.answer, "Discuss API performance.");
        assert_eq!(response.citations.len(), 1);
        assert_eq!(response.citations[0].created_at, "2024-06-01T10:00:00Z");

        let bodies = captured.lock().await;
        assert_eq!(bodies[0]["text"], "What should I discuss with Max?");
        assert_eq!(bodies[0]["from_"], "2024-01-01T00:00:00Z");
        assert_eq!(bodies[0]["person_hint"], "Max");
        assert!(bodies[0].get("to").is_none());
    }

    #[tokio::test]
    async fn test_query_without_citations() {
        let (url, _) = stub_service(StatusCode::OK, serde_json::json!({ "answer": "No data." })).await;

        let response = gateway(&url)
            .query(&QueryRequest {
                question: "Anything?".into(),
                window: TimeWindow::unbounded(),
                person_hint: None,
            })
            .await
            .unwrap();

        assert_eq!(response.answer, "No data.");
        assert!(response.citations.is_empty());
    }

    #[tokio::test]
    async fn test_query_missing_answer_is_failure() {
        let (url, _) = stub_service(StatusCode::OK, serde_json::json!({ "citations": [] })).await;

        let err = gateway(&url)
            .query(&QueryRequest {
                question: "Anything?".into(),
                window: TimeWindow::unbounded(),
                person_hint: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::GatewayUnavailable(_)));
    }

    #[tokio::test]
    async fn test_error_status_is_gateway_unavailable() {
        let (url, _) = stub_service(
            StatusCode::INTERNAL_SERVER_ERROR,
            serde_json::json!({ "detail": "boom" }),
        )
        .await;

        let err = gateway(&url)
            .ingest(&IngestRequest {
                team_member_ref: "m-1".into(),
                items: vec![],
                window: TimeWindow::unbounded(),
                wipe_existing: false,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::GatewayUnavailable(_)));
    }

    #[tokio::test]
    async fn test_ingest_sends_items_and_flags() {
        let (url, captured) =
            stub_service(StatusCode::ACCEPTED, serde_json::json!({ "status": "queued" })).await;
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();

        gateway(&url)
            .ingest(&IngestRequest {
                team_member_ref: "m-1".into(),
                items: vec![CorpusItem {
                    id: "f-1".into(),
                    content: "Max shipped the release".into(),
                    created_at: at,
                }],
                window: TimeWindow::new(None, Some(at)).unwrap(),
                wipe_existing: true,
            })
            .await
            .unwrap();

        let bodies = captured.lock().await;
        assert_eq!(bodies[0]["team_member_ref"], "m-1");
        assert_eq!(bodies[0]["wipe_existing"], true);
        assert_eq!(bodies[0]["to"], "2024-06-01T10:00:00Z");
        assert!(bodies[0].get("from_").is_none());
        assert_eq!(bodies[0]["items"][0]["id"], "f-1");
        assert_eq!(bodies[0]["items"][0]["created_at"], "2024-06-01T10:00:00Z");
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = gateway(&format!("http://{}", addr))
            .query(&QueryRequest {
                question: "Anyone there?".into(),
                window: TimeWindow::unbounded(),
                person_hint: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::GatewayUnavailable(_)));
    }
}
