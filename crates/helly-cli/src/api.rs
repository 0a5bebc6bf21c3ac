//! Helly API Client

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// API Client for Helly
pub struct HellyClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

// ============================================
// API Types
// ============================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberResponse {
    pub id: String,
    pub name: String,
    pub role: String,
    pub relationship_to_manager: String,
    pub start_date: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamMemberRequest {
    pub name: String,
    pub role: String,
    pub relationship_to_manager: String,
    pub start_date: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusSyncResponse {
    pub team_member_id: String,
    pub item_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeedbackRequest {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_member_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFeedbackResponse {
    pub id: String,
    pub team_member_id: String,
    pub created_at: DateTime<Utc>,
    pub event_published: bool,
    pub corpus_synced: bool,
    pub corpus_sync_error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    pub id: String,
    pub team_member_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Optional inclusive time bounds, passed through as typed
#[derive(Debug, Default, Clone, Serialize)]
pub struct Window {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AskRequest {
    pub text: String,
    #[serde(flatten)]
    pub window: Window,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_hint: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    #[serde(default)]
    pub citations: Vec<CitationResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitationResponse {
    pub id: String,
    pub created_at: String,
    pub snippet: String,
}

/// Build `?a=1&b=2` from the present pairs
fn query_string(pairs: &[(&str, Option<&str>)]) -> String {
    let encoded: Vec<String> = pairs
        .iter()
        .filter_map(|(key, value)| {
            value
                .filter(|v| !v.is_empty())
                .map(|v| format!("{}={}", key, urlencoding::encode(v)))
        })
        .collect();

    if encoded.is_empty() {
        String::new()
    } else {
        format!("?{}", encoded.join("&"))
    }
}

impl HellyClient {
    /// Create a new API client
    pub fn new(base_url: &str, api_key: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(str::to_string),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("Authorization", format!("Bearer {}", key)),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let resp = self
            .authorized(request)
            .send()
            .await
            .context("Failed to connect to Helly API")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("API error ({}): {}", status, body);
        }

        resp.json().await.context("Failed to parse response")
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);
        self.send(self.client.get(&url)).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.url(path);
        tracing::debug!("POST {}", url);
        self.send(self.client.post(&url).json(body)).await
    }

    /// Test connection with health check
    pub async fn health(&self) -> Result<bool> {
        let resp = self.client.get(self.url("/health")).send().await?;
        Ok(resp.status().is_success())
    }

    /// Check that the API key is accepted
    pub async fn verify_key(&self) -> Result<()> {
        self.list_members(None).await.map(|_| ())
    }

    /// Register a team member
    pub async fn create_member(
        &self,
        request: &CreateTeamMemberRequest,
    ) -> Result<TeamMemberResponse> {
        self.post("/v1/team-members", request).await
    }

    /// List team members, optionally filtered by name
    pub async fn list_members(&self, search: Option<&str>) -> Result<Vec<TeamMemberResponse>> {
        let path = format!("/v1/team-members{}", query_string(&[("search", search)]));
        self.get(&path).await
    }

    /// Get a specific team member
    pub async fn get_member(&self, id: &str) -> Result<TeamMemberResponse> {
        self.get(&format!("/v1/team-members/{}", urlencoding::encode(id)))
            .await
    }

    /// Rebuild a member's AI corpus
    pub async fn sync_corpus(&self, id: &str, window: &Window) -> Result<CorpusSyncResponse> {
        let path = format!("/v1/team-members/{}/corpus-sync", urlencoding::encode(id));
        self.post(&path, window).await
    }

    /// Submit feedback
    pub async fn add_feedback(
        &self,
        request: &CreateFeedbackRequest,
    ) -> Result<SubmitFeedbackResponse> {
        self.post("/v1/feedback", request).await
    }

    /// List feedback
    pub async fn list_feedback(
        &self,
        member_id: Option<&str>,
        window: &Window,
    ) -> Result<Vec<FeedbackResponse>> {
        let path = format!(
            "/v1/feedback{}",
            query_string(&[
                ("memberId", member_id),
                ("from", window.from.as_deref()),
                ("to", window.to.as_deref()),
            ])
        );
        self.get(&path).await
    }

    /// Ask a question
    pub async fn ask(&self, request: &AskRequest) -> Result<AskResponse> {
        self.post("/v1/ask", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string() {
        assert_eq!(query_string(&[("search", None)]), "");
        assert_eq!(query_string(&[("search", Some(""))]), "");
        assert_eq!(
            query_string(&[("memberId", Some("m 1")), ("from", None), ("to", Some("2024-07-01"))]),
            "?memberId=m%201&to=2024-07-01"
        );
    }

    #[test]
    fn test_ask_request_wire_format() {
        let request = AskRequest {
            text: "How is Max doing?".into(),
            window: Window {
                from: Some("2024-01-01".into()),
                to: None,
            },
            person_hint: Some("Max".into()),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "text": "How is Max doing?",
                "from": "2024-01-01",
                "personHint": "Max"
            })
        );
    }

    #[test]
    fn test_submit_response_without_error_field() {
        let response: SubmitFeedbackResponse = serde_json::from_str(
            r#"{
                "id": "f-1",
                "teamMemberId": "m-1",
                "content": "ok",
                "createdAt": "2024-06-01T10:00:00Z",
                "eventPublished": true,
                "corpusSynced": true
            }"#,
        )
        .unwrap();

        assert!(response.corpus_synced);
        assert!(response.corpus_sync_error.is_none());
    }
}
