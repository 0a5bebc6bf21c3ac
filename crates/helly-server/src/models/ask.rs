//! Ask DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use helly::{AskResponse, Citation};

/// Natural-language question about the team
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AskRequest {
    pub text: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub person_hint: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CitationResponse {
    pub id: String,
    pub created_at: String,
    pub snippet: String,
}

/// Answer from the AI service, passed through unchanged
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AskResponseBody {
    pub answer: String,
    pub citations: Vec<CitationResponse>,
}

impl From<Citation> for CitationResponse {
    fn from(citation: Citation) -> Self {
        Self {
            id: citation.id,
            created_at: citation.created_at,
            snippet: citation.snippet,
        }
    }
}

impl From<AskResponse> for AskResponseBody {
    fn from(response: AskResponse) -> Self {
        Self {
            answer: response.answer,
            citations: response.citations.into_iter().map(Into::into).collect(),
        }
    }
}
