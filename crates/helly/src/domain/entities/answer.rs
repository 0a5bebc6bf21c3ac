//! Answer - Result of a question delegated to the AI service
//!
//! Produced per request and never persisted.

use serde::{Deserialize, Serialize};

/// Reference to a feedback record that informed an answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub id: String,
    /// Timestamp exactly as reported by the AI service
    pub created_at: String,
    pub snippet: String,
}

/// Answer plus supporting citations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    #[serde(default)]
    pub citations: Vec<Citation>,
}
