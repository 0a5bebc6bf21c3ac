//! Hint - Caller-supplied disambiguation signal for entity resolution

use serde::{Deserialize, Serialize};

/// Disambiguation signal attached to a feedback submission.
///
/// The variant is chosen by the caller, never guessed from the string shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Hint {
    /// Caller claims this is a team member id
    MemberId(String),
    /// Arbitrary text, e.g. a name or nickname
    FreeText(String),
    /// Member id with free text to fall back on when the id is unknown
    MemberIdWithText { id: String, text: String },
    #[default]
    None,
}

impl Hint {
    /// Build a hint from optional explicit id and free text inputs.
    ///
    /// Both signals are kept when present; the id is tried first. Blank
    /// values are ignored.
    pub fn from_parts(member_id: Option<String>, free_text: Option<String>) -> Self {
        let non_blank = |s: Option<String>| {
            s.map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        match (non_blank(member_id), non_blank(free_text)) {
            (Some(id), Some(text)) => Hint::MemberIdWithText { id, text },
            (Some(id), None) => Hint::MemberId(id),
            (None, Some(text)) => Hint::FreeText(text),
            (None, None) => Hint::None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Hint::None)
    }
}

impl std::fmt::Display for Hint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Hint::MemberId(id) => write!(f, "member_id:{}", id),
            Hint::FreeText(text) => write!(f, "text:{}", text),
            Hint::MemberIdWithText { id, text } => write!(f, "member_id:{} text:{}", id, text),
            Hint::None => write!(f, "none"),
        }
    }
}
