//! TeamMember - Identity record for a person the manager gives feedback on
//!
//! Pure domain entity without infrastructure dependencies.

use serde::{Deserialize, Serialize};

/// TeamMember - created once, immutable afterwards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    /// Opaque unique identifier, never reused
    pub id: String,
    pub name: String,
    pub role: String,
    pub relationship_to_manager: String,
    /// Calendar date as supplied by the caller (not validated)
    pub start_date: String,
}

impl TeamMember {
    /// Create a new team member with a generated ID
    pub fn new(
        name: String,
        role: String,
        relationship_to_manager: String,
        start_date: String,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            role,
            relationship_to_manager,
            start_date,
        }
    }
}
