//! TeamMember Application Service (Use Case)
//!
//! Orchestrates domain operations for team member management.

use std::sync::Arc;

use crate::domain::{DomainError, TeamMember};
use crate::ports::TeamMemberRepository;

/// Application service for TeamMember operations
pub struct TeamMemberService {
    repo: Arc<dyn TeamMemberRepository>,
}

impl TeamMemberService {
    pub fn new(repo: Arc<dyn TeamMemberRepository>) -> Self {
        Self { repo }
    }

    /// Create a new team member
    pub async fn create(
        &self,
        name: String,
        role: String,
        relationship_to_manager: String,
        start_date: String,
    ) -> Result<TeamMember, DomainError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("team member name must not be empty"));
        }

        let member = TeamMember::new(name, role, relationship_to_manager, start_date);
        let saved = self.repo.create(&member).await?;

        tracing::info!("Created TeamMember: {} ({})", saved.name, saved.id);

        Ok(saved)
    }

    /// Get a team member by ID
    pub async fn get(&self, id: &str) -> Result<Option<TeamMember>, DomainError> {
        self.repo.get(id).await
    }

    /// Get a team member by ID, failing when unknown
    pub async fn require(&self, id: &str) -> Result<TeamMember, DomainError> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("TeamMember", id))
    }

    /// List team members, optionally filtered by name
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<TeamMember>, DomainError> {
        self.repo.list(search).await
    }
}
