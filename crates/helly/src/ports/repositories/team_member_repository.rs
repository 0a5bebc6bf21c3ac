//! TeamMember Repository Port
//!
//! Abstract interface for TeamMember persistence operations.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, TeamMember};

/// Repository interface for TeamMember entities
#[async_trait]
pub trait TeamMemberRepository: Send + Sync {
    /// Insert a new team member
    async fn create(&self, member: &TeamMember) -> Result<TeamMember, DomainError>;

    /// Find a team member by ID
    async fn get(&self, id: &str) -> Result<Option<TeamMember>, DomainError>;

    /// List members ordered by name ascending.
    ///
    /// `search` is a case-insensitive substring match on `name`;
    /// `None` or a blank string returns every member.
    async fn list(&self, search: Option<&str>) -> Result<Vec<TeamMember>, DomainError>;
}
