//! Team Member DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use helly::TeamMember;

/// Create team member request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamMemberRequest {
    pub name: String,
    pub role: String,
    pub relationship_to_manager: String,
    /// Accepted as-is (e.g. `2024-01-15`)
    pub start_date: String,
}

/// Team member response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberResponse {
    pub id: String,
    pub name: String,
    pub role: String,
    pub relationship_to_manager: String,
    pub start_date: String,
}

impl From<TeamMember> for TeamMemberResponse {
    fn from(member: TeamMember) -> Self {
        Self {
            id: member.id,
            name: member.name,
            role: member.role,
            relationship_to_manager: member.relationship_to_manager,
            start_date: member.start_date,
        }
    }
}

/// Team member list query
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TeamMemberQuery {
    /// Case-insensitive substring of the member's name
    pub search: Option<String>,
}

/// Corpus resync request
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CorpusSyncRequest {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Corpus resync response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CorpusSyncResponse {
    pub team_member_id: String,
    pub item_count: usize,
}
