//! Team Member Routes
//!
//! HTTP handlers that delegate to TeamMemberService and, for corpus
//! resync, FeedbackService.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::models::{
    timestamp::parse_window, CorpusSyncRequest, CorpusSyncResponse, CreateTeamMemberRequest,
    TeamMemberQuery, TeamMemberResponse,
};
use crate::AppState;

use super::{error_response, ApiError};

/// List team members
#[utoipa::path(
    get,
    path = "/v1/team-members",
    params(TeamMemberQuery),
    responses(
        (status = 200, description = "Team members ordered by name", body = Vec<TeamMemberResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "TeamMember"
)]
pub async fn list_team_members(
    State(state): State<AppState>,
    Query(query): Query<TeamMemberQuery>,
) -> Result<Json<Vec<TeamMemberResponse>>, ApiError> {
    let members = state
        .team_member_service
        .list(query.search.as_deref())
        .await
        .map_err(error_response)?;

    Ok(Json(members.into_iter().map(Into::into).collect()))
}

/// Register a team member
#[utoipa::path(
    post,
    path = "/v1/team-members",
    request_body = CreateTeamMemberRequest,
    responses(
        (status = 201, description = "Team member created", body = TeamMemberResponse),
        (status = 400, description = "Invalid request"),
        (status = 500, description = "Internal server error")
    ),
    tag = "TeamMember"
)]
pub async fn create_team_member(
    State(state): State<AppState>,
    Json(payload): Json<CreateTeamMemberRequest>,
) -> Result<(StatusCode, Json<TeamMemberResponse>), ApiError> {
    let member = state
        .team_member_service
        .create(
            payload.name,
            payload.role,
            payload.relationship_to_manager,
            payload.start_date,
        )
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(member.into())))
}

/// Get team member by ID
#[utoipa::path(
    get,
    path = "/v1/team-members/{id}",
    params(
        ("id" = String, Path, description = "Team member ID")
    ),
    responses(
        (status = 200, description = "Team member found", body = TeamMemberResponse),
        (status = 404, description = "Team member not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "TeamMember"
)]
pub async fn get_team_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TeamMemberResponse>, ApiError> {
    let member = state
        .team_member_service
        .require(&id)
        .await
        .map_err(error_response)?;

    Ok(Json(member.into()))
}

/// Rebuild a team member's AI corpus from stored feedback
#[utoipa::path(
    post,
    path = "/v1/team-members/{id}/corpus-sync",
    params(
        ("id" = String, Path, description = "Team member ID")
    ),
    request_body(content = CorpusSyncRequest, description = "Optional time window; omit to resync everything"),
    responses(
        (status = 200, description = "Corpus replaced", body = CorpusSyncResponse),
        (status = 400, description = "Malformed body or invalid time window"),
        (status = 404, description = "Team member not found"),
        (status = 502, description = "AI service unavailable")
    ),
    tag = "TeamMember"
)]
pub async fn sync_corpus(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<CorpusSyncResponse>, ApiError> {
    // An empty body means "everything"; anything else must parse
    let request: CorpusSyncRequest = if body.iter().all(u8::is_ascii_whitespace) {
        CorpusSyncRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                format!("Invalid corpus sync body: {}", e),
            )
        })?
    };
    let window =
        parse_window(request.from.as_deref(), request.to.as_deref()).map_err(error_response)?;

    let member = state
        .team_member_service
        .require(&id)
        .await
        .map_err(error_response)?;

    let item_count = state
        .feedback_service
        .resync_member(&member.id, window)
        .await
        .map_err(error_response)?;

    Ok(Json(CorpusSyncResponse {
        team_member_id: member.id,
        item_count,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/team-members",
            get(list_team_members).post(create_team_member),
        )
        .route("/v1/team-members/:id", get(get_team_member))
        .route("/v1/team-members/:id/corpus-sync", post(sync_corpus))
}
