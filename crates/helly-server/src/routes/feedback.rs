//! Feedback Routes

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use helly::application::SubmitFeedback;
use helly::{FeedbackFilter, Hint};

use crate::models::{
    timestamp::{parse_optional, parse_window},
    CreateFeedbackRequest, FeedbackQuery, FeedbackResponse, SubmitFeedbackResponse,
};
use crate::AppState;

use super::{error_response, ApiError};

/// Submit feedback
///
/// Resolves the team member, stores the feedback, publishes
/// FeedbackCreated and syncs the AI corpus. A failed corpus sync
/// is reported in the body, not as an error.
#[utoipa::path(
    post,
    path = "/v1/feedback",
    request_body = CreateFeedbackRequest,
    responses(
        (status = 201, description = "Feedback stored", body = SubmitFeedbackResponse),
        (status = 400, description = "Invalid request"),
        (status = 422, description = "No team member could be identified"),
        (status = 500, description = "Feedback could not be stored")
    ),
    tag = "Feedback"
)]
pub async fn create_feedback(
    State(state): State<AppState>,
    Json(payload): Json<CreateFeedbackRequest>,
) -> Result<(StatusCode, Json<SubmitFeedbackResponse>), ApiError> {
    let created_at =
        parse_optional("createdAt", payload.created_at.as_deref()).map_err(error_response)?;

    let outcome = state
        .feedback_service
        .submit(SubmitFeedback {
            content: payload.content,
            created_at,
            hint: Hint::from_parts(payload.team_member_id, payload.person_hint),
        })
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(outcome.into())))
}

/// List feedback
#[utoipa::path(
    get,
    path = "/v1/feedback",
    params(FeedbackQuery),
    responses(
        (status = 200, description = "Feedback ordered by creation time", body = Vec<FeedbackResponse>),
        (status = 400, description = "Invalid time window"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Feedback"
)]
pub async fn list_feedback(
    State(state): State<AppState>,
    Query(query): Query<FeedbackQuery>,
) -> Result<Json<Vec<FeedbackResponse>>, ApiError> {
    let window = parse_window(query.from.as_deref(), query.to.as_deref()).map_err(error_response)?;

    let filter = FeedbackFilter {
        team_member_id: query.member_id.filter(|id| !id.trim().is_empty()),
        window,
    };

    let feedback = state
        .feedback_service
        .list(&filter)
        .await
        .map_err(error_response)?;

    Ok(Json(feedback.into_iter().map(Into::into).collect()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/v1/feedback", get(list_feedback).post(create_feedback))
}
