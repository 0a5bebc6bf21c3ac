//! Ask Route - questions delegated to the AI service

use axum::{extract::State, routing::post, Json, Router};

use helly::application::AskQuestion;

use crate::models::{timestamp::parse_window, AskRequest, AskResponseBody};
use crate::AppState;

use super::{error_response, ApiError};

/// Ask a question about the team
#[utoipa::path(
    post,
    path = "/v1/ask",
    request_body = AskRequest,
    responses(
        (status = 200, description = "Answer with citations", body = AskResponseBody),
        (status = 400, description = "Invalid request"),
        (status = 502, description = "AI service unavailable")
    ),
    tag = "Ask"
)]
pub async fn ask(
    State(state): State<AppState>,
    Json(payload): Json<AskRequest>,
) -> Result<Json<AskResponseBody>, ApiError> {
    let window =
        parse_window(payload.from.as_deref(), payload.to.as_deref()).map_err(error_response)?;

    let response = state
        .ask_service
        .ask(AskQuestion {
            question: payload.text,
            window,
            person_hint: payload.person_hint.filter(|h| !h.trim().is_empty()),
        })
        .await
        .map_err(error_response)?;

    Ok(Json(response.into()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/v1/ask", post(ask))
}
