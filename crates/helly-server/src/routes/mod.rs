//! Helly API Routes
//!
//! - /v1/team-members - Team member registration and lookup
//! - /v1/team-members/:id/corpus-sync - Rebuild a member's AI corpus
//! - /v1/feedback - Submit and list feedback
//! - /v1/ask - Questions answered by the AI service

use axum::{http::StatusCode, Router};

use helly::DomainError;

use crate::AppState;

pub mod ask;
pub mod feedback;
pub mod swagger;
pub mod team_member;


/// Error body returned by every handler
pub type ApiError = (StatusCode, String);

/// Map a domain error onto an HTTP status
pub fn error_response(e: DomainError) -> ApiError {
    let status = match &e {
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::UnresolvedEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DomainError::StoreFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::GatewayUnavailable(_) => StatusCode::BAD_GATEWAY,
    };

    if status.is_server_error() {
        tracing::error!("Request failed: {}", e);
    }

    (status, e.to_string())
}

/// All API routes (authentication is layered on by the caller)
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(team_member::router())
        .merge(feedback::router())
        .merge(ask::router())
}
