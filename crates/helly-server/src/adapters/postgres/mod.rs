//! PostgreSQL Repository Implementations

mod feedback_repository;
mod team_member_repository;

pub use feedback_repository::PgFeedbackRepository;
pub use team_member_repository::PgTeamMemberRepository;

use helly::DomainError;

/// Any store error, including a rejected feedback write
fn store_error(e: sqlx::Error) -> DomainError {
    DomainError::StoreFailure(e.to_string())
}

/// Team member registration: a duplicate id is a conflict
fn member_write_error(e: sqlx::Error) -> DomainError {
    match e.as_database_error() {
        Some(db) if db.is_unique_violation() => DomainError::Conflict(db.message().to_string()),
        _ => store_error(e),
    }
}

/// Escape LIKE wildcards so user search text matches literally
fn like_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}
