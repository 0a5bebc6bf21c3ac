//! PostgreSQL implementation of FeedbackRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use helly::{DomainError, Feedback, FeedbackFilter, FeedbackRepository};

use super::store_error;

/// PostgreSQL implementation of FeedbackRepository
pub struct PgFeedbackRepository {
    pool: PgPool,
}

impl PgFeedbackRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct FeedbackRow {
    id: String,
    team_member_id: String,
    content: String,
    created_at: DateTime<Utc>,
}

impl From<FeedbackRow> for Feedback {
    fn from(row: FeedbackRow) -> Self {
        Self {
            id: row.id,
            team_member_id: row.team_member_id,
            content: row.content,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl FeedbackRepository for PgFeedbackRepository {
    async fn create(&self, feedback: &Feedback) -> Result<Feedback, DomainError> {
        let row = sqlx::query_as::<_, FeedbackRow>(
            r#"
            INSERT INTO feedback (id, team_member_id, content, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, team_member_id, content, created_at
            "#,
        )
        .bind(&feedback.id)
        .bind(&feedback.team_member_id)
        .bind(&feedback.content)
        .bind(feedback.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(row.into())
    }

    async fn list(&self, filter: &FeedbackFilter) -> Result<Vec<Feedback>, DomainError> {
        let rows = sqlx::query_as::<_, FeedbackRow>(
            r#"
            SELECT id, team_member_id, content, created_at
            FROM feedback
            WHERE ($1::TEXT IS NULL OR team_member_id = $1)
              AND ($2::TIMESTAMPTZ IS NULL OR created_at >= $2)
              AND ($3::TIMESTAMPTZ IS NULL OR created_at <= $3)
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(filter.team_member_id.as_deref())
        .bind(filter.window.from)
        .bind(filter.window.to)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
