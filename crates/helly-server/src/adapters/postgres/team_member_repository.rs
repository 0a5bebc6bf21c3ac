//! PostgreSQL implementation of TeamMemberRepository

use async_trait::async_trait;
use sqlx::PgPool;

use helly::{DomainError, TeamMember, TeamMemberRepository};

use super::{like_pattern, member_write_error, store_error};

/// PostgreSQL implementation of TeamMemberRepository
pub struct PgTeamMemberRepository {
    pool: PgPool,
}

impl PgTeamMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct TeamMemberRow {
    id: String,
    name: String,
    role: String,
    relationship_to_manager: String,
    start_date: String,
}

impl From<TeamMemberRow> for TeamMember {
    fn from(row: TeamMemberRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            role: row.role,
            relationship_to_manager: row.relationship_to_manager,
            start_date: row.start_date,
        }
    }
}

#[async_trait]
impl TeamMemberRepository for PgTeamMemberRepository {
    async fn create(&self, member: &TeamMember) -> Result<TeamMember, DomainError> {
        let row = sqlx::query_as::<_, TeamMemberRow>(
            r#"
            INSERT INTO team_members (id, name, role, relationship_to_manager, start_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, role, relationship_to_manager, start_date
            "#,
        )
        .bind(&member.id)
        .bind(&member.name)
        .bind(&member.role)
        .bind(&member.relationship_to_manager)
        .bind(&member.start_date)
        .fetch_one(&self.pool)
        .await
        .map_err(member_write_error)?;

        Ok(row.into())
    }

    async fn get(&self, id: &str) -> Result<Option<TeamMember>, DomainError> {
        let row = sqlx::query_as::<_, TeamMemberRow>(
            r#"
            SELECT id, name, role, relationship_to_manager, start_date
            FROM team_members
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, search: Option<&str>) -> Result<Vec<TeamMember>, DomainError> {
        let pattern = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(like_pattern);

        let rows = sqlx::query_as::<_, TeamMemberRow>(
            r#"
            SELECT id, name, role, relationship_to_manager, start_date
            FROM team_members
            WHERE ($1::TEXT IS NULL OR name ILIKE $1)
            ORDER BY LOWER(name) COLLATE "C" ASC, id ASC
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
