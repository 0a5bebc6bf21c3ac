//! In-memory repository implementations
//!
//! Reference implementations of the store ports. Used by tests and by the
//! server when no database is configured. Each write takes the lock once,
//! so individual records are never observed half-written.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{errors::DomainError, Feedback, TeamMember};
use crate::ports::{FeedbackFilter, FeedbackRepository, TeamMemberRepository};

/// TeamMember store backed by a map
#[derive(Default)]
pub struct InMemoryTeamMemberRepository {
    members: RwLock<HashMap<String, TeamMember>>,
}

impl InMemoryTeamMemberRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TeamMemberRepository for InMemoryTeamMemberRepository {
    async fn create(&self, member: &TeamMember) -> Result<TeamMember, DomainError> {
        let mut members = self.members.write().await;
        if members.contains_key(&member.id) {
            return Err(DomainError::Conflict(format!(
                "team member {} already exists",
                member.id
            )));
        }
        members.insert(member.id.clone(), member.clone());
        Ok(member.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<TeamMember>, DomainError> {
        Ok(self.members.read().await.get(id).cloned())
    }

    async fn list(&self, search: Option<&str>) -> Result<Vec<TeamMember>, DomainError> {
        let needle = search
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        let mut found: Vec<TeamMember> = self
            .members
            .read()
            .await
            .values()
            .filter(|m| {
                needle
                    .as_deref()
                    .map_or(true, |n| m.name.to_lowercase().contains(n))
            })
            .cloned()
            .collect();

        // Same order as Postgres `LOWER(name) COLLATE "C", id`
        found.sort_by_cached_key(|m| (m.name.to_lowercase(), m.id.clone()));
        Ok(found)
    }
}

/// Feedback store backed by an append-only vector
#[derive(Default)]
pub struct InMemoryFeedbackRepository {
    records: RwLock<Vec<Feedback>>,
}

impl InMemoryFeedbackRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FeedbackRepository for InMemoryFeedbackRepository {
    async fn create(&self, feedback: &Feedback) -> Result<Feedback, DomainError> {
        let mut records = self.records.write().await;
        if records.iter().any(|f| f.id == feedback.id) {
            return Err(DomainError::StoreFailure(format!(
                "feedback {} already exists",
                feedback.id
            )));
        }
        records.push(feedback.clone());
        Ok(feedback.clone())
    }

    async fn list(&self, filter: &FeedbackFilter) -> Result<Vec<Feedback>, DomainError> {
        let mut found: Vec<Feedback> = self
            .records
            .read()
            .await
            .iter()
            .filter(|f| filter.matches(f))
            .cloned()
            .collect();

        found.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TimeWindow;
    use chrono::{TimeZone, Utc};

    fn member(name: &str) -> TeamMember {
        TeamMember::new(
            name.to_string(),
            "Engineer".to_string(),
            "reports".to_string(),
            "2024-01-01".to_string(),
        )
    }

    fn feedback_on(member_id: &str, day: u32) -> Feedback {
        let at = Utc.with_ymd_and_hms(2024, 5, day, 9, 0, 0).unwrap();
        Feedback::new(member_id.to_string(), format!("note {}", day), Some(at))
    }

    #[tokio::test]
    async fn test_list_members_sorted_by_name() {
        let repo = InMemoryTeamMemberRepository::new();
        for name in ["Zoe", "Anna", "Max Muster"] {
            repo.create(&member(name)).await.unwrap();
        }

        let names: Vec<String> = repo
            .list(None)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["Anna", "Max Muster", "Zoe"]);
    }

    #[tokio::test]
    async fn test_list_members_ignores_case_when_sorting() {
        let repo = InMemoryTeamMemberRepository::new();
        for name in ["Zoe", "anna", "Bob", "ANNA"] {
            repo.create(&member(name)).await.unwrap();
        }

        let listed = repo.list(None).await.unwrap();
        let names: Vec<String> = listed.iter().map(|m| m.name.to_lowercase()).collect();
        assert_eq!(names, vec!["anna", "anna", "bob", "zoe"]);
        assert!(listed[0].id < listed[1].id);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let repo = InMemoryTeamMemberRepository::new();
        for name in ["Max Muster", "Maxine Muster", "Anna"] {
            repo.create(&member(name)).await.unwrap();
        }

        assert_eq!(repo.list(Some("MUST")).await.unwrap().len(), 2);
        assert_eq!(repo.list(Some("nna")).await.unwrap().len(), 1);
        assert_eq!(repo.list(Some("   ")).await.unwrap().len(), 3);
        assert!(repo.list(Some("bob")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_unknown_member() {
        let repo = InMemoryTeamMemberRepository::new();
        assert!(repo.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_feedback_filtered_and_sorted() {
        let repo = InMemoryFeedbackRepository::new();
        for (member_id, day) in [("a", 20), ("b", 10), ("a", 5), ("a", 12), ("a", 15)] {
            repo.create(&feedback_on(member_id, day)).await.unwrap();
        }

        let window = TimeWindow::new(
            Some(Utc.with_ymd_and_hms(2024, 5, 5, 9, 0, 0).unwrap()),
            Some(Utc.with_ymd_and_hms(2024, 5, 15, 9, 0, 0).unwrap()),
        )
        .unwrap();
        let found = repo
            .list(&FeedbackFilter::for_member("a").with_window(window))
            .await
            .unwrap();

        let contents: Vec<&str> = found.iter().map(|f| f.content.as_str()).collect();
        assert_eq!(contents, vec!["note 5", "note 12", "note 15"]);
    }

    #[tokio::test]
    async fn test_feedback_without_filter_returns_all() {
        let repo = InMemoryFeedbackRepository::new();
        repo.create(&feedback_on("a", 2)).await.unwrap();
        repo.create(&feedback_on("b", 1)).await.unwrap();

        let found = repo.list(&FeedbackFilter::default()).await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].team_member_id, "b");
    }

    #[tokio::test]
    async fn test_duplicate_feedback_write_is_store_failure() {
        let repo = InMemoryFeedbackRepository::new();
        let feedback = feedback_on("a", 2);
        repo.create(&feedback).await.unwrap();

        let err = repo.create(&feedback).await.unwrap_err();
        assert!(matches!(err, DomainError::StoreFailure(_)));
        assert_eq!(repo.list(&FeedbackFilter::default()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_member_is_conflict() {
        let repo = InMemoryTeamMemberRepository::new();
        let max = member("Max Muster");
        repo.create(&max).await.unwrap();

        let err = repo.create(&max).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }
}
