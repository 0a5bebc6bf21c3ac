//! Roster Entity Resolver
//!
//! Resolves feedback to a team member by looking the hint up directly,
//! then by matching member names mentioned in the text against the roster
//! held by the team member store.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{errors::DomainError, Hint, TeamMember};
use crate::ports::{EntityResolver, TeamMemberRepository};

/// Outcome of matching a text against the roster
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterMatch {
    /// Exactly one member scored highest
    Unique(String),
    /// Several members share the highest score
    Ambiguous(Vec<String>),
    NoMatch,
}

/// Lowercase alphanumeric words of a text
fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}

/// 2 = full name mentioned, 1 = some name word mentioned, 0 = no mention
fn mention_score(text_words: &[String], name: &str) -> u8 {
    let name_words = words(name);
    if name_words.is_empty() {
        return 0;
    }

    if text_words
        .windows(name_words.len())
        .any(|window| window == name_words.as_slice())
    {
        return 2;
    }

    let partial = name_words
        .iter()
        .filter(|w| w.chars().count() >= 2)
        .any(|w| text_words.contains(w));

    if partial {
        1
    } else {
        0
    }
}

/// Find the member most clearly mentioned in `text`
pub fn match_roster(text: &str, roster: &[TeamMember]) -> RosterMatch {
    let text_words = words(text);

    let scored: Vec<(u8, &TeamMember)> = roster
        .iter()
        .map(|m| (mention_score(&text_words, &m.name), m))
        .filter(|(score, _)| *score > 0)
        .collect();

    let Some(best) = scored.iter().map(|(score, _)| *score).max() else {
        return RosterMatch::NoMatch;
    };

    let mut top: Vec<String> = scored
        .into_iter()
        .filter(|(score, _)| *score == best)
        .map(|(_, m)| m.id.clone())
        .collect();

    if top.len() == 1 {
        RosterMatch::Unique(top.remove(0))
    } else {
        RosterMatch::Ambiguous(top)
    }
}

/// Entity resolver backed by the team member store
pub struct RosterEntityResolver<R: TeamMemberRepository + ?Sized> {
    members: Arc<R>,
}

impl<R: TeamMemberRepository + ?Sized> RosterEntityResolver<R> {
    pub fn new(members: Arc<R>) -> Self {
        Self { members }
    }

    async fn known_id(&self, candidate: &str) -> Result<Option<String>, DomainError> {
        Ok(self.members.get(candidate).await?.map(|m| m.id))
    }

    /// A free text hint resolves as an id first, then as a unique name match
    async fn resolve_text(&self, text: &str) -> Result<Option<String>, DomainError> {
        if let Some(found) = self.known_id(text.trim()).await? {
            return Ok(Some(found));
        }
        match self.match_text(text).await? {
            RosterMatch::Unique(id) => Ok(Some(id)),
            _ => Ok(None),
        }
    }

    async fn match_text(&self, text: &str) -> Result<RosterMatch, DomainError> {
        let roster = self.members.list(None).await?;
        Ok(match_roster(text, &roster))
    }
}

#[async_trait]
impl<R: TeamMemberRepository + ?Sized> EntityResolver for RosterEntityResolver<R> {
    async fn resolve(&self, content: &str, hint: &Hint) -> Result<String, DomainError> {
        match hint {
            Hint::MemberId(id) => {
                if let Some(found) = self.known_id(id).await? {
                    return Ok(found);
                }
                tracing::debug!("Member id hint {} unknown, falling back to content", id);
            }
            Hint::FreeText(text) => {
                if let Some(found) = self.resolve_text(text).await? {
                    return Ok(found);
                }
                tracing::debug!("Free text hint did not resolve, falling back to content");
            }
            Hint::MemberIdWithText { id, text } => {
                if let Some(found) = self.known_id(id).await? {
                    return Ok(found);
                }
                if let Some(found) = self.resolve_text(text).await? {
                    return Ok(found);
                }
                tracing::debug!(
                    "Member id hint {} and free text did not resolve, falling back to content",
                    id
                );
            }
            Hint::None => {}
        }

        match self.match_text(content).await? {
            RosterMatch::Unique(id) => Ok(id),
            RosterMatch::Ambiguous(ids) => Err(DomainError::UnresolvedEntity(format!(
                "feedback mentions {} team members ambiguously",
                ids.len()
            ))),
            RosterMatch::NoMatch => Err(DomainError::UnresolvedEntity(
                "feedback does not mention a known team member".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryTeamMemberRepository;

    fn member(id: &str, name: &str) -> TeamMember {
        TeamMember {
            id: id.to_string(),
            name: name.to_string(),
            role: "Engineer".to_string(),
            relationship_to_manager: "reports".to_string(),
            start_date: "2024-01-01".to_string(),
        }
    }

    fn roster() -> Vec<TeamMember> {
        vec![
            member("m-max", "Max Muster"),
            member("m-anna", "Anna Schmidt"),
            member("m-maxine", "Maxine Muster"),
        ]
    }

    async fn resolver() -> RosterEntityResolver<InMemoryTeamMemberRepository> {
        let repo = Arc::new(InMemoryTeamMemberRepository::new());
        for m in roster() {
            repo.create(&m).await.unwrap();
        }
        RosterEntityResolver::new(repo)
    }

    #[test]
    fn test_first_name_mention() {
        let result = match_roster("Max improved the API performance significantly.", &roster());
        assert_eq!(result, RosterMatch::Unique("m-max".to_string()));
    }

    #[test]
    fn test_full_name_beats_shared_surname() {
        let result = match_roster("Great pairing session with maxine muster today", &roster());
        assert_eq!(result, RosterMatch::Unique("m-maxine".to_string()));
    }

    #[test]
    fn test_surname_only_is_ambiguous() {
        match match_roster("Muster shipped the release", &roster()) {
            RosterMatch::Ambiguous(ids) => assert_eq!(ids.len(), 2),
            other => panic!("Expected ambiguous match, got {:?}", other),
        }
    }

    #[test]
    fn test_no_substring_matches() {
        // "maximum" must not count as a mention of "Max"
        let result = match_roster("We hit maximum throughput", &roster());
        assert_eq!(result, RosterMatch::NoMatch);
    }

    #[tokio::test]
    async fn test_member_id_hint_is_returned_verbatim() {
        let resolver = resolver().await;
        let id = resolver
            .resolve("Anna did great", &Hint::MemberId("m-max".into()))
            .await
            .unwrap();
        assert_eq!(id, "m-max");
    }

    #[tokio::test]
    async fn test_unknown_member_id_falls_back_to_content() {
        let resolver = resolver().await;
        let id = resolver
            .resolve("Anna did great", &Hint::MemberId("nope".into()))
            .await
            .unwrap();
        assert_eq!(id, "m-anna");
    }

    #[tokio::test]
    async fn test_free_text_hint_holding_an_id() {
        let resolver = resolver().await;
        let id = resolver
            .resolve("Great work", &Hint::FreeText("m-anna".into()))
            .await
            .unwrap();
        assert_eq!(id, "m-anna");
    }

    #[tokio::test]
    async fn test_free_text_hint_by_name() {
        let resolver = resolver().await;
        let id = resolver
            .resolve("Great work on the migration", &Hint::FreeText("Anna".into()))
            .await
            .unwrap();
        assert_eq!(id, "m-anna");
    }

    #[tokio::test]
    async fn test_stale_member_id_falls_back_to_free_text() {
        let resolver = resolver().await;
        let hint = Hint::from_parts(Some("stale-id".into()), Some("Anna".into()));
        let id = resolver
            .resolve("Great retro facilitation", &hint)
            .await
            .unwrap();
        assert_eq!(id, "m-anna");
    }

    #[tokio::test]
    async fn test_known_member_id_wins_over_free_text() {
        let resolver = resolver().await;
        let hint = Hint::from_parts(Some("m-max".into()), Some("Anna".into()));
        let id = resolver.resolve("Great work", &hint).await.unwrap();
        assert_eq!(id, "m-max");
    }

    #[tokio::test]
    async fn test_unresolvable_content_fails() {
        let resolver = resolver().await;
        let err = resolver
            .resolve("The build was slow today", &Hint::None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::UnresolvedEntity(_)));
    }

    #[tokio::test]
    async fn test_resolution_does_not_register_members() {
        let repo = Arc::new(InMemoryTeamMemberRepository::new());
        let resolver = RosterEntityResolver::new(repo.clone());
        let _ = resolver.resolve("Bob was great", &Hint::FreeText("Bob".into())).await;
        assert!(repo.list(None).await.unwrap().is_empty());
    }
}
