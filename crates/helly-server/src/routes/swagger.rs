//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::models::{
    // Ask models
    AskRequest,
    AskResponseBody,
    CitationResponse,
    // Team member models
    CorpusSyncRequest,
    CorpusSyncResponse,
    // Feedback models
    CreateFeedbackRequest,
    CreateTeamMemberRequest,
    FeedbackResponse,
    SubmitFeedbackResponse,
    TeamMemberResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Team member endpoints
        super::team_member::list_team_members,
        super::team_member::create_team_member,
        super::team_member::get_team_member,
        super::team_member::sync_corpus,
        // Feedback endpoints
        super::feedback::create_feedback,
        super::feedback::list_feedback,
        // Ask endpoints
        super::ask::ask,
    ),
    info(
        title = "Helly API",
        version = "0.1.0",
        description = "Team feedback journal with AI-assisted recall.\n\nFeedback is linked to team members, stored, and synced into a per-member AI corpus that answers questions with citations.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    modifiers(&BearerAuth),
    security(
        ("bearer_auth" = [])
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "TeamMember", description = "Team member registration and corpus resync"),
        (name = "Feedback", description = "Feedback submission and listing"),
        (name = "Ask", description = "Questions answered by the AI service"),
    ),
    components(
        schemas(
            // Team member
            CreateTeamMemberRequest,
            TeamMemberResponse,
            CorpusSyncRequest,
            CorpusSyncResponse,
            // Feedback
            CreateFeedbackRequest,
            FeedbackResponse,
            SubmitFeedbackResponse,
            // Ask
            AskRequest,
            AskResponseBody,
            CitationResponse,
        )
    )
)]
pub struct ApiDoc;

/// Declares the `Authorization: Bearer <HELLY_API_KEY>` scheme
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
    }
}
