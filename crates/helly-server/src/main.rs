use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod adapters;
mod auth;
mod config;
mod models;
mod routes;

use adapters::{HttpAiGateway, PgFeedbackRepository, PgTeamMemberRepository, WebhookEventSink};
use auth::ApiKey;
use config::{AppConfig, StoreBackend};
use helly::adapters::{
    InMemoryFeedbackRepository, InMemoryTeamMemberRepository, LoggingEventSink, QueuedEventSink,
};
use helly::application::{AskService, FeedbackService, TeamMemberService};
use helly::{AiGateway, EventSink, FeedbackRepository, RosterEntityResolver, TeamMemberRepository};

const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(10);

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub team_member_service: Arc<TeamMemberService>,
    pub feedback_service: Arc<FeedbackService>,
    pub ask_service: Arc<AskService>,
}

impl AppState {
    /// Wire the application services over the given ports
    pub fn new(
        members: Arc<dyn TeamMemberRepository>,
        feedback: Arc<dyn FeedbackRepository>,
        events: Arc<dyn EventSink>,
        gateway: Arc<dyn AiGateway>,
    ) -> Self {
        let resolver = Arc::new(RosterEntityResolver::new(members.clone()));

        Self {
            team_member_service: Arc::new(TeamMemberService::new(members)),
            feedback_service: Arc::new(FeedbackService::new(
                feedback,
                events,
                resolver,
                gateway.clone(),
            )),
            ask_service: Arc::new(AskService::new(gateway)),
        }
    }
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Helly API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Build the full router: health, Swagger UI and the protected API
pub fn app(state: AppState, api_key: ApiKey) -> Router {
    let protected_routes =
        routes::router().layer(middleware::from_fn_with_state(api_key, auth::auth_middleware));

    let openapi = routes::swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn stores(
    backend: StoreBackend,
    pool: PgPool,
) -> anyhow::Result<(Arc<dyn TeamMemberRepository>, Arc<dyn FeedbackRepository>)> {
    match backend {
        StoreBackend::Postgres => {
            sqlx::migrate!()
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations completed");

            Ok((
                Arc::new(PgTeamMemberRepository::new(pool.clone())),
                Arc::new(PgFeedbackRepository::new(pool)),
            ))
        }
        StoreBackend::Memory => {
            tracing::warn!("STORE_BACKEND=memory - data is lost on restart");
            Ok((
                Arc::new(InMemoryTeamMemberRepository::new()),
                Arc::new(InMemoryFeedbackRepository::new()),
            ))
        }
    }
}

fn event_sink(config: &AppConfig) -> anyhow::Result<Arc<dyn EventSink>> {
    let inner: Arc<dyn EventSink> = match &config.event_webhook {
        Some(webhook) => {
            let sink = WebhookEventSink::new(&webhook.url, webhook.secret.clone(), WEBHOOK_TIMEOUT)
                .context("Failed to build webhook client")?;
            tracing::info!(
                "FeedbackCreated events -> {} (signed: {})",
                webhook.url,
                webhook.secret.is_some()
            );
            Arc::new(sink)
        }
        None => {
            tracing::info!("No EVENT_WEBHOOK_URL set - FeedbackCreated events are logged only");
            Arc::new(LoggingEventSink)
        }
    };

    let (queued, _worker) = QueuedEventSink::spawn(inner);
    Ok(Arc::new(queued))
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_shared_db::Postgres] pool: PgPool,
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing::info!("Helly API initializing...");

    let config = AppConfig::from_secrets(&secrets)?;

    let api_key = ApiKey::new(config.api_key.clone());
    if api_key.is_enabled() {
        tracing::info!("API key authentication enabled");
    } else {
        tracing::warn!("No HELLY_API_KEY set - authentication disabled");
    }

    let (members, feedback) = stores(config.store_backend, pool).await?;

    let gateway = HttpAiGateway::new(&config.ai_base_url, config.ai_timeout)
        .context("Failed to build AI gateway client")?;
    tracing::info!(
        "AI service: {} (timeout {}s)",
        config.ai_base_url,
        config.ai_timeout.as_secs()
    );

    let events = event_sink(&config)?;

    let state = AppState::new(members, feedback, events, Arc::new(gateway));
    let router = app(state, api_key);

    tracing::info!("Swagger UI: /swagger-ui");
    tracing::info!("Helly API ready");

    Ok(router.into())
}
