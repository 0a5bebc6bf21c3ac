//! Server configuration
//!
//! Values come from Shuttle secrets, falling back to the process
//! environment (a `.env` file is loaded first when present).

use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

const DEFAULT_AI_BASE_URL: &str = "http://localhost:8001";
const DEFAULT_AI_TIMEOUT_SECS: u64 = 30;

/// Where team members and feedback are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "pg" => Ok(StoreBackend::Postgres),
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            _ => Err(format!("Unknown store backend: {}", s)),
        }
    }
}

/// Outbound webhook receiving FeedbackCreated events
#[derive(Debug, Clone)]
pub struct EventWebhookConfig {
    pub url: String,
    pub secret: Option<String>,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bearer token required on API routes; `None` disables auth
    pub api_key: Option<String>,
    pub ai_base_url: String,
    pub ai_timeout: Duration,
    pub store_backend: StoreBackend,
    pub event_webhook: Option<EventWebhookConfig>,
}

impl AppConfig {
    /// Load from Shuttle secrets with environment fallback
    pub fn from_secrets(secrets: &shuttle_runtime::SecretStore) -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| secrets.get(key).or_else(|| std::env::var(key).ok()))
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let ai_timeout_secs = match get("AI_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("AI_TIMEOUT_SECS must be a number of seconds, got {:?}", raw))?,
            None => DEFAULT_AI_TIMEOUT_SECS,
        };
        if ai_timeout_secs == 0 {
            bail!("AI_TIMEOUT_SECS must be greater than zero");
        }

        let store_backend = match get("STORE_BACKEND") {
            Some(raw) => raw.parse::<StoreBackend>().map_err(anyhow::Error::msg)?,
            None => StoreBackend::default(),
        };

        let event_webhook = get("EVENT_WEBHOOK_URL").map(|url| EventWebhookConfig {
            url,
            secret: get("EVENT_WEBHOOK_SECRET"),
        });

        Ok(Self {
            api_key: get("HELLY_API_KEY"),
            ai_base_url: get("AI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_AI_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            ai_timeout: Duration::from_secs(ai_timeout_secs),
            store_backend,
            event_webhook,
        })
    }
}
