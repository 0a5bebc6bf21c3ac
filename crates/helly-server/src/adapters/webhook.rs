//! Webhook Event Sink
//!
//! Delivers `FeedbackCreated` events to an external endpoint using reqwest.
//! A single attempt per event; callers wrap this in `QueuedEventSink`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use helly::{EventSink, EventSinkError, FeedbackCreated};

const SIGNATURE_HEADER: &str = "X-Helly-Signature";

/// HTTP implementation of EventSink
pub struct WebhookEventSink {
    client: Client,
    url: String,
    secret: Option<String>,
}

impl WebhookEventSink {
    pub fn new(
        url: impl Into<String>,
        secret: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("helly-webhook/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
            secret,
        })
    }

    fn sign_payload(secret: &str, payload: &[u8]) -> String {
        use hmac::{Hmac, Mac};
        use sha2::Sha256;

        type HmacSha256 = Hmac<Sha256>;

        let mut mac =
            HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
        mac.update(payload);
        let bytes = mac.finalize().into_bytes();

        format!("sha256={}", hex::encode(bytes))
    }
}

/// 4xx means the receiver rejects us and retrying won't help,
/// except for timeouts and rate limiting.
fn classify_status(status: StatusCode) -> EventSinkError {
    let reason = format!("webhook returned {}", status);
    if status.is_client_error()
        && status != StatusCode::REQUEST_TIMEOUT
        && status != StatusCode::TOO_MANY_REQUESTS
    {
        EventSinkError::Misconfigured(reason)
    } else {
        EventSinkError::Unavailable(reason)
    }
}

#[async_trait]
impl EventSink for WebhookEventSink {
    async fn publish(&self, event: &FeedbackCreated) -> Result<(), EventSinkError> {
        let body = serde_json::to_vec(event).map_err(|e| {
            EventSinkError::Misconfigured(format!("Failed to serialize event: {e}"))
        })?;

        let mut request = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json");

        if let Some(secret) = &self.secret {
            request = request.header(SIGNATURE_HEADER, Self::sign_payload(secret, &body));
        }

        match request.body(body).send().await {
            Ok(resp) if resp.status().is_success() => Ok(()),
            Ok(resp) => Err(classify_status(resp.status())),
            Err(e) if e.is_builder() => Err(EventSinkError::Misconfigured(format!(
                "invalid webhook request for {}: {}",
                self.url, e
            ))),
            Err(e) => Err(EventSinkError::Unavailable(e.to_string())),
        }
    }
}
