//! Event sink implementations
//!
//! - `LoggingEventSink`: records events in the log only
//! - `QueuedEventSink`: hands events to a background task that forwards
//!   them to another sink, so publishing never waits on delivery

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::domain::FeedbackCreated;
use crate::ports::{EventSink, EventSinkError};

/// Sink that only logs the event
#[derive(Debug, Default, Clone)]
pub struct LoggingEventSink;

#[async_trait]
impl EventSink for LoggingEventSink {
    async fn publish(&self, event: &FeedbackCreated) -> Result<(), EventSinkError> {
        tracing::info!(
            feedback_id = %event.id,
            team_member_id = %event.team_member_id,
            created_at = %event.created_at,
            "FeedbackCreated"
        );
        Ok(())
    }
}

/// Fire-and-forget front for another sink
pub struct QueuedEventSink {
    sender: mpsc::UnboundedSender<FeedbackCreated>,
}

impl QueuedEventSink {
    /// Spawn the delivery worker. Must be called inside a Tokio runtime.
    ///
    /// The worker stops once every `QueuedEventSink` clone is dropped.
    pub fn spawn(inner: Arc<dyn EventSink>) -> (Self, JoinHandle<()>) {
        let (sender, mut receiver) = mpsc::unbounded_channel::<FeedbackCreated>();

        let handle = tokio::spawn(async move {
            while let Some(event) = receiver.recv().await {
                match inner.publish(&event).await {
                    Ok(()) => {}
                    Err(EventSinkError::Unavailable(reason)) => {
                        tracing::warn!(
                            feedback_id = %event.id,
                            "Event delivery failed, sink unavailable: {}",
                            reason
                        );
                    }
                    Err(EventSinkError::Misconfigured(reason)) => {
                        tracing::error!(
                            feedback_id = %event.id,
                            "Event delivery failed, sink misconfigured: {}",
                            reason
                        );
                    }
                }
            }
            tracing::debug!("Event queue closed");
        });

        (Self { sender }, handle)
    }
}

#[async_trait]
impl EventSink for QueuedEventSink {
    async fn publish(&self, event: &FeedbackCreated) -> Result<(), EventSinkError> {
        self.sender
            .send(event.clone())
            .map_err(|_| EventSinkError::Unavailable("event queue worker stopped".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<FeedbackCreated>>,
    }

    #[async_trait]
    impl EventSink for Recorder {
        async fn publish(&self, event: &FeedbackCreated) -> Result<(), EventSinkError> {
            self.seen.lock().await.push(event.clone());
            Ok(())
        }
    }

    fn event(id: &str) -> FeedbackCreated {
        FeedbackCreated {
            id: id.to_string(),
            team_member_id: "m-1".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_queued_events_reach_inner_sink_in_order() {
        let recorder = Arc::new(Recorder::default());
        let (queue, handle) = QueuedEventSink::spawn(recorder.clone());

        queue.publish(&event("f-1")).await.unwrap();
        queue.publish(&event("f-2")).await.unwrap();
        drop(queue);
        handle.await.unwrap();

        let ids: Vec<String> = recorder.seen.lock().await.iter().map(|e| e.id.clone()).collect();
        assert_eq!(ids, vec!["f-1", "f-2"]);
    }

    #[tokio::test]
    async fn test_publish_after_worker_stopped_is_unavailable() {
        let (queue, handle) = QueuedEventSink::spawn(Arc::new(LoggingEventSink));
        handle.abort();
        let _ = handle.await;

        let err = queue.publish(&event("f-1")).await.unwrap_err();
        assert!(matches!(err, EventSinkError::Unavailable(_)));
    }
}
