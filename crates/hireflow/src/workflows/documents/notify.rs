use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::domain::{CollectionStatus, RequestId};

/// Payload describing one committed status change. `detail` carries the
/// reviewer's notes or the rejection reason when the transition has one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusChangeEvent {
    pub request_id: RequestId,
    pub previous_status: CollectionStatus,
    pub new_status: CollectionStatus,
    pub occurred_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Trait describing outbound status-change hooks (e.g. UI push or webhook
/// adapters). Delivery is best-effort; implementations must not block on
/// remote acknowledgement.
pub trait StatusNotifier: Send + Sync {
    fn notify(&self, event: &StatusChangeEvent) -> Result<(), NotifyError>;
}

/// Notification dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification delivery failed: {0}")]
    Delivery(String),
}

/// Fans one event out to every registered sink. A failing sink is logged
/// and skipped so the remaining sinks still hear about the change.
#[derive(Default, Clone)]
pub struct FanoutNotifier {
    sinks: Vec<Arc<dyn StatusNotifier>>,
}

impl FanoutNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, sink: Arc<dyn StatusNotifier>) {
        self.sinks.push(sink);
    }

    pub fn with_sink(mut self, sink: Arc<dyn StatusNotifier>) -> Self {
        self.register(sink);
        self
    }
}

impl StatusNotifier for FanoutNotifier {
    fn notify(&self, event: &StatusChangeEvent) -> Result<(), NotifyError> {
        for sink in &self.sinks {
            if let Err(error) = sink.notify(event) {
                warn!(request_id = %event.request_id, %error, "status change sink failed");
            }
        }
        Ok(())
    }
}

/// Sink writing a human-readable confirmation to the service log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl StatusNotifier for TracingNotifier {
    fn notify(&self, event: &StatusChangeEvent) -> Result<(), NotifyError> {
        info!(
            request_id = %event.request_id,
            from = event.previous_status.label(),
            to = event.new_status.label(),
            detail = event.detail.as_deref().unwrap_or(""),
            "document collection status changed"
        );
        Ok(())
    }
}
