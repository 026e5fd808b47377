use std::sync::Arc;

use parking_lot::Mutex;
use quiz_funnel_types::{AnalyticsEvent, AnalyticsSink};
use tracing::{info, warn};

/// Sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl AnalyticsSink for NoopSink {
    fn emit(&self, _event: &AnalyticsEvent) {}
}

/// Sink that writes each event as a structured `info!` line under the
/// `quiz_funnel::analytics` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl AnalyticsSink for TracingSink {
    fn emit(&self, event: &AnalyticsEvent) {
        match serde_json::to_string(event) {
            Ok(payload) => info!(
                target: "quiz_funnel::analytics",
                event = event.name(),
                %payload,
                "analytics event"
            ),
            Err(e) => warn!(event = event.name(), "Failed to serialize analytics event: {e}"),
        }
    }
}

/// Sink that keeps every event in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<AnalyticsEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.lock().clone()
    }

    /// Names of the recorded events, in order.
    pub fn names(&self) -> Vec<&'static str> {
        self.events.lock().iter().map(AnalyticsEvent::name).collect()
    }

    /// Drop the recorded events.
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl AnalyticsSink for RecordingSink {
    fn emit(&self, event: &AnalyticsEvent) {
        self.events.lock().push(event.clone());
    }
}
