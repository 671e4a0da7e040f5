//! Fire-and-forget event tracking.
//!
//! `track` hands the append to a spawned task and returns immediately.
//! Whatever happens to that task is logged and never reaches the caller:
//! instrumentation must not disturb the request that emitted it.

use std::sync::Arc;

use serde_json::Value;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::event::{strip_pii, AnalyticsEventPayload};
use super::store::AnalyticsStore;
use super::{default_pii_keys, AnalyticsError, Result};

#[derive(Clone)]
pub struct AnalyticsTracker {
    store: Arc<dyn AnalyticsStore>,
    pii_keys: Arc<[String]>,
}

impl AnalyticsTracker {
    pub fn new(store: Arc<dyn AnalyticsStore>) -> Self {
        Self::with_pii_keys(store, default_pii_keys())
    }

    pub fn with_pii_keys(store: Arc<dyn AnalyticsStore>, pii_keys: Vec<String>) -> Self {
        Self {
            store,
            pii_keys: pii_keys.into(),
        }
    }

    /// Strip PII and append, waiting for the store.
    pub async fn record(&self, mut payload: AnalyticsEventPayload) -> Result<()> {
        let removed = strip_pii(&mut payload.metadata, &self.pii_keys);
        if removed > 0 {
            debug!(event = %payload.event, removed, "Stripped PII metadata keys");
        }
        self.store.append(payload).await
    }

    /// Track an event without waiting.
    ///
    /// Returns the spawned task so tests can await it; callers may drop it.
    /// Without a Tokio runtime the event is logged and dropped.
    pub fn track(&self, payload: AnalyticsEventPayload) -> Option<JoinHandle<()>> {
        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                warn!(event = %payload.event, error = %e, "No runtime for analytics tracking, event dropped");
                return None;
            }
        };

        let tracker = self.clone();
        Some(handle.spawn(async move {
            let event = payload.event;
            if let Err(e) = tracker.record(payload).await {
                warn!(event = %event, error = %e, "Failed to track analytics event");
            }
        }))
    }

    /// Track an untyped JSON payload. Malformed payloads are logged and
    /// dropped.
    pub fn track_json(&self, value: Value) -> Option<JoinHandle<()>> {
        match parse_payload(value) {
            Ok(payload) => self.track(payload),
            Err(e) => {
                warn!(error = %e, "Discarding malformed analytics payload");
                None
            }
        }
    }
}

fn parse_payload(value: Value) -> Result<AnalyticsEventPayload> {
    serde_json::from_value(value).map_err(AnalyticsError::from)
}
