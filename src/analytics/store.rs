//! Analytics event storage.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::event::{AnalyticsEventPayload, EventFilter};
use super::{AnalyticsConfig, AnalyticsError, Result, DEFAULT_EVENT_CAPACITY};

/// Append-only event log.
///
/// Implementations:
/// - `InMemoryAnalyticsStore`: bounded FIFO buffer, oldest evicted first
#[async_trait]
pub trait AnalyticsStore: Send + Sync {
    /// Append one event, evicting the oldest if the store is full.
    async fn append(&self, event: AnalyticsEventPayload) -> Result<()>;

    /// Events matching `filter`, newest first, truncated to `filter.limit`.
    async fn query(&self, filter: &EventFilter) -> Result<Vec<AnalyticsEventPayload>>;

    /// Every stored event in insertion order.
    async fn snapshot(&self) -> Result<Vec<AnalyticsEventPayload>>;

    /// Number of stored events.
    async fn len(&self) -> Result<usize>;

    /// Remove every stored event.
    async fn clear(&self) -> Result<()>;
}

/// Bounded in-memory store.
///
/// Push, evict and snapshot all happen under one lock, so a query never
/// observes a half-applied append.
pub struct InMemoryAnalyticsStore {
    events: RwLock<VecDeque<AnalyticsEventPayload>>,
    capacity: usize,
}

impl Default for InMemoryAnalyticsStore {
    fn default() -> Self {
        Self {
            events: RwLock::new(VecDeque::new()),
            capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl InMemoryAnalyticsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(AnalyticsError::ZeroCapacity);
        }
        Ok(Self {
            events: RwLock::new(VecDeque::new()),
            capacity,
        })
    }

    pub fn from_config(config: &AnalyticsConfig) -> Result<Self> {
        Self::with_capacity(config.capacity)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[async_trait]
impl AnalyticsStore for InMemoryAnalyticsStore {
    async fn append(&self, event: AnalyticsEventPayload) -> Result<()> {
        let mut events = self.events.write().await;
        while events.len() >= self.capacity {
            if let Some(evicted) = events.pop_front() {
                debug!(
                    event = %evicted.event,
                    timestamp = %evicted.timestamp,
                    capacity = self.capacity,
                    "Evicted oldest analytics event"
                );
            }
        }
        events.push_back(event);
        Ok(())
    }

    async fn query(&self, filter: &EventFilter) -> Result<Vec<AnalyticsEventPayload>> {
        let events = self.events.read().await;
        Ok(filter.apply(events.iter()))
    }

    async fn snapshot(&self) -> Result<Vec<AnalyticsEventPayload>> {
        let events = self.events.read().await;
        Ok(events.iter().cloned().collect())
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.events.read().await.len())
    }

    async fn clear(&self) -> Result<()> {
        self.events.write().await.clear();
        Ok(())
    }
}
