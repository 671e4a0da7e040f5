//! Analytics query facade.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use super::aggregation::{aggregate, AnalyticsAggregation, DateRange};
use super::engagement::{
    dealer_analytics, partner_analytics, DealerAnalytics, EngagementSource, EntityKind,
    PartnerAnalytics, PlaceholderEngagement,
};
use super::event::{AnalyticsEventPayload, EventFilter};
use super::store::{AnalyticsStore, InMemoryAnalyticsStore};
use super::tracker::AnalyticsTracker;
use super::{AnalyticsConfig, Result};

/// Owns the event store and answers report queries against it.
#[derive(Clone)]
pub struct AnalyticsService {
    store: Arc<dyn AnalyticsStore>,
    engagement: Arc<dyn EngagementSource>,
    config: AnalyticsConfig,
}

impl AnalyticsService {
    pub fn new(store: Arc<dyn AnalyticsStore>) -> Self {
        Self {
            store,
            engagement: Arc::new(PlaceholderEngagement),
            config: AnalyticsConfig::default(),
        }
    }

    /// Service over a fresh in-memory store sized from `config`.
    pub fn from_config(config: AnalyticsConfig) -> Result<Self> {
        let store = InMemoryAnalyticsStore::from_config(&config)?;
        Ok(Self {
            store: Arc::new(store),
            engagement: Arc::new(PlaceholderEngagement),
            config,
        })
    }

    pub fn with_engagement(mut self, engagement: Arc<dyn EngagementSource>) -> Self {
        self.engagement = engagement;
        self
    }

    pub fn store(&self) -> &Arc<dyn AnalyticsStore> {
        &self.store
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Tracker writing into this service's store.
    pub fn tracker(&self) -> AnalyticsTracker {
        AnalyticsTracker::with_pii_keys(self.store.clone(), self.config.pii_keys.clone())
    }

    pub async fn get_events(&self, filter: &EventFilter) -> Result<Vec<AnalyticsEventPayload>> {
        self.store.query(filter).await
    }

    pub async fn admin_dashboard_metrics(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<AnalyticsAggregation> {
        self.admin_dashboard_metrics_at(start, end, Utc::now()).await
    }

    /// Dashboard metrics with an explicit reference time for active-user
    /// windows.
    pub async fn admin_dashboard_metrics_at(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<AnalyticsAggregation> {
        let range = DateRange::new(start, end)?;
        let events = self.store.snapshot().await?;
        debug!(events = events.len(), %start, %end, "Aggregating dashboard metrics");
        Ok(aggregate(
            &events,
            range,
            now,
            self.config.daily_active_window(),
            self.config.monthly_active_window(),
        ))
    }

    pub async fn partner_analytics(
        &self,
        partner_id: &str,
        range: Option<DateRange>,
    ) -> Result<PartnerAnalytics> {
        let events = self.events_in(range).await?;
        let engagement = self
            .engagement
            .engagement(EntityKind::Partner, partner_id)
            .await?;
        Ok(partner_analytics(&events, partner_id, engagement))
    }

    pub async fn dealer_analytics(
        &self,
        dealer_id: &str,
        range: Option<DateRange>,
    ) -> Result<DealerAnalytics> {
        let events = self.events_in(range).await?;
        let engagement = self
            .engagement
            .engagement(EntityKind::Dealer, dealer_id)
            .await?;
        Ok(dealer_analytics(&events, dealer_id, engagement))
    }

    async fn events_in(&self, range: Option<DateRange>) -> Result<Vec<AnalyticsEventPayload>> {
        let mut events = self.store.snapshot().await?;
        if let Some(range) = range {
            events.retain(|e| range.contains(e.timestamp));
        }
        Ok(events)
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new(Arc::new(InMemoryAnalyticsStore::new()))
    }
}
