//! Marketplace analytics.
//!
//! Tracked events land in a bounded in-memory log. Every report (dashboard
//! metrics, conversion funnel, daily time series, partner and dealer
//! summaries) is recomputed from that log on demand; no aggregate state is
//! kept between queries.
//!
//! ```text
//! emitters --track()--> [AnalyticsTracker] --spawn--> [AnalyticsStore]
//!                                                           |
//!                         [AnalyticsService] <--snapshot----+
//!                                 |
//!                                 v
//!                      dashboard / partner / dealer reports
//! ```

pub mod aggregation;
pub mod engagement;
pub mod event;
pub mod service;
pub mod store;
pub mod tracker;

use serde::Deserialize;

pub use aggregation::{
    AnalyticsAggregation, ConversionFunnel, DateRange, PaymentMetrics, RoleCounts,
    TimeSeriesPoint, UserMetrics,
};
pub use engagement::{
    DealerAnalytics, Engagement, EngagementSource, EntityKind, PartnerAnalytics,
    PlaceholderEngagement,
};
pub use event::{strip_pii, AnalyticsEventPayload, EventFilter, EventKind, UserRole};
pub use service::AnalyticsService;
pub use store::{AnalyticsStore, InMemoryAnalyticsStore};
pub use tracker::AnalyticsTracker;

/// Default number of events kept before the oldest are evicted.
pub const DEFAULT_EVENT_CAPACITY: usize = 10_000;

/// Longest span, in days, a report range may cover.
pub const MAX_RANGE_DAYS: i64 = 3_660;

/// Metadata keys removed before an event is stored.
pub const DEFAULT_PII_KEYS: [&str; 4] = ["email", "phone", "name", "address"];

pub fn default_pii_keys() -> Vec<String> {
    DEFAULT_PII_KEYS.iter().map(|k| k.to_string()).collect()
}

/// Errors that can occur in the analytics layer.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("Invalid event payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("Event store capacity must be at least 1")]
    ZeroCapacity,

    #[error("Invalid range: start {start} is after end {end}")]
    InvalidRange {
        start: chrono::DateTime<chrono::Utc>,
        end: chrono::DateTime<chrono::Utc>,
    },

    #[error("Range too large: {days} days (max: {max})")]
    RangeTooLarge { days: i64, max: i64 },

    /// Raised by store implementations backed by an external system. The
    /// in-memory store never returns it.
    #[error("Event store unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;

/// Analytics configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Maximum events held in memory.
    pub capacity: usize,
    /// Metadata keys stripped on ingest (case-insensitive).
    pub pii_keys: Vec<String>,
    /// Look-back for daily active users, relative to now.
    pub daily_active_window_hours: i64,
    /// Look-back for monthly active users, relative to now.
    pub monthly_active_window_days: i64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_EVENT_CAPACITY,
            pii_keys: default_pii_keys(),
            daily_active_window_hours: 24,
            monthly_active_window_days: 30,
        }
    }
}

impl AnalyticsConfig {
    pub fn daily_active_window(&self) -> chrono::Duration {
        chrono::Duration::hours(self.daily_active_window_hours)
    }

    pub fn monthly_active_window(&self) -> chrono::Duration {
        chrono::Duration::days(self.monthly_active_window_days)
    }
}
