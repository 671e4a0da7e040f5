//! Partner and dealer summaries.
//!
//! Counts come from the event log, scoped by the entity id carried in event
//! metadata. Response time and feedback rating live in other services and
//! are fetched through [`EngagementSource`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::aggregation::percentage;
use super::event::{AnalyticsEventPayload, EventKind};
use super::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Partner,
    Dealer,
}

impl EntityKind {
    /// Metadata key holding the entity id on scoped events.
    pub fn metadata_key(&self) -> &'static str {
        match self {
            EntityKind::Partner => "partnerId",
            EntityKind::Dealer => "dealerId",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Partner => "partner",
            EntityKind::Dealer => "dealer",
        }
    }
}

/// Figures owned by other services.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Engagement {
    pub average_response_time_hours: f64,
    pub feedback_rating: f64,
}

/// Source of engagement figures for one partner or dealer.
#[async_trait]
pub trait EngagementSource: Send + Sync {
    async fn engagement(&self, kind: EntityKind, entity_id: &str) -> Result<Engagement>;
}

/// Fixed figures until response tracking and reviews are wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderEngagement;

impl PlaceholderEngagement {
    pub const AVERAGE_RESPONSE_TIME_HOURS: f64 = 2.5;
    pub const FEEDBACK_RATING: f64 = 4.5;
}

#[async_trait]
impl EngagementSource for PlaceholderEngagement {
    async fn engagement(&self, _kind: EntityKind, _entity_id: &str) -> Result<Engagement> {
        Ok(Engagement {
            average_response_time_hours: Self::AVERAGE_RESPONSE_TIME_HOURS,
            feedback_rating: Self::FEEDBACK_RATING,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerAnalytics {
    pub partner_id: String,
    pub profile_views: u64,
    /// Partner searches whose `resultIds` listed this partner.
    pub search_appearances: u64,
    pub enquiries_received: u64,
    pub enquiries_responded: u64,
    pub response_rate: f64,
    pub average_response_time_hours: f64,
    pub feedback_rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealerAnalytics {
    pub dealer_id: String,
    pub profile_views: u64,
    pub enquiries_received: u64,
    pub enquiries_responded: u64,
    pub response_rate: f64,
    pub orders_completed: u64,
    pub revenue: f64,
    pub average_response_time_hours: f64,
    pub feedback_rating: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct EntityCounts {
    profile_views: u64,
    search_appearances: u64,
    enquiries_received: u64,
    enquiries_responded: u64,
    payments: u64,
    revenue: f64,
}

impl EntityCounts {
    fn response_rate(&self) -> f64 {
        percentage(self.enquiries_responded, self.enquiries_received)
    }
}

fn lists_entity(event: &AnalyticsEventPayload, entity_id: &str) -> bool {
    match event.metadata.get("resultIds") {
        Some(Value::Array(ids)) => ids.iter().any(|id| id.as_str() == Some(entity_id)),
        _ => false,
    }
}

fn count_entity<'a, I>(events: I, kind: EntityKind, entity_id: &str) -> EntityCounts
where
    I: IntoIterator<Item = &'a AnalyticsEventPayload>,
{
    let key = kind.metadata_key();
    let mut counts = EntityCounts::default();

    for event in events {
        if kind == EntityKind::Partner
            && event.event == EventKind::PartnerSearch
            && lists_entity(event, entity_id)
        {
            counts.search_appearances += 1;
            continue;
        }
        if event.metadata_str(key) != Some(entity_id) {
            continue;
        }
        match event.event {
            EventKind::ProfileViewed => counts.profile_views += 1,
            EventKind::EnquirySubmitted => counts.enquiries_received += 1,
            EventKind::EnquiryResponded => counts.enquiries_responded += 1,
            EventKind::PaymentSuccess => {
                counts.payments += 1;
                counts.revenue += event.metadata_f64("amount").unwrap_or(0.0);
            }
            _ => {}
        }
    }
    counts
}

/// Summarize one partner from `events`.
pub fn partner_analytics<'a, I>(events: I, partner_id: &str, engagement: Engagement) -> PartnerAnalytics
where
    I: IntoIterator<Item = &'a AnalyticsEventPayload>,
{
    let counts = count_entity(events, EntityKind::Partner, partner_id);
    PartnerAnalytics {
        partner_id: partner_id.to_string(),
        profile_views: counts.profile_views,
        search_appearances: counts.search_appearances,
        enquiries_received: counts.enquiries_received,
        enquiries_responded: counts.enquiries_responded,
        response_rate: counts.response_rate(),
        average_response_time_hours: engagement.average_response_time_hours,
        feedback_rating: engagement.feedback_rating,
    }
}

/// Summarize one dealer from `events`.
pub fn dealer_analytics<'a, I>(events: I, dealer_id: &str, engagement: Engagement) -> DealerAnalytics
where
    I: IntoIterator<Item = &'a AnalyticsEventPayload>,
{
    let counts = count_entity(events, EntityKind::Dealer, dealer_id);
    DealerAnalytics {
        dealer_id: dealer_id.to_string(),
        profile_views: counts.profile_views,
        enquiries_received: counts.enquiries_received,
        enquiries_responded: counts.enquiries_responded,
        response_rate: counts.response_rate(),
        orders_completed: counts.payments,
        revenue: counts.revenue,
        average_response_time_hours: engagement.average_response_time_hours,
        feedback_rating: engagement.feedback_rating,
    }
}
