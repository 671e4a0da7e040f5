//! Analytics step definitions.

use std::sync::Arc;

use buildmart::analytics::{
    AnalyticsAggregation, AnalyticsEventPayload, AnalyticsService, AnalyticsStore, EventKind,
    InMemoryAnalyticsStore, PartnerAnalytics, UserRole,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use cucumber::{given, then, when, World};

/// Test context for analytics scenarios.
#[derive(World)]
#[world(init = Self::new)]
pub struct AnalyticsWorld {
    store: Arc<InMemoryAnalyticsStore>,
    service: AnalyticsService,
    last_dashboard: Option<AnalyticsAggregation>,
    last_partner: Option<PartnerAnalytics>,
}

impl std::fmt::Debug for AnalyticsWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyticsWorld")
            .field("last_dashboard", &self.last_dashboard)
            .field("last_partner", &self.last_partner)
            .finish_non_exhaustive()
    }
}

impl AnalyticsWorld {
    fn new() -> Self {
        let store = Arc::new(InMemoryAnalyticsStore::new());
        let service = AnalyticsService::new(store.clone());
        Self {
            store,
            service,
            last_dashboard: None,
            last_partner: None,
        }
    }

    async fn record(&self, event: AnalyticsEventPayload) {
        self.service
            .tracker()
            .record(event)
            .await
            .expect("Record should succeed");
    }

    fn dashboard(&self) -> &AnalyticsAggregation {
        self.last_dashboard
            .as_ref()
            .expect("No dashboard metrics requested")
    }
}

fn day_start(date: &str) -> DateTime<Utc> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("Invalid date");
    Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).expect("Valid time"))
}

fn day_end(date: &str) -> DateTime<Utc> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("Invalid date");
    Utc.from_utc_datetime(&date.and_hms_opt(23, 59, 59).expect("Valid time"))
}

// --- Background ---

#[given("an empty analytics store")]
async fn given_empty_store(world: &mut AnalyticsWorld) {
    world.store.clear().await.expect("Clear should succeed");
}

// --- Given steps ---

#[given(
    expr = "customer {string} searches, views partner {string}, enquires and pays {int} on {string}"
)]
async fn given_customer_journey(
    world: &mut AnalyticsWorld,
    customer: String,
    partner: String,
    amount: i64,
    date: String,
) {
    let at = day_start(&date) + chrono::Duration::hours(10);
    let steps = [
        EventKind::PartnerSearch,
        EventKind::ProfileViewed,
        EventKind::EnquirySubmitted,
        EventKind::PaymentSuccess,
    ];
    for (minute, kind) in steps.into_iter().enumerate() {
        let mut event = AnalyticsEventPayload::new(kind)
            .with_user(customer.clone(), UserRole::Customer)
            .at(at + chrono::Duration::minutes(minute as i64))
            .with_metadata("partnerId", partner.clone());
        if kind == EventKind::PaymentSuccess {
            event = event.with_metadata("amount", amount);
        }
        world.record(event).await;
    }
}

#[given(expr = "customer {string} searches on {string}")]
async fn given_customer_search(world: &mut AnalyticsWorld, customer: String, date: String) {
    let event = AnalyticsEventPayload::new(EventKind::DealerSearch)
        .with_user(customer, UserRole::Customer)
        .at(day_start(&date) + chrono::Duration::hours(12));
    world.record(event).await;
}

#[given(expr = "partner {string} received {int} enquiries and responded to {int}")]
async fn given_partner_enquiries(
    world: &mut AnalyticsWorld,
    partner: String,
    received: u32,
    responded: u32,
) {
    for _ in 0..received {
        world
            .record(
                AnalyticsEventPayload::new(EventKind::EnquirySubmitted)
                    .with_metadata("partnerId", partner.clone()),
            )
            .await;
    }
    for _ in 0..responded {
        world
            .record(
                AnalyticsEventPayload::new(EventKind::EnquiryResponded)
                    .with_metadata("partnerId", partner.clone()),
            )
            .await;
    }
}

// --- When steps ---

#[when(expr = "{int} login events are tracked")]
async fn when_logins_tracked(world: &mut AnalyticsWorld, count: i64) {
    let tracker = world.service.tracker();
    for seq in 0..count {
        if let Some(handle) = tracker.track(
            AnalyticsEventPayload::new(EventKind::UserLogin).with_metadata("seq", seq),
        ) {
            handle.await.expect("Tracking task should not panic");
        }
    }
}

#[when(expr = "a {string} event is tracked with metadata key {string}")]
async fn when_event_with_metadata(world: &mut AnalyticsWorld, kind: String, key: String) {
    let mut metadata = serde_json::Map::new();
    metadata.insert(key, "private".into());
    metadata.insert("partnerId".to_string(), "p1".into());

    let handle = world
        .service
        .tracker()
        .track_json(serde_json::json!({ "event": kind, "metadata": metadata }))
        .expect("Payload should be accepted");
    handle.await.expect("Tracking task should not panic");
}

#[when(expr = "dashboard metrics are requested from {string} to {string}")]
async fn when_dashboard_requested(world: &mut AnalyticsWorld, start: String, end: String) {
    let end = day_end(&end);
    let metrics = world
        .service
        .admin_dashboard_metrics_at(day_start(&start), end, end)
        .await
        .expect("Dashboard metrics should succeed");
    world.last_dashboard = Some(metrics);
}

#[when(expr = "partner analytics are requested for {string}")]
async fn when_partner_requested(world: &mut AnalyticsWorld, partner: String) {
    let analytics = world
        .service
        .partner_analytics(&partner, None)
        .await
        .expect("Partner analytics should succeed");
    world.last_partner = Some(analytics);
}

// --- Then steps ---

#[then(expr = "the store holds {int} events")]
async fn then_store_holds(world: &mut AnalyticsWorld, expected: usize) {
    assert_eq!(world.store.len().await.unwrap(), expected);
}

#[then(expr = "the oldest stored event is number {int}")]
async fn then_oldest_event(world: &mut AnalyticsWorld, expected: i64) {
    let events = world.store.snapshot().await.unwrap();
    let seq = events[0].metadata.get("seq").and_then(|v| v.as_i64());
    assert_eq!(seq, Some(expected));
}

#[then(expr = "no stored event has metadata key {string}")]
async fn then_no_metadata_key(world: &mut AnalyticsWorld, key: String) {
    let events = world.store.snapshot().await.unwrap();
    assert!(!events.is_empty(), "Event should have been stored");
    assert!(events.iter().all(|e| !e.metadata.contains_key(&key)));
}

#[then(expr = "the time series has {int} points")]
async fn then_series_length(world: &mut AnalyticsWorld, expected: usize) {
    assert_eq!(world.dashboard().time_series.len(), expected);
}

#[then("every time series point is zero")]
async fn then_series_zero(world: &mut AnalyticsWorld) {
    assert!(world.dashboard().time_series.iter().all(|p| {
        p.users == 0 && p.searches == 0 && p.enquiries == 0 && p.revenue == 0.0
    }));
}

#[then(
    expr = "the funnel counts are {int} searches, {int} views, {int} enquiries and {int} payments"
)]
async fn then_funnel_counts(
    world: &mut AnalyticsWorld,
    searches: u64,
    views: u64,
    enquiries: u64,
    payments: u64,
) {
    let funnel = world.dashboard().conversion_funnel;
    assert_eq!(funnel.searches, searches);
    assert_eq!(funnel.profile_views, views);
    assert_eq!(funnel.enquiries, enquiries);
    assert_eq!(funnel.payments, payments);
}

#[then(expr = "the search to view rate is {float}")]
async fn then_search_to_view(world: &mut AnalyticsWorld, expected: f64) {
    assert_eq!(world.dashboard().conversion_funnel.search_to_view_rate, expected);
}

#[then(expr = "the revenue is {float}")]
async fn then_revenue(world: &mut AnalyticsWorld, expected: f64) {
    assert_eq!(world.dashboard().payments.revenue, expected);
}

#[then(expr = "the response rate is {float}")]
async fn then_response_rate(world: &mut AnalyticsWorld, expected: f64) {
    let partner = world.last_partner.as_ref().expect("No partner analytics");
    assert_eq!(partner.response_rate, expected);
}
