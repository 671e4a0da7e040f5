//! AnalyticsStore interface tests.
//!
//! These tests verify the contract of the AnalyticsStore trait.
//! Each store implementation should run these tests against an empty store.

use chrono::{DateTime, Duration, TimeZone, Utc};

use buildmart::analytics::{
    AnalyticsEventPayload, AnalyticsStore, EventFilter, EventKind, UserRole,
};

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 1, 8, 0, 0).unwrap()
}

/// Create a test event `seq` minutes after the base time.
pub fn make_event(seq: i64, kind: EventKind) -> AnalyticsEventPayload {
    AnalyticsEventPayload::new(kind)
        .at(base_time() + Duration::minutes(seq))
        .with_metadata("seq", seq)
}

fn seq_of(event: &AnalyticsEventPayload) -> i64 {
    event
        .metadata
        .get("seq")
        .and_then(|v| v.as_i64())
        .expect("event should carry seq")
}

// =============================================================================
// AnalyticsStore::append tests
// =============================================================================

pub async fn test_append_single_event<S: AnalyticsStore>(store: &S) {
    store.clear().await.expect("clear should succeed");

    store
        .append(make_event(0, EventKind::UserSignup))
        .await
        .expect("append should succeed");

    assert_eq!(store.len().await.unwrap(), 1, "should have 1 event");
}

pub async fn test_snapshot_preserves_insertion_order<S: AnalyticsStore>(store: &S) {
    store.clear().await.expect("clear should succeed");

    // Out of timestamp order on purpose.
    for seq in [3, 1, 2] {
        store
            .append(make_event(seq, EventKind::PartnerSearch))
            .await
            .unwrap();
    }

    let events = store.snapshot().await.expect("snapshot should succeed");
    let seqs: Vec<i64> = events.iter().map(seq_of).collect();
    assert_eq!(seqs, vec![3, 1, 2], "snapshot keeps insertion order");
}

// =============================================================================
// AnalyticsStore::query tests
// =============================================================================

pub async fn test_query_sorted_newest_first<S: AnalyticsStore>(store: &S) {
    store.clear().await.unwrap();

    for seq in [3, 1, 2] {
        store
            .append(make_event(seq, EventKind::DealerSearch))
            .await
            .unwrap();
    }

    let events = store.query(&EventFilter::new()).await.unwrap();
    let seqs: Vec<i64> = events.iter().map(seq_of).collect();
    assert_eq!(seqs, vec![3, 2, 1], "query sorts newest first");
}

pub async fn test_query_by_kind_and_role<S: AnalyticsStore>(store: &S) {
    store.clear().await.unwrap();

    store
        .append(make_event(0, EventKind::ProfileViewed).with_user("c1", UserRole::Customer))
        .await
        .unwrap();
    store
        .append(make_event(1, EventKind::ProfileViewed).with_user("p1", UserRole::Partner))
        .await
        .unwrap();
    store
        .append(make_event(2, EventKind::EnquirySubmitted).with_user("c1", UserRole::Customer))
        .await
        .unwrap();

    let views = store
        .query(&EventFilter::new().event(EventKind::ProfileViewed))
        .await
        .unwrap();
    assert_eq!(views.len(), 2);

    let customer_views = store
        .query(
            &EventFilter::new()
                .event(EventKind::ProfileViewed)
                .user_role(UserRole::Customer),
        )
        .await
        .unwrap();
    assert_eq!(customer_views.len(), 1);
    assert_eq!(customer_views[0].user_id.as_deref(), Some("c1"));
}

pub async fn test_query_inclusive_range_with_limit<S: AnalyticsStore>(store: &S) {
    store.clear().await.unwrap();

    for seq in 0..10 {
        store
            .append(make_event(seq, EventKind::UserLogin))
            .await
            .unwrap();
    }

    let filter = EventFilter::new().between(
        base_time() + Duration::minutes(2),
        base_time() + Duration::minutes(6),
    );
    let in_range = store.query(&filter).await.unwrap();
    assert_eq!(in_range.len(), 5, "both bounds are inclusive");

    let limited = store.query(&filter.limit(2)).await.unwrap();
    let seqs: Vec<i64> = limited.iter().map(seq_of).collect();
    assert_eq!(seqs, vec![6, 5], "limit applies after sorting");
}

// =============================================================================
// AnalyticsStore::clear tests
// =============================================================================

pub async fn test_clear_empties_store<S: AnalyticsStore>(store: &S) {
    store
        .append(make_event(0, EventKind::UserLogin))
        .await
        .unwrap();
    store.clear().await.expect("clear should succeed");

    assert_eq!(store.len().await.unwrap(), 0);
    assert!(store.snapshot().await.unwrap().is_empty());
}

// =============================================================================
// Capacity tests (bounded stores)
// =============================================================================

/// `store` must have been built with `capacity`.
pub async fn test_evicts_oldest_beyond_capacity<S: AnalyticsStore>(store: &S, capacity: usize) {
    store.clear().await.unwrap();

    let total = capacity as i64 + 1;
    for seq in 0..total {
        store
            .append(make_event(seq, EventKind::CalculatorUsed))
            .await
            .unwrap();
    }

    assert_eq!(store.len().await.unwrap(), capacity);
    let events = store.snapshot().await.unwrap();
    assert_eq!(seq_of(&events[0]), 1, "oldest event evicted first");
    assert_eq!(seq_of(&events[capacity - 1]), total - 1);
}

/// Run every AnalyticsStore contract test against an empty store.
#[macro_export]
macro_rules! run_analytics_store_tests {
    ($store:expr) => {
        use $crate::storage::analytics_store_tests::*;

        test_append_single_event($store).await;
        println!("  test_append_single_event: PASSED");

        test_snapshot_preserves_insertion_order($store).await;
        println!("  test_snapshot_preserves_insertion_order: PASSED");

        test_query_sorted_newest_first($store).await;
        println!("  test_query_sorted_newest_first: PASSED");

        test_query_by_kind_and_role($store).await;
        println!("  test_query_by_kind_and_role: PASSED");

        test_query_inclusive_range_with_limit($store).await;
        println!("  test_query_inclusive_range_with_limit: PASSED");

        test_clear_empties_store($store).await;
        println!("  test_clear_empties_store: PASSED");
    };
}
