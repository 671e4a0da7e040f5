//! Dashboard aggregation over a window of events.
//!
//! Everything here is a pure function of the events handed in and the
//! reference time `now`; the service layer supplies both.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::event::{AnalyticsEventPayload, EventKind, UserRole};
use super::{AnalyticsError, Result, MAX_RANGE_DAYS};
use crate::units::round2;

/// Inclusive timestamp range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start > end {
            return Err(AnalyticsError::InvalidRange { start, end });
        }
        let days = (end.date_naive() - start.date_naive()).num_days() + 1;
        if days > MAX_RANGE_DAYS {
            return Err(AnalyticsError::RangeTooLarge {
                days,
                max: MAX_RANGE_DAYS,
            });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        timestamp >= self.start && timestamp <= self.end
    }

    /// Every UTC calendar day touched by the range, in order.
    pub fn days(&self) -> Vec<NaiveDate> {
        let last = self.end.date_naive();
        let mut day = self.start.date_naive();
        let mut days = Vec::new();
        while day <= last {
            days.push(day);
            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }
        days
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCounts {
    pub customer: u64,
    pub partner: u64,
    pub dealer: u64,
    pub admin: u64,
}

impl RoleCounts {
    fn increment(&mut self, role: UserRole) {
        match role {
            UserRole::Customer => self.customer += 1,
            UserRole::Partner => self.partner += 1,
            UserRole::Dealer => self.dealer += 1,
            UserRole::Admin => self.admin += 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserMetrics {
    pub total_users: u64,
    pub by_role: RoleCounts,
    pub daily_active_users: u64,
    pub monthly_active_users: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMetrics {
    pub successful: u64,
    pub failed: u64,
    /// Settled payments only: `successful + failed`.
    pub total: u64,
    pub revenue: f64,
}

/// Search → profile view → enquiry → payment.
///
/// Rates are percentages rounded to two decimals, 0 when the earlier stage
/// is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionFunnel {
    pub searches: u64,
    pub profile_views: u64,
    pub enquiries: u64,
    pub payments: u64,
    pub search_to_view_rate: f64,
    pub view_to_enquiry_rate: f64,
    pub enquiry_to_payment_rate: f64,
    pub overall_conversion_rate: f64,
}

impl ConversionFunnel {
    pub fn from_counts(searches: u64, profile_views: u64, enquiries: u64, payments: u64) -> Self {
        Self {
            searches,
            profile_views,
            enquiries,
            payments,
            search_to_view_rate: percentage(profile_views, searches),
            view_to_enquiry_rate: percentage(enquiries, profile_views),
            enquiry_to_payment_rate: percentage(payments, enquiries),
            overall_conversion_rate: percentage(payments, searches),
        }
    }
}

/// `part / whole × 100` rounded to two decimals, 0 when `whole` is 0.
pub(crate) fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round2(part as f64 / whole as f64 * 100.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    /// Distinct users seen that day.
    pub users: u64,
    pub searches: u64,
    pub enquiries: u64,
    pub revenue: f64,
}

impl TimeSeriesPoint {
    fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            users: 0,
            searches: 0,
            enquiries: 0,
            revenue: 0.0,
        }
    }
}

/// Admin dashboard report for one range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsAggregation {
    pub range: DateRange,
    pub users: UserMetrics,
    pub total_searches: u64,
    pub total_enquiries: u64,
    pub payments: PaymentMetrics,
    pub conversion_funnel: ConversionFunnel,
    pub time_series: Vec<TimeSeriesPoint>,
}

#[derive(Default)]
struct DayBucket {
    users: HashSet<String>,
    searches: u64,
    enquiries: u64,
    revenue: f64,
}

/// Aggregate the events falling inside `range`.
///
/// Events outside the range are ignored. Active-user windows are measured
/// back from `now`, independent of the range.
pub fn aggregate<'a, I>(
    events: I,
    range: DateRange,
    now: DateTime<Utc>,
    daily_window: Duration,
    monthly_window: Duration,
) -> AnalyticsAggregation
where
    I: IntoIterator<Item = &'a AnalyticsEventPayload>,
{
    let daily_cutoff = now - daily_window;
    let monthly_cutoff = now - monthly_window;

    let mut roles: HashMap<&str, Option<UserRole>> = HashMap::new();
    let mut daily_active: HashSet<&str> = HashSet::new();
    let mut monthly_active: HashSet<&str> = HashSet::new();
    let mut buckets: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();

    let mut searches = 0;
    let mut profile_views = 0;
    let mut enquiries = 0;
    let mut payments = PaymentMetrics::default();

    for event in events.into_iter().filter(|e| range.contains(e.timestamp)) {
        let bucket = buckets.entry(event.timestamp.date_naive()).or_default();

        if let Some(user_id) = event.user_id.as_deref() {
            roles.entry(user_id).or_insert(event.user_role);
            bucket.users.insert(user_id.to_string());
            if event.timestamp > daily_cutoff && event.timestamp <= now {
                daily_active.insert(user_id);
            }
            if event.timestamp > monthly_cutoff && event.timestamp <= now {
                monthly_active.insert(user_id);
            }
        }

        match event.event {
            EventKind::PartnerSearch | EventKind::DealerSearch => {
                searches += 1;
                bucket.searches += 1;
            }
            EventKind::ProfileViewed => profile_views += 1,
            EventKind::EnquirySubmitted => {
                enquiries += 1;
                bucket.enquiries += 1;
            }
            EventKind::PaymentSuccess => {
                let amount = event.metadata_f64("amount").unwrap_or(0.0);
                payments.successful += 1;
                payments.revenue += amount;
                bucket.revenue += amount;
            }
            EventKind::PaymentFailed => payments.failed += 1,
            _ => {}
        }
    }
    payments.total = payments.successful + payments.failed;

    let mut by_role = RoleCounts::default();
    for role in roles.values().flatten() {
        by_role.increment(*role);
    }

    let time_series = range
        .days()
        .into_iter()
        .map(|date| match buckets.remove(&date) {
            Some(bucket) => TimeSeriesPoint {
                date,
                users: bucket.users.len() as u64,
                searches: bucket.searches,
                enquiries: bucket.enquiries,
                revenue: bucket.revenue,
            },
            None => TimeSeriesPoint::empty(date),
        })
        .collect();

    AnalyticsAggregation {
        range,
        users: UserMetrics {
            total_users: roles.len() as u64,
            by_role,
            daily_active_users: daily_active.len() as u64,
            monthly_active_users: monthly_active.len() as u64,
        },
        total_searches: searches,
        total_enquiries: enquiries,
        payments,
        conversion_funnel: ConversionFunnel::from_counts(
            searches,
            profile_views,
            enquiries,
            payments.successful,
        ),
        time_series,
    }
}
