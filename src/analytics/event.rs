//! Analytics event payloads and query filters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Event taxonomy. Emitters must use these names verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    UserSignup,
    UserLogin,
    PartnerSearch,
    DealerSearch,
    ProfileViewed,
    EnquirySubmitted,
    EnquiryResponded,
    PaymentInitiated,
    PaymentSuccess,
    PaymentFailed,
    CalculatorUsed,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::UserSignup => "USER_SIGNUP",
            EventKind::UserLogin => "USER_LOGIN",
            EventKind::PartnerSearch => "PARTNER_SEARCH",
            EventKind::DealerSearch => "DEALER_SEARCH",
            EventKind::ProfileViewed => "PROFILE_VIEWED",
            EventKind::EnquirySubmitted => "ENQUIRY_SUBMITTED",
            EventKind::EnquiryResponded => "ENQUIRY_RESPONDED",
            EventKind::PaymentInitiated => "PAYMENT_INITIATED",
            EventKind::PaymentSuccess => "PAYMENT_SUCCESS",
            EventKind::PaymentFailed => "PAYMENT_FAILED",
            EventKind::CalculatorUsed => "CALCULATOR_USED",
        }
    }

    pub fn is_search(&self) -> bool {
        matches!(self, EventKind::PartnerSearch | EventKind::DealerSearch)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Customer,
    Partner,
    Dealer,
    Admin,
}

/// One tracked event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEventPayload {
    pub event: EventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_role: Option<UserRole>,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl AnalyticsEventPayload {
    /// Anonymous event stamped with the current time.
    pub fn new(event: EventKind) -> Self {
        Self {
            event,
            user_id: None,
            user_role: None,
            timestamp: Utc::now(),
            metadata: Map::new(),
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>, role: UserRole) -> Self {
        self.user_id = Some(user_id.into());
        self.user_role = Some(role);
        self
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Numeric metadata value, if present.
    pub fn metadata_f64(&self, key: &str) -> Option<f64> {
        self.metadata.get(key).and_then(Value::as_f64)
    }

    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(Value::as_str)
    }
}

/// Remove top-level metadata keys that name personal data.
///
/// Matching is case-insensitive against `pii_keys`. Returns the number of
/// keys removed.
pub fn strip_pii(metadata: &mut Map<String, Value>, pii_keys: &[String]) -> usize {
    let before = metadata.len();
    metadata.retain(|key, _| {
        !pii_keys
            .iter()
            .any(|pii| pii.eq_ignore_ascii_case(key))
    });
    before - metadata.len()
}

/// Event query. Every set field must match; bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventFilter {
    pub event: Option<EventKind>,
    pub user_id: Option<String>,
    pub user_role: Option<UserRole>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    /// Applied after sorting newest first.
    pub limit: Option<usize>,
}

impl EventFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn event(mut self, event: EventKind) -> Self {
        self.event = Some(event);
        self
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn user_role(mut self, role: UserRole) -> Self {
        self.user_role = Some(role);
        self
    }

    pub fn between(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, payload: &AnalyticsEventPayload) -> bool {
        if self.event.is_some_and(|e| e != payload.event) {
            return false;
        }
        if let Some(ref user_id) = self.user_id {
            if payload.user_id.as_deref() != Some(user_id.as_str()) {
                return false;
            }
        }
        if self.user_role.is_some() && self.user_role != payload.user_role {
            return false;
        }
        if self.start.is_some_and(|start| payload.timestamp < start) {
            return false;
        }
        if self.end.is_some_and(|end| payload.timestamp > end) {
            return false;
        }
        true
    }

    /// Filter `events`, sort newest first and truncate to `limit`.
    pub fn apply<'a, I>(&self, events: I) -> Vec<AnalyticsEventPayload>
    where
        I: IntoIterator<Item = &'a AnalyticsEventPayload>,
    {
        let mut matched: Vec<AnalyticsEventPayload> = events
            .into_iter()
            .filter(|e| self.matches(e))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        if let Some(limit) = self.limit {
            matched.truncate(limit);
        }
        matched
    }
}
