//! Document Store Gateway.
//!
//! `DocumentStoreGateway` is the one seam every other component in this crate talks
//! through. It is deliberately not a generic key-value or ORM-style trait: each method
//! is shaped exactly like the query a component needs, so the
//! trait stays object-safe and mockable with `mockall::automock` the way
//! `PaymentGateway` is mocked in the reference implementation's test suite. A concrete
//! implementation lives in `http` and talks to a real search/aggregation engine
//! (e.g. Elasticsearch/OpenSearch) over HTTP; tests use a hand-written in-memory fake.

pub mod http;
pub mod query;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;

use crate::error::CoreResult;
use crate::models::{
    CartEvent, CheckoutEvent, CustomerProfile, PaymentLog, RecoveryRecord, SessionMetrics,
    SimilarityQuery,
};
use crate::models::similarity::ActionOutcomeStats;

/// An inclusive-start, optionally-bounded time window, `[gte, lte]`.
#[derive(Debug, Clone, Copy)]
pub struct TimeRange {
    pub gte: DateTime<Utc>,
    pub lte: Option<DateTime<Utc>>,
}

impl TimeRange {
    pub fn since(gte: DateTime<Utc>) -> Self {
        Self { gte, lte: None }
    }

    pub fn bounded(gte: DateTime<Utc>, lte: DateTime<Utc>) -> Self {
        Self { gte, lte: Some(lte) }
    }
}

/// One bucket of the by-`cart_id` terms aggregation over `cart_events`: its most
/// recent timestamp and the single most-recent event representing it.
#[derive(Debug, Clone)]
pub struct CartActivityBucket {
    pub cart_id: String,
    pub last_seen: DateTime<Utc>,
    pub representative: CartEvent,
}

/// Document Store Gateway capability surface.
///
/// All methods are blocking round-trips: each call
/// suspends the caller and completes (success or `CoreError::StoreUnavailable`)
/// before the next pipeline stage begins. Implementations should apply the
/// recommended 30s timeout internally (see `GatewayConfig::request_timeout`).
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DocumentStoreGateway: Send + Sync {
    /// Cart activity in `window`, grouped by `cart_id`, capped at `group_cap` groups.
    async fn cart_activity(
        &self,
        window: TimeRange,
        group_cap: u32,
    ) -> CoreResult<Vec<CartActivityBucket>>;

    /// Whether a `CheckoutEvent` with `status = "completed"` exists for `cart_id`
    /// within `window`.
    async fn has_completed_checkout(&self, cart_id: &str, window: TimeRange) -> CoreResult<bool>;

    /// The `limit` most recent `CartEvent`s for `cart_id`, newest first.
    async fn recent_cart_events(&self, cart_id: &str, limit: u32) -> CoreResult<Vec<CartEvent>>;

    /// The `limit` most recent `CheckoutEvent`s for `cart_id`, newest first.
    async fn recent_checkout_events(
        &self,
        cart_id: &str,
        limit: u32,
    ) -> CoreResult<Vec<CheckoutEvent>>;

    /// The `limit` most recent `PaymentLog`s for `cart_id`, newest first.
    async fn recent_payment_logs(&self, cart_id: &str, limit: u32) -> CoreResult<Vec<PaymentLog>>;

    /// The `limit` most recent `SessionMetrics` for `session_id`, newest first.
    async fn recent_session_metrics(
        &self,
        session_id: &str,
        limit: u32,
    ) -> CoreResult<Vec<SessionMetrics>>;

    /// Keyed lookup of a customer record. `Ok(None)` means the document does not
    /// exist; callers turn that into `CoreError::NotFound`.
    async fn get_customer_profile(&self, customer_id: &str) -> CoreResult<Option<CustomerProfile>>;

    /// Aggregated per-`action_type` outcome stats plus up to `size` raw matching
    /// records, for the similarity band described by `query` over `window`.
    async fn recovery_outcome_stats(
        &self,
        query: &SimilarityQuery,
        window: TimeRange,
        size: u32,
    ) -> CoreResult<(Vec<ActionOutcomeStats>, Vec<RecoveryRecord>)>;

    /// Index a `RecoveryRecord`, keyed by its own `recovery_id`. A
    /// retried write with the same id is idempotent at the store.
    async fn put_recovery_record(&self, record: &RecoveryRecord) -> CoreResult<()>;
}
