//! In-memory `DocumentStoreGateway` fake shared by the integration tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use cart_recovery_core::error::{CoreError, CoreResult};
use cart_recovery_core::models::similarity::ActionOutcomeStats;
use cart_recovery_core::{
    CartEvent, CheckoutEvent, CustomerProfile, DocumentStoreGateway, PaymentLog, RecoveryRecord,
    SessionMetrics, SimilarityQuery, TimeRange,
};
use cart_recovery_core::store::CartActivityBucket;

#[derive(Default)]
pub struct FakeStore {
    pub cart_activity: Vec<CartActivityBucket>,
    pub completed_checkouts: Vec<String>,
    pub cart_events: HashMap<String, Vec<CartEvent>>,
    pub checkout_events: HashMap<String, Vec<CheckoutEvent>>,
    pub payment_logs: HashMap<String, Vec<PaymentLog>>,
    pub session_metrics: HashMap<String, Vec<SessionMetrics>>,
    pub customer_profiles: HashMap<String, CustomerProfile>,
    pub outcome_stats: Vec<ActionOutcomeStats>,
    pub outcome_examples: Vec<RecoveryRecord>,
    pub recorded: Mutex<Vec<RecoveryRecord>>,
}

#[async_trait]
impl DocumentStoreGateway for FakeStore {
    async fn cart_activity(
        &self,
        _window: TimeRange,
        _group_cap: u32,
    ) -> CoreResult<Vec<CartActivityBucket>> {
        Ok(self.cart_activity.clone())
    }

    async fn has_completed_checkout(&self, cart_id: &str, _window: TimeRange) -> CoreResult<bool> {
        Ok(self.completed_checkouts.iter().any(|c| c == cart_id))
    }

    async fn recent_cart_events(&self, cart_id: &str, limit: u32) -> CoreResult<Vec<CartEvent>> {
        Ok(self
            .cart_events
            .get(cart_id)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .take(limit as usize)
            .collect())
    }

    async fn recent_checkout_events(
        &self,
        cart_id: &str,
        limit: u32,
    ) -> CoreResult<Vec<CheckoutEvent>> {
        Ok(self
            .checkout_events
            .get(cart_id)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .take(limit as usize)
            .collect())
    }

    async fn recent_payment_logs(&self, cart_id: &str, limit: u32) -> CoreResult<Vec<PaymentLog>> {
        Ok(self
            .payment_logs
            .get(cart_id)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .take(limit as usize)
            .collect())
    }

    async fn recent_session_metrics(
        &self,
        session_id: &str,
        limit: u32,
    ) -> CoreResult<Vec<SessionMetrics>> {
        Ok(self
            .session_metrics
            .get(session_id)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .take(limit as usize)
            .collect())
    }

    async fn get_customer_profile(
        &self,
        customer_id: &str,
    ) -> CoreResult<Option<CustomerProfile>> {
        Ok(self.customer_profiles.get(customer_id).cloned())
    }

    async fn recovery_outcome_stats(
        &self,
        _query: &SimilarityQuery,
        _window: TimeRange,
        size: u32,
    ) -> CoreResult<(Vec<ActionOutcomeStats>, Vec<RecoveryRecord>)> {
        Ok((
            self.outcome_stats.clone(),
            self.outcome_examples.iter().take(size as usize).cloned().collect(),
        ))
    }

    async fn put_recovery_record(&self, record: &RecoveryRecord) -> CoreResult<()> {
        self.recorded
            .lock()
            .map_err(|_| CoreError::store_unavailable("poisoned lock"))?
            .push(record.clone());
        Ok(())
    }
}
