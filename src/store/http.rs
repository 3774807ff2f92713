//! `reqwest`-backed `DocumentStoreGateway` over an Elasticsearch/OpenSearch-style
//! HTTP API: API-key-over-basic-auth precedence, and request/response shapes matching
//! a standard `_search`/`_doc` REST surface.

use std::str::FromStr;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::prelude::ToPrimitive;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::GatewayConfig;
use crate::error::{CoreError, CoreResult};
use crate::models::{
    ActionType, CartEvent, CheckoutEvent, CustomerProfile, PaymentLog, RecoveryRecord,
    SessionMetrics, SimilarityQuery,
};
use crate::models::similarity::ActionOutcomeStats;

use super::query::{
    cart_activity_body, completed_checkout_body, parse_action_buckets, parse_cart_buckets,
    recent_by_field_body, recovery_outcome_body, EsHit, EsSearchResponse,
};
use super::{CartActivityBucket, DocumentStoreGateway, TimeRange};

const CART_EVENTS: &str = "cart_events";
const CHECKOUT_EVENTS: &str = "checkout_events";
const PAYMENT_LOGS: &str = "payment_logs";
const SESSION_METRICS: &str = "session_metrics";
const CUSTOMER_PROFILES: &str = "customer_profiles";
const RECOVERY_HISTORY: &str = "recovery_history";

/// Concrete gateway talking to a real document store over HTTP.
pub struct HttpDocumentStore {
    client: Client,
    config: GatewayConfig,
}

impl HttpDocumentStore {
    pub fn new(config: GatewayConfig) -> CoreResult<Self> {
        let client = Client::builder().timeout(config.request_timeout()).build()?;
        Ok(Self { client, config })
    }

    fn index_url(&self, index: &str, path: &str) -> String {
        format!("{}/{}/{}", self.config.doc_store_url.trim_end_matches('/'), index, path)
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        let mut req = self.client.request(method, url);
        if let Some(key) = &self.config.auth.api_key {
            req = req.header("Authorization", format!("ApiKey {key}"));
        } else if let Some(user) = &self.config.auth.username {
            req = req.basic_auth(user, self.config.auth.password.as_ref());
        }
        req
    }

    async fn search<T: serde::de::DeserializeOwned>(
        &self,
        index: &str,
        body: &Value,
    ) -> CoreResult<EsSearchResponse<T>> {
        let url = self.index_url(index, "_search");
        debug!(index, %url, "document store search");
        let resp = self.request(reqwest::Method::POST, &url).json(body).send().await?;
        let resp = resp.error_for_status().map_err(CoreError::from)?;
        resp.json().await.map_err(CoreError::from)
    }
}

#[async_trait]
impl DocumentStoreGateway for HttpDocumentStore {
    async fn cart_activity(
        &self,
        window: TimeRange,
        group_cap: u32,
    ) -> CoreResult<Vec<CartActivityBucket>> {
        let body = cart_activity_body(window, group_cap);
        let resp: EsSearchResponse<Value> = self.search(CART_EVENTS, &body).await?;
        let aggs = resp.aggregations.unwrap_or(Value::Null);
        let buckets = parse_cart_buckets(&aggs);

        let mut out = Vec::with_capacity(buckets.len());
        for b in buckets {
            let (Some(last_seen), Some(source)) = (b.last_seen, b.last_source) else {
                continue;
            };
            match serde_json::from_value::<CartEvent>(source) {
                Ok(representative) => out.push(CartActivityBucket {
                    cart_id: b.cart_id,
                    last_seen,
                    representative,
                }),
                Err(err) => warn!(cart_id = %b.cart_id, %err, "skipping malformed cart event"),
            }
        }
        Ok(out)
    }

    async fn has_completed_checkout(&self, cart_id: &str, window: TimeRange) -> CoreResult<bool> {
        let body = completed_checkout_body(cart_id, window);
        let resp: EsSearchResponse<Value> = self.search(CHECKOUT_EVENTS, &body).await?;
        Ok(resp.hits.total.value > 0)
    }

    async fn recent_cart_events(&self, cart_id: &str, limit: u32) -> CoreResult<Vec<CartEvent>> {
        let body = recent_by_field_body("cart_id", cart_id, limit);
        let resp: EsSearchResponse<CartEvent> = self.search(CART_EVENTS, &body).await?;
        Ok(resp.hits.hits.into_iter().map(|h: EsHit<CartEvent>| h.source).collect())
    }

    async fn recent_checkout_events(
        &self,
        cart_id: &str,
        limit: u32,
    ) -> CoreResult<Vec<CheckoutEvent>> {
        let body = recent_by_field_body("cart_id", cart_id, limit);
        let resp: EsSearchResponse<CheckoutEvent> = self.search(CHECKOUT_EVENTS, &body).await?;
        Ok(resp.hits.hits.into_iter().map(|h| h.source).collect())
    }

    async fn recent_payment_logs(&self, cart_id: &str, limit: u32) -> CoreResult<Vec<PaymentLog>> {
        let body = recent_by_field_body("cart_id", cart_id, limit);
        let resp: EsSearchResponse<PaymentLog> = self.search(PAYMENT_LOGS, &body).await?;
        Ok(resp.hits.hits.into_iter().map(|h| h.source).collect())
    }

    async fn recent_session_metrics(
        &self,
        session_id: &str,
        limit: u32,
    ) -> CoreResult<Vec<SessionMetrics>> {
        let body = recent_by_field_body("session_id", session_id, limit);
        let resp: EsSearchResponse<SessionMetrics> = self.search(SESSION_METRICS, &body).await?;
        Ok(resp.hits.hits.into_iter().map(|h| h.source).collect())
    }

    async fn get_customer_profile(
        &self,
        customer_id: &str,
    ) -> CoreResult<Option<CustomerProfile>> {
        let url = self.index_url(CUSTOMER_PROFILES, &format!("_doc/{customer_id}"));
        let resp = self.request(reqwest::Method::GET, &url).send().await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = resp.error_for_status().map_err(CoreError::from)?;
        let envelope: Value = resp.json().await?;
        match envelope.get("_source").cloned() {
            Some(source) => {
                let profile: CustomerProfile = serde_json::from_value(source)
                    .map_err(|e| CoreError::store_unavailable(e.to_string()))?;
                Ok(Some(profile))
            }
            None => Ok(None),
        }
    }

    async fn recovery_outcome_stats(
        &self,
        query: &SimilarityQuery,
        window: TimeRange,
        size: u32,
    ) -> CoreResult<(Vec<ActionOutcomeStats>, Vec<RecoveryRecord>)> {
        let cart_value: f64 = query.cart_value.to_f64().unwrap_or(0.0);
        let low = (cart_value * 0.8).max(0.0);
        let high = if cart_value > 0.0 { cart_value * 1.2 } else { 999_999.0 };

        let body = recovery_outcome_body(
            query.root_cause.as_str(),
            &query.segment,
            low,
            high,
            window,
            size,
        );
        let resp: EsSearchResponse<RecoveryRecord> = self.search(RECOVERY_HISTORY, &body).await?;

        let aggs = resp.aggregations.clone().unwrap_or(Value::Null);
        let buckets = parse_action_buckets(&aggs);
        let mut stats = Vec::with_capacity(buckets.len());
        for b in buckets {
            let Ok(action_type) = ActionType::from_str(&b.action_type) else {
                warn!(action_type = %b.action_type, "skipping unknown action_type bucket");
                continue;
            };
            stats.push(ActionOutcomeStats::new(
                action_type,
                b.total,
                b.recovered,
                b.avg_revenue_recovered,
            ));
        }

        let examples = resp.hits.hits.into_iter().map(|h| h.source).collect();
        Ok((stats, examples))
    }

    async fn put_recovery_record(&self, record: &RecoveryRecord) -> CoreResult<()> {
        let url = self.index_url(RECOVERY_HISTORY, &format!("_doc/{}", record.recovery_id));
        debug!(recovery_id = %record.recovery_id, "indexing recovery record");
        self.request(reqwest::Method::PUT, &url)
            .json(record)
            .send()
            .await?
            .error_for_status()
            .map_err(CoreError::from)?;
        Ok(())
    }
}
