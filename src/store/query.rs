//! Elasticsearch-shaped query bodies and response envelopes.
//!
//! `bool.filter` queries over `term`/`range` clauses, and `terms` aggregations with
//! `top_hits`/`avg` sub-aggregations. Kept as plain `serde_json::Value` builders rather
//! than a typed DSL crate, since the query shapes are few and fixed and a builder
//! crate would add a dependency for no real flexibility gained.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use super::TimeRange;

fn range_clause(field: &str, window: TimeRange) -> Value {
    let mut range = serde_json::Map::new();
    range.insert("gte".to_string(), json!(window.gte.to_rfc3339()));
    if let Some(lte) = window.lte {
        range.insert("lte".to_string(), json!(lte.to_rfc3339()));
    }
    json!({ "range": { field: range } })
}

fn term_clause(field: &str, value: &str) -> Value {
    json!({ "term": { field: value } })
}

/// Body for the by-`cart_id` terms aggregation over `cart_events`.
pub fn cart_activity_body(window: TimeRange, group_cap: u32) -> Value {
    json!({
        "size": 0,
        "query": { "bool": { "filter": [range_clause("@timestamp", window)] } },
        "aggs": {
            "by_cart": {
                "terms": { "field": "cart_id", "size": group_cap },
                "aggs": {
                    "last_seen": { "max": { "field": "@timestamp" } },
                    "last_event": {
                        "top_hits": {
                            "size": 1,
                            "sort": [{ "@timestamp": { "order": "desc" } }]
                        }
                    }
                }
            }
        }
    })
}

/// Body for the completed-checkout existence check.
pub fn completed_checkout_body(cart_id: &str, window: TimeRange) -> Value {
    json!({
        "size": 0,
        "track_total_hits": true,
        "query": {
            "bool": {
                "filter": [
                    term_clause("cart_id", cart_id),
                    term_clause("status", "completed"),
                    range_clause("@timestamp", window),
                ]
            }
        }
    })
}

/// Body for a recent-documents-by-`field` lookup, newest first.
pub fn recent_by_field_body(field: &str, value: &str, limit: u32) -> Value {
    json!({
        "size": limit,
        "sort": [{ "@timestamp": { "order": "desc" } }],
        "query": { "bool": { "filter": [term_clause(field, value)] } }
    })
}

/// Body for the similarity/outcome-stats aggregation over `recovery_history`.
/// `low`/`high` bound `cart_value`.
pub fn recovery_outcome_body(
    root_cause: &str,
    segment: &str,
    low: f64,
    high: f64,
    window: TimeRange,
    size: u32,
) -> Value {
    json!({
        "size": size,
        "query": {
            "bool": {
                "filter": [
                    term_clause("diagnosis.root_cause", root_cause),
                    term_clause("segment", segment),
                    { "range": { "cart_value": { "gte": low, "lte": high } } },
                    range_clause("@timestamp", window),
                ]
            }
        },
        "aggs": {
            "by_action": {
                "terms": { "field": "action.type", "size": 10 },
                "aggs": {
                    "by_outcome": { "terms": { "field": "outcome.status", "size": 10 } },
                    "avg_recovered": { "avg": { "field": "outcome.revenue_recovered" } }
                }
            }
        },
        "sort": [{ "@timestamp": { "order": "desc" } }]
    })
}

/// A single `_search` hit.
#[derive(Debug, Deserialize)]
pub struct EsHit<T> {
    #[serde(rename = "_source")]
    pub source: T,
}

#[derive(Debug, Deserialize, Default)]
pub struct EsHitsTotal {
    #[serde(default)]
    pub value: u64,
}

#[derive(Debug, Deserialize)]
pub struct EsHits<T> {
    #[serde(default)]
    pub total: EsHitsTotal,
    #[serde(default = "Vec::new")]
    pub hits: Vec<EsHit<T>>,
}

impl<T> Default for EsHits<T> {
    fn default() -> Self {
        Self { total: EsHitsTotal::default(), hits: Vec::new() }
    }
}

#[derive(Debug, Deserialize)]
pub struct EsSearchResponse<T> {
    #[serde(default)]
    pub hits: EsHits<T>,
    #[serde(default)]
    pub aggregations: Option<Value>,
}

/// Parsed form of one `by_cart` bucket.
pub struct CartBucket {
    pub cart_id: String,
    pub last_seen: Option<DateTime<Utc>>,
    pub last_source: Option<Value>,
}

/// Pull the `by_cart` buckets out of a raw aggregations payload.
pub fn parse_cart_buckets(aggregations: &Value) -> Vec<CartBucket> {
    let buckets = aggregations
        .get("by_cart")
        .and_then(|a| a.get("buckets"))
        .and_then(|b| b.as_array())
        .cloned()
        .unwrap_or_default();

    buckets
        .into_iter()
        .map(|b| {
            let cart_id = b.get("key").and_then(|k| k.as_str()).unwrap_or_default().to_string();
            let last_seen = b
                .get("last_seen")
                .and_then(|v| v.get("value_as_string"))
                .and_then(|v| v.as_str())
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|dt| dt.with_timezone(&Utc));
            let last_source = b
                .get("last_event")
                .and_then(|v| v.get("hits"))
                .and_then(|v| v.get("hits"))
                .and_then(|v| v.as_array())
                .and_then(|hits| hits.first())
                .and_then(|hit| hit.get("_source"))
                .cloned();
            CartBucket { cart_id, last_seen, last_source }
        })
        .collect()
}

/// One `by_action` bucket with its nested outcome-status sub-buckets and average.
pub struct ActionBucket {
    pub action_type: String,
    pub total: u64,
    pub recovered: u64,
    pub avg_revenue_recovered: f64,
}

/// Pull the `by_action` buckets out of a raw aggregations payload.
pub fn parse_action_buckets(aggregations: &Value) -> Vec<ActionBucket> {
    let buckets = aggregations
        .get("by_action")
        .and_then(|a| a.get("buckets"))
        .and_then(|b| b.as_array())
        .cloned()
        .unwrap_or_default();

    buckets
        .into_iter()
        .map(|b| {
            let action_type =
                b.get("key").and_then(|k| k.as_str()).unwrap_or_default().to_string();
            let total = b.get("doc_count").and_then(|v| v.as_u64()).unwrap_or(0);
            let recovered = b
                .get("by_outcome")
                .and_then(|v| v.get("buckets"))
                .and_then(|v| v.as_array())
                .map(|outcomes| {
                    outcomes
                        .iter()
                        .find(|o| o.get("key").and_then(|k| k.as_str()) == Some("recovered"))
                        .and_then(|o| o.get("doc_count"))
                        .and_then(|v| v.as_u64())
                        .unwrap_or(0)
                })
                .unwrap_or(0);
            let avg_revenue_recovered = b
                .get("avg_recovered")
                .and_then(|v| v.get("value"))
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0);
            ActionBucket { action_type, total, recovered, avg_revenue_recovered }
        })
        .collect()
}
