//! Diagnosis model
//!
//! A free-form `evidence` map is tempting but loses type safety across root causes.
//! `Evidence` is instead a closed tagged variant per `RootCause`, carrying exactly the
//! fields each diagnosis branch produces, plus `extra` (a small open-ended attribute
//! bag so a future branch can attach ad-hoc evidence without widening this enum).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootCause {
    PaymentFailure,
    PerformanceLatency,
    PricingShipping,
    CheckoutFriction,
    Unknown,
}

impl RootCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PaymentFailure => "payment_failure",
            Self::PerformanceLatency => "performance_latency",
            Self::PricingShipping => "pricing_shipping",
            Self::CheckoutFriction => "checkout_friction",
            Self::Unknown => "unknown",
        }
    }
}

/// Evidence supporting a diagnosis, one shape per root cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Evidence {
    PaymentFailure {
        failure_code: Option<String>,
        failure_message: Option<String>,
        retryable: Option<bool>,
    },
    PerformanceLatency {
        p95_latency_ms: i64,
        apdex: f64,
        error_rate: f64,
    },
    PricingShipping {
        shipping_cost: f64,
        total: f64,
    },
    CheckoutFriction {
        steps: Vec<String>,
    },
    Unknown,
}

/// The Abandonment Diagnoser's output.
///
/// `checkout_events_count`, `payment_logs_count`, and `session_id` are populated
/// regardless of which rule in the cascade fired.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnosis {
    pub root_cause: RootCause,
    pub signals: Vec<String>,
    pub evidence: Evidence,
    pub checkout_events_count: usize,
    pub payment_logs_count: usize,
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub extra: HashMap<String, serde_json::Value>,
}
