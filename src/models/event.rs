//! Event stream models
//!
//! `CartEvent`, `CheckoutEvent`, `PaymentLog`, and `SessionMetrics` are append-only
//! documents written by front-end collectors and telemetry. The core
//! never mutates them; it only reads them back out of the document store.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single cart action (add, remove, view, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartEvent {
    #[serde(rename = "@timestamp")]
    pub timestamp: DateTime<Utc>,
    pub cart_id: String,
    pub customer_id: Option<String>,
    pub session_id: Option<String>,
    pub event_type: CartEventType,
    pub product_id: Option<Uuid>,
    pub quantity: Option<i32>,
    pub unit_price: Option<Decimal>,
    pub cart_value: Option<Decimal>,
    pub currency: Option<String>,
    pub device_type: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartEventType {
    AddToCart,
    ViewCart,
    Remove,
    UpdateQuantity,
    ApplyCoupon,
    ViewProduct,
    /// Any collector-emitted action this crate doesn't special-case.
    #[serde(other)]
    Other,
}

/// A checkout funnel step (shipping, payment, ...) or its failure variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutEvent {
    #[serde(rename = "@timestamp")]
    pub timestamp: DateTime<Utc>,
    pub checkout_id: String,
    pub cart_id: String,
    pub customer_id: Option<String>,
    pub session_id: Option<String>,
    pub step: Option<CheckoutStep>,
    pub status: CheckoutStatus,
    pub shipping_cost: Option<Decimal>,
    pub tax: Option<Decimal>,
    pub total: Option<Decimal>,
    pub payment_method: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    Shipping,
    Payment,
    Review,
    Confirmation,
    ShippingFailed,
    PaymentFailed,
    /// Any funnel step this crate doesn't special-case.
    #[serde(other)]
    Other,
}

impl CheckoutStep {
    /// Textual form used when collecting evidence for a diagnosis.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shipping => "shipping",
            Self::Payment => "payment",
            Self::Review => "review",
            Self::Confirmation => "confirmation",
            Self::ShippingFailed => "shipping_failed",
            Self::PaymentFailed => "payment_failed",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStatus {
    Started,
    StepFailed,
    Completed,
    Abandoned,
    /// Any status this crate doesn't special-case.
    #[serde(other)]
    Other,
}

/// A single payment gateway attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentLog {
    #[serde(rename = "@timestamp")]
    pub timestamp: DateTime<Utc>,
    pub payment_id: String,
    pub checkout_id: Option<String>,
    pub cart_id: String,
    pub customer_id: Option<String>,
    pub provider: Option<String>,
    pub status: PaymentStatus,
    pub failure_code: Option<String>,
    pub failure_message: Option<String>,
    pub retryable: Option<bool>,
    pub gateway_latency_ms: Option<i64>,
    pub attempt: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Failed,
    Authorized,
    Captured,
}

/// Client/server telemetry sampled for a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMetrics {
    #[serde(rename = "@timestamp")]
    pub timestamp: DateTime<Utc>,
    pub session_id: String,
    pub route: Option<String>,
    pub device_type: Option<String>,
    pub p95_latency_ms: Option<i64>,
    pub error_rate: Option<f64>,
    pub apdex: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn checkout_event_with(step: &str, status: &str) -> serde_json::Value {
        json!({
            "@timestamp": "2026-01-01T00:00:00Z",
            "checkout_id": "co_1",
            "cart_id": "cart_1",
            "customer_id": null,
            "session_id": null,
            "step": step,
            "status": status,
            "shipping_cost": null,
            "tax": null,
            "total": null,
            "payment_method": null,
        })
    }

    #[test]
    fn known_step_failure_strings_deserialize_to_named_variants() {
        let ev: CheckoutEvent =
            serde_json::from_value(checkout_event_with("payment_failed", "step_failed")).unwrap();
        assert_eq!(ev.step, Some(CheckoutStep::PaymentFailed));
        assert_eq!(ev.status, CheckoutStatus::StepFailed);

        let ev: CheckoutEvent =
            serde_json::from_value(checkout_event_with("shipping_failed", "abandoned")).unwrap();
        assert_eq!(ev.step, Some(CheckoutStep::ShippingFailed));
    }

    #[test]
    fn unrecognized_step_and_status_fall_back_instead_of_failing() {
        let ev: CheckoutEvent =
            serde_json::from_value(checkout_event_with("gift_wrap", "retrying")).unwrap();
        assert_eq!(ev.step, Some(CheckoutStep::Other));
        assert_eq!(ev.status, CheckoutStatus::Other);
    }

    #[test]
    fn unrecognized_cart_event_type_falls_back_instead_of_failing() {
        let raw = json!({
            "@timestamp": "2026-01-01T00:00:00Z",
            "cart_id": "cart_1",
            "customer_id": null,
            "session_id": null,
            "event_type": "wishlist_add",
            "product_id": null,
            "quantity": null,
            "unit_price": null,
            "cart_value": null,
            "currency": null,
            "device_type": null,
        });
        let ev: CartEvent = serde_json::from_value(raw).unwrap();
        assert_eq!(ev.event_type, CartEventType::Other);
    }
}
