//! Abandonment Diagnoser
//!
//! A fixed-order cascade: payment failure, then performance/latency, then
//! pricing/shipping, then checkout friction, falling back to `unknown`. Each branch
//! that fires returns as soon as it finds evidence; later branches never run.

use rust_decimal::prelude::ToPrimitive;

use crate::error::CoreResult;
use crate::models::diagnosis::{Diagnosis, Evidence, RootCause};
use crate::store::DocumentStoreGateway;

const CART_EVENTS_LIMIT: u32 = 50;
const CHECKOUT_EVENTS_LIMIT: u32 = 50;
const PAYMENT_LOGS_LIMIT: u32 = 25;
const SESSION_METRICS_LIMIT: u32 = 10;

const HIGH_LATENCY_MS: i64 = 1000;
const LOW_APDEX: f64 = 0.85;
const HIGH_ERROR_RATE: f64 = 0.05;
const HIGH_SHIPPING_RATIO: f64 = 0.18;
const MIN_CHECKOUT_EVENTS_FOR_FRICTION: usize = 3;

fn most_recent_session_id(
    cart_events: &[crate::models::CartEvent],
    checkout_events: &[crate::models::CheckoutEvent],
) -> Option<String> {
    cart_events
        .iter()
        .filter_map(|e| e.session_id.clone())
        .next()
        .or_else(|| checkout_events.iter().filter_map(|e| e.session_id.clone()).next())
}

/// Diagnose why `cart_id` looks abandoned.
pub async fn analyze_abandonment(
    store: &dyn DocumentStoreGateway,
    cart_id: &str,
) -> CoreResult<Diagnosis> {
    let cart_events = store.recent_cart_events(cart_id, CART_EVENTS_LIMIT).await?;
    let checkout_events = store.recent_checkout_events(cart_id, CHECKOUT_EVENTS_LIMIT).await?;
    let payment_logs = store.recent_payment_logs(cart_id, PAYMENT_LOGS_LIMIT).await?;

    let session_id = most_recent_session_id(&cart_events, &checkout_events);
    let session_metrics = match &session_id {
        Some(sid) => store.recent_session_metrics(sid, SESSION_METRICS_LIMIT).await?,
        None => Vec::new(),
    };

    let checkout_events_count = checkout_events.len();
    let payment_logs_count = payment_logs.len();

    let (root_cause, signals, evidence) =
        diagnose(&checkout_events, &payment_logs, &session_metrics);

    Ok(Diagnosis {
        root_cause,
        signals,
        evidence,
        checkout_events_count,
        payment_logs_count,
        session_id,
        extra: Default::default(),
    })
}

fn diagnose(
    checkout_events: &[crate::models::CheckoutEvent],
    payment_logs: &[crate::models::PaymentLog],
    session_metrics: &[crate::models::SessionMetrics],
) -> (RootCause, Vec<String>, Evidence) {
    use crate::models::event::PaymentStatus;

    if let Some(fp) = payment_logs.iter().find(|p| p.status == PaymentStatus::Failed) {
        let mut signals = Vec::new();
        if let Some(code) = &fp.failure_code {
            signals.push(code.clone());
        }
        if signals.is_empty() {
            signals.push("payment_failed".to_string());
        }
        return (
            RootCause::PaymentFailure,
            signals,
            Evidence::PaymentFailure {
                failure_code: fp.failure_code.clone(),
                failure_message: fp.failure_message.clone(),
                retryable: fp.retryable,
            },
        );
    }

    if let Some(m) = session_metrics.iter().find(|m| m.p95_latency_ms.is_some()) {
        let p95 = m.p95_latency_ms.unwrap_or(0);
        let apdex = m.apdex.unwrap_or(0.0);
        let err = m.error_rate.unwrap_or(0.0);

        if p95 >= HIGH_LATENCY_MS || apdex < LOW_APDEX || err >= HIGH_ERROR_RATE {
            let mut signals = Vec::new();
            if p95 >= HIGH_LATENCY_MS {
                signals.push("high_latency".to_string());
            }
            if apdex < LOW_APDEX {
                signals.push("low_apdex".to_string());
            }
            if err >= HIGH_ERROR_RATE {
                signals.push("high_error_rate".to_string());
            }
            return (
                RootCause::PerformanceLatency,
                signals,
                Evidence::PerformanceLatency { p95_latency_ms: p95, apdex, error_rate: err },
            );
        }
    }

    if let Some(ce) = checkout_events
        .iter()
        .find(|c| c.shipping_cost.is_some() && c.total.is_some())
    {
        let shipping_cost = ce.shipping_cost.unwrap().to_f64().unwrap_or(0.0);
        let total = ce.total.unwrap().to_f64().unwrap_or(0.0);
        if total > 0.0 && shipping_cost / total >= HIGH_SHIPPING_RATIO {
            return (
                RootCause::PricingShipping,
                vec!["high_shipping_cost".to_string()],
                Evidence::PricingShipping { shipping_cost, total },
            );
        }
    }

    if checkout_events.len() >= MIN_CHECKOUT_EVENTS_FOR_FRICTION {
        let steps: Vec<String> = checkout_events
            .iter()
            .filter_map(|c| c.step.map(|s| s.as_str().to_string()))
            .collect();
        let has_shipping = checkout_events
            .iter()
            .any(|c| c.step == Some(crate::models::event::CheckoutStep::Shipping));
        let has_payment = checkout_events
            .iter()
            .any(|c| c.step == Some(crate::models::event::CheckoutStep::Payment));
        if has_shipping && !has_payment {
            return (
                RootCause::CheckoutFriction,
                vec!["stalled_before_payment".to_string()],
                Evidence::CheckoutFriction { steps: steps.into_iter().take(10).collect() },
            );
        }
    }

    (RootCause::Unknown, vec!["insufficient_signals".to_string()], Evidence::Unknown)
}
