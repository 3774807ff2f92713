//! End-to-end scenarios over the abandonment pipeline, each wired through the
//! in-memory `FakeStore` rather than a real document store.

mod common;

use chrono::Utc;
use rust_decimal_macros::dec;

use cart_recovery_core::models::customer::FraudRisk;
use cart_recovery_core::models::diagnosis::Evidence;
use cart_recovery_core::models::similarity::ActionOutcomeStats;
use cart_recovery_core::services::dispatch::{dispatch_recovery_action, DispatchStatus};
use cart_recovery_core::services::policy::decide_recovery_action;
use cart_recovery_core::{
    ActionType, CartCandidate, Channel, CustomerProfile, Diagnosis, PaymentLog, RootCause,
};

use common::FakeStore;

fn candidate(cart_value: rust_decimal::Decimal) -> CartCandidate {
    CartCandidate {
        cart_id: "cart_1".to_string(),
        customer_id: "cust_1".to_string(),
        session_id: Some("sess_1".to_string()),
        last_seen: Utc::now(),
        cart_value,
        currency: "USD".to_string(),
        device_type: Some("mobile".to_string()),
    }
}

fn vip_customer() -> CustomerProfile {
    CustomerProfile {
        customer_id: "cust_1".to_string(),
        email: Some("vip@example.com".to_string()),
        phone: Some("+15550001111".to_string()),
        push_token: None,
        segment: "vip".to_string(),
        lifetime_value: 5000.0,
        preferred_channel: Channel::Email,
        fraud_risk: FraudRisk::Low,
        locale: None,
        timezone: None,
    }
}

#[tokio::test]
async fn vip_payment_failure_diagnoses_and_decides_payment_retry() {
    use cart_recovery_core::services::diagnoser::analyze_abandonment;

    let mut store = FakeStore::default();
    store.payment_logs.insert(
        "cart_1".to_string(),
        vec![PaymentLog {
            timestamp: Utc::now(),
            payment_id: "pay_1".to_string(),
            checkout_id: Some("co_1".to_string()),
            cart_id: "cart_1".to_string(),
            customer_id: Some("cust_1".to_string()),
            provider: Some("stripe".to_string()),
            status: cart_recovery_core::models::event::PaymentStatus::Failed,
            failure_code: Some("insufficient_funds".to_string()),
            failure_message: Some("The card has insufficient funds.".to_string()),
            retryable: Some(true),
            gateway_latency_ms: Some(320),
            attempt: Some(1),
        }],
    );

    let diagnosis = analyze_abandonment(&store, "cart_1").await.unwrap();
    assert_eq!(diagnosis.root_cause, RootCause::PaymentFailure);
    assert!(matches!(diagnosis.evidence, Evidence::PaymentFailure { .. }));

    let customer = vip_customer();
    let cart = candidate(dec!(250));
    let decision = decide_recovery_action(&cart, &diagnosis, &customer, &[]);
    assert_eq!(decision.action.action_type, ActionType::PaymentRetry);

    let outcome = dispatch_recovery_action(&decision.action, &customer);
    assert_eq!(outcome.status, DispatchStatus::Sent);
}

#[tokio::test]
async fn pricing_shipping_prefers_free_shipping_from_history() {
    use cart_recovery_core::services::diagnoser::analyze_abandonment;
    use cart_recovery_core::models::event::{CheckoutStatus, CheckoutStep};
    use cart_recovery_core::CheckoutEvent;

    let mut store = FakeStore::default();
    store.checkout_events.insert(
        "cart_1".to_string(),
        vec![CheckoutEvent {
            timestamp: Utc::now(),
            checkout_id: "co_1".to_string(),
            cart_id: "cart_1".to_string(),
            customer_id: Some("cust_1".to_string()),
            session_id: Some("sess_1".to_string()),
            step: Some(CheckoutStep::Shipping),
            status: CheckoutStatus::StepFailed,
            shipping_cost: Some(dec!(25)),
            tax: Some(dec!(5)),
            total: Some(dec!(100)),
            payment_method: None,
        }],
    );

    let diagnosis = analyze_abandonment(&store, "cart_1").await.unwrap();
    assert_eq!(diagnosis.root_cause, RootCause::PricingShipping);

    let customer = CustomerProfile {
        customer_id: "cust_1".to_string(),
        email: Some("standard@example.com".to_string()),
        phone: None,
        push_token: None,
        segment: "standard".to_string(),
        lifetime_value: 100.0,
        preferred_channel: Channel::Email,
        fraud_risk: FraudRisk::Low,
        locale: None,
        timezone: None,
    };
    let stats = vec![ActionOutcomeStats::new(ActionType::FreeShipping, 20, 15, 40.0)];
    let decision =
        decide_recovery_action(&candidate(dec!(100)), &diagnosis, &customer, &stats);
    assert_eq!(decision.action.action_type, ActionType::FreeShipping);
    assert!(decision.action.free_shipping);
}

#[tokio::test]
async fn laggy_session_yields_supportive_reminder() {
    use cart_recovery_core::services::diagnoser::analyze_abandonment;
    use cart_recovery_core::SessionMetrics;

    let mut store = FakeStore::default();
    store.cart_events.insert(
        "cart_1".to_string(),
        vec![cart_recovery_core::CartEvent {
            timestamp: Utc::now(),
            cart_id: "cart_1".to_string(),
            customer_id: Some("cust_1".to_string()),
            session_id: Some("sess_1".to_string()),
            event_type: cart_recovery_core::models::event::CartEventType::ViewCart,
            product_id: None,
            quantity: None,
            unit_price: None,
            cart_value: Some(dec!(60)),
            currency: Some("USD".to_string()),
            device_type: Some("mobile".to_string()),
        }],
    );
    store.session_metrics.insert(
        "sess_1".to_string(),
        vec![SessionMetrics {
            timestamp: Utc::now(),
            session_id: "sess_1".to_string(),
            route: Some("/checkout".to_string()),
            device_type: Some("mobile".to_string()),
            p95_latency_ms: Some(2200),
            error_rate: Some(0.01),
            apdex: Some(0.6),
        }],
    );

    let diagnosis = analyze_abandonment(&store, "cart_1").await.unwrap();
    assert_eq!(diagnosis.root_cause, RootCause::PerformanceLatency);

    let customer = CustomerProfile {
        customer_id: "cust_1".to_string(),
        email: Some("a@example.com".to_string()),
        phone: None,
        push_token: None,
        segment: "standard".to_string(),
        lifetime_value: 0.0,
        preferred_channel: Channel::Email,
        fraud_risk: FraudRisk::Low,
        locale: None,
        timezone: None,
    };
    let decision =
        decide_recovery_action(&candidate(dec!(60)), &diagnosis, &customer, &[]);
    assert_eq!(decision.action.action_type, ActionType::Reminder);
    assert_eq!(decision.action.template, "supportive_reminder");
}

#[tokio::test]
async fn high_fraud_risk_customer_never_gets_a_discount() {
    let diagnosis = Diagnosis {
        root_cause: RootCause::Unknown,
        signals: vec!["insufficient_signals".to_string()],
        evidence: Evidence::Unknown,
        checkout_events_count: 0,
        payment_logs_count: 0,
        session_id: None,
        extra: Default::default(),
    };
    let customer = CustomerProfile {
        customer_id: "cust_1".to_string(),
        email: Some("risky@example.com".to_string()),
        phone: None,
        push_token: None,
        segment: "vip".to_string(),
        lifetime_value: 10000.0,
        preferred_channel: Channel::Email,
        fraud_risk: FraudRisk::High,
        locale: None,
        timezone: None,
    };
    let stats = vec![ActionOutcomeStats::new(ActionType::Discount, 20, 18, 50.0)];
    let decision =
        decide_recovery_action(&candidate(dec!(500)), &diagnosis, &customer, &stats);
    assert_ne!(decision.action.action_type, ActionType::Discount);
    assert_ne!(decision.action.action_type, ActionType::FreeShipping);
}

#[tokio::test]
async fn friction_only_signal_falls_back_past_checkout_friction_without_enough_events() {
    use cart_recovery_core::services::diagnoser::analyze_abandonment;

    // Only two checkout events: below the friction cascade's 3-event threshold,
    // so the diagnoser should fall through to `unknown`.
    use cart_recovery_core::models::event::{CheckoutStatus, CheckoutStep};
    use cart_recovery_core::CheckoutEvent;

    let mut store = FakeStore::default();
    store.checkout_events.insert(
        "cart_1".to_string(),
        vec![
            CheckoutEvent {
                timestamp: Utc::now(),
                checkout_id: "co_1".to_string(),
                cart_id: "cart_1".to_string(),
                customer_id: Some("cust_1".to_string()),
                session_id: Some("sess_1".to_string()),
                step: Some(CheckoutStep::Shipping),
                status: CheckoutStatus::Started,
                shipping_cost: None,
                tax: None,
                total: None,
                payment_method: None,
            },
            CheckoutEvent {
                timestamp: Utc::now(),
                checkout_id: "co_1".to_string(),
                cart_id: "cart_1".to_string(),
                customer_id: Some("cust_1".to_string()),
                session_id: Some("sess_1".to_string()),
                step: Some(CheckoutStep::Shipping),
                status: CheckoutStatus::Started,
                shipping_cost: None,
                tax: None,
                total: None,
                payment_method: None,
            },
        ],
    );

    let diagnosis = analyze_abandonment(&store, "cart_1").await.unwrap();
    assert_eq!(diagnosis.root_cause, RootCause::Unknown);
}

#[tokio::test]
async fn dispatch_is_skipped_when_chosen_channel_has_no_address() {
    let customer = CustomerProfile {
        customer_id: "cust_1".to_string(),
        email: None,
        phone: None,
        push_token: None,
        segment: "standard".to_string(),
        lifetime_value: 0.0,
        preferred_channel: Channel::Sms,
        fraud_risk: FraudRisk::Low,
        locale: None,
        timezone: None,
    };
    let action = cart_recovery_core::RecoveryAction::new(
        ActionType::Reminder,
        Channel::Sms,
        "simple_reminder",
    );
    let outcome = dispatch_recovery_action(&action, &customer);
    assert_eq!(outcome.status, DispatchStatus::Skipped);
    assert!(outcome.message_id.is_none());
}

#[tokio::test]
async fn recorder_persists_a_pending_outcome() {
    use cart_recovery_core::services::recorder::record_recovery_attempt;

    let store = FakeStore::default();
    let cart = candidate(dec!(80));
    let diagnosis = Diagnosis {
        root_cause: RootCause::Unknown,
        signals: vec!["insufficient_signals".to_string()],
        evidence: Evidence::Unknown,
        checkout_events_count: 0,
        payment_logs_count: 0,
        session_id: None,
        extra: Default::default(),
    };
    let action =
        cart_recovery_core::RecoveryAction::new(ActionType::Reminder, Channel::Email, "simple_reminder");
    let customer = CustomerProfile {
        customer_id: "cust_1".to_string(),
        email: Some("a@example.com".to_string()),
        phone: None,
        push_token: None,
        segment: "standard".to_string(),
        lifetime_value: 0.0,
        preferred_channel: Channel::Email,
        fraud_risk: FraudRisk::Low,
        locale: None,
        timezone: None,
    };

    let recovery_id =
        record_recovery_attempt(&store, &cart, &customer, &diagnosis, &action, Utc::now())
            .await
            .unwrap();
    assert!(recovery_id.starts_with("rec_"));

    let recorded = store.recorded.lock().unwrap();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].recovery_id, recovery_id);
    assert_eq!(recorded[0].outcome.status, cart_recovery_core::OutcomeStatus::Pending);
}
