//! Policy Decider
//!
//! A pure function: diagnosis, customer profile, cart candidate, and aggregated
//! similarity stats in; one `RecoveryAction` and a human-readable rationale out.
//! No document-store access here; everything it needs has already been gathered
//! by the earlier pipeline stages.

use std::collections::HashSet;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{ActionType, CartCandidate, Channel, CustomerProfile, Diagnosis, RecoveryAction, RootCause};
use crate::models::similarity::ActionOutcomeStats;

const VIP_SEGMENT: &str = "vip";
const VIP_DISCOUNT_PERCENT: Decimal = dec!(10.0);
const PRICING_SHIPPING_DISCOUNT_PERCENT: Decimal = dec!(10.0);
const PRICING_SHIPPING_DISCOUNT_PERCENT_VIP: Decimal = dec!(12.5);
const HISTORY_DISCOUNT_PERCENT: Decimal = dec!(7.5);
const HISTORY_DISCOUNT_PERCENT_VIP: Decimal = dec!(10.0);
const VIP_CART_VALUE_FLOOR: Decimal = dec!(75);

/// The decider's output: the chosen action plus why it was chosen.
#[derive(Debug, Clone)]
pub struct PolicyDecision {
    pub action: RecoveryAction,
    pub rationale: &'static str,
}

/// Find the allowed action with the highest `success_rate` in `stats`, breaking
/// ties by the first-seen order in `stats`.
fn best_action_from_history(
    stats: &[ActionOutcomeStats],
    allowed: &HashSet<ActionType>,
) -> Option<ActionType> {
    let mut best: Option<(ActionType, f64)> = None;
    for s in stats {
        if !allowed.contains(&s.action_type) {
            continue;
        }
        match &best {
            Some((_, best_rate)) if s.success_rate <= *best_rate => {}
            _ => best = Some((s.action_type, s.success_rate)),
        }
    }
    best.map(|(action_type, _)| action_type)
}

/// Decide the recovery action for one candidate.
pub fn decide_recovery_action(
    cart: &CartCandidate,
    diagnosis: &Diagnosis,
    customer: &CustomerProfile,
    similar_stats: &[ActionOutcomeStats],
) -> PolicyDecision {
    let mut allowed: HashSet<ActionType> = ActionType::ALL.into_iter().collect();
    if customer.is_high_fraud_risk() {
        allowed.remove(&ActionType::Discount);
        allowed.remove(&ActionType::FreeShipping);
    }

    let channel: Channel = customer.preferred_channel;

    if diagnosis.root_cause == RootCause::PaymentFailure && allowed.contains(&ActionType::PaymentRetry) {
        let action = RecoveryAction::new(ActionType::PaymentRetry, channel, "retry_payment")
            .with_metadata("priority", serde_json::json!("high"));
        return PolicyDecision {
            action,
            rationale: "Payment signals indicate a failure; retrying payment is the least-discounting recovery path.",
        };
    }

    if diagnosis.root_cause == RootCause::PerformanceLatency && allowed.contains(&ActionType::Reminder) {
        let action = RecoveryAction::new(ActionType::Reminder, channel, "supportive_reminder")
            .with_metadata("offer_support", serde_json::json!(true));
        return PolicyDecision {
            action,
            rationale: "Session performance signals are degraded; a low-friction reminder + support is preferred over discounts.",
        };
    }

    if diagnosis.root_cause == RootCause::PricingShipping {
        let best = best_action_from_history(similar_stats, &allowed);
        if best == Some(ActionType::FreeShipping) {
            let action = RecoveryAction::new(ActionType::FreeShipping, channel, "free_shipping_offer")
                .with_free_shipping(true);
            return PolicyDecision {
                action,
                rationale: "Historical recoveries for pricing/shipping issues perform well with free shipping.",
            };
        }

        if allowed.contains(&ActionType::Discount) {
            let discount = if customer.is_vip() {
                PRICING_SHIPPING_DISCOUNT_PERCENT_VIP
            } else {
                PRICING_SHIPPING_DISCOUNT_PERCENT
            };
            let action = RecoveryAction::new(ActionType::Discount, channel, "discount_offer")
                .with_discount_percent(discount)
                .with_metadata("reason", serde_json::json!("shipping_or_price_sensitivity"));
            return PolicyDecision {
                action,
                rationale: "Price/shipping sensitivity detected; discounting can reduce total cost perception.",
            };
        }
    }

    if let Some(best) = best_action_from_history(similar_stats, &allowed) {
        return match best {
            ActionType::FreeShipping => PolicyDecision {
                action: RecoveryAction::new(ActionType::FreeShipping, channel, "free_shipping_offer")
                    .with_free_shipping(true),
                rationale: "Similarity search indicates free shipping yields the highest success rate for comparable cases.",
            },
            ActionType::Discount => {
                let discount = if customer.is_vip() {
                    HISTORY_DISCOUNT_PERCENT_VIP
                } else {
                    HISTORY_DISCOUNT_PERCENT
                };
                PolicyDecision {
                    action: RecoveryAction::new(ActionType::Discount, channel, "discount_offer")
                        .with_discount_percent(discount),
                    rationale: "Similarity search indicates a discount yields the highest success rate for comparable cases.",
                }
            }
            ActionType::PaymentRetry => PolicyDecision {
                action: RecoveryAction::new(ActionType::PaymentRetry, channel, "retry_payment"),
                rationale: "Similarity search indicates payment retry yields the highest success rate for comparable cases.",
            },
            ActionType::Reminder => PolicyDecision {
                action: RecoveryAction::new(ActionType::Reminder, channel, "simple_reminder"),
                rationale: "Similarity search indicates reminders are most effective for comparable cases.",
            },
        };
    }

    if customer.is_vip() && allowed.contains(&ActionType::Discount) && cart.cart_value >= VIP_CART_VALUE_FLOOR {
        let action = RecoveryAction::new(ActionType::Discount, channel, "discount_offer")
            .with_discount_percent(VIP_DISCOUNT_PERCENT);
        return PolicyDecision {
            action,
            rationale: "VIP segment with high cart value; applying a modest discount increases conversion probability.",
        };
    }

    PolicyDecision {
        action: RecoveryAction::new(ActionType::Reminder, channel, "simple_reminder"),
        rationale: "Defaulting to a reminder due to insufficient evidence for a stronger intervention.",
    }
}
