//! Similarity query and outcome-stats models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::action::ActionType;
use super::diagnosis::RootCause;

/// The key used to look up comparable past recoveries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityQuery {
    pub root_cause: RootCause,
    pub segment: String,
    pub cart_value: Decimal,
}

/// Aggregated outcomes for one `action_type`, as returned by the Similarity &
/// Outcome Aggregator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionOutcomeStats {
    pub action_type: ActionType,
    pub total: u64,
    pub recovered: u64,
    pub success_rate: f64,
    pub avg_revenue_recovered: f64,
}

impl ActionOutcomeStats {
    pub fn new(action_type: ActionType, total: u64, recovered: u64, avg_revenue_recovered: f64) -> Self {
        let success_rate = if total > 0 { recovered as f64 / total as f64 } else { 0.0 };
        Self { action_type, total, recovered, success_rate, avg_revenue_recovered }
    }
}
