//! Recovery record model
//!
//! Written once, pending, by the Attempt Recorder. Only an external reconciler may
//! ever transition `outcome.status` away from `pending`; this crate never overwrites
//! a `RecoveryRecord` it has written.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::action::RecoveryAction;
use super::diagnosis::RootCause;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Pending,
    Recovered,
    NotRecovered,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outcome {
    pub status: OutcomeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<Uuid>,
    #[serde(default)]
    pub revenue_recovered: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome_at: Option<DateTime<Utc>>,
}

impl Outcome {
    pub fn pending() -> Self {
        Self {
            status: OutcomeStatus::Pending,
            order_id: None,
            revenue_recovered: Decimal::ZERO,
            outcome_at: None,
        }
    }
}

/// A compact summary of a diagnosis, as embedded in a `RecoveryRecord`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisSummary {
    pub root_cause: RootCause,
    pub signals: Vec<String>,
}

/// A single recovery attempt, keyed by `recovery_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryRecord {
    pub recovery_id: String,
    pub cart_id: String,
    pub customer_id: String,
    pub segment: String,
    pub cart_value: Decimal,
    pub currency: String,
    pub diagnosis: DiagnosisSummary,
    pub action: RecoveryAction,
    pub sent_at: DateTime<Utc>,
    pub outcome: Outcome,
}
