//! Cart candidate model
//!
//! `CartCandidate` is the Cart Candidate Detector's output: a cart that looks
//! abandoned as of a particular detection run. It is ephemeral (never written back
//! to the document store).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartCandidate {
    pub cart_id: String,
    pub customer_id: String,
    pub session_id: Option<String>,
    pub last_seen: DateTime<Utc>,
    pub cart_value: Decimal,
    pub currency: String,
    pub device_type: Option<String>,
}
