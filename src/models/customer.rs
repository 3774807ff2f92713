//! Customer profile model
//!
//! `CustomerProfile` is externally maintained. This crate only reads it.
//! `segment` is left as an open string (observed values include `vip`, `standard`,
//! `high_fraud_risk`, and others) while `fraud_risk` and `preferred_channel` are closed
//! tagged variants, since that set is fixed and interchange needs a defined textual form.

use serde::{Deserialize, Serialize};

pub const DEFAULT_SEGMENT: &str = "standard";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FraudRisk {
    Low,
    Medium,
    High,
}

impl Default for FraudRisk {
    fn default() -> Self {
        Self::Low
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Email,
    Push,
    Sms,
}

impl Default for Channel {
    fn default() -> Self {
        Self::Email
    }
}

impl Channel {
    /// Textual form used when addressing the document store / recovery records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Push => "push",
            Self::Sms => "sms",
        }
    }
}

/// A customer record as read back from `customer_profiles`.
///
/// Fields missing from the stored document default to:
/// `segment="standard"`, `preferred_channel="email"`, `fraud_risk="low"`,
/// `lifetime_value=0.0`. No normalization of `email`/`phone` is performed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub customer_id: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub push_token: Option<String>,
    #[serde(default = "default_segment")]
    pub segment: String,
    #[serde(default)]
    pub lifetime_value: f64,
    #[serde(default)]
    pub preferred_channel: Channel,
    #[serde(default)]
    pub fraud_risk: FraudRisk,
    pub locale: Option<String>,
    pub timezone: Option<String>,
}

fn default_segment() -> String {
    DEFAULT_SEGMENT.to_string()
}

impl CustomerProfile {
    pub fn is_vip(&self) -> bool {
        self.segment == "vip"
    }

    pub fn is_high_fraud_risk(&self) -> bool {
        self.fraud_risk == FraudRisk::High
    }
}
