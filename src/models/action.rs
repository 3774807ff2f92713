//! Recovery action model

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::customer::Channel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Discount,
    FreeShipping,
    Reminder,
    PaymentRetry,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Discount => "discount",
            Self::FreeShipping => "free_shipping",
            Self::Reminder => "reminder",
            Self::PaymentRetry => "payment_retry",
        }
    }

    pub const ALL: [ActionType; 4] =
        [Self::Discount, Self::FreeShipping, Self::Reminder, Self::PaymentRetry];
}

impl std::str::FromStr for ActionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "discount" => Ok(Self::Discount),
            "free_shipping" => Ok(Self::FreeShipping),
            "reminder" => Ok(Self::Reminder),
            "payment_retry" => Ok(Self::PaymentRetry),
            other => Err(format!("unknown action_type `{other}`")),
        }
    }
}

/// A chosen remediation, ready for the Dispatch Gate.
///
/// Invariant: `discount_percent ∈ [0, 100]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryAction {
    #[serde(rename = "type")]
    pub action_type: ActionType,
    pub channel: Channel,
    pub template: String,
    #[serde(default)]
    pub discount_percent: Decimal,
    #[serde(default)]
    pub free_shipping: bool,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl RecoveryAction {
    pub fn new(action_type: ActionType, channel: Channel, template: impl Into<String>) -> Self {
        Self {
            action_type,
            channel,
            template: template.into(),
            discount_percent: Decimal::ZERO,
            free_shipping: false,
            metadata: HashMap::new(),
        }
    }

    pub fn with_discount_percent(mut self, pct: Decimal) -> Self {
        self.discount_percent = pct;
        self
    }

    pub fn with_free_shipping(mut self, free_shipping: bool) -> Self {
        self.free_shipping = free_shipping;
        self
    }

    pub fn with_metadata(mut self, key: &str, value: serde_json::Value) -> Self {
        self.metadata.insert(key.to_string(), value);
        self
    }
}
