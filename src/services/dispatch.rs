//! Dispatch Gate
//!
//! Checks that the customer can actually be reached on the chosen action's
//! channel before a send is attempted. No network call happens here (whatever
//! sends the message is external to this crate); this gate only decides whether
//! that send should be attempted at all.

use rand::Rng;

use crate::models::{Channel, CustomerProfile, RecoveryAction};

const MESSAGE_ID_HEX_LEN: usize = 12;

/// Outcome of a dispatch attempt. Not an error: a skipped dispatch
/// is an expected, successful outcome when the customer has no address on the
/// chosen channel. `Failed` is part of the documented status domain for the send
/// that happens downstream of this gate; this gate itself never returns it, since
/// it only checks addressability before a send is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStatus {
    Sent,
    Skipped,
    Failed,
}

#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub status: DispatchStatus,
    pub message_id: Option<String>,
    pub channel: Channel,
}

fn non_empty(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.is_empty())
}

fn is_addressable(channel: Channel, customer: &CustomerProfile) -> bool {
    match channel {
        Channel::Email => non_empty(&customer.email),
        Channel::Sms => non_empty(&customer.phone),
        Channel::Push => non_empty(&customer.push_token),
    }
}

fn generate_message_id() -> String {
    const CHARSET: &[u8] = b"0123456789abcdef";
    let mut rng = rand::thread_rng();
    let suffix: String = (0..MESSAGE_ID_HEX_LEN)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect();
    format!("msg_{suffix}")
}

/// Check addressability for `action.channel` and, if reachable, mint a
/// `message_id` for the send. The caller is responsible for the
/// actual send; this only gates whether one should be attempted.
pub fn dispatch_recovery_action(action: &RecoveryAction, customer: &CustomerProfile) -> DispatchOutcome {
    if !is_addressable(action.channel, customer) {
        return DispatchOutcome { status: DispatchStatus::Skipped, message_id: None, channel: action.channel };
    }

    DispatchOutcome {
        status: DispatchStatus::Sent,
        message_id: Some(generate_message_id()),
        channel: action.channel,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::customer::FraudRisk;

    fn customer(email: Option<&str>, phone: Option<&str>, push_token: Option<&str>) -> CustomerProfile {
        CustomerProfile {
            customer_id: "cust_1".to_string(),
            email: email.map(str::to_string),
            phone: phone.map(str::to_string),
            push_token: push_token.map(str::to_string),
            segment: "standard".to_string(),
            lifetime_value: 0.0,
            preferred_channel: Channel::Email,
            fraud_risk: FraudRisk::Low,
            locale: None,
            timezone: None,
        }
    }

    #[test]
    fn skips_email_without_address() {
        let action = RecoveryAction::new(crate::models::ActionType::Reminder, Channel::Email, "simple_reminder");
        let outcome = dispatch_recovery_action(&action, &customer(None, None, None));
        assert_eq!(outcome.status, DispatchStatus::Skipped);
        assert!(outcome.message_id.is_none());
    }

    #[test]
    fn skips_when_address_is_empty_string() {
        let action = RecoveryAction::new(crate::models::ActionType::Reminder, Channel::Sms, "simple_reminder");
        let outcome = dispatch_recovery_action(&action, &customer(None, Some(""), None));
        assert_eq!(outcome.status, DispatchStatus::Skipped);
    }

    #[test]
    fn sends_when_addressable() {
        let action = RecoveryAction::new(crate::models::ActionType::Reminder, Channel::Sms, "simple_reminder");
        let outcome = dispatch_recovery_action(&action, &customer(None, Some("+15551234567"), None));
        assert_eq!(outcome.status, DispatchStatus::Sent);
        let message_id = outcome.message_id.unwrap();
        assert!(message_id.starts_with("msg_"));
        assert_eq!(message_id.len(), 4 + MESSAGE_ID_HEX_LEN);
    }
}
