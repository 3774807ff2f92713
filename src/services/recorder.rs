//! Attempt Recorder
//!
//! The only component in this pipeline that writes to the document store.
//! Mints a fresh `recovery_id` and indexes a `RecoveryRecord` with a `pending`
//! outcome; the write is idempotent at the store because the id is always new.

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::error::CoreResult;
use crate::models::{
    CartCandidate, CustomerProfile, Diagnosis, DiagnosisSummary, Outcome, RecoveryAction,
    RecoveryRecord,
};
use crate::store::DocumentStoreGateway;

const RECOVERY_ID_HEX_LEN: usize = 32;

fn generate_recovery_id() -> String {
    const CHARSET: &[u8] = b"0123456789abcdef";
    let mut rng = rand::thread_rng();
    let suffix: String = (0..RECOVERY_ID_HEX_LEN)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect();
    format!("rec_{suffix}")
}

/// Persist one recovery attempt. `sent_at` should be the timestamp the Dispatch Gate
/// actually sent on; callers MUST NOT call this unless that gate returned `sent`.
/// Returns the freshly minted `recovery_id`.
pub async fn record_recovery_attempt(
    store: &dyn DocumentStoreGateway,
    cart: &CartCandidate,
    customer: &CustomerProfile,
    diagnosis: &Diagnosis,
    action: &RecoveryAction,
    sent_at: DateTime<Utc>,
) -> CoreResult<String> {
    let recovery_id = generate_recovery_id();

    let record = RecoveryRecord {
        recovery_id: recovery_id.clone(),
        cart_id: cart.cart_id.clone(),
        customer_id: cart.customer_id.clone(),
        segment: customer.segment.clone(),
        cart_value: cart.cart_value,
        currency: cart.currency.clone(),
        diagnosis: DiagnosisSummary {
            root_cause: diagnosis.root_cause,
            signals: diagnosis.signals.clone(),
        },
        action: action.clone(),
        sent_at,
        outcome: Outcome::pending(),
    };

    store.put_recovery_record(&record).await?;
    Ok(recovery_id)
}

#[cfg(test)]
mod tests {
    use super::generate_recovery_id;

    #[test]
    fn recovery_id_has_expected_shape() {
        let id = generate_recovery_id();
        assert!(id.starts_with("rec_"));
        assert_eq!(id.len(), 4 + 32);
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit()));
    }
}
