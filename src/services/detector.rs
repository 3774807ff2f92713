//! Cart Candidate Detector
//!
//! Groups recent `cart_events` by `cart_id`, keeps the ones that have gone quiet
//! for at least `abandonment_minutes` without a completed checkout, and returns the
//! highest-value candidates first.

use chrono::{Duration, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::error::{CoreError, CoreResult};
use crate::models::CartCandidate;
use crate::store::{DocumentStoreGateway, TimeRange};

/// Bounds: `lookback_minutes ∈ [1, 43200]`,
/// `abandonment_minutes ∈ [5, 1440]`, `max_candidates ∈ [1, 200]`.
const GROUP_CAP: u32 = 1000;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DetectAbandonedCartsRequest {
    #[validate(range(min = 1, max = 43200))]
    pub lookback_minutes: i64,
    #[validate(range(min = 5, max = 1440))]
    pub abandonment_minutes: i64,
    #[validate(range(min = 1, max = 200))]
    pub max_candidates: u32,
}

fn map_validation_error(err: validator::ValidationErrors) -> CoreError {
    let Some((field, errors)) = err.field_errors().iter().next().map(|(f, e)| (*f, e.clone()))
    else {
        return CoreError::validation("request", "out of range");
    };
    let message = errors
        .first()
        .map(|e| e.to_string())
        .unwrap_or_else(|| "out of range".to_string());
    CoreError::validation(
        match field {
            "lookback_minutes" => "lookback_minutes",
            "abandonment_minutes" => "abandonment_minutes",
            "max_candidates" => "max_candidates",
            _ => "request",
        },
        message,
    )
}

/// Run one detection pass.
pub async fn detect_abandoned_carts(
    store: &dyn DocumentStoreGateway,
    req: &DetectAbandonedCartsRequest,
) -> CoreResult<Vec<CartCandidate>> {
    req.validate().map_err(map_validation_error)?;

    let now = Utc::now();
    let lookback = now - Duration::minutes(req.lookback_minutes);
    let cutoff = now - Duration::minutes(req.abandonment_minutes);
    let lookback_window = TimeRange::since(lookback);

    let buckets = store.cart_activity(lookback_window, GROUP_CAP).await?;

    let mut candidates = Vec::new();
    for bucket in buckets {
        if bucket.last_seen > cutoff {
            continue;
        }

        let rep = &bucket.representative;
        let Some(customer_id) = rep.customer_id.clone() else {
            continue;
        };
        if bucket.cart_id.is_empty() {
            continue;
        }

        if store.has_completed_checkout(&bucket.cart_id, lookback_window).await? {
            continue;
        }

        candidates.push(CartCandidate {
            cart_id: bucket.cart_id,
            customer_id,
            session_id: rep.session_id.clone(),
            last_seen: bucket.last_seen,
            cart_value: rep.cart_value.unwrap_or_default(),
            currency: rep.currency.clone().unwrap_or_else(|| "USD".to_string()),
            device_type: rep.device_type.clone(),
        });
    }

    candidates.sort_by(|a, b| {
        b.cart_value
            .cmp(&a.cart_value)
            .then_with(|| a.last_seen.cmp(&b.last_seen))
    });
    candidates.truncate(req.max_candidates as usize);

    Ok(candidates)
}
