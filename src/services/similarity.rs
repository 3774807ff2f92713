//! Similarity & Outcome Aggregator
//!
//! Looks up how comparable past recoveries fared: same root cause, same segment,
//! a cart-value band around the candidate's own value, within a lookback window.

use chrono::{Duration, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::error::{CoreError, CoreResult};
use crate::models::similarity::ActionOutcomeStats;
use crate::models::{RecoveryRecord, SimilarityQuery};
use crate::store::{DocumentStoreGateway, TimeRange};

/// Bounds: `lookback_days ∈ [7, 730]`, `size ∈ [1, 100]`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FindSimilarAbandonmentsRequest {
    pub similarity: SimilarityQuery,
    #[validate(range(min = 7, max = 730))]
    pub lookback_days: i64,
    #[validate(range(min = 1, max = 100))]
    pub size: u32,
}

fn map_validation_error(err: validator::ValidationErrors) -> CoreError {
    let field = err
        .field_errors()
        .keys()
        .next()
        .copied()
        .unwrap_or("request");
    CoreError::validation(
        match field {
            "lookback_days" => "lookback_days",
            "size" => "size",
            _ => "request",
        },
        "out of range",
    )
}

/// Find comparable past recoveries and their aggregated outcomes.
pub async fn find_similar_abandonments(
    store: &dyn DocumentStoreGateway,
    req: &FindSimilarAbandonmentsRequest,
) -> CoreResult<(Vec<ActionOutcomeStats>, Vec<RecoveryRecord>)> {
    req.validate().map_err(map_validation_error)?;

    let now = Utc::now();
    let lookback = now - Duration::days(req.lookback_days);
    let window = TimeRange::since(lookback);

    store.recovery_outcome_stats(&req.similarity, window, req.size).await
}
