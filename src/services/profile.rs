//! Customer Profile Reader
//!
//! A keyed lookup with no business logic of its own: field defaults are encoded on
//! `CustomerProfile` itself via `serde(default)`, so a partially-populated document
//! deserializes the same way whether it comes over HTTP or out of a test fixture.

use crate::error::{CoreError, CoreResult};
use crate::models::CustomerProfile;
use crate::store::DocumentStoreGateway;

/// Resolve the customer behind a cart. Returns `CoreError::NotFound` if no
/// `customer_profiles` document exists for `customer_id`.
pub async fn get_customer_profile(
    store: &dyn DocumentStoreGateway,
    customer_id: &str,
) -> CoreResult<CustomerProfile> {
    store
        .get_customer_profile(customer_id)
        .await?
        .ok_or_else(|| CoreError::not_found("customer", customer_id))
}
