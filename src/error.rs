//! Core error types
//!
//! One error enum for the whole pipeline, matching the four error kinds the
//! abandonment core is specified against: validation failures, not-found lookups,
//! document-store unavailability, and the non-error dispatch-skipped outcome (which is
//! *not* represented here; see `crate::services::dispatch::DispatchStatus`).

use thiserror::Error;

/// Crate-wide result alias.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors surfaced by the abandonment pipeline's core components.
///
/// `Validation` and `NotFound` are reported straight back to the caller and are never
/// retried by the core. `StoreUnavailable` wraps any I/O failure talking to the
/// document store; retries, if any, are an orchestrator concern.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("validation failed for `{field}`: {message}")]
    Validation { field: &'static str, message: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("document store unavailable: {message}")]
    StoreUnavailable {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },
}

impl CoreError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation { field, message: message.into() }
    }

    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound { entity, id: id.into() }
    }

    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable { message: message.into(), source: None }
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(err: reqwest::Error) -> Self {
        Self::StoreUnavailable { message: err.to_string(), source: Some(err) }
    }
}
