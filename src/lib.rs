//! Abandoned Cart Recovery: core pipeline
//!
//! A detection-through-recording pipeline for e-commerce cart abandonment:
//! - Cart Candidate Detector: finds carts that look abandoned
//! - Abandonment Diagnoser: attributes a root cause from event signals
//! - Customer Profile Reader: resolves the customer behind a cart
//! - Similarity & Outcome Aggregator: looks up how comparable past recoveries fared
//! - Policy Decider: chooses a recovery action from diagnosis, profile, and history
//! - Dispatch Gate: checks channel addressability before a send is attempted
//! - Attempt Recorder: persists the attempt, once, as the single source of truth
//!
//! # Architecture
//!
//! - **models**: data structures read from and written to the document store
//! - **store**: the `DocumentStoreGateway` capability and its HTTP implementation
//! - **services**: the seven pipeline components above
//! - **config**: how to reach the document store
//! - **error**: the crate-wide error type
//!
//! The HTTP surface, orchestration loop, and document-store index bootstrap that
//! drive this pipeline in production are out of scope for this crate; it exposes
//! the pipeline stages as a library to be composed by that external layer.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;

pub use config::GatewayConfig;
pub use error::{CoreError, CoreResult};
pub use store::{DocumentStoreGateway, TimeRange};

pub use models::{
    ActionType, CartCandidate, CartEvent, Channel, CheckoutEvent, CustomerProfile, Diagnosis,
    DiagnosisSummary, Evidence, FraudRisk, Outcome, OutcomeStatus, PaymentLog, RecoveryAction,
    RecoveryRecord, RootCause, SessionMetrics, SimilarityQuery,
};
pub use models::similarity::ActionOutcomeStats;

pub use services::detector::{detect_abandoned_carts, DetectAbandonedCartsRequest};
pub use services::diagnoser::analyze_abandonment;
pub use services::dispatch::{dispatch_recovery_action, DispatchOutcome, DispatchStatus};
pub use services::policy::decide_recovery_action;
pub use services::profile::get_customer_profile;
pub use services::recorder::record_recovery_attempt;
pub use services::similarity::{find_similar_abandonments, FindSimilarAbandonmentsRequest};

/// Crate version, as reported by Cargo.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
