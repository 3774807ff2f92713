//! Abandonment pipeline data models
//!
//! Event streams (`event`), the ephemeral candidate produced by detection
//! (`candidate`), the externally-maintained customer record (`customer`), the
//! diagnoser's output (`diagnosis`), the decider's output (`action`), the similarity
//! aggregator's inputs/outputs (`similarity`), and the recorder's persisted document
//! (`recovery`).

pub mod action;
pub mod candidate;
pub mod customer;
pub mod diagnosis;
pub mod event;
pub mod recovery;
pub mod similarity;

pub use action::{ActionType, RecoveryAction};
pub use candidate::CartCandidate;
pub use customer::{Channel, CustomerProfile, FraudRisk};
pub use diagnosis::{Diagnosis, Evidence, RootCause};
pub use event::{
    CartEvent, CartEventType, CheckoutEvent, CheckoutStatus, CheckoutStep, PaymentLog,
    PaymentStatus, SessionMetrics,
};
pub use recovery::{DiagnosisSummary, Outcome, OutcomeStatus, RecoveryRecord};
pub use similarity::{ActionOutcomeStats, SimilarityQuery};
