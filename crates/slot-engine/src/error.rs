//! Error types for slot-engine operations.
//!
//! Only infrastructure failures surface here. A candidate slot that breaks a
//! business rule is not an error — it produces a
//! [`ValidationOutcome::Rejected`](crate::validator::ValidationOutcome) value.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// A collaborator lookup (slot query or roster/directory read) failed.
    /// Fatal for the request; the engine never retries internally.
    #[error("store query failed: {0}")]
    Store(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
