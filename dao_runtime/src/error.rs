use thiserror::Error;

use dao_engine::invariants::InvariantViolation;
use dao_engine::RngError;

use crate::snapshot_codec::SnapshotError;

#[derive(Debug, Error)]
pub enum PlaythroughError {
    #[error("rng error: {0}")]
    Rng(#[from] RngError),

    #[error("invariant violation: {0}")]
    Invariant(#[from] InvariantViolation),

    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("determinism failure: replay 1 = {first}, replay 2 = {second}")]
    Determinism { first: String, second: String },

    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}
