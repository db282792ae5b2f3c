//! Snapshot codec — deterministic `PlaythroughState` encoder/decoder.
//!
//! Pure codec layer. No I/O, no storage keys, no timestamps; where the
//! bytes end up is the caller's business.
//!
//! - `encode_snapshot`:  state → canonical JSON string
//! - `decode_snapshot`:  JSON → state (strict, unknown fields rejected)
//! - `restore_snapshot`: decode + invariant validation
//! - `seal_snapshot` / `open_snapshot`: envelope with sequence and hash

use serde::{Deserialize, Serialize};
use thiserror::Error;

use dao_engine::hashing::sha256_hex;
use dao_engine::invariants::{try_validate_assignments, try_validate_roster, InvariantViolation};
use dao_engine::SIM_VERSION;

use crate::playthrough::PlaythroughState;
use crate::story::FINAL_SCENE_INDEX;
use crate::tutorial::FIRST_CYCLE_ROLE_COUNT;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("deserialization failed: {0}")]
    Deserialization(String),

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),

    #[error("snapshot out of range: {0}")]
    OutOfRange(String),

    #[error("snapshot hash mismatch: recorded {recorded}, computed {computed}")]
    HashMismatch { recorded: String, computed: String },

    #[error("snapshot sim_version {found} does not match {expected}")]
    VersionMismatch { found: u32, expected: u32 },
}

/// Sealed snapshot: state JSON plus the data needed to trust it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnapshotEnvelope {
    /// Number of applied actions at the time of the snapshot.
    pub sequence: u64,
    pub state_json: String,
    /// SHA-256 of `state_json`.
    pub hash: String,
    pub sim_version: u32,
}

/// State → compact canonical JSON.
pub fn encode_snapshot(state: &PlaythroughState) -> Result<String, SnapshotError> {
    serde_json::to_string(state).map_err(|e| SnapshotError::Serialization(e.to_string()))
}

/// JSON → state. Missing or unknown fields are errors.
pub fn decode_snapshot(json: &str) -> Result<PlaythroughState, SnapshotError> {
    serde_json::from_str(json).map_err(|e| SnapshotError::Deserialization(e.to_string()))
}

/// Decode and check every invariant a live state holds.
pub fn restore_snapshot(json: &str) -> Result<PlaythroughState, SnapshotError> {
    let state = decode_snapshot(json)?;

    try_validate_roster(&state.agents)?;
    try_validate_assignments(&state.roles)?;

    if state.story_scene_index > FINAL_SCENE_INDEX {
        return Err(SnapshotError::OutOfRange(format!(
            "story_scene_index {} > {}",
            state.story_scene_index, FINAL_SCENE_INDEX
        )));
    }
    let min_unlocked = FIRST_CYCLE_ROLE_COUNT.min(state.roles.len());
    if state.unlocked_role_count < min_unlocked || state.unlocked_role_count > state.roles.len() {
        return Err(SnapshotError::OutOfRange(format!(
            "unlocked_role_count {} outside [{}, {}]",
            state.unlocked_role_count,
            min_unlocked,
            state.roles.len()
        )));
    }

    Ok(state)
}

/// SHA-256 of a snapshot's JSON (lowercase hex).
pub fn snapshot_hash(json: &str) -> String {
    sha256_hex(json.as_bytes())
}

pub fn seal_snapshot(sequence: u64, state: &PlaythroughState) -> Result<SnapshotEnvelope, SnapshotError> {
    let state_json = encode_snapshot(state)?;
    let hash = snapshot_hash(&state_json);
    Ok(SnapshotEnvelope {
        sequence,
        state_json,
        hash,
        sim_version: SIM_VERSION,
    })
}

/// Verify version and hash, then restore.
pub fn open_snapshot(envelope: &SnapshotEnvelope) -> Result<PlaythroughState, SnapshotError> {
    if envelope.sim_version != SIM_VERSION {
        return Err(SnapshotError::VersionMismatch {
            found: envelope.sim_version,
            expected: SIM_VERSION,
        });
    }
    let computed = snapshot_hash(&envelope.state_json);
    if computed != envelope.hash {
        return Err(SnapshotError::HashMismatch {
            recorded: envelope.hash.clone(),
            computed,
        });
    }
    restore_snapshot(&envelope.state_json)
}
