//! Canonical hashing.
//!
//! Deterministic serialization + SHA-256. Field order follows struct
//! declaration order (serde derive), maps are `BTreeMap`, and there is
//! no whitespace, so identical values always hash identically.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::domain::RunResult;
use crate::SIM_VERSION;

/// Compact canonical JSON bytes of any serializable kernel value.
pub fn canonical_serialize<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(value)
}

/// Lowercase hex SHA-256 of raw bytes.
pub fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// SHA-256 over `SIM_VERSION` followed by the canonical JSON.
pub fn canonical_hash<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let mut bytes = format!("{}:", SIM_VERSION).into_bytes();
    bytes.extend(canonical_serialize(value)?);
    Ok(sha256_hex(&bytes))
}

/// Fingerprint of a run result, for determinism checks.
pub fn run_fingerprint(result: &RunResult) -> Result<String, serde_json::Error> {
    canonical_hash(result)
}
