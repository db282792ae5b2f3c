//! Replay orchestrator — rebuild a play-through from its action log.
//!
//! No shortcuts, no cached state: every action goes back through
//! `transitions::apply_action` from a fresh state.

use dao_engine::hashing::canonical_hash;

use crate::actions::Action;
use crate::error::PlaythroughError;
use crate::playthrough::PlaythroughState;
use crate::transitions::apply_actions;
use crate::tutorial::TutorialConfig;

/// Canonical hash of a play-through state.
pub fn state_hash(state: &PlaythroughState) -> Result<String, PlaythroughError> {
    Ok(canonical_hash(state)?)
}

/// Rebuild the state reached by `actions` from a fresh `config`
/// play-through. Returns `(final_state, canonical_hash)`.
pub fn rebuild_state(
    config: &TutorialConfig,
    actions: &[Action],
) -> Result<(PlaythroughState, String), PlaythroughError> {
    let initial = PlaythroughState::new(config.clone())?;
    let state = apply_actions(&initial, actions)?;
    let hash = state_hash(&state)?;
    Ok((state, hash))
}

/// Rebuild and return only the canonical hash.
pub fn rebuild_hash(config: &TutorialConfig, actions: &[Action]) -> Result<String, PlaythroughError> {
    let (_, hash) = rebuild_state(config, actions)?;
    Ok(hash)
}
