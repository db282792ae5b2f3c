//! Drift detection — determinism verification and state comparison.

use std::collections::BTreeMap;

use crate::actions::Action;
use crate::error::PlaythroughError;
use crate::playthrough::PlaythroughState;
use crate::replay;
use crate::tutorial::TutorialConfig;

/// Replay the same actions twice and require identical hashes.
pub fn verify_determinism(config: &TutorialConfig, actions: &[Action]) -> Result<String, PlaythroughError> {
    let first = replay::rebuild_hash(config, actions)?;
    let second = replay::rebuild_hash(config, actions)?;
    if first != second {
        return Err(PlaythroughError::Determinism { first, second });
    }
    Ok(first)
}

/// Hat binding that differs between two states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentChange {
    pub role_id: String,
    pub before: Option<String>,
    pub after: Option<String>,
}

/// Structured comparison of two play-through states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriftReport {
    pub treasury_a: i64,
    pub treasury_b: i64,
    pub treasury_delta: i64,
    pub run_count_a: u32,
    pub run_count_b: u32,
    pub run_count_delta: i64,
    pub scene_index_a: usize,
    pub scene_index_b: usize,
    pub unlocked_roles_delta: i64,
    pub assignment_changes: Vec<AssignmentChange>,
    pub latest_cid_changed: bool,
}

impl DriftReport {
    pub fn is_empty(&self) -> bool {
        self.treasury_delta == 0
            && self.run_count_delta == 0
            && self.scene_index_a == self.scene_index_b
            && self.unlocked_roles_delta == 0
            && self.assignment_changes.is_empty()
            && !self.latest_cid_changed
    }
}

pub fn compare_states(state_a: &PlaythroughState, state_b: &PlaythroughState) -> DriftReport {
    let mut bindings: BTreeMap<&str, (Option<String>, Option<String>)> = BTreeMap::new();
    for role in &state_a.roles {
        bindings.entry(role.id.as_str()).or_default().0 = role.assigned_agent_id.clone();
    }
    for role in &state_b.roles {
        bindings.entry(role.id.as_str()).or_default().1 = role.assigned_agent_id.clone();
    }
    let assignment_changes = bindings
        .into_iter()
        .filter(|(_, (before, after))| before != after)
        .map(|(role_id, (before, after))| AssignmentChange {
            role_id: role_id.to_string(),
            before,
            after,
        })
        .collect();

    let cid_a = state_a.latest_run.as_ref().map(|r| r.cid.as_str());
    let cid_b = state_b.latest_run.as_ref().map(|r| r.cid.as_str());

    DriftReport {
        treasury_a: state_a.treasury,
        treasury_b: state_b.treasury,
        treasury_delta: state_b.treasury - state_a.treasury,
        run_count_a: state_a.run_count,
        run_count_b: state_b.run_count,
        run_count_delta: state_b.run_count as i64 - state_a.run_count as i64,
        scene_index_a: state_a.story_scene_index,
        scene_index_b: state_b.story_scene_index,
        unlocked_roles_delta: state_b.unlocked_role_count as i64 - state_a.unlocked_role_count as i64,
        assignment_changes,
        latest_cid_changed: cid_a != cid_b,
    }
}
