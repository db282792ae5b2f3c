//! Play-through state and read-only selectors.
//!
//! `PlaythroughState` is an explicit value: transitions take one and
//! return a new one. Nothing here is global.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use dao_engine::domain::{Agent, ArtifactBundle, Brief, HatRole, RunResult, RunState};
use dao_engine::simulate::{BASE_OPERATIONAL_COST, PER_ROLE_COST};
use dao_engine::{generate_starting_agents, RngError};

use crate::story::{scene_at, SceneId};
use crate::tutorial::{TutorialConfig, ASSIGNMENT_LOG_LIMIT, FIRST_CYCLE_ROLE_COUNT};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssignmentLogEntry {
    pub id: String,
    pub message: String,
}

/// Complete play-through state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlaythroughState {
    pub config: TutorialConfig,
    pub story_scene_index: usize,
    pub unlocked_role_count: usize,
    pub seed: i64,
    pub treasury: i64,
    pub roles: Vec<HatRole>,
    pub agents: Vec<Agent>,
    pub latest_run: Option<RunResult>,
    pub latest_artifacts: Option<ArtifactBundle>,
    pub run_count: u32,
    pub assignment_log: Vec<AssignmentLogEntry>,   // newest first
    pub log_counter: u64,
}

impl PlaythroughState {
    /// Fresh play-through from `config`. The roster is generated from the
    /// config seed.
    pub fn new(config: TutorialConfig) -> Result<Self, RngError> {
        let agents = generate_starting_agents(config.seed)?;
        Ok(Self {
            story_scene_index: 0,
            unlocked_role_count: FIRST_CYCLE_ROLE_COUNT,
            seed: config.seed,
            treasury: config.treasury,
            roles: config.roles.clone(),
            agents,
            latest_run: None,
            latest_artifacts: None,
            run_count: 0,
            assignment_log: Vec::new(),
            log_counter: 0,
            config,
        })
    }

    /// Fresh tutorial play-through.
    pub fn tutorial() -> Result<Self, RngError> {
        Self::new(TutorialConfig::default())
    }

    pub fn brief(&self) -> &Brief {
        &self.config.brief
    }

    pub fn scene(&self) -> SceneId {
        scene_at(self.story_scene_index as i64)
    }

    /// Roles currently visible on the hat tree.
    pub fn active_roles(&self) -> &[HatRole] {
        active_roles(&self.roles, self.unlocked_role_count)
    }

    pub fn role(&self, role_id: &str) -> Option<&HatRole> {
        self.roles.iter().find(|r| r.id == role_id)
    }

    pub fn agent(&self, agent_id: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == agent_id)
    }

    /// Simulation input for the active roles.
    pub fn run_state(&self) -> RunState {
        RunState {
            seed: self.seed,
            treasury: self.treasury,
            brief: self.config.brief.clone(),
            roles: self.active_roles().to_vec(),
            agents: self.agents.clone(),
        }
    }

    /// Prepend a log entry, dropping the oldest past the limit.
    pub(crate) fn push_log(&mut self, message: String) {
        self.log_counter += 1;
        self.assignment_log.insert(
            0,
            AssignmentLogEntry {
                id: format!("log-{:04}", self.log_counter),
                message,
            },
        );
        self.assignment_log.truncate(ASSIGNMENT_LOG_LIMIT);
    }
}

// ---------------------------------------------------------------------------
// Selectors
// ---------------------------------------------------------------------------

/// The first `unlocked` roles, never fewer than the first-cycle count
/// (when that many exist).
pub fn active_roles(roles: &[HatRole], unlocked: usize) -> &[HatRole] {
    let count = unlocked.max(FIRST_CYCLE_ROLE_COUNT).min(roles.len());
    &roles[..count]
}

pub fn count_assigned_roles(roles: &[HatRole]) -> usize {
    roles.iter().filter(|r| r.is_assigned()).count()
}

pub fn roles_fully_assigned(roles: &[HatRole]) -> bool {
    roles.iter().all(HatRole::is_assigned)
}

/// Cost of a run before its event roll: base overhead plus assigned
/// agents. Dangling assignments cost nothing.
pub fn estimate_run_cost(roles: &[HatRole], agents: &[Agent]) -> i64 {
    let by_id: BTreeMap<&str, i64> = agents.iter().map(|a| (a.id.as_str(), a.cost)).collect();
    let assigned_cost: i64 = roles
        .iter()
        .filter_map(|r| r.assigned_agent_id.as_deref())
        .filter_map(|id| by_id.get(id))
        .sum();
    BASE_OPERATIONAL_COST + roles.len() as i64 * PER_ROLE_COST + assigned_cost
}

pub fn estimate_runway_after_run(treasury: i64, roles: &[HatRole], agents: &[Agent]) -> i64 {
    treasury - estimate_run_cost(roles, agents)
}
