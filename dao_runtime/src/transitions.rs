//! Play-through transitions.
//!
//! ALL state-mutation logic lives here: `state + action -> next state`.
//! The input state is never mutated; a clone is taken first.
//!
//! Actions the current state cannot honour (assigning a locked hat,
//! running with empty hats) are ignored, not errors: the result says so
//! and the returned state equals the input.

use serde::Serialize;
use tracing::{debug, info};

use dao_engine::domain::RunResult;
use dao_engine::invariants::{try_validate_assignments, try_validate_run_result};
use dao_engine::{apply_narrative_override, generate_artifacts, simulate_run};

use crate::actions::Action;
use crate::error::PlaythroughError;
use crate::playthrough::{roles_fully_assigned, PlaythroughState};
use crate::story::clamp_scene_index;

pub const ACCEPTED_LOG: &str = "Deployment accepted by client.";
pub const REJECTED_LOG: &str = "Deployment rejected. Role graph needs expansion.";

/// Structured outcome of one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionResult {
    pub action: String,
    pub applied: bool,
    pub reason: String,
    pub run: Option<RunResult>,
}

impl TransitionResult {
    fn applied(action: &Action) -> Self {
        Self {
            action: action.kind().to_string(),
            applied: true,
            reason: String::new(),
            run: None,
        }
    }

    fn ignored(action: &Action, reason: String) -> Self {
        Self {
            action: action.kind().to_string(),
            applied: false,
            reason,
            run: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Public dispatcher
// ---------------------------------------------------------------------------

/// Apply `action` to `state` and return `(next_state, result)`.
pub fn apply_action(
    state: &PlaythroughState,
    action: &Action,
) -> Result<(PlaythroughState, TransitionResult), PlaythroughError> {
    let mut next = state.clone();

    let result = match action {
        Action::SetScene { index } => {
            next.story_scene_index = clamp_scene_index(*index);
            TransitionResult::applied(action)
        }
        Action::AdvanceStory => {
            next.story_scene_index = clamp_scene_index(state.story_scene_index as i64 + 1);
            TransitionResult::applied(action)
        }
        Action::RetreatStory => {
            next.story_scene_index = clamp_scene_index(state.story_scene_index as i64 - 1);
            TransitionResult::applied(action)
        }
        Action::UnlockExpandedRoles => {
            next.unlocked_role_count = next.roles.len();
            TransitionResult::applied(action)
        }
        Action::AssignRole { role_id, agent_id } => apply_assign(&mut next, action, role_id, agent_id)?,
        Action::UnassignRole { role_id } => apply_unassign(&mut next, action, role_id),
        Action::RunProduction => apply_run_production(&mut next, action)?,
        Action::ContinueScene => return apply_continue_scene(state, action),
        Action::Reset => {
            next = PlaythroughState::new(state.config.clone())?;
            TransitionResult::applied(action)
        }
    };

    debug!(
        action = action.kind(),
        applied = result.applied,
        scene = next.story_scene_index,
        "applied action"
    );

    if !result.applied {
        return Ok((state.clone(), result));
    }
    Ok((next, result))
}

/// Apply a sequence of actions, stopping at the first error.
pub fn apply_actions(
    state: &PlaythroughState,
    actions: &[Action],
) -> Result<PlaythroughState, PlaythroughError> {
    let mut current = state.clone();
    for action in actions {
        let (next, _) = apply_action(&current, action)?;
        current = next;
    }
    Ok(current)
}

// ---------------------------------------------------------------------------
// Individual handlers (private)
// ---------------------------------------------------------------------------

fn apply_assign(
    state: &mut PlaythroughState,
    action: &Action,
    role_id: &str,
    agent_id: &str,
) -> Result<TransitionResult, PlaythroughError> {
    if !state.active_roles().iter().any(|r| r.id == role_id) {
        return Ok(TransitionResult::ignored(
            action,
            format!("role {:?} is locked or unknown", role_id),
        ));
    }
    let (role_name, agent_label) = match (state.role(role_id), state.agent(agent_id)) {
        (Some(role), Some(agent)) => (
            role.name.clone(),
            format!("{} ({})", agent.role_affinity, agent.id),
        ),
        _ => {
            return Ok(TransitionResult::ignored(
                action,
                format!("agent {:?} is not on the roster", agent_id),
            ));
        }
    };

    // An agent wears at most one hat: binding it here unbinds it elsewhere.
    for role in state.roles.iter_mut() {
        if role.id == role_id {
            role.assigned_agent_id = Some(agent_id.to_string());
        } else if role.assigned_agent_id.as_deref() == Some(agent_id) {
            role.assigned_agent_id = None;
        }
    }
    try_validate_assignments(&state.roles)?;

    state.push_log(format!("{} assigned to {}", role_name, agent_label));
    Ok(TransitionResult::applied(action))
}

fn apply_unassign(state: &mut PlaythroughState, action: &Action, role_id: &str) -> TransitionResult {
    let role = match state.roles.iter_mut().find(|r| r.id == role_id) {
        Some(role) => role,
        None => return TransitionResult::ignored(action, format!("role {:?} does not exist", role_id)),
    };
    role.assigned_agent_id = None;
    let message = format!("{} unassigned", role.name);
    state.push_log(message);
    TransitionResult::applied(action)
}

fn apply_run_production(
    state: &mut PlaythroughState,
    action: &Action,
) -> Result<TransitionResult, PlaythroughError> {
    if !roles_fully_assigned(state.active_roles()) {
        return Ok(TransitionResult::ignored(
            action,
            "active roles are not fully assigned".to_string(),
        ));
    }

    let computed = simulate_run(&state.run_state())?;
    try_validate_run_result(&computed)?;

    let result = apply_narrative_override(computed, state.run_count);
    let artifacts = generate_artifacts(&result, state.brief());

    state.run_count = state.run_count.saturating_add(1);
    state.treasury = state.treasury.saturating_sub(result.cost);
    state.latest_artifacts = Some(artifacts);
    state.latest_run = Some(result.clone());
    state.push_log(if result.passed { ACCEPTED_LOG } else { REJECTED_LOG }.to_string());

    info!(
        run = state.run_count,
        quality_score = result.quality_score,
        cost = result.cost,
        passed = result.passed,
        treasury = state.treasury,
        "production run complete"
    );

    Ok(TransitionResult {
        run: Some(result),
        ..TransitionResult::applied(action)
    })
}

/// Run the current scene's continue actions.
fn apply_continue_scene(
    state: &PlaythroughState,
    action: &Action,
) -> Result<(PlaythroughState, TransitionResult), PlaythroughError> {
    let scene = state.scene();
    let steps = scene.continue_actions();
    if steps.is_empty() {
        return Ok((
            state.clone(),
            TransitionResult::ignored(action, format!("scene {} has no continuation", scene.as_str())),
        ));
    }
    apply_steps(state, action, scene.as_str(), &steps)
}

/// Apply `steps` as one unit. If any step is ignored the whole action is
/// ignored and the input state comes back unchanged (a machine scene will
/// not advance past a run that could not start).
fn apply_steps(
    state: &PlaythroughState,
    action: &Action,
    scene: &str,
    steps: &[Action],
) -> Result<(PlaythroughState, TransitionResult), PlaythroughError> {
    let mut current = state.clone();
    let mut result = TransitionResult::applied(action);

    for step in steps {
        let (next, step_result) = apply_action(&current, step)?;
        if !step_result.applied {
            return Ok((
                state.clone(),
                TransitionResult::ignored(
                    action,
                    format!("{} in scene {}: {}", step.kind(), scene, step_result.reason),
                ),
            ));
        }
        if step_result.run.is_some() {
            result.run = step_result.run;
        }
        current = next;
    }

    Ok((current, result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::{SceneId, FINAL_SCENE_INDEX};

    fn tutorial() -> PlaythroughState {
        PlaythroughState::tutorial().unwrap()
    }

    #[test]
    fn test_story_navigation_clamps() {
        let state = tutorial();
        let (back, _) = apply_action(&state, &Action::RetreatStory).unwrap();
        assert_eq!(back.story_scene_index, 0);

        let (end, _) = apply_action(&state, &Action::SetScene { index: 400 }).unwrap();
        assert_eq!(end.story_scene_index, FINAL_SCENE_INDEX);

        let (after, _) = apply_action(&end, &Action::AdvanceStory).unwrap();
        assert_eq!(after.story_scene_index, FINAL_SCENE_INDEX);
    }

    #[test]
    fn test_input_state_untouched() {
        let state = tutorial();
        let snapshot = state.clone();
        let _ = apply_action(&state, &Action::assign("hat-01", "agent-03")).unwrap();
        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_locked_role_is_ignored() {
        let state = tutorial();
        let (next, result) = apply_action(&state, &Action::assign("hat-02", "agent-01")).unwrap();
        assert!(!result.applied);
        assert_eq!(next, state);
    }

    #[test]
    fn test_unknown_agent_is_ignored() {
        let state = tutorial();
        let (_, result) = apply_action(&state, &Action::assign("hat-01", "agent-42")).unwrap();
        assert!(!result.applied);
        assert!(result.reason.contains("agent-42"));
    }

    #[test]
    fn test_reassigning_agent_clears_prior_binding() {
        let state = apply_actions(
            &tutorial(),
            &[
                Action::UnlockExpandedRoles,
                Action::assign("hat-01", "agent-01"),
                Action::assign("hat-02", "agent-01"),
            ],
        )
        .unwrap();

        assert_eq!(state.role("hat-01").unwrap().assigned_agent_id, None);
        assert_eq!(
            state.role("hat-02").unwrap().assigned_agent_id.as_deref(),
            Some("agent-01")
        );
    }

    #[test]
    fn test_assignment_log_message() {
        let (state, _) = apply_action(&tutorial(), &Action::assign("hat-01", "agent-01")).unwrap();
        assert_eq!(
            state.assignment_log[0].message,
            "Builder Agent assigned to Prompt Engineer (agent-01)"
        );

        let (state, _) = apply_action(&state, &Action::UnassignRole { role_id: "hat-01".into() }).unwrap();
        assert_eq!(state.assignment_log[0].message, "Builder Agent unassigned");
        assert_eq!(state.role("hat-01").unwrap().assigned_agent_id, None);
    }

    #[test]
    fn test_run_requires_full_assignment() {
        let state = tutorial();
        let (next, result) = apply_action(&state, &Action::RunProduction).unwrap();
        assert!(!result.applied);
        assert_eq!(next.run_count, 0);
    }

    #[test]
    fn test_continue_on_machine_scene_waits_for_hats() {
        let (state, _) = apply_action(&tutorial(), &Action::SetScene { index: 8 }).unwrap();
        assert_eq!(state.scene(), SceneId::MachineFirst);

        let (same, result) = apply_action(&state, &Action::ContinueScene).unwrap();
        assert!(!result.applied);
        assert_eq!(same.story_scene_index, 8);
    }

    #[test]
    fn test_ignored_later_step_rolls_back_earlier_ones() {
        let state = tutorial();
        let steps = [Action::AdvanceStory, Action::RunProduction];
        let (next, result) = apply_steps(&state, &Action::ContinueScene, "messages-warmup", &steps).unwrap();
        assert!(!result.applied);
        assert!(result.reason.starts_with("run_production in scene messages-warmup"));
        assert_eq!(next, state);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let state = apply_actions(
            &tutorial(),
            &[Action::assign("hat-01", "agent-01"), Action::RunProduction, Action::AdvanceStory],
        )
        .unwrap();
        assert_eq!(state.run_count, 1);

        let (reset, _) = apply_action(&state, &Action::Reset).unwrap();
        assert_eq!(reset, tutorial());
    }
}
