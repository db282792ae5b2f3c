//! Play-through actions.
//!
//! Actions are pure data. They carry intent and payload only; all
//! transition logic lives in `transitions`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    SetScene { index: i64 },
    AdvanceStory,
    RetreatStory,
    UnlockExpandedRoles,
    AssignRole { role_id: String, agent_id: String },
    UnassignRole { role_id: String },
    RunProduction,
    /// Run the current scene's continue actions in order.
    ContinueScene,
    Reset,
}

impl Action {
    pub fn kind(&self) -> &'static str {
        match self {
            Action::SetScene { .. } => "set_scene",
            Action::AdvanceStory => "advance_story",
            Action::RetreatStory => "retreat_story",
            Action::UnlockExpandedRoles => "unlock_expanded_roles",
            Action::AssignRole { .. } => "assign_role",
            Action::UnassignRole { .. } => "unassign_role",
            Action::RunProduction => "run_production",
            Action::ContinueScene => "continue_scene",
            Action::Reset => "reset",
        }
    }

    pub fn assign(role_id: &str, agent_id: &str) -> Self {
        Action::AssignRole {
            role_id: role_id.to_string(),
            agent_id: agent_id.to_string(),
        }
    }
}
