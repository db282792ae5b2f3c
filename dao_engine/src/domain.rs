//! Core domain types.
//!
//! Pure data. No behaviour beyond small accessors; all simulation logic
//! lives in `simulate`, `agents`, `artifacts` and `narrative`.

use serde::{Deserialize, Serialize};

// ── Roster & roles ─────────────────────────────────────────────────

/// An autonomous worker. Generated once per seed, immutable after.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Agent {
    pub id: String,              // agent-01 .. agent-08
    pub role_affinity: String,
    pub creativity: i64,         // [42, 95]
    pub reliability: i64,        // [35, 96]
    pub speed: i64,              // [40, 95]
    pub cost: i64,               // >= 12
}

/// A hat in the role tree, optionally bound to one agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HatRole {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_agent_id: Option<String>,
}

impl HatRole {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            assigned_agent_id: None,
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.assigned_agent_id.is_some()
    }
}

/// The client contract. Supplied wholesale to every simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Brief {
    pub id: String,
    pub client_name: String,
    pub mission: String,
    pub requirements: Vec<String>,
    pub base_score: i64,
    pub pass_threshold: i64,
}

// ── Simulation input ───────────────────────────────────────────────

/// Everything one simulation reads. Built fresh by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunState {
    pub seed: i64,
    pub treasury: i64,
    pub brief: Brief,
    pub roles: Vec<HatRole>,
    pub agents: Vec<Agent>,
}

// ── Simulation output ──────────────────────────────────────────────

/// `total == base + agents + events`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CostBreakdown {
    pub base: i64,
    pub agents: i64,
    pub events: i64,
    pub total: i64,
}

/// Signed score terms. `total` always mirrors `RunResult::quality_score`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoreBreakdown {
    pub base: i64,
    pub creativity_influence: i64,
    pub speed_influence: i64,
    pub reliability_penalty: i64,
    pub role_coverage_bonus: i64,
    pub event_modifier: i64,
    pub budget_penalty: i64,
    pub total: i64,
}

impl ScoreBreakdown {
    /// Unclamped sum of every term, saturating at the `i64` bounds.
    pub fn raw_sum(&self) -> i64 {
        self.base
            .saturating_add(self.creativity_influence)
            .saturating_add(self.speed_influence)
            .saturating_add(self.role_coverage_bonus)
            .saturating_add(self.event_modifier)
            .saturating_sub(self.reliability_penalty)
            .saturating_sub(self.budget_penalty)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunDiagnostics {
    pub seed: i64,
    pub variance: i64,
    pub pass_threshold: i64,
    pub runway_after_run: i64,
    pub assigned_role_count: usize,
    pub total_role_count: usize,
    pub cost_breakdown: CostBreakdown,
    pub score_breakdown: ScoreBreakdown,
}

/// Outcome of one production run. Immutable once returned; the narrative
/// layer builds a modified copy rather than editing in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunResult {
    pub quality_score: i64,      // [0, 100]
    pub cost: i64,
    pub events: Vec<String>,     // append-only
    pub cid: String,             // bafy + 24 chars of [a-z2-7]
    pub passed: bool,
    pub diagnostics: RunDiagnostics,
}

/// Cosmetic post-run bundle. No lifecycle of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArtifactBundle {
    pub site_title: String,
    pub public_url: String,
    pub ens_name: String,
    pub cid: String,
    pub notes: Vec<String>,
}
