//! Invariant checks over kernel values.
//!
//! Non-panicking: every check returns the first violation found, tagged
//! with the rule it broke. Callers decide whether that is fatal.

use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

use crate::agents::MIN_AGENT_COST;
use crate::domain::{Agent, HatRole, RunResult};
use crate::simulate::{CID_ALPHABET, CID_BODY_LEN, CID_PREFIX};

/// Rule identifiers, rendered as `[INVARIANT:<name>]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    CostBreakdownSum,
    CostMatchesBreakdown,
    ScoreMatchesBreakdown,
    ScoreRange,
    EventsPresent,
    CidFormat,
    AgentBounds,
    DuplicateAgentIds,
    DuplicateRoleIds,
    AgentBoundTwice,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rule::CostBreakdownSum => "cost_breakdown_sum",
            Rule::CostMatchesBreakdown => "cost_matches_breakdown",
            Rule::ScoreMatchesBreakdown => "score_matches_breakdown",
            Rule::ScoreRange => "score_range",
            Rule::EventsPresent => "events_present",
            Rule::CidFormat => "cid_format",
            Rule::AgentBounds => "agent_bounds",
            Rule::DuplicateAgentIds => "duplicate_agent_ids",
            Rule::DuplicateRoleIds => "duplicate_role_ids",
            Rule::AgentBoundTwice => "agent_bound_twice",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[INVARIANT:{rule}] {detail}")]
pub struct InvariantViolation {
    pub rule: Rule,
    pub detail: String,
}

fn violation(rule: Rule, detail: String) -> Result<(), InvariantViolation> {
    Err(InvariantViolation { rule, detail })
}

// ---------------------------------------------------------------------------
// Run results
// ---------------------------------------------------------------------------

/// Breakdown totals, score range, events and CID shape.
pub fn try_validate_run_result(result: &RunResult) -> Result<(), InvariantViolation> {
    let cb = &result.diagnostics.cost_breakdown;
    if cb.base + cb.agents + cb.events != cb.total {
        return violation(
            Rule::CostBreakdownSum,
            format!(
                "base {} + agents {} + events {} != total {}",
                cb.base, cb.agents, cb.events, cb.total
            ),
        );
    }
    if result.cost != cb.total {
        return violation(
            Rule::CostMatchesBreakdown,
            format!("cost {} != breakdown total {}", result.cost, cb.total),
        );
    }

    let sb = &result.diagnostics.score_breakdown;
    if sb.total != result.quality_score {
        return violation(
            Rule::ScoreMatchesBreakdown,
            format!(
                "quality_score {} != breakdown total {}",
                result.quality_score, sb.total
            ),
        );
    }
    if !(0..=100).contains(&result.quality_score) {
        return violation(
            Rule::ScoreRange,
            format!("quality_score {} outside [0, 100]", result.quality_score),
        );
    }

    if result.events.is_empty() {
        return violation(Rule::EventsPresent, "run produced no events".to_string());
    }

    try_validate_cid(&result.cid)
}

/// `bafy` followed by exactly 24 characters of `[a-z2-7]`.
pub fn try_validate_cid(cid: &str) -> Result<(), InvariantViolation> {
    let body = match cid.strip_prefix(CID_PREFIX) {
        Some(body) => body,
        None => {
            return violation(Rule::CidFormat, format!("cid {:?} lacks {:?} prefix", cid, CID_PREFIX));
        }
    };
    if body.len() != CID_BODY_LEN || !body.bytes().all(|b| CID_ALPHABET.contains(&b)) {
        return violation(
            Rule::CidFormat,
            format!("cid {:?} must carry {} chars of [a-z2-7]", cid, CID_BODY_LEN),
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Roster and assignments
// ---------------------------------------------------------------------------

/// Attribute bounds, cost floor, unique ids.
pub fn try_validate_roster(agents: &[Agent]) -> Result<(), InvariantViolation> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    for agent in agents {
        if !seen.insert(agent.id.as_str()) {
            return violation(
                Rule::DuplicateAgentIds,
                format!("agent id {:?} appears more than once", agent.id),
            );
        }
        let in_bounds = (42..=95).contains(&agent.creativity)
            && (35..=96).contains(&agent.reliability)
            && (40..=95).contains(&agent.speed)
            && agent.cost >= MIN_AGENT_COST;
        if !in_bounds {
            return violation(
                Rule::AgentBounds,
                format!(
                    "agent {:?} out of bounds: creativity={} reliability={} speed={} cost={}",
                    agent.id, agent.creativity, agent.reliability, agent.speed, agent.cost
                ),
            );
        }
    }
    Ok(())
}

/// Unique role ids; no agent bound to more than one role.
pub fn try_validate_assignments(roles: &[HatRole]) -> Result<(), InvariantViolation> {
    let mut role_ids: BTreeSet<&str> = BTreeSet::new();
    let mut bound: BTreeSet<&str> = BTreeSet::new();
    for role in roles {
        if !role_ids.insert(role.id.as_str()) {
            return violation(
                Rule::DuplicateRoleIds,
                format!("role id {:?} appears more than once", role.id),
            );
        }
        if let Some(agent_id) = role.assigned_agent_id.as_deref() {
            if !bound.insert(agent_id) {
                return violation(
                    Rule::AgentBoundTwice,
                    format!("agent {:?} is bound to more than one role", agent_id),
                );
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::generate_starting_agents;

    #[test]
    fn test_generated_roster_is_valid() {
        for seed in [1_i64, 33, 777, 424_242] {
            assert_eq!(try_validate_roster(&generate_starting_agents(seed).unwrap()), Ok(()));
        }
    }

    #[test]
    fn test_roster_duplicate_ids() {
        let mut agents = generate_starting_agents(3).unwrap();
        agents[1].id = agents[0].id.clone();
        let err = try_validate_roster(&agents).unwrap_err();
        assert_eq!(err.rule, Rule::DuplicateAgentIds);
    }

    #[test]
    fn test_agent_bound_twice() {
        let mut a = HatRole::new("hat-01", "Builder Agent");
        let mut b = HatRole::new("hat-02", "Designer Agent");
        a.assigned_agent_id = Some("agent-01".to_string());
        b.assigned_agent_id = Some("agent-01".to_string());
        let err = try_validate_assignments(&[a, b]).unwrap_err();
        assert_eq!(err.rule, Rule::AgentBoundTwice);
        assert!(err.to_string().starts_with("[INVARIANT:agent_bound_twice]"));
    }

    #[test]
    fn test_cid_format() {
        assert!(try_validate_cid("bafyabcdefghijklmnopqrstuvwx").is_ok());
        assert!(try_validate_cid("bafyabcdefghijklmnopqrstuvw1").is_err());
        assert!(try_validate_cid("qmabcdefghijklmnopqrstuvwxyz").is_err());
        assert!(try_validate_cid("bafyabc").is_err());
    }
}
