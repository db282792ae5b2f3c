//! Run simulation — the scoring and cost engine.
//!
//! `simulate_run` is a pure function of its `RunState`. Two RNG streams
//! are derived from the inputs: one for the event roll, one for the
//! pseudo CID. Neither outlives the call.

use std::collections::BTreeMap;

use tracing::debug;

use crate::arithmetic::{clamp, mean, round_half_up};
use crate::domain::{
    Agent, CostBreakdown, RunDiagnostics, RunResult, RunState, ScoreBreakdown,
};
use crate::error::RngError;
use crate::events::roll_run_event;
use crate::rng::{hash_seed_parts, SeededRng};

/// Fixed operating cost of any run, before per-role overhead.
pub const BASE_OPERATIONAL_COST: i64 = 36;
/// Overhead per role under consideration, assigned or not.
pub const PER_ROLE_COST: i64 = 2;
/// Bonus for full role coverage.
pub const FULL_COVERAGE_BONUS: i64 = 14;
/// Penalty per uncovered role.
pub const MISSING_ROLE_PENALTY: i64 = 10;
/// Reliability below this mean is penalised.
pub const RELIABILITY_FLOOR: f64 = 62.0;
/// Cap on the penalty for running the treasury negative.
pub const MAX_BUDGET_PENALTY: i64 = 35;

pub const CID_PREFIX: &str = "bafy";
pub const CID_ALPHABET: &[u8; 32] = b"abcdefghijklmnopqrstuvwxyz234567";
pub const CID_BODY_LEN: usize = 24;

/// Agents bound to roles, in role order. Unassigned roles and dangling
/// references are skipped.
pub fn assigned_agents<'a>(state: &'a RunState) -> Vec<&'a Agent> {
    let by_id: BTreeMap<&str, &Agent> = state
        .agents
        .iter()
        .map(|a| (a.id.as_str(), a))
        .collect();

    state
        .roles
        .iter()
        .filter_map(|role| role.assigned_agent_id.as_deref())
        .filter_map(|id| by_id.get(id).copied())
        .collect()
}

/// Deterministic `bafy…` identifier from a seed.
pub fn build_pseudo_cid(seed: u32) -> String {
    let mut rng = SeededRng::new(seed);
    let mut cid = String::with_capacity(CID_PREFIX.len() + CID_BODY_LEN);
    cid.push_str(CID_PREFIX);
    for _ in 0..CID_BODY_LEN {
        let index = (rng.next_f64() * CID_ALPHABET.len() as f64).floor() as usize;
        cid.push(CID_ALPHABET[index] as char);
    }
    cid
}

/// Simulate one production run.
pub fn simulate_run(state: &RunState) -> Result<RunResult, RngError> {
    let assigned = assigned_agents(state);
    let assigned_count = assigned.len();
    let total_roles = state.roles.len();
    let missing = (total_roles - assigned_count) as i64;

    let avg_creativity = mean(assigned.iter().map(|a| a.creativity));
    let avg_reliability = mean(assigned.iter().map(|a| a.reliability));
    let avg_speed = mean(assigned.iter().map(|a| a.speed));
    let rounded_reliability = round_half_up(avg_reliability);

    let run_seed = hash_seed_parts(&[state.seed, assigned_count as i64, rounded_reliability]);
    let mut rng = SeededRng::new(run_seed);
    let event = roll_run_event(&mut rng, avg_reliability)?;

    // -- cost first: the budget penalty feeds the score --
    let base_cost = BASE_OPERATIONAL_COST + total_roles as i64 * PER_ROLE_COST;
    let agent_cost = assigned.iter().fold(0i64, |sum, a| sum.saturating_add(a.cost));
    let event_cost = event.cost_delta;
    let total_cost = base_cost.saturating_add(agent_cost).saturating_add(event_cost);

    // Saturating: treasury and costs are caller-supplied and unbounded.
    let runway_after_run = state.treasury.saturating_sub(total_cost);
    let budget_penalty = if runway_after_run < 0 {
        runway_after_run.unsigned_abs().min(MAX_BUDGET_PENALTY as u64) as i64
    } else {
        0
    };

    // -- score --
    let base_score = state.brief.base_score;
    let creativity_influence = round_half_up((avg_creativity - 50.0) * 0.55);
    let speed_influence = round_half_up((avg_speed - 50.0) * 0.35);
    let role_coverage_bonus = if assigned_count == total_roles {
        FULL_COVERAGE_BONUS
    } else {
        -missing * MISSING_ROLE_PENALTY
    };
    let reliability_penalty = round_half_up(
        (RELIABILITY_FLOOR - avg_reliability).max(0.0) * 0.8 + missing as f64 * 4.0,
    );

    let mut score_breakdown = ScoreBreakdown {
        base: base_score,
        creativity_influence,
        speed_influence,
        reliability_penalty,
        role_coverage_bonus,
        event_modifier: event.quality_delta,
        budget_penalty,
        total: 0,
    };
    let quality_score = clamp(score_breakdown.raw_sum(), 0, 100);
    score_breakdown.total = quality_score;

    let pass_threshold = state.brief.pass_threshold;
    let passed = quality_score >= pass_threshold && runway_after_run >= 0;

    let cid = build_pseudo_cid(hash_seed_parts(&[
        state.seed,
        quality_score,
        total_cost,
        rounded_reliability,
        event.quality_delta,
    ]));

    debug!(
        seed = state.seed,
        assigned = assigned_count,
        total_roles,
        quality_score,
        total_cost,
        passed,
        "simulated run"
    );

    Ok(RunResult {
        quality_score,
        cost: total_cost,
        events: vec![event.label],
        cid,
        passed,
        diagnostics: RunDiagnostics {
            seed: state.seed,
            variance: event.variance,
            pass_threshold,
            runway_after_run,
            assigned_role_count: assigned_count,
            total_role_count: total_roles,
            cost_breakdown: CostBreakdown {
                base: base_cost,
                agents: agent_cost,
                events: event_cost,
                total: total_cost,
            },
            score_breakdown,
        },
    })
}
