//! Narrative override layer.
//!
//! Tutorial pacing requires the first production run of a play-through
//! to fail and the second to pass, whatever the dice said. This layer
//! rewrites only `quality_score`, `passed`, `score_breakdown.total` and
//! appends to `events`; every other field is carried through untouched.
//!
//! The forced score is not clamped: a pass threshold above 94 or below 8
//! yields a `quality_score` outside [0, 100].

use tracing::info;

use crate::domain::RunResult;

/// Appended when the first cycle is forced to fail.
pub const FIRST_CYCLE_EVENT: &str = "Critical role coverage gap triggered client rejection";
/// Appended when the second cycle is forced to pass.
pub const SECOND_CYCLE_EVENT: &str = "Gremlin patch cadence stabilized client confidence";

/// Headroom below the pass threshold for a forced failure.
pub const FAILURE_MARGIN: i64 = 8;
/// Headroom above the pass threshold for a forced success.
pub const SUCCESS_MARGIN: i64 = 6;

/// Which scripted beat a run falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrativeCycle {
    ForcedFailure,
    ForcedSuccess,
    Unscripted,
}

impl NarrativeCycle {
    /// `prior_runs` is the number of simulations already completed in the
    /// current play-through.
    pub fn from_prior_runs(prior_runs: u32) -> Self {
        match prior_runs {
            0 => NarrativeCycle::ForcedFailure,
            1 => NarrativeCycle::ForcedSuccess,
            _ => NarrativeCycle::Unscripted,
        }
    }
}

fn with_score(mut result: RunResult, score: i64) -> RunResult {
    result.quality_score = score;
    result.diagnostics.score_breakdown.total = score;
    result
}

fn force_failure(result: RunResult) -> RunResult {
    let threshold = result.diagnostics.pass_threshold;
    let capped = result.quality_score.min(threshold.saturating_sub(FAILURE_MARGIN));
    let mut out = with_score(result, capped);
    out.passed = false;
    out.events.push(FIRST_CYCLE_EVENT.to_string());
    out
}

fn force_success(result: RunResult) -> RunResult {
    if result.passed {
        return result;
    }
    let threshold = result.diagnostics.pass_threshold;
    let boosted = result.quality_score.max(threshold.saturating_add(SUCCESS_MARGIN));
    let mut out = with_score(result, boosted);
    out.passed = true;
    out.events.push(SECOND_CYCLE_EVENT.to_string());
    out
}

/// Apply the scripted outcome for the run that follows `prior_runs`
/// completed runs.
pub fn apply_narrative_override(result: RunResult, prior_runs: u32) -> RunResult {
    let cycle = NarrativeCycle::from_prior_runs(prior_runs);
    let computed_score = result.quality_score;
    let computed_passed = result.passed;

    let out = match cycle {
        NarrativeCycle::ForcedFailure => force_failure(result),
        NarrativeCycle::ForcedSuccess => force_success(result),
        NarrativeCycle::Unscripted => return result,
    };

    if out.quality_score != computed_score || out.passed != computed_passed {
        info!(
            ?cycle,
            computed_score,
            final_score = out.quality_score,
            passed = out.passed,
            "narrative override applied"
        );
    }
    out
}
