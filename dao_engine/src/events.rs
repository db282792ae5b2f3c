//! Narrative run events.
//!
//! Each run rolls exactly one template from a fixed table, then applies
//! reliability-scaled jitter. Jitter moves quality both ways but can only
//! ever add to cost.

use crate::arithmetic::round_half_up;
use crate::error::RngError;
use crate::rng::SeededRng;

/// A row of the event table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventTemplate {
    pub label: &'static str,
    pub quality_delta: i64,
    pub cost_delta: i64,
}

/// Order is part of the seed contract.
pub const EVENT_TABLE: [EventTemplate; 5] = [
    EventTemplate {
        label: "Prompt drift in design handoff",
        quality_delta: -10,
        cost_delta: 10,
    },
    EventTemplate {
        label: "Scope swell from late client asks",
        quality_delta: -6,
        cost_delta: 14,
    },
    EventTemplate {
        label: "Clean execution window",
        quality_delta: 5,
        cost_delta: 0,
    },
    EventTemplate {
        label: "Reusable component breakthrough",
        quality_delta: 9,
        cost_delta: -4,
    },
    EventTemplate {
        label: "Ops relay cache hit",
        quality_delta: 6,
        cost_delta: -2,
    },
];

/// Smallest jitter bound, reached at reliability >= 85.
pub const MIN_VARIANCE: i64 = 2;

/// The event a run actually experienced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolledEvent {
    pub template: EventTemplate,
    pub label: String,
    pub quality_delta: i64,
    pub cost_delta: i64,
    pub variance: i64,
}

/// Jitter bound for a given mean reliability.
pub fn variance_for(mean_reliability: f64) -> i64 {
    MIN_VARIANCE.max(round_half_up((100.0 - mean_reliability) / 10.0))
}

/// Roll one event. Consumes one `next_f64` and one `int` draw.
pub fn roll_run_event(rng: &mut SeededRng, mean_reliability: f64) -> Result<RolledEvent, RngError> {
    let roll = rng.next_f64();
    let index = (roll * EVENT_TABLE.len() as f64).floor() as usize;
    let template = EVENT_TABLE.get(index).copied().unwrap_or(EVENT_TABLE[0]);

    let variance = variance_for(mean_reliability);
    let jitter = rng.int(-variance, variance)?;

    let quality_delta = template.quality_delta + jitter;
    let cost_delta = 0.max(template.cost_delta + jitter.max(0));

    Ok(RolledEvent {
        template,
        label: format!("{} ({:+} quality)", template.label, quality_delta),
        quality_delta,
        cost_delta,
        variance,
    })
}
