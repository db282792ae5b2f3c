//! Starting roster generation.

use tracing::debug;

use crate::arithmetic::round_half_up;
use crate::domain::Agent;
use crate::error::RngError;
use crate::rng::SeededRng;

/// Descriptive affinity labels. Order is part of the seed contract.
pub const ROLE_AFFINITIES: [&str; 8] = [
    "Strategy Architect",
    "Frontend Builder",
    "Prompt Engineer",
    "QA Verifier",
    "Content Operator",
    "Deployment Wrangler",
    "Analytics Watcher",
    "Operations Relay",
];

pub const STARTING_AGENT_COUNT: usize = 8;

/// Floor applied to every generated agent cost.
pub const MIN_AGENT_COST: i64 = 12;

/// Generate the fixed-size starting roster for `seed`.
///
/// Draw order per agent: creativity, reliability, speed, cost jitter,
/// affinity. Changing it changes every roster.
pub fn generate_starting_agents(seed: i64) -> Result<Vec<Agent>, RngError> {
    let mut rng = SeededRng::new(seed);
    let mut agents = Vec::with_capacity(STARTING_AGENT_COUNT);

    for i in 0..STARTING_AGENT_COUNT {
        let creativity = rng.int(42, 95)?;
        let reliability = rng.int(35, 96)?;
        let speed = rng.int(40, 95)?;
        let jitter = rng.int(-3, 4)?;
        let cost = MIN_AGENT_COST.max(round_half_up(
            8.0 + creativity as f64 * 0.16
                + reliability as f64 * 0.14
                + speed as f64 * 0.11
                + jitter as f64,
        ));

        agents.push(Agent {
            id: format!("agent-{:02}", i + 1),
            role_affinity: rng.pick(&ROLE_AFFINITIES)?.to_string(),
            creativity,
            reliability,
            speed,
            cost,
        });
    }

    debug!(seed, count = agents.len(), "generated starting roster");
    Ok(agents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_for_fixed_seed() {
        assert_eq!(
            generate_starting_agents(101).unwrap(),
            generate_starting_agents(101).unwrap()
        );
    }

    #[test]
    fn test_changes_with_seed() {
        assert_ne!(
            generate_starting_agents(101).unwrap(),
            generate_starting_agents(202).unwrap()
        );
    }

    #[test]
    fn test_eight_bounded_agents_with_stable_ids() {
        let agents = generate_starting_agents(33).unwrap();
        assert_eq!(agents.len(), 8);
        assert_eq!(agents[0].id, "agent-01");
        assert_eq!(agents[7].id, "agent-08");

        for agent in &agents {
            assert!((42..=95).contains(&agent.creativity));
            assert!((35..=96).contains(&agent.reliability));
            assert!((40..=95).contains(&agent.speed));
            assert!(agent.cost >= MIN_AGENT_COST);
            assert!(ROLE_AFFINITIES.contains(&agent.role_affinity.as_str()));
        }
    }
}
