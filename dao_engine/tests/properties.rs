//! Property tests over the kernel's bounds and consistency rules.

use dao_engine::domain::{Brief, HatRole, RunState};
use dao_engine::invariants::{try_validate_roster, try_validate_run_result};
use dao_engine::{apply_narrative_override, generate_starting_agents, simulate_run, RngError, SeededRng};
use proptest::prelude::*;

fn brief(base_score: i64, pass_threshold: i64) -> Brief {
    Brief {
        id: "brief-prop".to_string(),
        client_name: "Prop Client".to_string(),
        mission: "Exercise the simulator.".to_string(),
        requirements: Vec::new(),
        base_score,
        pass_threshold,
    }
}

proptest! {
    #[test]
    fn int_stays_in_range(seed in any::<i64>(), min in -1_000i64..1_000, width in 0i64..500) {
        let mut rng = SeededRng::new(seed);
        for _ in 0..16 {
            let v = rng.int(min, min + width).unwrap();
            prop_assert!(v >= min && v <= min + width);
        }
    }

    #[test]
    fn int_rejects_inverted_range(seed in any::<i64>(), min in -1_000i64..1_000, gap in 1i64..100) {
        let mut rng = SeededRng::new(seed);
        prop_assert_eq!(
            rng.int(min, min - gap),
            Err(RngError::InvalidRange { min, max: min - gap })
        );
    }

    #[test]
    fn next_is_unit_interval(seed in any::<f64>()) {
        let mut rng = SeededRng::new(seed);
        for _ in 0..16 {
            let v = rng.next_f64();
            prop_assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn rosters_are_valid(seed in any::<i64>()) {
        let agents = generate_starting_agents(seed).unwrap();
        prop_assert_eq!(agents.len(), 8);
        prop_assert!(try_validate_roster(&agents).is_ok());
    }

    #[test]
    fn results_are_consistent(
        seed in any::<i64>(),
        treasury in -500i64..2_000,
        assigned in proptest::collection::vec(proptest::option::of(0usize..8), 0..6),
        base_score in 0i64..100,
        pass_threshold in 10i64..95,
    ) {
        let agents = generate_starting_agents(seed).unwrap();
        let mut taken = [false; 8];
        let roles: Vec<HatRole> = assigned
            .iter()
            .enumerate()
            .map(|(i, slot)| {
                let mut role = HatRole::new(&format!("hat-{:02}", i + 1), "Prop Hat");
                if let Some(idx) = slot {
                    if !taken[*idx] {
                        taken[*idx] = true;
                        role.assigned_agent_id = Some(agents[*idx].id.clone());
                    }
                }
                role
            })
            .collect();
        let state = RunState { seed, treasury, brief: brief(base_score, pass_threshold), roles, agents };

        let result = simulate_run(&state).unwrap();
        prop_assert!(try_validate_run_result(&result).is_ok());
        prop_assert_eq!(result.diagnostics.runway_after_run, treasury - result.cost);
        if result.diagnostics.runway_after_run < 0 {
            prop_assert!(!result.passed);
            prop_assert!(result.diagnostics.score_breakdown.budget_penalty > 0);
        }
        prop_assert_eq!(result.passed, result.quality_score >= pass_threshold
            && result.diagnostics.runway_after_run >= 0);
        prop_assert_eq!(&simulate_run(&state).unwrap(), &result);

        let first = apply_narrative_override(result.clone(), 0);
        prop_assert!(!first.passed);
        prop_assert!(first.quality_score <= result.quality_score);
        prop_assert_eq!(first.diagnostics.score_breakdown.total, first.quality_score);

        let second = apply_narrative_override(result.clone(), 1);
        prop_assert!(second.passed);
        prop_assert!(second.quality_score >= result.quality_score);
        prop_assert_eq!(second.cid, result.cid);
    }
}
