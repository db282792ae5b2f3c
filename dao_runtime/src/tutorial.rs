//! Tutorial content — the contract, the hat tree and the tunables a
//! fresh play-through starts from.

use serde::{Deserialize, Serialize};

use dao_engine::domain::{Brief, HatRole};

pub const TUTORIAL_SEED: i64 = 424_242;
pub const TUTORIAL_TREASURY: i64 = 540;

/// Hats visible before the role tree is expanded.
pub const FIRST_CYCLE_ROLE_COUNT: usize = 1;

/// Newest-first assignment log keeps at most this many entries.
pub const ASSIGNMENT_LOG_LIMIT: usize = 8;

pub fn tutorial_brief() -> Brief {
    Brief {
        id: "brief-rfgc-01".to_string(),
        client_name: "Regen Frontier Global Conference".to_string(),
        mission: "Rescue a failing Web3 conference brand by rebuilding its website \
                  with autonomous operations."
            .to_string(),
        requirements: vec![
            "No human labor allowed".to_string(),
            "All authority flows through a Hats role tree".to_string(),
            "Ship an IPFS deployment mapped to ENS".to_string(),
            "Pass client review before treasury depletion".to_string(),
        ],
        base_score: 58,
        pass_threshold: 72,
    }
}

pub fn tutorial_roles() -> Vec<HatRole> {
    vec![
        HatRole::new("hat-01", "Builder Agent"),
        HatRole::new("hat-02", "Designer Agent"),
        HatRole::new("hat-03", "Reviewer Agent"),
        HatRole::new("hat-04", "Deployment Agent"),
    ]
}

/// Starting parameters of a play-through. `Default` is the tutorial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TutorialConfig {
    pub seed: i64,
    pub treasury: i64,
    pub brief: Brief,
    pub roles: Vec<HatRole>,
}

impl Default for TutorialConfig {
    fn default() -> Self {
        Self {
            seed: TUTORIAL_SEED,
            treasury: TUTORIAL_TREASURY,
            brief: tutorial_brief(),
            roles: tutorial_roles(),
        }
    }
}
