#![forbid(unsafe_code)]

//! DAO tutorial kernel — deterministic run simulation.
//!
//! Pure functions over immutable inputs. Every random draw flows through
//! a [`rng::SeededRng`] created for that call chain alone, so identical
//! inputs always produce identical outputs (down to the pseudo CID).

/// Version of the simulation rules. Fixtures recorded against one version
/// are not expected to replay against another.
pub const SIM_VERSION: u32 = 1;

pub mod arithmetic;
pub mod error;
pub mod rng;
pub mod domain;
pub mod agents;
pub mod events;
pub mod simulate;
pub mod artifacts;
pub mod narrative;
pub mod invariants;
pub mod hashing;

pub use agents::generate_starting_agents;
pub use artifacts::generate_artifacts;
pub use error::RngError;
pub use narrative::apply_narrative_override;
pub use rng::{hash_seed_parts, normalize_seed, SeededRng};
pub use simulate::simulate_run;
