#![forbid(unsafe_code)]

//! DAO tutorial — play-through runtime.
//!
//! Wraps the `dao_engine` kernel with the tutorial content, the story
//! scene table, an explicit state + action reducer, sessions, replay,
//! drift detection and a snapshot codec.
//!
//! No simulation logic lives here — runs are delegated to the kernel.

pub mod tutorial;
pub mod story;
pub mod actions;
pub mod playthrough;
pub mod transitions;
pub mod error;
pub mod session;
pub mod replay;
pub mod drift;
pub mod snapshot_codec;

pub use actions::Action;
pub use error::PlaythroughError;
pub use playthrough::PlaythroughState;
pub use transitions::{apply_action, apply_actions, TransitionResult};
pub use tutorial::TutorialConfig;
