//! Session manager — one play-through with its ordered action log.
//!
//! Apply order:
//!   1. transitions::apply_action(state, action)  — may fail
//!   2. seal a snapshot if the interval is reached — may fail
//!   3. commit the state and append to the log    — only if applied
//!
//! Ignored actions leave no trace, so replaying the log reproduces the
//! state exactly. Storage of the log and snapshots is up to the caller.

use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::actions::Action;
use crate::error::PlaythroughError;
use crate::playthrough::PlaythroughState;
use crate::replay;
use crate::snapshot_codec::{open_snapshot, seal_snapshot, SnapshotEnvelope};
use crate::transitions::{apply_action, apply_actions, TransitionResult};
use crate::tutorial::TutorialConfig;

/// An applied action and its position in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActionRecord {
    pub sequence: u64,
    pub action: Action,
}

/// An isolated play-through.
pub struct Session {
    session_id: String,
    base: PlaythroughState,
    state: PlaythroughState,
    log: Vec<ActionRecord>,
    snapshot_interval: u64,
    snapshots: Vec<SnapshotEnvelope>,
}

impl Session {
    /// Fresh session. `snapshot_interval == 0` disables auto-snapshots.
    pub fn new(
        session_id: &str,
        config: TutorialConfig,
        snapshot_interval: u64,
    ) -> Result<Self, PlaythroughError> {
        let state = PlaythroughState::new(config)?;
        Ok(Self {
            session_id: session_id.to_string(),
            base: state.clone(),
            state,
            log: Vec::new(),
            snapshot_interval,
            snapshots: Vec::new(),
        })
    }

    /// Rebuild a session from a recorded action log.
    pub fn from_log(
        session_id: &str,
        config: TutorialConfig,
        log: Vec<ActionRecord>,
    ) -> Result<Self, PlaythroughError> {
        let base = PlaythroughState::new(config)?;
        let actions: Vec<Action> = log.iter().map(|r| r.action.clone()).collect();
        let state = apply_actions(&base, &actions)?;
        Ok(Self {
            session_id: session_id.to_string(),
            base,
            state,
            log,
            snapshot_interval: 0,
            snapshots: Vec::new(),
        })
    }

    /// Resume from a sealed snapshot. The log restarts at the snapshot's
    /// sequence; auto-snapshots continue on `snapshot_interval`.
    pub fn from_snapshot(
        session_id: &str,
        envelope: &SnapshotEnvelope,
        snapshot_interval: u64,
    ) -> Result<Self, PlaythroughError> {
        let state = open_snapshot(envelope)?;
        Ok(Self {
            session_id: session_id.to_string(),
            base: state.clone(),
            state,
            log: Vec::new(),
            snapshot_interval,
            snapshots: vec![envelope.clone()],
        })
    }

    /// Apply one action; record it if it took effect.
    pub fn apply(&mut self, action: Action) -> Result<TransitionResult, PlaythroughError> {
        let (next, result) = apply_action(&self.state, &action)?;
        if !result.applied {
            return Ok(result);
        }

        // A failed seal leaves the session untouched.
        let sequence = self.current_sequence() + 1;
        let snapshot = if self.snapshot_interval > 0 && sequence % self.snapshot_interval == 0 {
            Some(seal_snapshot(sequence, &next)?)
        } else {
            None
        };

        self.state = next;
        self.log.push(ActionRecord { sequence, action });
        if let Some(snapshot) = snapshot {
            self.snapshots.push(snapshot);
            debug!(session = %self.session_id, sequence, "sealed snapshot");
        }

        Ok(result)
    }

    /// Rebuild the state from the session base by replaying the whole
    /// log. Returns the canonical hash.
    pub fn replay_full(&mut self) -> Result<String, PlaythroughError> {
        let actions: Vec<Action> = self.log.iter().map(|r| r.action.clone()).collect();
        self.state = apply_actions(&self.base, &actions)?;
        replay::state_hash(&self.state)
    }

    pub fn state(&self) -> &PlaythroughState {
        &self.state
    }

    pub fn log(&self) -> &[ActionRecord] {
        &self.log
    }

    pub fn snapshots(&self) -> &[SnapshotEnvelope] {
        &self.snapshots
    }

    pub fn current_hash(&self) -> Result<String, PlaythroughError> {
        replay::state_hash(&self.state)
    }

    /// Sequence of the last applied action (a resumed session counts
    /// from its snapshot).
    pub fn current_sequence(&self) -> u64 {
        match (self.log.last(), self.snapshots.last()) {
            (Some(record), _) => record.sequence,
            (None, Some(snapshot)) => snapshot.sequence,
            (None, None) => 0,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

/// Thread-safe session handle.
pub struct SharedSession {
    inner: Mutex<Session>,
}

impl SharedSession {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Mutex::new(session),
        }
    }

    /// Poisoned locks are recovered: `Session::apply` swaps state in one
    /// assignment, so a panicking holder cannot leave it half-written.
    fn lock(&self) -> MutexGuard<'_, Session> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            warn!("recovering poisoned session lock");
            poisoned.into_inner()
        })
    }

    pub fn apply(&self, action: Action) -> Result<TransitionResult, PlaythroughError> {
        self.lock().apply(action)
    }

    pub fn current_hash(&self) -> Result<String, PlaythroughError> {
        self.lock().current_hash()
    }

    pub fn current_sequence(&self) -> u64 {
        self.lock().current_sequence()
    }

    /// Clone of the current state.
    pub fn state(&self) -> PlaythroughState {
        self.lock().state().clone()
    }
}
