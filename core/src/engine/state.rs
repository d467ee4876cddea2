//! Shared run state and stop-condition coordination.
//!
//! [`RunState`] is the only resource shared across worker threads. Every
//! mutation goes through [`RunState::record`] under one mutex held for a
//! short critical section; the caller reads the final state only after
//! the scheduler has joined every worker.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use crate::probe::ExecutionResult;

/// Accumulated state of one run. Created zeroed, mutated by every worker
/// on completion, read once after the join, then discarded.
#[derive(Debug, Default)]
pub struct RunState {
    /// Sum of `units_completed` over all recorded results.
    pub total_completed: u64,
    /// Set by the scheduler once further dispatch was suppressed.
    pub stop_requested: bool,
    /// First success in enumeration order: `(enumeration index, payload)`.
    pub success: Option<(usize, String)>,
    /// Concurrency the caller asked for, before clamping.
    pub workers_requested: usize,
    /// Workers that actually started.
    pub workers_launched: usize,
    /// True when spawn failures reduced the effective concurrency.
    pub degraded: bool,
}

impl RunState {
    pub fn new(workers_requested: usize) -> Self {
        Self {
            workers_requested,
            ..Self::default()
        }
    }

    /// Folds one execution result into the run.
    ///
    /// The success latch keeps the entry with the smallest enumeration
    /// index. Completion order does not matter: a later-finishing unit
    /// with an earlier index still wins, a later index never overwrites.
    pub fn record(&mut self, result: &ExecutionResult, enum_index: usize) {
        self.total_completed += result.units_completed;

        if !result.succeeded {
            return;
        }
        let Some(payload) = &result.detail else {
            return;
        };

        match &self.success {
            Some((held_index, _)) if *held_index <= enum_index => {}
            _ => self.success = Some((enum_index, payload.clone())),
        }
    }
}

/// Shared handle to one run's state.
pub type SharedRunState = Arc<Mutex<RunState>>;

pub fn shared(state: RunState) -> SharedRunState {
    Arc::new(Mutex::new(state))
}

/// Unwraps the state after all workers are joined.
pub fn into_inner(state: SharedRunState) -> RunState {
    match Arc::try_unwrap(state) {
        Ok(mutex) => mutex.into_inner().unwrap_or_else(|e| e.into_inner()),
        // A worker handle leaked; fall back to a locked copy.
        Err(arc) => {
            let guard = arc.lock().unwrap_or_else(|e| e.into_inner());
            RunState {
                total_completed: guard.total_completed,
                stop_requested: guard.stop_requested,
                success: guard.success.clone(),
                workers_requested: guard.workers_requested,
                workers_launched: guard.workers_launched,
                degraded: guard.degraded,
            }
        }
    }
}

/// Decides, between dispatches, whether a run should terminate early.
///
/// Checked only at unit boundaries: an in-flight network call is allowed
/// to finish naturally.
#[derive(Debug, Clone, Copy)]
pub struct StopCondition {
    stop_on_success: bool,
    deadline: Option<Instant>,
}

impl StopCondition {
    /// Saturating runs have no found-condition, only the volume budget
    /// and an optional deadline.
    pub fn saturating(deadline: Option<Instant>) -> Self {
        Self {
            stop_on_success: false,
            deadline,
        }
    }

    /// Search runs stop as soon as the success latch is set.
    pub fn search(deadline: Option<Instant>) -> Self {
        Self {
            stop_on_success: true,
            deadline,
        }
    }

    pub fn should_stop(&self, state: &RunState) -> bool {
        if self.stop_on_success && state.success.is_some() {
            return true;
        }
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
