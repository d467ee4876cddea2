//! Worker pool scheduling.
//!
//! Two modes cover the engine's workloads:
//!
//! * **Saturating** — all workers start immediately, each bound to an
//!   equal share of the requested volume, and the scheduler joins on the
//!   full set. There is no early stop; a flood runs its budget out.
//! * **Search** — units are enumerated outer-username × inner-password
//!   and dispatched one at a time up to the concurrency cap. The stop
//!   condition is consulted before every dispatch, so cancellation takes
//!   effect at unit boundaries and in-flight attempts finish naturally.
//!
//! A worker that fails to spawn degrades the run instead of failing it:
//! the scheduler proceeds with whatever it could start and records the
//! reduced concurrency.

use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use tracing::{debug, warn};

use barrage_common::config::EngineConfig;
use barrage_common::endpoint::Endpoint;
use barrage_common::error::{Error, Result};

use crate::engine::state::{self, RunState, SharedRunState, StopCondition};
use crate::probe::{self, UnitOfWork};
use crate::probe::flood::FloodSpec;

/// Runs a flood to the exhaustion of its volume budget.
///
/// `requested` is clamped to the configured ceiling. Every launched
/// worker executes one [`UnitOfWork::FloodBurst`] bound to
/// `spec.burst_count` sends.
pub fn run_saturating(
    endpoint: Endpoint,
    spec: FloodSpec,
    requested: usize,
    cfg: &EngineConfig,
) -> Result<RunState> {
    let clamped = cfg.clamp_workers(requested);
    if clamped < requested {
        debug!("clamping worker request {requested} to ceiling {clamped}");
    }

    let deadline = run_deadline(cfg);
    let shared = state::shared(RunState::new(requested));
    let mut handles: Vec<JoinHandle<()>> = Vec::with_capacity(clamped);
    let mut spawn_error = None;

    for i in 0..clamped {
        let unit = UnitOfWork::FloodBurst(spec.clone());
        let worker_state = shared.clone();
        let worker_cfg = cfg.clone();

        let spawned = thread::Builder::new()
            .name(format!("barrage-flood-{i}"))
            .spawn(move || {
                let result = probe::execute(&endpoint, &unit, &worker_cfg, deadline);
                record(&worker_state, &result, i);
            });

        match spawned {
            Ok(handle) => handles.push(handle),
            Err(e) => {
                // Resource exhaustion: run with what we have.
                warn!("failed to start flood worker {i}: {e}");
                spawn_error = Some(e);
                break;
            }
        }
    }

    let launched = handles.len();
    if launched == 0 {
        let reason = spawn_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "zero workers requested".to_string());
        return Err(Error::NoWorkers(reason));
    }

    join_all(handles);

    let mut run = state::into_inner(shared);
    run.workers_launched = launched;
    run.degraded = launched < clamped;
    Ok(run)
}

/// Runs a credential search, stopping early on the first success.
///
/// Dispatch follows enumeration order (all passwords for `usernames[0]`,
/// then all for `usernames[1]`, ...). Completion order is free; the
/// success latch in [`RunState`] resolves ties by enumeration index.
pub fn run_search(
    endpoint: Endpoint,
    usernames: &[String],
    passwords: &[String],
    requested: usize,
    cfg: &EngineConfig,
) -> Result<RunState> {
    let clamped = cfg.clamp_workers(requested);
    let deadline = run_deadline(cfg);
    let stop = StopCondition::search(deadline);
    let shared = state::shared(RunState::new(requested));

    let mut units = usernames
        .iter()
        .flat_map(|u| passwords.iter().map(move |p| (u.clone(), p.clone())))
        .enumerate();

    let (tx, rx) = mpsc::channel::<()>();
    let mut handles: Vec<JoinHandle<()>> = Vec::new();
    let mut in_flight: usize = 0;
    let mut peak_in_flight: usize = 0;
    let mut degraded = false;
    let mut exhausted = false;

    while !exhausted || in_flight > 0 {
        // Fill the window up to the cap, consulting the stop condition
        // before every dispatch.
        while !exhausted && in_flight < clamped {
            if should_stop_now(&stop, &shared) {
                exhausted = true;
                break;
            }

            let Some((index, (username, password))) = units.next() else {
                exhausted = true;
                break;
            };

            let unit = UnitOfWork::CredentialAttempt { username, password };
            let worker_state = shared.clone();
            let worker_cfg = cfg.clone();
            let done = tx.clone();
            let worker_unit = unit.clone();

            let spawned = thread::Builder::new()
                .name(format!("barrage-search-{index}"))
                .spawn(move || {
                    let result = probe::execute(&endpoint, &worker_unit, &worker_cfg, deadline);
                    record(&worker_state, &result, index);
                    let _ = done.send(());
                });

            match spawned {
                Ok(handle) => {
                    handles.push(handle);
                    in_flight += 1;
                    peak_in_flight = peak_in_flight.max(in_flight);
                }
                Err(e) => {
                    // Could not get a thread; fall back to running this
                    // unit on the scheduler thread so the run still
                    // makes progress.
                    warn!("failed to start search worker: {e}");
                    degraded = true;
                    let result = probe::execute(&endpoint, &unit, cfg, deadline);
                    record(&shared, &result, index);
                    peak_in_flight = peak_in_flight.max(1);
                }
            }
        }

        if in_flight == 0 {
            break;
        }

        // Wait for one completion before the next dispatch decision.
        if rx.recv().is_ok() {
            in_flight -= 1;
        } else {
            break;
        }
    }

    join_all(handles);

    let mut run = state::into_inner(shared);
    run.workers_launched = peak_in_flight;
    run.degraded = degraded;
    Ok(run)
}

fn should_stop_now(stop: &StopCondition, shared: &SharedRunState) -> bool {
    let mut guard = shared.lock().unwrap_or_else(|e| e.into_inner());
    if stop.should_stop(&guard) {
        guard.stop_requested = true;
        return true;
    }
    false
}

fn record(shared: &SharedRunState, result: &crate::probe::ExecutionResult, index: usize) {
    let mut guard = shared.lock().unwrap_or_else(|e| e.into_inner());
    guard.record(result, index);
}

fn run_deadline(cfg: &EngineConfig) -> Option<Instant> {
    cfg.run_deadline.map(|budget| Instant::now() + budget)
}

fn join_all(handles: Vec<JoinHandle<()>>) {
    for handle in handles {
        if handle.join().is_err() {
            warn!("worker thread panicked; its partial work is already recorded");
        }
    }
}
