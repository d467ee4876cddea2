//! Engine entry points.
//!
//! Callers resolve an [`Endpoint`] once, pick a workload and get back a
//! structured report. Expected negative outcomes (no credentials found,
//! sends that failed) are data in the report; only setup-class problems
//! return an error.

use std::time::Instant;

use tracing::info;

use barrage_common::config::EngineConfig;
use barrage_common::endpoint::Endpoint;
use barrage_common::error::{Error, Result};

use crate::probe::flood::{FloodSpec, FloodVariant};
use crate::report::{Credential, FloodReport, SearchReport};

pub mod scheduler;
pub mod state;

/// Longest accepted username or password. Oversized input is rejected,
/// never truncated.
const MAX_CREDENTIAL_LEN: usize = 256;

/// Saturates the endpoint with `per_worker_volume` sends on each of
/// `worker_count` workers (clamped to the ceiling) and reports the total
/// volume that left the machine.
pub fn flood(
    endpoint: Endpoint,
    variant: FloodVariant,
    worker_count: usize,
    per_worker_volume: u64,
    cfg: &EngineConfig,
) -> Result<FloodReport> {
    let volume = per_worker_volume.max(cfg.min_worker_volume);
    let spec = FloodSpec::new(variant, cfg, volume);

    info!(
        %endpoint,
        ?variant,
        workers = worker_count,
        volume,
        "starting saturating run"
    );

    let started = Instant::now();
    let run = scheduler::run_saturating(endpoint, spec, worker_count, cfg)?;

    Ok(FloodReport {
        packets_sent: run.total_completed,
        workers_requested: run.workers_requested,
        workers_launched: run.workers_launched,
        degraded: run.degraded,
        elapsed: started.elapsed(),
    })
}

/// Tries every username × password pair against the endpoint, stopping
/// early on the first success in enumeration order.
pub fn bruteforce(
    endpoint: Endpoint,
    usernames: &[String],
    passwords: &[String],
    worker_count: usize,
    cfg: &EngineConfig,
) -> Result<SearchReport> {
    validate_credentials("usernames", usernames)?;
    validate_credentials("passwords", passwords)?;

    info!(
        %endpoint,
        usernames = usernames.len(),
        passwords = passwords.len(),
        workers = worker_count,
        "starting search run"
    );

    let started = Instant::now();
    let run = scheduler::run_search(endpoint, usernames, passwords, worker_count, cfg)?;

    let credential = run.success.as_ref().map(|(index, _)| {
        // The enumeration index identifies the pair directly.
        let username = usernames[index / passwords.len()].clone();
        let password = passwords[index % passwords.len()].clone();
        Credential { username, password }
    });

    Ok(SearchReport {
        attempts: run.total_completed,
        credential,
        workers_requested: run.workers_requested,
        workers_launched: run.workers_launched,
        degraded: run.degraded,
        elapsed: started.elapsed(),
    })
}

/// Rejects credential entries the wire exchange cannot carry.
fn validate_credentials(name: &'static str, entries: &[String]) -> Result<()> {
    for entry in entries {
        if entry.len() > MAX_CREDENTIAL_LEN {
            return Err(Error::InvalidParameter {
                name,
                reason: format!("entry exceeds {MAX_CREDENTIAL_LEN} bytes"),
            });
        }
        if entry.contains(['\r', '\n']) {
            return Err(Error::InvalidParameter {
                name,
                reason: "entry contains line-break characters".to_string(),
            });
        }
    }
    Ok(())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
