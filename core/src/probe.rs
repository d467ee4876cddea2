//! The central **abstraction** for one unit of probing work.
//!
//! A unit is one independently executable network operation: a burst of
//! crafted payloads or a single credential attempt. Each execution owns
//! exactly one socket for its duration and releases it on every exit
//! path; the scheduler never sees a descriptor.
//!
//! Per-packet and per-attempt I/O failures are expected outcomes. They
//! are folded into the returned [`ExecutionResult`] and never raised.

use std::time::Instant;

use barrage_common::config::EngineConfig;
use barrage_common::endpoint::Endpoint;

pub mod flood;
pub mod telnet;

use flood::FloodSpec;

/// One independently executable network operation.
#[derive(Debug, Clone)]
pub enum UnitOfWork {
    /// Send a bounded burst of payloads at the endpoint.
    FloodBurst(FloodSpec),
    /// Attempt one authenticated telnet-style handshake.
    CredentialAttempt { username: String, password: String },
}

/// Immutable record produced once per executed unit.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Successful send/initiate calls, or completed login attempts.
    pub units_completed: u64,
    /// Whether a search-style unit hit its success condition.
    pub succeeded: bool,
    /// Success payload (`user:pass`) for credential units.
    pub detail: Option<String>,
}

/// Runs one unit of work to completion and reports its outcome.
///
/// An optional `deadline` is honored cooperatively: flood bursts check it
/// at pacing boundaries and cut the burst short, a credential attempt is
/// never interrupted mid-exchange.
pub fn execute(
    endpoint: &Endpoint,
    unit: &UnitOfWork,
    cfg: &EngineConfig,
    deadline: Option<Instant>,
) -> ExecutionResult {
    match unit {
        UnitOfWork::FloodBurst(spec) => {
            let sent = flood::run_burst(endpoint, spec, cfg, deadline);
            ExecutionResult {
                units_completed: sent,
                succeeded: false,
                detail: None,
            }
        }
        UnitOfWork::CredentialAttempt { username, password } => {
            let succeeded = telnet::attempt(endpoint, username, password, cfg.io_timeout);
            ExecutionResult {
                units_completed: 1,
                succeeded,
                detail: succeeded.then(|| format!("{username}:{password}")),
            }
        }
    }
}
