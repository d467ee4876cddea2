//! Run reports returned to callers.
//!
//! Expected negative outcomes (no credentials found, sends that failed)
//! are plain data here, never errors. A run that lost workers at spawn
//! time is marked degraded instead of being failed or silently shrunk.

use std::fmt;
use std::time::Duration;

/// A username/password pair that produced a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.username, self.password)
    }
}

/// Outcome of a saturating (flood) run.
#[derive(Debug, Clone)]
pub struct FloodReport {
    /// Successful send/initiate calls across all workers.
    pub packets_sent: u64,
    /// Concurrency the caller asked for, before clamping.
    pub workers_requested: usize,
    /// Workers that actually started.
    pub workers_launched: usize,
    /// True when fewer workers started than the clamped request.
    pub degraded: bool,
    pub elapsed: Duration,
}

/// Outcome of a search (credential) run.
#[derive(Debug, Clone)]
pub struct SearchReport {
    /// Login attempts that ran to completion.
    pub attempts: u64,
    /// First working pair in enumeration order, if any.
    pub credential: Option<Credential>,
    pub workers_requested: usize,
    pub workers_launched: usize,
    pub degraded: bool,
    pub elapsed: Duration,
}

impl SearchReport {
    pub fn found(&self) -> bool {
        self.credential.is_some()
    }
}
