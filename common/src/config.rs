//! Engine configuration.
//!
//! One [`EngineConfig`] is built per run and shared read-only by every
//! worker. Defaults follow the engine's two workload profiles: saturating
//! floods cap at 100 workers, credential searches at 50.

use std::time::Duration;

/// Worker ceiling for saturating (flood) runs.
pub const FLOOD_CEILING: usize = 100;
/// Worker ceiling for search (credential) runs.
pub const SEARCH_CEILING: usize = 50;

const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_PACE_DELAY: Duration = Duration::from_millis(1);
const DEFAULT_PAYLOAD_SIZE: usize = 1024;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Hard cap on concurrent workers. Requests above it are clamped,
    /// never rejected.
    pub concurrency_ceiling: usize,

    /// Connect/read/write timeout for connection-oriented units.
    pub io_timeout: Duration,

    /// Self-throttle delay inserted every pacing window of sends. This
    /// protects the local stack, it is not a rate limiter for the target.
    pub pace_delay: Duration,

    /// Payload bytes per datagram in the default flood variant.
    pub payload_size: usize,

    /// Floor applied to the per-worker volume so a derived packet count
    /// can never underflow to zero.
    pub min_worker_volume: u64,

    /// Optional wall-clock budget for the whole run, enforced
    /// cooperatively at unit and pacing boundaries.
    pub run_deadline: Option<Duration>,
}

impl EngineConfig {
    /// Profile for saturating flood runs.
    pub fn flood() -> Self {
        Self {
            concurrency_ceiling: FLOOD_CEILING,
            io_timeout: DEFAULT_IO_TIMEOUT,
            pace_delay: DEFAULT_PACE_DELAY,
            payload_size: DEFAULT_PAYLOAD_SIZE,
            min_worker_volume: 1,
            run_deadline: None,
        }
    }

    /// Profile for credential search runs.
    pub fn search() -> Self {
        Self {
            concurrency_ceiling: SEARCH_CEILING,
            ..Self::flood()
        }
    }

    /// Clamps a requested worker count into `[1, ceiling]`.
    pub fn clamp_workers(&self, requested: usize) -> usize {
        requested.clamp(1, self.concurrency_ceiling.max(1))
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::flood()
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
