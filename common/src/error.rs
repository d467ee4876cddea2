//! Error types for barrage.
//!
//! Only setup-class problems cross the engine boundary as errors. A send
//! that fails or a login attempt that is rejected is ordinary result data
//! and never shows up here.

use thiserror::Error;

/// Result type alias for barrage operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The target text did not resolve to a usable endpoint.
    #[error("invalid endpoint '{input}': {reason}")]
    InvalidEndpoint { input: String, reason: String },

    /// Network I/O failure during run setup (socket allocation, bind).
    #[error("network I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A caller-supplied parameter was rejected.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: String,
    },

    /// Not a single worker thread could be started.
    #[error("no workers could be started: {0}")]
    NoWorkers(String),
}
