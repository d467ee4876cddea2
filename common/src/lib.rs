//! Shared building blocks for the barrage workspace.
//!
//! Everything the engine and the CLI both need lives here: the resolved
//! [`endpoint::Endpoint`] model, the [`config::EngineConfig`] knobs and the
//! [`error::Error`] taxonomy.

pub mod config;
pub mod endpoint;
pub mod error;
mod macros;

pub use error::{Error, Result};
