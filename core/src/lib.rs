//! # barrage-core
//!
//! A concurrent network probing engine. Given a resolved endpoint, a unit
//! of work (a burst of crafted payloads or one authenticated handshake)
//! and a concurrency budget, the engine runs the work across a bounded
//! pool of OS threads, aggregates results under a single mutex and stops
//! early once a search-style workload finds what it is looking for.

pub mod engine;
pub mod probe;
pub mod report;

pub use engine::{bruteforce, flood};
pub use report::{Credential, FloodReport, SearchReport};
