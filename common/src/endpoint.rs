//! # Probe Endpoint Model
//!
//! Defines the resolved target of a run.
//!
//! A run resolves its target exactly once; the resulting [`Endpoint`] is
//! immutable and shared read-only by every worker. Resolution is
//! side-effect free, so resolving the same input twice yields equal values.

use std::fmt;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Upper bound on accepted host text. Oversized input is rejected outright
/// rather than truncated.
const MAX_HOST_LEN: usize = 255;

/// A validated, connectable target address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub addr: Ipv4Addr,
    pub port: u16,
}

impl Endpoint {
    /// Validates `host` text and `port` into an [`Endpoint`].
    ///
    /// Only IPv4 literals are accepted; hostnames are not looked up here.
    pub fn resolve(host: &str, port: u16) -> Result<Self> {
        let trimmed = host.trim();

        if trimmed.is_empty() {
            return Err(Error::InvalidEndpoint {
                input: host.to_string(),
                reason: "host is empty".to_string(),
            });
        }

        if trimmed.len() > MAX_HOST_LEN {
            let preview: String = trimmed.chars().take(32).collect();
            return Err(Error::InvalidEndpoint {
                input: format!("{preview}..."),
                reason: format!("host text exceeds {MAX_HOST_LEN} bytes"),
            });
        }

        let addr = trimmed
            .parse::<Ipv4Addr>()
            .map_err(|e| Error::InvalidEndpoint {
                input: trimmed.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self { addr, port })
    }

    /// The endpoint as a connectable socket address.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::V4(SocketAddrV4::new(self.addr, self.port))
    }

    /// Same host, different port. Used by the minimal-datagram probe which
    /// always fires at port 0.
    pub fn with_port(&self, port: u16) -> Self {
        Self {
            addr: self.addr,
            port,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.addr, self.port)
    }
}

impl FromStr for Endpoint {
    type Err = String;

    /// Parses `host:port` text (e.g. `192.168.1.5:8080`).
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let Some((host, port_str)) = s.rsplit_once(':') else {
            return Err(format!("missing port in target '{s}'"));
        };

        let port = port_str
            .parse::<u16>()
            .map_err(|e| format!("invalid port '{port_str}': {e}"))?;

        Endpoint::resolve(host, port).map_err(|e| e.to_string())
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
