//! Flood burst execution.
//!
//! One call sends a fixed volume of payloads through a single socket and
//! counts how many left the machine. A send that fails is counted past,
//! not raised; the burst always runs to its volume or the run deadline.
//!
//! Three variants mirror the workloads the engine serves:
//! * `Datagram` — UDP payloads of the configured size to the target port.
//! * `HandshakeInitiate` — fresh TCP connects; initiating the handshake
//!   counts, completing it does not matter.
//! * `MinimalDatagram` — 64-byte datagrams fired at port 0, the minimal
//!   ICMP-like probe.

use std::io::ErrorKind;
use std::net::{TcpStream, UdpSocket};
use std::str::FromStr;
use std::thread;
use std::time::{Duration, Instant};

use rand::RngCore;
use tracing::{debug, warn};

use barrage_common::config::EngineConfig;
use barrage_common::endpoint::Endpoint;

/// Payload size of the minimal-datagram variant.
const MINIMAL_PAYLOAD_SIZE: usize = 64;

/// Sends between self-throttle delays for datagram variants.
const DATAGRAM_PACE_EVERY: u64 = 100;
/// Initiations between self-throttle delays for the handshake variant.
const HANDSHAKE_PACE_EVERY: u64 = 50;

/// How long one handshake initiation may occupy its socket. The SYN is on
/// the wire as soon as connect starts; waiting longer only slows the burst.
const HANDSHAKE_WINDOW: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloodVariant {
    Datagram,
    HandshakeInitiate,
    MinimalDatagram,
}

impl FromStr for FloodVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "udp" | "datagram" => Ok(Self::Datagram),
            "syn" | "tcp" | "handshake" => Ok(Self::HandshakeInitiate),
            "icmp" | "minimal" => Ok(Self::MinimalDatagram),
            other => Err(format!("unknown flood variant '{other}'")),
        }
    }
}

/// Parameters of one flood burst unit.
#[derive(Debug, Clone)]
pub struct FloodSpec {
    pub variant: FloodVariant,
    pub payload_size: usize,
    pub burst_count: u64,
}

impl FloodSpec {
    pub fn new(variant: FloodVariant, cfg: &EngineConfig, burst_count: u64) -> Self {
        let payload_size = match variant {
            FloodVariant::MinimalDatagram => MINIMAL_PAYLOAD_SIZE,
            _ => cfg.payload_size,
        };
        Self {
            variant,
            payload_size,
            burst_count,
        }
    }
}

/// Runs one burst and returns the number of successful send/initiate
/// calls. The socket is scoped to this call and closed on every path.
pub fn run_burst(
    endpoint: &Endpoint,
    spec: &FloodSpec,
    cfg: &EngineConfig,
    deadline: Option<Instant>,
) -> u64 {
    match spec.variant {
        FloodVariant::Datagram => datagram_burst(endpoint, spec, cfg, deadline),
        FloodVariant::MinimalDatagram => {
            // ICMP-like minimal probe always fires at port 0.
            let target = endpoint.with_port(0);
            datagram_burst(&target, spec, cfg, deadline)
        }
        FloodVariant::HandshakeInitiate => handshake_burst(endpoint, spec, cfg, deadline),
    }
}

fn datagram_burst(
    endpoint: &Endpoint,
    spec: &FloodSpec,
    cfg: &EngineConfig,
    deadline: Option<Instant>,
) -> u64 {
    let socket = match UdpSocket::bind("0.0.0.0:0") {
        Ok(socket) => socket,
        Err(e) => {
            warn!("failed to open datagram socket: {e}");
            return 0;
        }
    };

    let mut payload: Vec<u8> = vec![0u8; spec.payload_size.max(1)];
    rand::rng().fill_bytes(&mut payload);

    let target = endpoint.socket_addr();
    let mut sent: u64 = 0;

    for i in 0..spec.burst_count {
        if socket.send_to(&payload, target).is_ok() {
            sent += 1;
        }

        if i % DATAGRAM_PACE_EVERY == 0 {
            thread::sleep(cfg.pace_delay);
            if past_deadline(deadline) {
                debug!("burst cut short at {sent} sends by run deadline");
                break;
            }
        }
    }

    sent
}

fn handshake_burst(
    endpoint: &Endpoint,
    spec: &FloodSpec,
    cfg: &EngineConfig,
    deadline: Option<Instant>,
) -> u64 {
    let target = endpoint.socket_addr();
    let mut sent: u64 = 0;

    for i in 0..spec.burst_count {
        // The stream drops immediately on every arm; the handshake never
        // has to complete for the initiation to count.
        match TcpStream::connect_timeout(&target, HANDSHAKE_WINDOW) {
            Ok(stream) => {
                drop(stream);
                sent += 1;
            }
            Err(e) if handshake_left_the_machine(e.kind()) => sent += 1,
            Err(e) => debug!("handshake initiation failed: {e}"),
        }

        if i % HANDSHAKE_PACE_EVERY == 0 {
            thread::sleep(cfg.pace_delay);
            if past_deadline(deadline) {
                debug!("burst cut short at {sent} initiations by run deadline");
                break;
            }
        }
    }

    sent
}

/// Error kinds that still mean a SYN was put on the wire.
fn handshake_left_the_machine(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::TimedOut
            | ErrorKind::WouldBlock
            | ErrorKind::ConnectionRefused
            | ErrorKind::ConnectionReset
    )
}

fn past_deadline(deadline: Option<Instant>) -> bool {
    deadline.is_some_and(|d| Instant::now() >= d)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::UdpSocket;

    fn loopback_endpoint(port: u16) -> Endpoint {
        Endpoint::resolve("127.0.0.1", port).unwrap()
    }

    #[test]
    fn variant_parses_known_names() {
        assert_eq!("udp".parse::<FloodVariant>(), Ok(FloodVariant::Datagram));
        assert_eq!(
            "SYN".parse::<FloodVariant>(),
            Ok(FloodVariant::HandshakeInitiate)
        );
        assert_eq!(
            "icmp".parse::<FloodVariant>(),
            Ok(FloodVariant::MinimalDatagram)
        );
        assert!("quic".parse::<FloodVariant>().is_err());
    }

    #[test]
    fn minimal_variant_forces_small_payload() {
        let cfg = EngineConfig::flood();
        let spec = FloodSpec::new(FloodVariant::MinimalDatagram, &cfg, 10);
        assert_eq!(spec.payload_size, MINIMAL_PAYLOAD_SIZE);

        let spec = FloodSpec::new(FloodVariant::Datagram, &cfg, 10);
        assert_eq!(spec.payload_size, cfg.payload_size);
    }

    #[test]
    fn datagram_burst_counts_every_loopback_send() {
        let sink = UdpSocket::bind("127.0.0.1:0").unwrap();
        let port = sink.local_addr().unwrap().port();

        let cfg = EngineConfig::flood();
        let spec = FloodSpec::new(FloodVariant::Datagram, &cfg, 50);
        let sent = run_burst(&loopback_endpoint(port), &spec, &cfg, None);

        assert_eq!(sent, 50);
    }

    #[test]
    fn datagram_burst_survives_unreachable_target() {
        // Nothing listens here; sends may fail but must never panic or
        // abort the burst.
        let cfg = EngineConfig::flood();
        let spec = FloodSpec::new(FloodVariant::Datagram, &cfg, 20);
        let sent = run_burst(&loopback_endpoint(1), &spec, &cfg, None);
        assert!(sent <= 20);
    }

    #[test]
    fn deadline_cuts_burst_short() {
        let sink = UdpSocket::bind("127.0.0.1:0").unwrap();
        let port = sink.local_addr().unwrap().port();

        let cfg = EngineConfig::flood();
        let spec = FloodSpec::new(FloodVariant::Datagram, &cfg, 1_000_000);
        let deadline = Instant::now(); // already expired
        let sent = run_burst(&loopback_endpoint(port), &spec, &cfg, Some(deadline));

        assert!(sent < 1_000_000);
    }
}
