#![cfg(test)]
use std::time::Duration;

use barrage_common::config::EngineConfig;
use barrage_common::endpoint::Endpoint;
use barrage_core::probe::flood::FloodVariant;
use barrage_core::report::{FloodReport, SearchReport};

use crate::engine::stubs::{TelnetStub, UdpSink};

fn loopback(port: u16) -> Endpoint {
    Endpoint::resolve("127.0.0.1", port).unwrap()
}

fn strings(entries: &[&str]) -> Vec<String> {
    entries.iter().map(|s| s.to_string()).collect()
}

async fn run_flood(
    endpoint: Endpoint,
    workers: usize,
    volume: u64,
    cfg: EngineConfig,
) -> FloodReport {
    tokio::task::spawn_blocking(move || {
        barrage_core::flood(endpoint, FloodVariant::Datagram, workers, volume, &cfg)
    })
    .await
    .unwrap()
    .unwrap()
}

async fn run_bruteforce(
    endpoint: Endpoint,
    users: Vec<String>,
    passwords: Vec<String>,
    workers: usize,
) -> SearchReport {
    tokio::task::spawn_blocking(move || {
        let cfg = EngineConfig {
            io_timeout: Duration::from_secs(2),
            ..EngineConfig::search()
        };
        barrage_core::bruteforce(endpoint, &users, &passwords, workers, &cfg)
    })
    .await
    .unwrap()
    .unwrap()
}

/// Four workers at 100 packets each against a responsive loopback sink
/// must account for every packet.
#[tokio::test]
async fn flood_saturates_loopback_volume() {
    let sink = UdpSink::start().await;
    let report = run_flood(loopback(sink.port), 4, 100, EngineConfig::flood()).await;

    assert_eq!(report.packets_sent, 400);
    assert_eq!(report.workers_requested, 4);
    assert_eq!(report.workers_launched, 4);
    assert!(!report.degraded);

    // Loopback delivery is not guaranteed datagram-for-datagram, but the
    // sink must have seen traffic.
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(sink.received() > 0);
}

/// Requests above the ceiling are clamped, never rejected.
#[tokio::test]
async fn worker_ceiling_is_enforced() {
    let sink = UdpSink::start().await;
    let cfg = EngineConfig {
        concurrency_ceiling: 3,
        ..EngineConfig::flood()
    };

    let report = run_flood(loopback(sink.port), 50, 10, cfg).await;

    assert_eq!(report.workers_requested, 50);
    assert_eq!(report.workers_launched, 3);
    assert_eq!(report.packets_sent, 30);
    assert!(!report.degraded);
}

/// An already-expired run deadline cuts every burst short at its first
/// pacing boundary.
#[tokio::test]
async fn run_deadline_caps_flood_volume() {
    let sink = UdpSink::start().await;
    let cfg = EngineConfig {
        run_deadline: Some(Duration::ZERO),
        ..EngineConfig::flood()
    };

    let report = run_flood(loopback(sink.port), 2, 1_000_000, cfg).await;
    assert!(report.packets_sent < 10_000);
}

/// 3×3 grid with one planted pair: the engine reports exactly that pair.
#[tokio::test]
async fn bruteforce_finds_planted_credential() {
    let stub = TelnetStub::start(vec![("admin", "admin123")]).await;

    let report = run_bruteforce(
        loopback(stub.port),
        strings(&["root", "admin", "guest"]),
        strings(&["1234", "password", "admin123"]),
        4,
    )
    .await;

    assert!(report.found());
    let credential = report.credential.unwrap();
    assert_eq!(credential.to_string(), "admin:admin123");
    assert!(report.attempts <= 9);
}

/// When several pairs would work, the first in enumeration order
/// (outer usernames, inner passwords) wins regardless of completion
/// timing.
#[tokio::test]
async fn enumeration_order_breaks_success_ties() {
    let stub = TelnetStub::start(vec![("u0", "p1"), ("u1", "p0")]).await;

    let report = run_bruteforce(
        loopback(stub.port),
        strings(&["u0", "u1"]),
        strings(&["p0", "p1"]),
        4,
    )
    .await;

    // Enumeration order: u0:p0, u0:p1, u1:p0, u1:p1 — index 1 beats 2.
    assert_eq!(report.credential.unwrap().to_string(), "u0:p1");
}

/// A grid with no working pair runs to exhaustion and reports not-found
/// as data, not as an error.
#[tokio::test]
async fn bruteforce_reports_not_found() {
    let stub = TelnetStub::start(vec![]).await;

    let report = run_bruteforce(
        loopback(stub.port),
        strings(&["a", "b"]),
        strings(&["x", "y"]),
        2,
    )
    .await;

    assert!(!report.found());
    assert_eq!(report.attempts, 4);
}

/// After a run completes, every socket the engine opened is closed
/// again: the process descriptor count returns to its baseline.
#[tokio::test]
#[cfg(target_os = "linux")]
async fn engine_does_not_leak_descriptors() {
    fn open_fds() -> usize {
        std::fs::read_dir("/proc/self/fd").unwrap().count()
    }

    let stub = TelnetStub::start(vec![]).await;
    let sink = UdpSink::start().await;

    // Warm up the runtime and the engine paths once so lazily created
    // descriptors do not skew the baseline.
    run_flood(loopback(sink.port), 2, 10, EngineConfig::flood()).await;
    let baseline = open_fds();

    run_flood(loopback(sink.port), 4, 50, EngineConfig::flood()).await;
    run_bruteforce(
        loopback(stub.port),
        strings(&["a", "b"]),
        strings(&["x", "y"]),
        2,
    )
    .await;

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(
        open_fds() <= baseline,
        "descriptor count grew past the pre-run baseline"
    );
}

/// Once a success lands, no further pairs are dispatched; only in-flight
/// attempts finish.
#[tokio::test]
async fn search_stops_early_on_success() {
    let stub = TelnetStub::start(vec![("admin", "p00")]).await;

    let passwords: Vec<String> = (0..50).map(|i| format!("p{i:02}")).collect();
    let report = run_bruteforce(loopback(stub.port), strings(&["admin"]), passwords, 2).await;

    assert!(report.found());
    assert!(
        report.attempts < 50,
        "dispatch was not suppressed after success: {} attempts",
        report.attempts
    );
}
