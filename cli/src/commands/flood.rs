use std::time::Duration;

use barrage_common::config::EngineConfig;
use barrage_common::endpoint::Endpoint;
use barrage_common::success;
use barrage_core::report::FloodReport;

use crate::commands::FloodArgs;
use crate::terminal::{print, spinner};

pub fn run(args: FloodArgs) -> anyhow::Result<()> {
    let endpoint = Endpoint::resolve(&args.target, args.port)?;

    let cfg = EngineConfig {
        run_deadline: args.deadline.map(Duration::from_secs),
        ..EngineConfig::flood()
    };

    print::header("saturating run");
    let pb = spinner::start(format!("Flooding {endpoint} ({:?})...", args.variant));

    let report = barrage_core::flood(endpoint, args.variant, args.workers, args.volume, &cfg)?;

    pb.finish_and_clear();
    report_flood(&report);
    Ok(())
}

fn report_flood(report: &FloodReport) {
    success!(
        "{} packets sent in {:.2}s",
        report.packets_sent,
        report.elapsed.as_secs_f64()
    );
    print::detail("Workers requested", &report.workers_requested.to_string());
    print::detail("Workers launched", &report.workers_launched.to_string());

    if report.degraded {
        tracing::warn!("run was degraded: fewer workers started than requested");
    }
}
