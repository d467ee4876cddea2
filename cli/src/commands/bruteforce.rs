use std::fs;
use std::time::Duration;

use anyhow::Context;
use colored::Colorize;

use barrage_common::config::EngineConfig;
use barrage_common::endpoint::Endpoint;
use barrage_common::success;
use barrage_core::report::SearchReport;

use crate::commands::BruteforceArgs;
use crate::terminal::{print, spinner};

pub fn run(args: BruteforceArgs) -> anyhow::Result<()> {
    let endpoint = Endpoint::resolve(&args.target, args.port)?;

    let usernames = expand_wordlists(args.users)?;
    let passwords = expand_wordlists(args.passwords)?;

    let cfg = EngineConfig {
        io_timeout: Duration::from_secs(args.timeout.max(1)),
        run_deadline: args.deadline.map(Duration::from_secs),
        ..EngineConfig::search()
    };

    print::header("credential audit");
    let pb = spinner::start(format!(
        "Trying {} pairs against {endpoint}...",
        usernames.len() * passwords.len()
    ));

    let report = barrage_core::bruteforce(endpoint, &usernames, &passwords, args.workers, &cfg)?;

    pb.finish_and_clear();
    report_search(&report);
    Ok(())
}

/// Expands `@path` entries into the lines of that file; plain entries
/// pass through unchanged.
fn expand_wordlists(entries: Vec<String>) -> anyhow::Result<Vec<String>> {
    let mut expanded = Vec::with_capacity(entries.len());

    for entry in entries {
        match entry.strip_prefix('@') {
            Some(path) => {
                let content = fs::read_to_string(path)
                    .with_context(|| format!("reading wordlist '{path}'"))?;
                expanded.extend(
                    content
                        .lines()
                        .map(str::trim)
                        .filter(|line| !line.is_empty())
                        .map(str::to_string),
                );
            }
            None => expanded.push(entry),
        }
    }

    Ok(expanded)
}

fn report_search(report: &SearchReport) {
    match &report.credential {
        Some(credential) => {
            success!(
                "found working credential {} after {} attempts in {:.2}s",
                credential.to_string().bold().green(),
                report.attempts,
                report.elapsed.as_secs_f64()
            );
        }
        None => {
            tracing::info!(
                "no working credential in {} attempts ({:.2}s)",
                report.attempts,
                report.elapsed.as_secs_f64()
            );
        }
    }

    if report.degraded {
        tracing::warn!("run was degraded: fewer workers started than requested");
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
