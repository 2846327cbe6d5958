use std::time::{Duration, Instant};

use colored::*;
use tracing::Instrument;

use crate::mprint;
use crate::terminal::{colors, print, progress::SweepProgressBar};
use invsweep_common::{
    config::Config,
    inventory::SweepResult,
    network::range::Ipv4Range,
    info, success, warn,
};
use invsweep_core::{
    client::InventoryClient,
    report::{ReportPaths, ReportWriter},
    sweep::SweepCoordinator,
};

pub async fn sweep(range_text: &str, cfg: &Config) -> anyhow::Result<()> {
    let range: Ipv4Range = match range_text.parse() {
        Ok(range) => range,
        Err(e) => {
            warn!("No valid IP address was generated: {e}. Check the range format.");
            return Ok(());
        }
    };

    let addresses: Vec<String> = range.to_strings();
    let unit: &str = if addresses.len() == 1 { "address" } else { "addresses" };
    success!(
        "{} {unit} queued from {} to {}",
        addresses.len(),
        range.start_addr,
        range.end_addr
    );

    print::header("collecting inventory", cfg.quiet);
    info!(
        "Querying {} with up to {} requests in flight",
        cfg.endpoint, cfg.concurrency
    );

    let client = InventoryClient::from_config(cfg)?;
    let coordinator = SweepCoordinator::new(client, cfg.concurrency);
    let progress = SweepProgressBar::start(addresses.len(), cfg.quiet);

    let start_time: Instant = Instant::now();
    let result: SweepResult = coordinator
        .sweep(addresses, |p| progress.update(p))
        .instrument(progress.span())
        .await;
    let elapsed: Duration = start_time.elapsed();
    drop(progress);

    let paths: ReportPaths = ReportWriter::timestamped(&cfg.output_dir).write(&result)?;
    sweep_ends(&result, &paths, elapsed, cfg);
    Ok(())
}

fn sweep_ends(result: &SweepResult, paths: &ReportPaths, elapsed: Duration, cfg: &Config) {
    success!("Inventory saved to {}", paths.csv.display());
    if let Some(errors) = &paths.errors {
        warn!("Errors saved to {}", errors.display());
    }

    if cfg.quiet {
        return;
    }

    mprint!();
    print::header("sweep summary", cfg.quiet);
    print::set_key_width(&["Hosts", "Records", "Failures", "Elapsed"]);
    print::aligned_line("Hosts", result.total().to_string());
    print::aligned_line("Records", result.records.len().to_string().green().bold());
    print::aligned_line("Failures", failures_value(result.failures.len()));
    print::aligned_line("Elapsed", format!("{:.2}s", elapsed.as_secs_f64()).yellow());

    let output: ColoredString = format!(
        "Sweep Complete: {} of {} hosts inventoried",
        result.records.len().to_string().bold().green(),
        result.total()
    )
    .color(colors::TEXT_DEFAULT);
    print::fat_separator();
    print::centerln(&output.to_string());
}

fn failures_value(count: usize) -> ColoredString {
    match count {
        0 => "0".green(),
        n => n.to_string().red().bold(),
    }
}
