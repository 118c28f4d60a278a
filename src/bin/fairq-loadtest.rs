//! fairq-loadtest: compare the fair queue against a global FIFO under
//! asymmetric per-namespace load.

use clap::Parser;
use fairq::config::Config;
use fairq::loadtest::{Comparison, LoadProfile, LoadTest, LoadTestOptions};
use fairq::telemetry::{TelemetryConfig, init_telemetry};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "fairq-loadtest",
    about = "Measure per-namespace fairness against a global FIFO"
)]
struct Cli {
    /// TOML profile mapping item keys to processing milliseconds
    #[arg(long)]
    profile: Option<PathBuf>,
    /// Rounds per queue flavour
    #[arg(long, default_value_t = 10)]
    rounds: usize,
    /// Times each item is processed per round
    #[arg(long, default_value_t = 10)]
    cycles: usize,
    /// Worker threads (defaults to FAIRQ_WORKERS)
    #[arg(long)]
    workers: Option<usize>,
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = Config::from_env()?;

    let guard = init_telemetry(TelemetryConfig {
        endpoint: config.otel_endpoint.clone(),
        service_name: "fairq-loadtest".to_string(),
        log_level: config.log_level.clone(),
    })?;

    let profile = match &cli.profile {
        Some(path) => LoadProfile::load(path)?,
        None => LoadProfile::default(),
    };
    let options = LoadTestOptions {
        rounds: cli.rounds,
        cycles: cli.cycles,
        workers: cli.workers.unwrap_or(config.workers),
    };
    info!(
        items = profile.len(),
        rounds = options.rounds,
        cycles = options.cycles,
        workers = options.workers,
        "starting load test"
    );

    let test = Arc::new(LoadTest::new(profile, options));
    let runner = {
        let test = Arc::clone(&test);
        tokio::task::spawn_blocking(move || test.run())
    };
    tokio::pin!(runner);

    let report = tokio::select! {
        report = &mut runner => report?,
        _ = tokio::signal::ctrl_c() => {
            warn!("interrupted, shutting down active queue");
            test.cancel();
            runner.await?
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    guard.force_flush();
    Ok(())
}

fn print_report(report: &Comparison) {
    let cycles = report.options.cycles;
    for (round, r) in report.fair.iter().enumerate() {
        println!(
            "FairQ, asymmetric load round {round} for {cycles} cycles took: {:.3}s",
            r.elapsed_secs
        );
    }
    println!("======> FairQ average: {:.3}s", report.fair_avg_secs);
    for (round, r) in report.fifo.iter().enumerate() {
        println!(
            "FifoQ, asymmetric load round {round} for {cycles} cycles took: {:.3}s",
            r.elapsed_secs
        );
    }
    println!("======> FifoQ average: {:.3}s", report.fifo_avg_secs);
    println!(
        "Comparison: FairQ {:.3}s  FifoQ {:.3}s  speedup {:.1}%",
        report.fair_avg_secs, report.fifo_avg_secs, report.speedup_pct
    );
    if report.cancelled {
        println!("(interrupted: averages cover completed rounds only)");
    }
}
