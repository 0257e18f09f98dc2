use std::io::{stderr, stdout, BufWriter, Write};
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use tokio::time::sleep;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use fraud_dashboard::engine::{Dashboard, DashboardConfig};
use fraud_dashboard::sources::{CsvHistory, HistoricalSource, SimulatedFeed};
use fraud_dashboard::views::DashboardViews;

const BACKFILL_RECORDS: usize = 200;
const DEFAULT_TICKS: usize = 12;

#[tokio::main]
async fn main() -> Result<()> {
    //NOTE: Positional arguments keep the CLI dependency free; switch to clap if the option list keeps growing.
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|arg| arg == "-h" || arg == "--help") {
        eprintln!("Usage: fraud-dashboard [history.csv|-] [log_level] [ticks] [tick_ms] > [views].jsonl");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: error)");
        return Ok(());
    }

    let history_path = args.get(1).filter(|path| path.as_str() != "-");
    let log_level = args.get(2)
        .map(|s| parse_log_level(s)).unwrap_or_else(|| LevelFilter::ERROR);
    let ticks = args.get(3)
        .and_then(|s| s.parse().ok()).unwrap_or(DEFAULT_TICKS);

    setup_logging(log_level);

    let mut config = DashboardConfig::default();

    if let Some(tick_ms) = args.get(4).and_then(|s| s.parse().ok()) {
        config = config.with_tick_interval(Duration::from_millis(tick_ms));
    }

    match history_path {
        Some(path) => run(config, CsvHistory::new(path), ticks).await,
        None => {
            let history = SimulatedFeed::new().backfill(BACKFILL_RECORDS, Utc::now());
            run(config, history, ticks).await
        }
    }
}

async fn run<H: HistoricalSource + 'static>(config: DashboardConfig, history: H, ticks: usize) -> Result<()> {
    let tick_interval = config.tick_interval;
    let dashboard = Dashboard::new(config, history, SimulatedFeed::new());

    dashboard.start().await?;

    let views = dashboard.current_views().await;
    write_views_to_stdout(&views)?;

    for _ in 0..ticks {
        sleep(tick_interval).await;

        if !dashboard.is_running() {
            break;
        }

        let views = dashboard.current_views().await;
        write_views_to_stdout(&views)?;
    }

    dashboard.stop();

    let stats = dashboard.snapshot().stats;
    info!(
        "Session ended after {} transactions ({} flagged, volume {})",
        stats.total_transactions, stats.flagged_transactions, stats.total_volume
    );

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: Views are streamed to stdout, so logging has to go to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_views_to_stdout(views: &DashboardViews) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    serde_json::to_writer(&mut output, views)?;
    writeln!(output)?;
    output.flush()?;

    Ok(())
}
