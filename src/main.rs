//! CLI entry point for the ZIP rent rater.
//!
//! With no arguments, reads the rent files under `in/` and writes one rental
//! index CSV per apartment size plus `general-data.csv` under `out/`.

use anyhow::Result;
use clap::Parser;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use zip_rent_rater::analyzers::analyzer::analyze;
use zip_rent_rater::config::RaterConfig;

#[derive(Parser)]
#[command(name = "zip_rent_rater")]
#[command(about = "Ranks ZIP codes by rent level, trend and stability", long_about = None)]
struct Cli {
    /// Directory holding the rent and population-density CSVs
    #[arg(short, long, default_value = "in")]
    input_dir: PathBuf,

    /// Directory to write reports to (created if missing)
    #[arg(short, long, default_value = "out")]
    output_dir: PathBuf,

    /// Optional JSON file overriding city, categories and file names
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/zip_rent_rater.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("zip_rent_rater.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => RaterConfig::load(path)?,
        None => RaterConfig::default(),
    };

    info!(
        city = %config.city,
        input_dir = %cli.input_dir.display(),
        output_dir = %cli.output_dir.display(),
        categories = config.categories.len(),
        "Starting rental index run"
    );

    let reports = analyze(&config, &cli.input_dir, &cli.output_dir)?;

    let scored: usize = reports.iter().map(|r| r.entries.len()).sum();
    info!(categories = reports.len(), scored, "Finished rental index run");

    Ok(())
}
