//! IndexLab CLI — yearly OHLC tables for mainland index benchmarks.
//!
//! Reads the Tushare token from `TS_TOKEN` (a `.env` file is honored), fetches
//! daily bars for each configured index and prints one yearly table per index.
//!
//! Exit status is 0 even when individual indices fail; those failures are
//! printed inline. A missing token exits with status 2 before any request.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use indexlab_core::data::DEFAULT_API_URL;
use indexlab_core::{resolve_token, run_report, DateWindow, IndexSet, TushareProvider};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "indexlab",
    about = "IndexLab CLI — yearly OHLC summaries for Chinese market indices",
    version
)]
struct Cli {
    /// Number of calendar years to look back (the current year is included on top).
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    years: u32,

    /// Report as of this date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    as_of: Option<String>,

    /// TOML file listing the indices to report on. Defaults to the built-in seven.
    #[arg(long)]
    indexes: Option<PathBuf>,

    /// Tushare Pro endpoint.
    #[arg(long, env = "TUSHARE_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Log level for stderr output when RUST_LOG is unset (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn")]
    log_level: String,
}

/// Status for a missing access token.
const EXIT_MISSING_TOKEN: u8 = 2;

fn main() -> ExitCode {
    // .env must be loaded before clap reads env-backed flags.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let token = match resolve_token(|key| std::env::var(key).ok()) {
        Ok(token) => token,
        Err(e) => {
            println!("ERROR: {e}");
            return ExitCode::from(EXIT_MISSING_TOKEN);
        }
    };

    match run(cli, token) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("indexlab_core={level},indexlab={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli, token: String) -> Result<()> {
    let window = resolve_window(cli.as_of.as_deref(), cli.years)?;

    let indexes = match &cli.indexes {
        Some(path) => IndexSet::from_file(path)?,
        None => IndexSet::default_cn(),
    };

    let provider = TushareProvider::new(token, cli.api_url)?;
    tracing::debug!(api_url = provider.api_url(), "using Tushare endpoint");

    let max_years = cli.years as usize;
    let mut out = std::io::stdout().lock();
    let summary = run_report(&provider, indexes.as_slice(), &window, max_years, &mut out)
        .context("failed to write report")?;

    if !summary.all_succeeded() {
        tracing::warn!(
            failed = summary.failed,
            total = summary.total,
            "some indices could not be reported"
        );
    }

    Ok(())
}

/// Lookback window ending on `--as-of`, or on the local date when it is absent.
fn resolve_window(as_of: Option<&str>, years: u32) -> Result<DateWindow> {
    let window = match as_of {
        Some(s) => {
            let as_of =
                NaiveDate::parse_from_str(s, "%Y-%m-%d").context("--as-of must be YYYY-MM-DD")?;
            DateWindow::trailing_years(as_of, years)?
        }
        None => DateWindow::trailing_years_from_today(years)?,
    };
    Ok(window)
}
