//! # News Clean
//!
//! A cleaning step for CSV files of scraped newspaper articles. It turns a
//! raw scrape into a deduplicated, fingerprinted table ready for analysis.
//!
//! ## Features
//!
//! - Tags every row with the newspaper named by the file (`eluniversal_*.csv`)
//! - Extracts the host of each article URL
//! - Rebuilds missing titles from the URL slug
//! - Strips embedded line breaks from titles and bodies
//! - Keys every row by the MD5 of its URL (`uid`)
//! - Counts meaningful (non-stop-word) Spanish tokens in title and body
//! - Removes duplicate titles and incomplete rows
//!
//! ## Usage
//!
//! ```sh
//! news_clean eluniversal_2024_05_06.csv
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Loading**: Read the whole CSV into memory
//! 2. **Cleaning**: Run the eight stages in [`stages`] in order
//! 3. **Output**: Write `clean_<file>` and, optionally, a JSON run summary

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod errors;
mod inputs;
mod models;
mod outputs;
mod pipeline;
mod stages;
mod stopwords;
mod utils;

use cli::Cli;
use config::CleanConfig;
use outputs::json;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("Starting the cleaning process");

    let args = Cli::parse();
    debug!(input = %args.input.display(), config = ?args.config, summary = ?args.summary_json, "Parsed CLI arguments");

    let config = match &args.config {
        Some(path) => CleanConfig::load(path).await?,
        None => CleanConfig::default(),
    };

    let summary = match pipeline::run(&args.input, &config).await {
        Ok(summary) => summary,
        Err(e) => {
            error!(input = %args.input.display(), error = %e, "Cleaning run failed; no output written");
            return Err(e.into());
        }
    };

    if let Some(path) = &args.summary_json {
        if let Err(e) = json::write_summary(&summary, path).await {
            error!(path = %path.display(), error = %e, "Failed to write run summary");
            return Err(e.into());
        }
    }

    info!(
        newspaper_uid = %summary.newspaper_uid,
        rows_read = summary.rows_read,
        titles_filled = summary.titles_filled,
        unparseable_urls = summary.unparseable_urls,
        rows_without_url = summary.rows_without_url,
        duplicates_removed = summary.duplicates_removed,
        incomplete_removed = summary.incomplete_removed,
        rows_written = summary.rows_written,
        output = %summary.output_file.display(),
        "Run summary"
    );

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
