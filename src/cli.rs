//! Command-line interface definitions for News Clean.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The only required argument is the CSV to clean; everything else is optional.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the News Clean application.
///
/// # Examples
///
/// ```sh
/// # Clean a scraped file; writes clean_eluniversal_2024_05_06.csv next to it
/// news_clean data/eluniversal_2024_05_06.csv
///
/// # With a config file and a JSON run summary
/// news_clean data/eluniversal_2024_05_06.csv -c news_clean.yaml -s summary.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// The path to the dirty data
    pub input: PathBuf,

    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write a JSON summary of the run to this path
    #[arg(short, long)]
    pub summary_json: Option<PathBuf>,
}
