//! Loading the scraped-articles CSV into a [`Dataset`].
//!
//! The file is read whole, a leading UTF-8 byte-order mark is skipped (the
//! cleaner's own output carries one), and every field that is empty or an NA
//! marker loads as a missing value.

use csv::ReaderBuilder;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info, instrument};

use crate::errors::CleanError;
use crate::models::Dataset;

pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Field contents treated as missing, in addition to the empty string.
pub const NA_VALUES: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Columns without which the pipeline cannot run. `title` is not listed:
/// an absent title column is rebuilt from the URLs.
pub const REQUIRED_COLUMNS: [&str; 2] = ["url", "body"];

pub fn is_missing(field: &str) -> bool {
    field.is_empty() || NA_VALUES.contains(&field)
}

/// Parse CSV bytes into a positional dataset.
///
/// Short rows are padded with missing values; a row with more fields than
/// the header is an error. `path` is only used for error reporting.
pub fn parse_csv(path: &Path, bytes: &[u8]) -> Result<Dataset, CleanError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let csv_err = |source| CleanError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);
    let columns: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(str::to_string)
        .collect();

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        if record.len() > columns.len() {
            return Err(CleanError::RaggedRow {
                path: path.to_path_buf(),
                line: record.position().map_or(0, |p| p.line()),
                expected: columns.len(),
                found: record.len(),
            });
        }
        let mut values: Vec<Option<String>> = record
            .iter()
            .map(|field| (!is_missing(field)).then(|| field.to_string()))
            .collect();
        values.resize(columns.len(), None);
        records.push(values);
    }

    Ok(Dataset::from_records(columns, records))
}

/// Fail with [`CleanError::MissingColumn`] unless every required column exists.
pub fn check_required_columns(dataset: &Dataset) -> Result<(), CleanError> {
    for column in REQUIRED_COLUMNS {
        dataset.require_column(column)?;
    }
    Ok(())
}

/// Read and parse the input file.
///
/// # Errors
///
/// - [`CleanError::Io`] if the file cannot be read
/// - [`CleanError::Csv`] / [`CleanError::RaggedRow`] on malformed CSV or non-UTF-8 text
/// - [`CleanError::MissingColumn`] if `url` or `body` is absent
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn read_data(path: &Path) -> Result<Dataset, CleanError> {
    let bytes = fs::read(path).await.map_err(|e| CleanError::io(path, e))?;
    debug!(bytes = bytes.len(), "Read input file");
    let dataset = parse_csv(path, &bytes)?;
    check_required_columns(&dataset)?;
    info!(
        rows = dataset.len(),
        columns = ?dataset.columns(),
        "Loaded dataset"
    );
    Ok(dataset)
}
