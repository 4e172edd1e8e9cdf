//! Source attribution from the input file name.
//!
//! Scraped files follow the `<newspaper>_<anything>.csv` naming convention,
//! e.g. `eluniversal_2024_05_06.csv`. The prefix before the first underscore
//! identifies the newspaper and is stamped on every row.

use tracing::{info, instrument};

use crate::models::Table;

pub const NEWSPAPER_UID: &str = "newspaper_uid";

/// Source identifier for a file name: everything before the first `_`.
///
/// A file name without an underscore is used whole.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(extract_newspaper_uid("eluniversal_2024.csv"), "eluniversal");
/// assert_eq!(extract_newspaper_uid("elpais.csv"), "elpais.csv");
/// ```
pub fn extract_newspaper_uid(filename: &str) -> &str {
    filename
        .split_once('_')
        .map_or(filename, |(prefix, _)| prefix)
}

/// Stamp `newspaper_uid` on every row.
#[instrument(level = "info", skip(table))]
pub fn add_newspaper_uid_column<K>(table: &mut Table<K>, newspaper_uid: &str) {
    table.set_column(NEWSPAPER_UID, |_| Some(newspaper_uid.to_string()));
    info!(rows = table.len(), "Filled newspaper_uid column");
}
