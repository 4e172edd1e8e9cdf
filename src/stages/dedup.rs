//! Duplicate-title removal.

use itertools::Itertools;
use tracing::{info, instrument};

use crate::errors::CleanError;
use crate::models::Table;

/// Drop every row whose `column` value repeats an earlier row's value.
///
/// The first occurrence in table order wins. Comparison is exact string
/// equality; missing values are equal to each other. Returns the number of
/// rows removed.
#[instrument(level = "info", skip(table))]
pub fn remove_duplicated_entries<K>(table: &mut Table<K>, column: &str) -> Result<usize, CleanError> {
    let idx = table.require_column(column)?;
    let before = table.rows.len();
    table.rows = std::mem::take(&mut table.rows)
        .into_iter()
        .unique_by(|row| row.values[idx].clone())
        .collect();
    let removed = before - table.rows.len();
    info!(rows = table.len(), removed, "Removed duplicated entries");
    Ok(removed)
}
