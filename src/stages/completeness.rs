//! Final filter: only fully populated rows are persisted.

use tracing::{info, instrument};

use crate::models::{Row, Table};

/// Drop every row with a missing value in any column.
///
/// Returns the number of rows removed.
#[instrument(level = "info", skip_all)]
pub fn drop_rows_with_missing_values<K>(table: &mut Table<K>) -> usize {
    let removed = table.retain(Row::is_complete);
    info!(rows = table.len(), removed, "Dropped rows with missing values");
    removed
}
