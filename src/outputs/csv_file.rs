//! Cleaned CSV output.
//!
//! The key column (`uid`) comes first, followed by every other column in the
//! order it was introduced. The file starts with a UTF-8 byte-order mark so
//! spreadsheet tools detect the encoding of accented text.

use csv::{Terminator, WriterBuilder};
use std::path::Path;
use tracing::{info, instrument};

use crate::errors::CleanError;
use crate::inputs::UTF8_BOM;
use crate::models::KeyedDataset;
use crate::outputs::write_atomically;

/// Serialize the table, BOM included. Missing values become empty fields.
pub fn to_csv_bytes(table: &KeyedDataset) -> Result<Vec<u8>, csv::Error> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(UTF8_BOM.to_vec());

    let index_name = table.index_name().unwrap_or_default();
    writer.write_record(std::iter::once(index_name).chain(table.columns().iter().map(String::as_str)))?;
    for row in table.rows() {
        let fields = row.values.iter().map(|v| v.as_deref().unwrap_or_default());
        writer.write_record(std::iter::once(row.key.as_str()).chain(fields))?;
    }

    writer.into_inner().map_err(|e| csv::Error::from(e.into_error()))
}

/// Write the cleaned table to `path`.
///
/// # Errors
///
/// Returns [`CleanError::Csv`] if serialization fails and [`CleanError::Io`]
/// if the file cannot be written; in both cases `path` is left untouched.
#[instrument(level = "info", skip_all, fields(path = %path.display(), rows = table.len()))]
pub async fn save_data(table: &KeyedDataset, path: &Path) -> Result<(), CleanError> {
    let bytes = to_csv_bytes(table).map_err(|source| CleanError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    write_atomically(path, &bytes).await?;
    info!(bytes = bytes.len(), "Saved cleaned CSV");
    Ok(())
}
