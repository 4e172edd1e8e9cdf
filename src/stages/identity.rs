//! Content-derived identity for article rows.
//!
//! Every row is fingerprinted by the MD5 digest of its URL and re-keyed by
//! that `uid`. The same URL always produces the same `uid`, so re-running
//! the cleaner on identical input yields identical keys.
//!
//! Re-keying consumes the positional [`Dataset`] and produces a
//! [`KeyedDataset`]; two rows that collapse onto one `uid` abort the run
//! rather than silently overwriting each other.

use md5::{Digest, Md5};
use std::collections::HashMap;
use tracing::{error, info, instrument, warn};

use crate::errors::CleanError;
use crate::models::{Dataset, KeyedDataset, Row};
use crate::utils::truncate_for_log;

pub const UID: &str = "uid";

/// 32-character lowercase hex MD5 of the URL's UTF-8 bytes.
pub fn url_uid(url: &str) -> String {
    format!("{:x}", Md5::digest(url.as_bytes()))
}

/// Result of re-keying a dataset by `uid`.
#[derive(Debug)]
pub struct Rekeyed {
    pub dataset: KeyedDataset,
    /// Rows dropped because they had no `url` to fingerprint.
    pub rows_without_url: usize,
}

/// Compute `uid` for every row and promote it to the row key.
///
/// A `uid` column already present in the input (as in a previously cleaned
/// file) is discarded and recomputed. Rows whose `url` is missing cannot be
/// keyed and are dropped with a warning.
///
/// # Errors
///
/// - [`CleanError::MissingColumn`] when there is no `url` column
/// - [`CleanError::DuplicateUid`] when two rows share a `uid`
#[instrument(level = "info", skip_all)]
pub fn generate_uids_for_rows(mut dataset: Dataset) -> Result<Rekeyed, CleanError> {
    dataset.drop_column(UID);
    let url_idx = dataset.require_column("url")?;

    let mut seen: HashMap<String, usize> = HashMap::with_capacity(dataset.len());
    let mut rows = Vec::with_capacity(dataset.len());
    let mut rows_without_url = 0;

    for row in dataset.rows {
        let Some(url) = row.get(url_idx) else {
            rows_without_url += 1;
            warn!(row = row.key, "Row has no url; dropping it");
            continue;
        };
        let uid = url_uid(url);
        if let Some(&first_row) = seen.get(&uid) {
            error!(%uid, first_row, row = row.key, "Duplicate uid");
            return Err(CleanError::DuplicateUid {
                uid,
                url: truncate_for_log(url, 200),
                first_row,
                row: row.key,
            });
        }
        seen.insert(uid.clone(), row.key);
        rows.push(Row {
            key: uid,
            values: row.values,
        });
    }

    info!(rows = rows.len(), rows_without_url, "Created uids for each row");
    Ok(Rekeyed {
        dataset: KeyedDataset::keyed(UID, dataset.columns, rows),
        rows_without_url,
    })
}
