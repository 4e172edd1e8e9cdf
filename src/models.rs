//! Data models for the article table and the run report.
//!
//! This module defines the core data structures used throughout the pipeline:
//! - [`Table`]: an ordered, column-named collection of rows, generic over the row key
//! - [`Row`]: one article record, its key plus one optional value per column
//! - [`Dataset`]: a table addressed by position, as loaded from CSV
//! - [`KeyedDataset`]: a table addressed by content-derived `uid`
//! - [`RunSummary`]: counters describing one cleaning run
//!
//! A value of `None` is a *missing* field. Empty CSV fields and the usual
//! NA markers load as `None` (see [`crate::inputs`]).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::errors::CleanError;

/// One record of the article table.
///
/// `values` is aligned with the owning table's column list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<K> {
    /// Positional index before re-keying, `uid` after.
    pub key: K,
    /// Field values, `None` when missing.
    pub values: Vec<Option<String>>,
}

impl<K> Row<K> {
    /// Borrow the value at column index `idx`, if present.
    pub fn get(&self, idx: usize) -> Option<&str> {
        self.values.get(idx).and_then(|v| v.as_deref())
    }

    /// `true` when no field of the row is missing.
    pub fn is_complete(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }
}

/// An ordered collection of rows sharing one column layout.
///
/// Column order is the order in which columns were introduced: input columns
/// first, then every derived column in the order its stage appended it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table<K> {
    pub(crate) index_name: Option<String>,
    pub(crate) columns: Vec<String>,
    pub(crate) rows: Vec<Row<K>>,
}

/// The table as read from disk, rows keyed by their 0-based position.
pub type Dataset = Table<usize>;

/// The table after identity assignment, rows keyed by `uid`.
pub type KeyedDataset = Table<String>;

impl Dataset {
    /// Build a positional dataset from a header and raw row values.
    pub fn from_records(columns: Vec<String>, records: Vec<Vec<Option<String>>>) -> Self {
        let rows = records
            .into_iter()
            .enumerate()
            .map(|(key, values)| Row { key, values })
            .collect();
        Table {
            index_name: None,
            columns,
            rows,
        }
    }
}

impl KeyedDataset {
    /// Build a keyed dataset. Callers guarantee key uniqueness.
    pub(crate) fn keyed(index_name: &str, columns: Vec<String>, rows: Vec<Row<String>>) -> Self {
        Table {
            index_name: Some(index_name.to_string()),
            columns,
            rows,
        }
    }

    /// First row with `key`, found by a linear scan.
    #[cfg(test)]
    pub fn row(&self, key: &str) -> Option<&Row<String>> {
        self.rows.iter().find(|row| row.key == key)
    }
}

impl<K> Table<K> {
    /// Name of the key column, `None` while rows are addressed by position.
    pub fn index_name(&self) -> Option<&str> {
        self.index_name.as_deref()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row<K>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Position of `name` in the column list.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Position of `name`, or [`CleanError::MissingColumn`] when absent.
    pub fn require_column(&self, name: &str) -> Result<usize, CleanError> {
        self.column_index(name)
            .ok_or_else(|| CleanError::MissingColumn {
                column: name.to_string(),
            })
    }

    /// Value of column `name` in every row, in row order.
    #[cfg(test)]
    pub fn column_values(&self, name: &str) -> Option<Vec<Option<&str>>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row.get(idx)).collect())
    }

    /// Append an all-missing column unless it already exists.
    ///
    /// Returns `true` when the column was added.
    pub fn ensure_column(&mut self, name: &str) -> bool {
        if self.column_index(name).is_some() {
            return false;
        }
        self.columns.push(name.to_string());
        for row in &mut self.rows {
            row.values.push(None);
        }
        true
    }

    /// Compute column `name` from each row.
    ///
    /// An existing column of that name is overwritten in place, keeping its
    /// position; otherwise the column is appended. `derive` sees the row
    /// before the new value is stored, so each value stays with its own row.
    pub fn set_column<F>(&mut self, name: &str, mut derive: F) -> usize
    where
        F: FnMut(&Row<K>) -> Option<String>,
    {
        let idx = match self.column_index(name) {
            Some(idx) => idx,
            None => {
                self.ensure_column(name);
                self.columns.len() - 1
            }
        };
        for row in &mut self.rows {
            let value = derive(row);
            row.values[idx] = value;
        }
        idx
    }

    /// Rewrite every present value of column `name` in place.
    ///
    /// Missing values are left missing.
    pub fn map_column<F>(&mut self, name: &str, mut rewrite: F) -> Result<usize, CleanError>
    where
        F: FnMut(&str) -> String,
    {
        let idx = self.require_column(name)?;
        let mut changed = 0;
        for row in &mut self.rows {
            if let Some(value) = row.values[idx].as_mut() {
                let rewritten = rewrite(value);
                if rewritten != *value {
                    *value = rewritten;
                    changed += 1;
                }
            }
        }
        Ok(changed)
    }

    /// Remove column `name`, returning whether it existed.
    pub fn drop_column(&mut self, name: &str) -> bool {
        let Some(idx) = self.column_index(name) else {
            return false;
        };
        self.columns.remove(idx);
        for row in &mut self.rows {
            row.values.remove(idx);
        }
        true
    }

    /// Keep only the rows for which `keep` returns `true`, preserving order.
    ///
    /// Returns the number of rows removed.
    pub fn retain<F>(&mut self, keep: F) -> usize
    where
        F: FnMut(&Row<K>) -> bool,
    {
        let before = self.rows.len();
        self.rows.retain(keep);
        before - self.rows.len()
    }
}

/// Counters describing one cleaning run.
///
/// Logged at the end of every run and optionally written as JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RunSummary {
    /// The file the run read.
    pub input_file: PathBuf,
    /// The cleaned CSV the run wrote.
    pub output_file: PathBuf,
    /// Source identifier derived from the input file name.
    pub newspaper_uid: String,
    pub rows_read: usize,
    /// Missing titles rebuilt from the URL slug.
    pub titles_filled: usize,
    /// URLs that could not be parsed and received an empty host.
    pub unparseable_urls: usize,
    /// Rows dropped at re-keying because their `url` was missing.
    pub rows_without_url: usize,
    pub duplicates_removed: usize,
    pub incomplete_removed: usize,
    pub rows_written: usize,
}
