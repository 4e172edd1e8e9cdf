//! JSON run summary.
//!
//! Scheduled jobs and notebooks read this file instead of scraping log
//! output to find out how many rows a run kept and why the others went.
//!
//! # Output Structure
//!
//! ```text
//! {
//!   "input_file": "data/eluniversal_2024.csv",
//!   "output_file": "data/clean_eluniversal_2024.csv",
//!   "newspaper_uid": "eluniversal",
//!   "rows_read": 120,
//!   ...
//! }
//! ```

use std::path::Path;
use tracing::{info, instrument};

use crate::errors::CleanError;
use crate::models::RunSummary;
use crate::outputs::write_atomically;

/// Write a [`RunSummary`] to `path` as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization, directory creation or the write fails.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_summary(summary: &RunSummary, path: &Path) -> Result<(), CleanError> {
    let json = serde_json::to_string_pretty(summary)?;
    write_atomically(path, json.as_bytes()).await?;
    info!("Wrote run summary");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_write_summary_round_trips() {
        let dir = std::env::temp_dir().join(format!("news_clean_json_{}", std::process::id()));
        let path = dir.join("reports").join("summary.json");
        let summary = RunSummary {
            input_file: PathBuf::from("eluniversal_2024.csv"),
            output_file: PathBuf::from("clean_eluniversal_2024.csv"),
            newspaper_uid: "eluniversal".to_string(),
            rows_read: 4,
            duplicates_removed: 1,
            rows_written: 3,
            ..RunSummary::default()
        };

        write_summary(&summary, &path).await.unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"duplicates_removed\": 1"));
        let back: RunSummary = serde_json::from_str(&text).unwrap();
        assert_eq!(back, summary);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
