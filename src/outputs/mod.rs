//! Output generation for the cleaned table and the run summary.
//!
//! # Submodules
//!
//! - [`csv_file`]: Writes the keyed table as a BOM-prefixed UTF-8 CSV
//! - [`json`]: Writes the [`RunSummary`](crate::models::RunSummary) for tooling
//!
//! # Output Structure
//!
//! ```text
//! data/
//! ├── eluniversal_2024.csv         # input
//! └── clean_eluniversal_2024.csv   # uid,<input columns>,newspaper_uid,host,n_tokens_title,n_tokens_body
//! ```
//!
//! Both writers serialize fully in memory, write a `.tmp` sibling and rename
//! it into place, so a failed run never leaves a truncated file behind.

pub mod csv_file;
pub mod json;

use std::path::Path;
use tokio::fs;
use tracing::{error, instrument};

use crate::errors::CleanError;
use crate::utils::{ensure_parent_dir, temp_path};

/// Write `bytes` to `path` through a temporary sibling file.
#[instrument(level = "debug", skip_all, fields(path = %path.display(), bytes = bytes.len()))]
pub(crate) async fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), CleanError> {
    ensure_parent_dir(path).await?;
    let tmp = temp_path(path);
    if let Err(e) = fs::write(&tmp, bytes).await {
        error!(path = %tmp.display(), error = %e, "Failed to write temporary file");
        let _ = fs::remove_file(&tmp).await;
        return Err(CleanError::io(&tmp, e));
    }
    if let Err(e) = fs::rename(&tmp, path).await {
        error!(path = %path.display(), error = %e, "Failed to move output into place");
        let _ = fs::remove_file(&tmp).await;
        return Err(CleanError::io(path, e));
    }
    Ok(())
}
