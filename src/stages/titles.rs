//! Title backfill for rows scraped without a headline.
//!
//! Article URLs usually end in a slug of the headline
//! (`.../noticia-de-prueba`), which is turned back into a readable title.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::errors::CleanError;
use crate::models::Table;
use crate::utils::upcase;

pub const TITLE: &str = "title";

static LAST_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^/]+$").unwrap());

/// Title synthesized from the last path segment of `url`.
///
/// Hyphens become spaces and the first character is upper-cased. A URL that
/// ends in `/` has no trailing segment and yields an empty title.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(title_from_url("https://www.eluniversal.com/noticia-de-prueba"), "Noticia de prueba");
/// assert_eq!(title_from_url("https://www.eluniversal.com/"), "");
/// ```
pub fn title_from_url(url: &str) -> String {
    let segment = LAST_SEGMENT.find(url).map_or("", |m| m.as_str());
    upcase(&segment.replace('-', " "))
}

/// Fill every missing `title` from the row's `url`.
///
/// Rows with a title are untouched; rows missing both keep a missing title.
/// When the input has no `title` column at all, one is created and every row
/// is backfilled. Returns the number of titles filled.
#[instrument(level = "info", skip_all)]
pub fn fill_missing_titles<K>(table: &mut Table<K>) -> Result<usize, CleanError> {
    let url_idx = table.require_column("url")?;
    if table.ensure_column(TITLE) {
        warn!("Input has no title column; backfilling every title from its URL");
    }
    let title_idx = table.require_column(TITLE)?;

    let mut filled = 0;
    table.set_column(TITLE, |row| match row.get(title_idx) {
        Some(title) => Some(title.to_string()),
        None => {
            let title = title_from_url(row.get(url_idx)?);
            filled += 1;
            Some(title)
        }
    });
    info!(rows = table.len(), filled, "Filled missing titles");
    Ok(filled)
}
