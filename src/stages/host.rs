//! Host extraction from article URLs.
//!
//! The host is the network location of the URL exactly as written: the
//! domain (or IP literal) plus any explicit port, with user info removed.
//! `url::Url` only decides whether the URL is usable; the host text itself is
//! sliced from the input, so case, explicit ports and non-ASCII domains are
//! kept rather than normalized or punycode-encoded.

use tracing::{info, instrument, warn};
use url::Url;

use crate::errors::CleanError;
use crate::models::Table;
use crate::utils::truncate_for_log;

pub const HOST: &str = "host";

/// Network location of `url`, or `None` when it cannot be parsed as an
/// absolute URL with a host.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(extract_host("https://www.eluniversal.com/a").as_deref(), Some("www.eluniversal.com"));
/// assert_eq!(extract_host("https://www.méxico.com:443/x").as_deref(), Some("www.méxico.com:443"));
/// assert_eq!(extract_host("not a url"), None);
/// ```
pub fn extract_host(url: &str) -> Option<String> {
    let url = url.trim();
    Url::parse(url).ok()?.host_str()?;

    let (_, rest) = url.split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    if host.is_empty() {
        return None;
    }
    Some(host.to_string())
}

/// Add the `host` column.
///
/// A URL that cannot be parsed yields an empty host and a warning; a missing
/// URL yields a missing host. Returns the number of unparseable URLs.
#[instrument(level = "info", skip_all)]
pub fn extract_hosts<K>(table: &mut Table<K>) -> Result<usize, CleanError> {
    let url_idx = table.require_column("url")?;
    let mut unparseable = 0;
    table.set_column(HOST, |row| {
        let url = row.get(url_idx)?;
        match extract_host(url) {
            Some(host) => Some(host),
            None => {
                unparseable += 1;
                warn!(url = %truncate_for_log(url, 120), "Could not parse URL; host left empty");
                Some(String::new())
            }
        }
    });
    info!(rows = table.len(), unparseable, "Extracted hosts from URLs");
    Ok(unparseable)
}
