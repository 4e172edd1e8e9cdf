//! Line-break removal for title and body text.
//!
//! Scraped bodies carry the page's hard line breaks, which would split a
//! record across lines in naive CSV consumers. Every `\r` and `\n` is dropped;
//! all other characters keep their order.

use tracing::{info, instrument};

use crate::errors::CleanError;
use crate::models::Table;

/// Columns whose text is normalized.
pub const TEXT_COLUMNS: [&str; 2] = ["title", "body"];

/// `text` with every carriage return and line feed removed.
pub fn strip_new_lines(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, '\r' | '\n')).collect()
}

/// Strip line breaks from one column. Returns how many values changed.
#[instrument(level = "info", skip(table))]
pub fn remove_new_lines<K>(table: &mut Table<K>, column: &str) -> Result<usize, CleanError> {
    let changed = table.map_column(column, strip_new_lines)?;
    info!(rows = table.len(), changed, "Removed line breaks");
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Dataset;

    #[test]
    fn test_strip_crlf_and_lone_breaks() {
        assert_eq!(strip_new_lines("Hola\r\nMundo"), "HolaMundo");
        assert_eq!(strip_new_lines("a\nb\rc\n\n"), "abc");
    }

    #[test]
    fn test_strip_preserves_unicode_and_other_whitespace() {
        assert_eq!(
            strip_new_lines("¿Qué\tpasó\u{2028} en\nMéxico? 🇲🇽"),
            "¿Qué\tpasó\u{2028} enMéxico? 🇲🇽"
        );
        assert_eq!(strip_new_lines(""), "");
    }

    #[test]
    fn test_strip_is_idempotent() {
        let once = strip_new_lines("uno\r\ndos\ntres");
        assert_eq!(strip_new_lines(&once), once);
        assert!(!once.contains(['\r', '\n']));
    }

    #[test]
    fn test_remove_new_lines_per_column() {
        let mut ds = Dataset::from_records(
            vec!["title".to_string(), "body".to_string()],
            vec![
                vec![Some("Sin\nsalto".to_string()), Some("Hola\r\nMundo".to_string())],
                vec![Some("Limpio".to_string()), None],
            ],
        );
        for column in TEXT_COLUMNS {
            remove_new_lines(&mut ds, column).unwrap();
        }
        assert_eq!(
            ds.column_values("title").unwrap(),
            vec![Some("Sinsalto"), Some("Limpio")]
        );
        assert_eq!(
            ds.column_values("body").unwrap(),
            vec![Some("HolaMundo"), None]
        );
    }

    #[test]
    fn test_remove_new_lines_requires_column() {
        let mut ds = Dataset::from_records(vec!["title".to_string()], vec![]);
        assert!(remove_new_lines(&mut ds, "body").is_err());
    }
}
