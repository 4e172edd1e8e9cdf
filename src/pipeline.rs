//! The cleaning pipeline: load, eight transformation stages, save.
//!
//! [`clean`] is the pure core and runs the stages over an in-memory
//! [`Dataset`]; [`run`] wraps it with the file read, stop-word loading and
//! the file write.

use std::path::Path;
use tracing::{info, instrument};

use crate::config::CleanConfig;
use crate::errors::CleanError;
use crate::inputs::read_data;
use crate::models::{Dataset, KeyedDataset, RunSummary};
use crate::outputs::csv_file::save_data;
use crate::stages::completeness::drop_rows_with_missing_values;
use crate::stages::dedup::remove_duplicated_entries;
use crate::stages::host::extract_hosts;
use crate::stages::identity::generate_uids_for_rows;
use crate::stages::source::{add_newspaper_uid_column, extract_newspaper_uid};
use crate::stages::text::{TEXT_COLUMNS, remove_new_lines};
use crate::stages::titles::fill_missing_titles;
use crate::stages::tokens::{TOKEN_COLUMNS, TokenCounter, tokenize_column};

/// Per-stage counters collected by [`clean`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanStats {
    pub rows_read: usize,
    pub unparseable_urls: usize,
    pub titles_filled: usize,
    pub rows_without_url: usize,
    pub duplicates_removed: usize,
    pub incomplete_removed: usize,
}

/// Run all eight stages over `dataset`.
///
/// # Errors
///
/// - [`CleanError::MissingColumn`] when `url`, `body` or `dedup_column` is absent
/// - [`CleanError::DuplicateUid`] when two rows share a URL
#[instrument(level = "info", skip(dataset, counter, config), fields(rows = dataset.len()))]
pub fn clean(
    mut dataset: Dataset,
    newspaper_uid: &str,
    counter: &TokenCounter,
    config: &CleanConfig,
) -> Result<(KeyedDataset, CleanStats), CleanError> {
    let mut stats = CleanStats {
        rows_read: dataset.len(),
        ..CleanStats::default()
    };

    add_newspaper_uid_column(&mut dataset, newspaper_uid);
    stats.unparseable_urls = extract_hosts(&mut dataset)?;
    stats.titles_filled = fill_missing_titles(&mut dataset)?;
    for column in TEXT_COLUMNS {
        remove_new_lines(&mut dataset, column)?;
    }

    let rekeyed = generate_uids_for_rows(dataset)?;
    stats.rows_without_url = rekeyed.rows_without_url;
    let mut keyed = rekeyed.dataset;

    for (source, target) in TOKEN_COLUMNS {
        tokenize_column(&mut keyed, counter, source, target)?;
    }
    stats.duplicates_removed = remove_duplicated_entries(&mut keyed, &config.dedup_column)?;
    stats.incomplete_removed = drop_rows_with_missing_values(&mut keyed);

    Ok((keyed, stats))
}

/// Clean the CSV at `input` and write the result next to it (or into
/// `config.output_dir`).
///
/// Nothing is written unless every stage succeeds.
#[instrument(level = "info", skip_all, fields(input = %input.display()))]
pub async fn run(input: &Path, config: &CleanConfig) -> Result<RunSummary, CleanError> {
    info!("Starting cleaning run");

    let file_name = input
        .file_name()
        .ok_or_else(|| CleanError::NoFileName(input.to_path_buf()))?
        .to_string_lossy()
        .into_owned();
    let output = config.output_path(input)?;

    let dataset = read_data(input).await?;
    let newspaper_uid = extract_newspaper_uid(&file_name);
    info!(%newspaper_uid, "Detected newspaper uid");

    let counter = TokenCounter::new(config.stop_words().await?);
    let (cleaned, stats) = clean(dataset, newspaper_uid, &counter, config)?;

    save_data(&cleaned, &output).await?;

    let summary = RunSummary {
        input_file: input.to_path_buf(),
        output_file: output,
        newspaper_uid: newspaper_uid.to_string(),
        rows_read: stats.rows_read,
        titles_filled: stats.titles_filled,
        unparseable_urls: stats.unparseable_urls,
        rows_without_url: stats.rows_without_url,
        duplicates_removed: stats.duplicates_removed,
        incomplete_removed: stats.incomplete_removed,
        rows_written: cleaned.len(),
    };
    info!(
        output = %summary.output_file.display(),
        rows_read = summary.rows_read,
        rows_written = summary.rows_written,
        "Cleaning run finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::{UTF8_BOM, parse_csv};
    use crate::outputs::csv_file::to_csv_bytes;
    use crate::stages::identity::url_uid;
    use crate::stopwords::StopWords;
    use std::path::PathBuf;

    const ELUNIVERSAL: &str = "url,title,body\n\
https://www.eluniversal.com/noticia-de-prueba,,\"Hola\r\nMundo\"\n\
https://www.eluniversal.com/politica/otra-nota,Reforma aprobada,\"El Senado aprobó\nla reforma.\"\n\
https://www.eluniversal.com/politica/repetida,Reforma aprobada,Texto repetido\n\
https://www.eluniversal.com/sin-cuerpo,Sin cuerpo,\n";

    fn clean_text(text: &str) -> (KeyedDataset, CleanStats) {
        let dataset = parse_csv(Path::new("eluniversal_2024.csv"), text.as_bytes()).unwrap();
        let counter = TokenCounter::new(StopWords::spanish());
        clean(dataset, "eluniversal", &counter, &CleanConfig::default()).unwrap()
    }

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("news_clean_{tag}_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_clean_backfilled_row() {
        let (cleaned, _) = clean_text(ELUNIVERSAL);
        assert_eq!(
            cleaned.columns(),
            [
                "url",
                "title",
                "body",
                "newspaper_uid",
                "host",
                "n_tokens_title",
                "n_tokens_body"
            ]
        );
        let row = cleaned
            .row(&url_uid("https://www.eluniversal.com/noticia-de-prueba"))
            .unwrap();
        assert_eq!(row.key, "5287f0d36a8b93de4009a201d20060a6");
        let values: Vec<&str> = (0..7).map(|i| row.get(i).unwrap()).collect();
        assert_eq!(
            values,
            vec![
                "https://www.eluniversal.com/noticia-de-prueba",
                "Noticia de prueba",
                "HolaMundo",
                "eluniversal",
                "www.eluniversal.com",
                "2",
                "2"
            ]
        );
    }

    #[test]
    fn test_clean_dedups_and_drops_incomplete() {
        let (cleaned, stats) = clean_text(ELUNIVERSAL);
        assert_eq!(stats.rows_read, 4);
        assert_eq!(stats.titles_filled, 1);
        assert_eq!(stats.duplicates_removed, 1);
        assert_eq!(stats.incomplete_removed, 1);
        assert_eq!(cleaned.len(), 2);

        let kept = cleaned
            .row(&url_uid("https://www.eluniversal.com/politica/otra-nota"))
            .unwrap();
        // senado, aprobóla, reforma
        assert_eq!(kept.get(2), Some("El Senado aprobóla reforma."));
        assert_eq!(kept.get(6), Some("3"));
        assert!(
            cleaned
                .row(&url_uid("https://www.eluniversal.com/politica/repetida"))
                .is_none()
        );
    }

    #[test]
    fn test_clean_dedups_on_normalized_titles() {
        let text = "url,title,body\n\
https://www.eluniversal.com/a,\"Uno\ndos\",primero\n\
https://www.eluniversal.com/b,Unodos,segundo\n";
        let (cleaned, stats) = clean_text(text);
        assert_eq!(stats.duplicates_removed, 1);
        assert_eq!(cleaned.len(), 1);
        assert_eq!(
            cleaned.rows()[0].key,
            url_uid("https://www.eluniversal.com/a")
        );
        assert_eq!(cleaned.rows()[0].get(1), Some("Unodos"));
    }

    #[test]
    fn test_clean_output_invariants() {
        let (cleaned, _) = clean_text(ELUNIVERSAL);
        let title_idx = cleaned.column_index("title").unwrap();
        let mut titles: Vec<&str> = cleaned
            .rows()
            .iter()
            .map(|r| r.get(title_idx).unwrap())
            .collect();
        let before = titles.len();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), before);
        assert!(cleaned.rows().iter().all(|r| r.is_complete()));
        assert!(cleaned.rows().iter().all(|r| r.key.len() == 32));
        for column in TEXT_COLUMNS {
            let values = cleaned.column_values(column).unwrap();
            assert!(values.iter().flatten().all(|v| !v.contains(['\r', '\n'])));
        }
    }

    #[test]
    fn test_clean_rejects_duplicate_urls() {
        let text = "url,title,body\nhttps://a.com/x,A,uno\nhttps://a.com/x,B,dos\n";
        let dataset = parse_csv(Path::new("a_1.csv"), text.as_bytes()).unwrap();
        let counter = TokenCounter::new(StopWords::spanish());
        let err = clean(dataset, "a", &counter, &CleanConfig::default()).unwrap_err();
        assert!(matches!(err, CleanError::DuplicateUid { first_row: 0, row: 1, .. }));
    }

    #[test]
    fn test_clean_is_deterministic() {
        let (first, _) = clean_text(ELUNIVERSAL);
        let (second, _) = clean_text(ELUNIVERSAL);
        assert_eq!(to_csv_bytes(&first).unwrap(), to_csv_bytes(&second).unwrap());
    }

    #[tokio::test]
    async fn test_run_end_to_end() {
        let dir = temp_dir("run");
        let input = dir.join("eluniversal_2024.csv");
        std::fs::write(&input, ELUNIVERSAL).unwrap();

        let summary = run(&input, &CleanConfig::default()).await.unwrap();
        assert_eq!(summary.newspaper_uid, "eluniversal");
        assert_eq!(summary.output_file, dir.join("clean_eluniversal_2024.csv"));
        assert_eq!(summary.rows_read, 4);
        assert_eq!(summary.rows_written, 2);

        let bytes = std::fs::read(&summary.output_file).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        let text = std::str::from_utf8(&bytes[UTF8_BOM.len()..]).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("uid,url,title,body,newspaper_uid,host,n_tokens_title,n_tokens_body")
        );
        assert_eq!(
            lines.next(),
            Some(
                "5287f0d36a8b93de4009a201d20060a6,https://www.eluniversal.com/noticia-de-prueba,\
Noticia de prueba,HolaMundo,eluniversal,www.eluniversal.com,2,2"
            )
        );

        let again = run(&input, &CleanConfig::default()).await.unwrap();
        assert_eq!(std::fs::read(&again.output_file).unwrap(), bytes);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_run_accepts_its_own_output() {
        let dir = temp_dir("rerun");
        let input = dir.join("eluniversal_2024.csv");
        std::fs::write(&input, ELUNIVERSAL).unwrap();
        let first = run(&input, &CleanConfig::default()).await.unwrap();

        let second = run(&first.output_file, &CleanConfig::default()).await.unwrap();
        assert_eq!(second.newspaper_uid, "clean");
        assert_eq!(second.rows_read, 2);
        assert_eq!(second.rows_written, 2);

        let dataset = crate::inputs::read_data(&second.output_file).await.unwrap();
        assert_eq!(
            dataset.columns(),
            [
                "uid",
                "url",
                "title",
                "body",
                "newspaper_uid",
                "host",
                "n_tokens_title",
                "n_tokens_body"
            ]
        );
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_run_missing_body_column_writes_nothing() {
        let dir = temp_dir("nobody");
        let input = dir.join("elpais_2024.csv");
        std::fs::write(&input, "url,title\nhttps://a.com/x,A\n").unwrap();

        let err = run(&input, &CleanConfig::default()).await.unwrap_err();
        assert!(matches!(err, CleanError::MissingColumn { column } if column == "body"));
        assert!(!dir.join("clean_elpais_2024.csv").exists());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
