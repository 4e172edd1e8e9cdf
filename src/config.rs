//! Optional YAML configuration for a cleaning run.
//!
//! Every field has a default, and running without a config file reproduces
//! the plain `news_clean <file>` behavior:
//!
//! ```yaml
//! # news_clean.yaml
//! dedup_column: title
//! output_prefix: clean_
//! output_dir: ./cleaned
//! stop_words_file: ./stopwords/es_extra.txt
//! extra_stop_words: [según, dijo]
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

use crate::errors::CleanError;
use crate::stopwords::StopWords;

/// Settings for one cleaning run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CleanConfig {
    /// Column whose repeated values are removed.
    pub dedup_column: String,
    /// Prefix joined to the input file name to name the output.
    pub output_prefix: String,
    /// Directory for the output; next to the input when unset.
    pub output_dir: Option<PathBuf>,
    /// Newline-separated stop-word list replacing the built-in Spanish one.
    pub stop_words_file: Option<PathBuf>,
    /// Words added to whichever stop-word list is active.
    pub extra_stop_words: Vec<String>,
}

impl Default for CleanConfig {
    fn default() -> Self {
        CleanConfig {
            dedup_column: "title".to_string(),
            output_prefix: "clean_".to_string(),
            output_dir: None,
            stop_words_file: None,
            extra_stop_words: Vec::new(),
        }
    }
}

impl CleanConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// [`CleanError::Io`] when the file cannot be read, [`CleanError::Config`]
    /// when it is not valid configuration.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub async fn load(path: &Path) -> Result<Self, CleanError> {
        let yaml = fs::read_to_string(path)
            .await
            .map_err(|e| CleanError::io(path, e))?;
        let config = Self::from_yaml_str(&yaml).map_err(|source| CleanError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        info!(?config, "Loaded configuration");
        Ok(config)
    }

    /// Build the stop-word set this configuration selects.
    pub async fn stop_words(&self) -> Result<StopWords, CleanError> {
        let mut stop_words = match &self.stop_words_file {
            Some(path) => StopWords::from_file(path).await?,
            None => StopWords::spanish(),
        };
        stop_words.extend(&self.extra_stop_words);
        Ok(stop_words)
    }

    /// Where the cleaned version of `input` is written.
    pub fn output_path(&self, input: &Path) -> Result<PathBuf, CleanError> {
        let file_name = input
            .file_name()
            .ok_or_else(|| CleanError::NoFileName(input.to_path_buf()))?;
        let mut clean_name = std::ffi::OsString::from(&self.output_prefix);
        clean_name.push(file_name);
        let dir = match &self.output_dir {
            Some(dir) => dir.as_path(),
            None => input.parent().unwrap_or_else(|| Path::new("")),
        };
        Ok(dir.join(clean_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CleanConfig::default();
        assert_eq!(config.dedup_column, "title");
        assert_eq!(config.output_prefix, "clean_");
        assert!(config.output_dir.is_none());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = CleanConfig::from_yaml_str("extra_stop_words: [según, dijo]\n").unwrap();
        assert_eq!(config.dedup_column, "title");
        assert_eq!(config.extra_stop_words, vec!["según", "dijo"]);
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(CleanConfig::from_yaml_str("dedup_colum: body\n").is_err());
    }

    #[test]
    fn test_output_path_next_to_input() {
        let config = CleanConfig::default();
        assert_eq!(
            config.output_path(Path::new("data/eluniversal_2024.csv")).unwrap(),
            PathBuf::from("data/clean_eluniversal_2024.csv")
        );
        assert_eq!(
            config.output_path(Path::new("eluniversal_2024.csv")).unwrap(),
            PathBuf::from("clean_eluniversal_2024.csv")
        );
    }

    #[test]
    fn test_output_path_with_output_dir() {
        let config = CleanConfig {
            output_dir: Some(PathBuf::from("/srv/clean")),
            output_prefix: "limpio_".to_string(),
            ..CleanConfig::default()
        };
        assert_eq!(
            config.output_path(Path::new("data/elpais_1.csv")).unwrap(),
            PathBuf::from("/srv/clean/limpio_elpais_1.csv")
        );
    }

    #[test]
    fn test_output_path_requires_file_name() {
        assert!(matches!(
            CleanConfig::default().output_path(Path::new("/")),
            Err(CleanError::NoFileName(_))
        ));
    }

    #[tokio::test]
    async fn test_stop_words_defaults_to_spanish_plus_extras() {
        let config = CleanConfig {
            extra_stop_words: vec!["Según".to_string()],
            ..CleanConfig::default()
        };
        let sw = config.stop_words().await.unwrap();
        assert!(sw.contains("de"));
        assert!(sw.contains("según"));
        assert_eq!(sw.len(), 314);
    }
}
