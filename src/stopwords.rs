//! Stop-word resources for token counting.
//!
//! A [`StopWords`] set is built once per run and handed to the
//! [`TokenCounter`](crate::stages::tokens::TokenCounter). The built-in Spanish
//! list ships inside the binary; a replacement list can be loaded from a
//! newline-separated file and extended with extra words from configuration.
//!
//! All entries are stored lower-cased, matching the lower-cased tokens they
//! are compared against.

use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

use crate::errors::CleanError;

const SPANISH: &str = include_str!("../resources/stopwords/spanish.txt");

static SPANISH_STOP_WORDS: Lazy<StopWords> = Lazy::new(|| StopWords::from_list(SPANISH));

/// An immutable set of lower-cased stop words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// The built-in Spanish stop-word list.
    ///
    /// The parsed set is cached for the life of the process, so repeated
    /// calls only pay for the clone.
    pub fn spanish() -> Self {
        SPANISH_STOP_WORDS.clone()
    }

    /// Parse a newline-separated word list.
    ///
    /// Surrounding whitespace is trimmed; blank lines and lines starting with
    /// `#` are ignored.
    pub fn from_list(text: &str) -> Self {
        let words = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_lowercase)
            .collect();
        StopWords { words }
    }

    /// Load a newline-separated word list from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`CleanError::Io`] if the file cannot be read or is not UTF-8.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub async fn from_file(path: &Path) -> Result<Self, CleanError> {
        let text = fs::read_to_string(path)
            .await
            .map_err(|e| CleanError::io(path, e))?;
        let stop_words = StopWords::from_list(&text);
        info!(count = stop_words.len(), "Loaded stop words from file");
        Ok(stop_words)
    }

    /// Add more words to the set, lower-casing each one.
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words
            .extend(words.into_iter().map(|w| w.as_ref().trim().to_lowercase()));
    }

    /// `true` when `word` (already lower-cased) is a stop word.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
