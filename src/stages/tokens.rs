//! Stop-word-aware token counts for title and body.
//!
//! Text is segmented with Unicode word-boundary rules, which keep accented
//! Spanish words intact and split off punctuation such as `¿`, `¡` and
//! `«»`. Tokens are then filtered to purely alphabetic words, lower-cased,
//! and stop words are discarded; what is left is counted.
//!
//! Newline stripping can glue the last word of one line to the first word of
//! the next (`Hola\r\nMundo` becomes `HolaMundo`), so a segmented word is also
//! split wherever a lowercase letter is followed by an uppercase one. The rule
//! cannot tell a glued pair from a camel-case word, so `iPhone`, `YouTube` and
//! `McDonald` are split as well and count as two tokens each. All-caps words
//! such as `ONU` stay whole.

use tracing::{info, instrument};
use unicode_segmentation::UnicodeSegmentation;

use crate::errors::CleanError;
use crate::models::KeyedDataset;
use crate::stopwords::StopWords;

/// Source column and output column for each count.
pub const TOKEN_COLUMNS: [(&str, &str); 2] =
    [("title", "n_tokens_title"), ("body", "n_tokens_body")];

/// Split a word at every lowercase→uppercase transition.
fn split_glued_words(word: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut prev_lower = false;
    for (i, c) in word.char_indices() {
        if prev_lower && c.is_uppercase() {
            parts.push(&word[start..i]);
            start = i;
        }
        prev_lower = c.is_lowercase();
    }
    parts.push(&word[start..]);
    parts
}

/// Word tokens of `text`, before any filtering.
pub fn word_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.unicode_words().flat_map(split_glued_words)
}

/// Counts meaningful words against an injected stop-word set.
#[derive(Debug, Clone)]
pub struct TokenCounter {
    stop_words: StopWords,
}

impl TokenCounter {
    pub fn new(stop_words: StopWords) -> Self {
        TokenCounter { stop_words }
    }

    /// Lower-cased, alphabetic, non-stop-word tokens of `text`.
    pub fn tokens<'a>(&'a self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        word_tokens(text)
            .filter(|token| !token.is_empty() && token.chars().all(char::is_alphabetic))
            .map(str::to_lowercase)
            .filter(|token| !self.stop_words.contains(token))
    }

    pub fn count(&self, text: &str) -> usize {
        self.tokens(text).count()
    }
}

/// Add a count column derived from `source`.
///
/// A row whose `source` value is missing gets a missing count rather than 0,
/// so the Completeness Filter later drops it. Returns the number of rows
/// skipped that way.
#[instrument(level = "info", skip(table, counter))]
pub fn tokenize_column(
    table: &mut KeyedDataset,
    counter: &TokenCounter,
    source: &str,
    target: &str,
) -> Result<usize, CleanError> {
    let source_idx = table.require_column(source)?;
    let mut skipped = 0;
    table.set_column(target, |row| match row.get(source_idx) {
        Some(text) => Some(counter.count(text).to_string()),
        None => {
            skipped += 1;
            None
        }
    });
    info!(rows = table.len(), skipped, "Counted tokens");
    Ok(skipped)
}
