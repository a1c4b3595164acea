//! Stopword filtering
//!
//! English stopword list from the `stop-words` crate, used by the step
//! vectorizer when stopword removal is switched on.

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

/// A filter for removing stopwords from step text
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    /// Set of stopwords (lowercase)
    stopwords: FxHashSet<String>,
}

impl StopwordFilter {
    /// The English list shipped with `stop-words`
    pub fn english() -> Self {
        Self {
            stopwords: get(LANGUAGE::English).iter().map(|s| s.to_lowercase()).collect(),
        }
    }

    /// Create a stopword filter from a custom list
    pub fn from_list(words: &[&str]) -> Self {
        Self {
            stopwords: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Check if a word is a stopword (case-insensitive)
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(&word.to_lowercase())
    }
}
