//! Word tokenizer for step vectorization
//!
//! Lowercases the step and keeps runs of two or more word characters, so
//! single letters and punctuation never become vector dimensions.

use regex::Regex;
use std::sync::OnceLock;

use super::stopwords::StopwordFilter;

fn word_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("word pattern compiles"))
}

/// Splits step text into lowercase word terms
#[derive(Debug, Clone, Default)]
pub struct WordTokenizer {
    stopwords: Option<StopwordFilter>,
}

impl WordTokenizer {
    /// Tokenizer that keeps every word
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop words found in `filter`
    pub fn with_stopwords(mut self, filter: StopwordFilter) -> Self {
        self.stopwords = Some(filter);
        self
    }

    /// Terms of `text` in order of appearance, duplicates kept
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        word_pattern()
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|w| {
                self.stopwords
                    .as_ref()
                    .map_or(true, |filter| !filter.is_stopword(w))
            })
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_drops_single_chars() {
        let tokens = WordTokenizer::new().tokenize("Keep left onto I 25 Express Lane, I 25 Express");
        assert_eq!(
            tokens,
            vec!["keep", "left", "onto", "25", "express", "lane", "25", "express"]
        );
    }

    #[test]
    fn test_stopword_removal() {
        let tokenizer = WordTokenizer::new().with_stopwords(StopwordFilter::from_list(&["the", "on"]));
        let tokens = tokenizer.tokenize("Arrive at your destination, on the right");
        assert_eq!(tokens, vec!["arrive", "at", "your", "destination", "right"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(WordTokenizer::new().tokenize("").is_empty());
        assert!(WordTokenizer::new().tokenize("a , b").is_empty());
    }
}
