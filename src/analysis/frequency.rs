//! Frequency and n-gram statistics
//!
//! Three views over one corpus:
//! - the text view, a diagnostic sample of rare steps and rare n-grams
//! - the plan view, for plans and recipes (head tokens, secondary tokens,
//!   length statistics, most common run of three steps)
//! - the travel view, for routes (road mentions, length statistics)
//!
//! N-grams are always taken inside one sequence and never bridge the end of
//! one sequence and the start of the next.

use super::counter::FrequencyTable;
use super::roads::extract_road_name;
use crate::errors::{Result, SummaryError};
use crate::nlp::structure::{FirstTokenExtractor, StepStructureExtractor};
use crate::types::{Corpus, Counted, PlanReport, SummarizerConfig, TextView, TravelReport};

/// Number of head tokens and secondary tokens kept in a plan report
const TOP_ITEMS: usize = 2;
/// Number of roads kept in a travel report
const TOP_ROADS: usize = 5;
/// Length of the action subsequence tracked by the plan view
const ACTION_SEQUENCE_LEN: usize = 3;

/// Contiguous windows of `n` steps within one sequence
pub fn ngrams(sequence: &[String], n: usize) -> impl Iterator<Item = &[String]> + '_ {
    // windows(0) panics; a zero-size n-gram simply has no instances
    let windows = if n == 0 { None } else { Some(sequence.windows(n)) };
    windows.into_iter().flatten()
}

/// Count every n-gram of size `n` across the corpus, sequence by sequence
pub fn ngram_counts(corpus: &Corpus, n: usize) -> FrequencyTable<&[String]> {
    corpus
        .sequences()
        .iter()
        .flat_map(|sequence| ngrams(sequence, n))
        .collect()
}

/// Length statistics shared by the plan and travel views
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthStats {
    pub mean: f64,
    pub min: usize,
    pub max: usize,
    /// First index whose length equals `min`
    pub shortest_index: usize,
}

impl LengthStats {
    /// Compute over every sequence of `corpus`
    pub fn of(corpus: &Corpus) -> Result<Self> {
        let lengths = corpus.lengths();
        let (shortest_index, &min) = lengths
            .iter()
            .enumerate()
            .min_by_key(|&(_, len)| *len)
            .ok_or(SummaryError::EmptyCorpus)?;
        let max = lengths.iter().copied().max().ok_or(SummaryError::EmptyCorpus)?;
        let mean = lengths.iter().sum::<usize>() as f64 / lengths.len() as f64;

        Ok(Self {
            mean,
            min,
            max,
            shortest_index,
        })
    }
}

fn owned_counts(counted: Vec<(&str, usize)>) -> Vec<Counted<String>> {
    counted
        .into_iter()
        .map(|(item, count)| (item.to_string(), count))
        .collect()
}

fn owned_gram(gram: &[String]) -> Vec<String> {
    gram.to_vec()
}

/// Frequency/n-gram analyzer
#[derive(Debug, Clone)]
pub struct FrequencyAnalyzer<E = FirstTokenExtractor> {
    config: SummarizerConfig,
    extractor: E,
}

impl Default for FrequencyAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrequencyAnalyzer {
    /// Create an analyzer with default config and positional step structure
    pub fn new() -> Self {
        Self {
            config: SummarizerConfig::default(),
            extractor: FirstTokenExtractor,
        }
    }

    /// Create with custom config, rejecting out-of-range options
    pub fn with_config(config: SummarizerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            extractor: FirstTokenExtractor,
        })
    }
}

impl<E: StepStructureExtractor> FrequencyAnalyzer<E> {
    /// Swap the step structure extractor
    pub fn with_extractor<X: StepStructureExtractor>(self, extractor: X) -> FrequencyAnalyzer<X> {
        FrequencyAnalyzer {
            config: self.config,
            extractor,
        }
    }

    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    /// Diagnostic text view over the flattened corpus
    ///
    /// Keeps steps and n-grams (of `ngram_size`) whose count is below
    /// `rare_threshold`, and returns the first `text_view_limit` of each in
    /// first-occurrence order. This is a long-tail sample, not a ranking.
    pub fn analyze_text_view(&self, corpus: &Corpus) -> TextView {
        let limit = self.config.text_view_limit;
        let threshold = self.config.rare_threshold;

        let items: FrequencyTable<&str> = corpus.steps().collect();
        let grams = ngram_counts(corpus, self.config.ngram_size);

        let common_items = items
            .iter()
            .filter(|&(_, count)| count < threshold)
            .take(limit)
            .map(|(item, count)| (item.to_string(), count))
            .collect();
        let ngrams = grams
            .iter()
            .filter(|&(_, count)| count < threshold)
            .take(limit)
            .map(|(gram, count)| (owned_gram(gram), count))
            .collect();

        TextView {
            common_items,
            ngrams,
        }
    }

    /// Structured statistics for plans and recipes
    ///
    /// Empty steps are skipped. A non-empty step with no head token fails
    /// with [`SummaryError::MalformedStep`].
    pub fn analyze_plan_view(&self, corpus: &Corpus) -> Result<PlanReport> {
        let stats = LengthStats::of(corpus)?;

        let mut heads: FrequencyTable<&str> = FrequencyTable::new();
        let mut secondary: FrequencyTable<&str> = FrequencyTable::new();

        for (seq_idx, sequence) in corpus.sequences().iter().enumerate() {
            for (step_idx, step) in sequence.iter().enumerate() {
                if step.is_empty() {
                    continue;
                }
                let parts = self.extractor.extract(step).ok_or_else(|| {
                    SummaryError::MalformedStep {
                        sequence: seq_idx,
                        step: step_idx,
                    }
                })?;
                heads.add(parts.head);
                secondary.add_all(parts.rest);
            }
        }

        let action_sequence = ngram_counts(corpus, ACTION_SEQUENCE_LEN)
            .most_common(1)
            .into_iter()
            .next()
            .map(|(gram, count)| (owned_gram(gram), count));

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sequences = corpus.len(),
            distinct_heads = heads.len(),
            distinct_secondary = secondary.len(),
            "plan view computed"
        );

        Ok(PlanReport {
            total_items: corpus.len(),
            avg_steps: stats.mean,
            step_range: [stats.min, stats.max],
            most_common_items: owned_counts(heads.most_common(TOP_ITEMS)),
            most_common_secondary: owned_counts(secondary.most_common(TOP_ITEMS)),
            shortest_index: stats.shortest_index,
            most_common_action_sequence: action_sequence,
        })
    }

    /// Structured statistics for travel routes
    pub fn analyze_travel_view(&self, corpus: &Corpus) -> Result<TravelReport> {
        let stats = LengthStats::of(corpus)?;

        let roads: FrequencyTable<&str> = corpus.steps().filter_map(extract_road_name).collect();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            routes = corpus.len(),
            distinct_roads = roads.len(),
            "travel view computed"
        );

        Ok(TravelReport {
            total_items: corpus.len(),
            avg_steps: stats.mean,
            step_range: [stats.min, stats.max],
            most_common_roads: owned_counts(roads.most_common(TOP_ROADS)),
            shortest_index: stats.shortest_index,
        })
    }
}
