//! Core types
//!
//! Corpus and domain tags, the run configuration, and the salience reports
//! produced by the analyzers.

use crate::errors::{Result, SummaryError};
use serde::{Deserialize, Serialize};

/// One plan/recipe/route instance: an ordered list of step strings
pub type Sequence = Vec<String>;

/// The full set of sequences summarized by one run
///
/// Always non-empty once constructed through [`Corpus::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Sequence>", into = "Vec<Sequence>")]
pub struct Corpus {
    sequences: Vec<Sequence>,
}

impl Corpus {
    /// Wrap a list of sequences, failing on an empty list
    pub fn new(sequences: Vec<Sequence>) -> Result<Self> {
        if sequences.is_empty() {
            return Err(SummaryError::EmptyCorpus);
        }
        Ok(Self { sequences })
    }

    /// Build a corpus from borrowed string slices
    pub fn from_slices<S: AsRef<str>>(sequences: &[Vec<S>]) -> Result<Self> {
        Self::new(
            sequences
                .iter()
                .map(|seq| seq.iter().map(|s| s.as_ref().to_string()).collect())
                .collect(),
        )
    }

    /// All sequences in input order
    pub fn sequences(&self) -> &[Sequence] {
        &self.sequences
    }

    /// Number of sequences
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    /// Always false for a constructed corpus
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Every step of every sequence, flattened in order
    pub fn steps(&self) -> impl Iterator<Item = &str> + '_ {
        self.sequences.iter().flatten().map(String::as_str)
    }

    /// Length of each sequence, in order
    pub fn lengths(&self) -> Vec<usize> {
        self.sequences.iter().map(Vec::len).collect()
    }
}

impl TryFrom<Vec<Sequence>> for Corpus {
    type Error = SummaryError;

    fn try_from(sequences: Vec<Sequence>) -> Result<Self> {
        Self::new(sequences)
    }
}

impl From<Corpus> for Vec<Sequence> {
    fn from(corpus: Corpus) -> Self {
        corpus.sequences
    }
}

/// Which kind of sequences a corpus holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    /// Action plans (PDDL-style)
    Plan,
    /// Recipe instructions
    Recipe,
    /// Travel directions
    Route,
}

impl Domain {
    /// Stable lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Plan => "plan",
            Domain::Recipe => "recipe",
            Domain::Route => "route",
        }
    }

    /// Whether runs over this domain produce a text view
    pub fn has_text_view(&self) -> bool {
        !matches!(self, Domain::Route)
    }
}

impl std::str::FromStr for Domain {
    type Err = SummaryError;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "plan" | "pddl" => Ok(Domain::Plan),
            "recipe" => Ok(Domain::Recipe),
            "route" | "travel" => Ok(Domain::Route),
            other => Err(SummaryError::InvalidConfig(format!(
                "unknown domain `{other}` (expected plan, recipe or route)"
            ))),
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for one summarization run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// N-gram size for the text view
    pub ngram_size: usize,
    /// Items at or above this count are dropped from the text view
    pub rare_threshold: usize,
    /// How many items/n-grams the text view keeps
    pub text_view_limit: usize,
    /// Minimum cosine similarity (exclusive) for a graph edge
    pub similarity_threshold: f64,
    /// Number of ranked steps returned by the Graph-Rank Analyzer
    pub top_k: usize,
    /// PageRank damping factor
    pub damping: f64,
    /// PageRank iteration cap
    pub max_iterations: usize,
    /// PageRank convergence threshold (L1 delta)
    pub convergence_threshold: f64,
    /// Upper bound on distinct steps fed to the similarity graph
    pub max_nodes: Option<usize>,
    /// Drop English stopwords before vectorizing steps
    pub stopwords: bool,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            ngram_size: 3,
            rare_threshold: 5,
            text_view_limit: 2,
            similarity_threshold: 0.2,
            top_k: 6,
            damping: 0.85,
            max_iterations: 100,
            convergence_threshold: 1e-6,
            max_nodes: None,
            stopwords: false,
        }
    }
}

impl SummarizerConfig {
    pub fn with_ngram_size(mut self, n: usize) -> Self {
        self.ngram_size = n;
        self
    }

    pub fn with_rare_threshold(mut self, threshold: usize) -> Self {
        self.rare_threshold = threshold;
        self
    }

    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = k;
        self
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    pub fn with_stopwords(mut self, stopwords: bool) -> Self {
        self.stopwords = stopwords;
        self
    }

    /// Run the default validation rules, failing on the first report with errors
    pub fn validate(&self) -> Result<()> {
        let report = crate::pipeline::validation::ValidationEngine::with_defaults()
            .validate_config(self);
        if report.has_errors() {
            let messages: Vec<String> = report.errors().map(|e| e.to_string()).collect();
            return Err(SummaryError::InvalidConfig(messages.join("; ")));
        }
        Ok(())
    }
}

/// An item paired with its occurrence count
pub type Counted<T> = (T, usize);

/// Diagnostic overview of the flattened corpus
///
/// Holds up to `text_view_limit` items and n-grams whose count is below
/// `rare_threshold`, in first-occurrence order. This is a long-tail sample,
/// not a ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextView {
    pub common_items: Vec<Counted<String>>,
    pub ngrams: Vec<Counted<Vec<String>>>,
}

/// Structured statistics for plans and recipes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanReport {
    pub total_items: usize,
    pub avg_steps: f64,
    /// `[min, max]` sequence length
    pub step_range: [usize; 2],
    /// Most frequent head tokens (at most two)
    pub most_common_items: Vec<Counted<String>>,
    /// Most frequent non-head tokens (at most two)
    pub most_common_secondary: Vec<Counted<String>>,
    /// 0-based index of the first shortest sequence
    pub shortest_index: usize,
    /// The most frequent run of three consecutive steps, if any sequence has one
    pub most_common_action_sequence: Option<Counted<Vec<String>>>,
}

/// Structured statistics for travel routes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelReport {
    pub total_items: usize,
    pub avg_steps: f64,
    /// `[min, max]` route length
    pub step_range: [usize; 2],
    /// Most frequently mentioned roads (at most five)
    pub most_common_roads: Vec<Counted<String>>,
    /// 0-based index of the first shortest route
    pub shortest_index: usize,
}

/// Salience report tagged by domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "domain", content = "report", rename_all = "snake_case")]
pub enum DomainReport {
    Plan(PlanReport),
    Recipe(PlanReport),
    Route(TravelReport),
}

impl DomainReport {
    pub fn domain(&self) -> Domain {
        match self {
            DomainReport::Plan(_) => Domain::Plan,
            DomainReport::Recipe(_) => Domain::Recipe,
            DomainReport::Route(_) => Domain::Route,
        }
    }

    pub fn total_items(&self) -> usize {
        match self {
            DomainReport::Plan(r) | DomainReport::Recipe(r) => r.total_items,
            DomainReport::Route(r) => r.total_items,
        }
    }
}
