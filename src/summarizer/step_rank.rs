//! Graph-Rank analysis of steps (TextRank over step similarity)
//!
//! Distinct steps become nodes, TF-IDF cosine similarity above a threshold
//! becomes weighted edges, and PageRank centrality orders the steps.
//! Graph construction compares every pair of distinct steps, so `max_nodes`
//! can cap the input before the quadratic pass starts.

use crate::errors::{Result, SummaryError};
use crate::graph::builder::GraphBuilder;
use crate::graph::csr::CsrGraph;
use crate::nlp::stopwords::StopwordFilter;
use crate::nlp::tokenizer::WordTokenizer;
use crate::pagerank::standard::StandardPageRank;
use crate::summarizer::unit_vector::TfIdfVectorizer;
use crate::types::SummarizerConfig;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// A step with its PageRank score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedStep {
    pub step: String,
    pub score: f64,
}

/// Full ranking over every distinct step, plus graph and solver diagnostics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRanking {
    /// Every node, highest score first; equal scores ordered by step text
    pub ranked: Vec<RankedStep>,
    pub num_nodes: usize,
    pub num_edges: usize,
    pub iterations: usize,
    pub converged: bool,
}

impl StepRanking {
    /// The `k` highest-ranked step strings
    pub fn top_k(&self, k: usize) -> Vec<String> {
        self.ranked.iter().take(k).map(|r| r.step.clone()).collect()
    }
}

/// Ranks steps by centrality in their similarity graph
#[derive(Debug, Clone)]
pub struct StepRanker {
    config: SummarizerConfig,
}

impl Default for StepRanker {
    fn default() -> Self {
        Self::new()
    }
}

impl StepRanker {
    /// Create a ranker with default config
    pub fn new() -> Self {
        Self {
            config: SummarizerConfig::default(),
        }
    }

    /// Create with custom config, rejecting out-of-range options
    pub fn with_config(config: SummarizerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    fn vectorizer(&self) -> TfIdfVectorizer {
        let tokenizer = if self.config.stopwords {
            WordTokenizer::new().with_stopwords(StopwordFilter::english())
        } else {
            WordTokenizer::new()
        };
        TfIdfVectorizer::with_tokenizer(tokenizer)
    }

    /// Build the similarity graph over the distinct steps of `steps`
    pub fn build_graph<I, S>(&self, steps: I) -> Result<CsrGraph>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen: FxHashSet<String> = FxHashSet::default();
        let mut distinct: Vec<String> = Vec::new();
        for step in steps {
            let step = step.as_ref();
            if seen.insert(step.to_string()) {
                distinct.push(step.to_string());
            }
        }

        if distinct.is_empty() {
            return Err(SummaryError::EmptyGraph);
        }
        if let Some(limit) = self.config.max_nodes {
            if distinct.len() > limit {
                return Err(SummaryError::LimitExceeded {
                    what: "max_nodes",
                    limit,
                    actual: distinct.len(),
                });
            }
        }

        let vectors = self.vectorizer().fit_transform(&distinct);
        let builder =
            GraphBuilder::from_similarity(&distinct, &vectors, self.config.similarity_threshold);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            nodes = builder.node_count(),
            edges = builder.edge_count(),
            threshold = self.config.similarity_threshold,
            "similarity graph built"
        );

        Ok(CsrGraph::from_builder(&builder))
    }

    /// Rank every distinct step
    pub fn rank_detailed<I, S>(&self, steps: I) -> Result<StepRanking>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let graph = self.build_graph(steps)?;
        Ok(self.rank_graph(&graph))
    }

    /// Run PageRank over an already built graph
    pub fn rank_graph(&self, graph: &CsrGraph) -> StepRanking {
        let result = StandardPageRank::new()
            .with_damping(self.config.damping)
            .with_max_iterations(self.config.max_iterations)
            .with_threshold(self.config.convergence_threshold)
            .run(graph);

        let mut ranked: Vec<RankedStep> = result
            .scores
            .iter()
            .enumerate()
            .map(|(node, &score)| RankedStep {
                step: graph.label(node as u32).to_string(),
                score,
            })
            .collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.step.cmp(&b.step)));

        StepRanking {
            ranked,
            num_nodes: graph.num_nodes,
            num_edges: graph.num_edges(),
            iterations: result.iterations,
            converged: result.converged,
        }
    }

    /// The `top_k` most central steps
    pub fn rank_steps<I, S>(&self, steps: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(self.rank_detailed(steps)?.top_k(self.config.top_k))
    }
}

/// Rank steps with `config`, returning the `top_k` most central
pub fn rank_steps<I, S>(steps: I, config: &SummarizerConfig) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    StepRanker::with_config(config.clone())?.rank_steps(steps)
}

/// Rank steps with `config`, keeping every node's score and the solver state
pub fn rank_steps_detailed<I, S>(steps: I, config: &SummarizerConfig) -> Result<StepRanking>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    StepRanker::with_config(config.clone())?.rank_detailed(steps)
}
