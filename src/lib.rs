//! # stepsum
//!
//! Summarize collections of step sequences (action plans, recipe
//! instructions, travel directions) into a short digest.
//!
//! Two independent analyses run over a [`Corpus`]:
//!
//! - **Frequency/N-gram analysis** counts recurring steps, head and
//!   secondary tokens, step n-grams, and (for routes) road names, producing a
//!   [`DomainReport`] that [`render`] turns into a synopsis paragraph.
//! - **Graph-Rank analysis** links distinct steps by TF-IDF cosine
//!   similarity and orders them by PageRank centrality ([`rank_steps`]).
//!
//! ```rust,ignore
//! use stepsum::{summarize, Corpus, Domain, NoopObserver, SummarizerConfig};
//!
//! let corpus = Corpus::from_slices(&[
//!     vec!["Head east", "Turn left onto Logan Street"],
//!     vec!["Head north", "Turn left onto Logan Street", "Turn right onto 8 Avenue"],
//! ])?;
//! let digest = summarize(&corpus, Domain::Route, &SummarizerConfig::default(), &mut NoopObserver)?;
//! println!("{}", digest.synopsis);
//! ```

pub mod analysis;
pub mod errors;
pub mod graph;
pub mod nlp;
pub mod pagerank;
pub mod pipeline;
pub mod records;
pub mod summarizer;
pub mod types;

pub use analysis::frequency::{ngram_counts, ngrams, FrequencyAnalyzer, LengthStats};
pub use analysis::roads::extract_road_name;
pub use errors::{Result, SummaryError};
pub use nlp::structure::{FirstTokenExtractor, StepParts, StepStructureExtractor};
pub use pipeline::observer::{NoopObserver, PipelineObserver, StageTimingObserver};
pub use pipeline::runner::{summarize, summarize_batch, summarize_with_spec, Digest};
pub use pipeline::spec::SummarySpec;
pub use records::parse_records;
pub use summarizer::step_rank::{rank_steps, rank_steps_detailed, RankedStep, StepRanker, StepRanking};
pub use summarizer::synopsis::render;
pub use types::{
    Corpus, Counted, Domain, DomainReport, PlanReport, Sequence, SummarizerConfig, TextView,
    TravelReport,
};
