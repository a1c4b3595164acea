//! Pipeline runner: orchestrates one summarization run.
//!
//! [`summarize`] runs the stages in a fixed order, notifying a
//! [`PipelineObserver`] at each boundary:
//!
//! 1. Validate the configuration
//! 2. Text view (plan and recipe corpora only)
//! 3. Domain view
//! 4. Render the synopsis
//! 5. Build the step similarity graph
//! 6. Rank steps
//!
//! Each run is sequential. [`summarize_batch`] parallelizes across
//! independent corpora with rayon.

use rayon::prelude::*;
use serde::Serialize;

use crate::analysis::frequency::FrequencyAnalyzer;
use crate::errors::{Result, SummaryError};
use crate::pipeline::observer::{
    NoopObserver, PipelineObserver, StageClock, StageReport, StageReportBuilder, STAGE_DOMAIN_VIEW,
    STAGE_GRAPH, STAGE_RANK, STAGE_RENDER, STAGE_TEXT_VIEW, STAGE_VALIDATE,
};
use crate::pipeline::spec::SummarySpec;
use crate::pipeline::validation::ValidationEngine;
use crate::summarizer::step_rank::{StepRanker, StepRanking};
use crate::summarizer::synopsis;
use crate::types::{Corpus, Domain, DomainReport, SummarizerConfig, TextView};

// ---------------------------------------------------------------------------
// Conditional tracing support
// ---------------------------------------------------------------------------

/// Enter a tracing span for a pipeline stage (when the `tracing` feature is
/// enabled). When disabled, this is a no-op and the compiler eliminates it.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

/// Everything one run produces
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Digest {
    pub domain: Domain,
    /// Rare-item overview; `None` for routes
    pub text_view: Option<TextView>,
    pub report: DomainReport,
    pub synopsis: String,
    pub ranking: StepRanking,
}

impl Digest {
    /// The `k` most central steps of the corpus
    pub fn top_steps(&self, k: usize) -> Vec<String> {
        self.ranking.top_k(k)
    }
}

/// Summarize one corpus
///
/// Fails before any analysis if `config` is invalid. No partial digest is
/// returned: any stage failure aborts the run.
pub fn summarize(
    corpus: &Corpus,
    domain: Domain,
    config: &SummarizerConfig,
    observer: &mut impl PipelineObserver,
) -> Result<Digest> {
    // Stage 0: Validate
    trace_stage!(STAGE_VALIDATE);
    observer.on_stage_start(STAGE_VALIDATE);
    let clock = StageClock::start();
    let analyzer = FrequencyAnalyzer::with_config(config.clone())?;
    let ranker = StepRanker::with_config(config.clone())?;
    observer.on_stage_end(STAGE_VALIDATE, &StageReport::new(clock.elapsed()));

    #[cfg(feature = "tracing")]
    tracing::debug!(
        domain = domain.as_str(),
        sequences = corpus.len(),
        "summarizing corpus"
    );

    // Stage 1: Text view
    let text_view = if domain.has_text_view() {
        trace_stage!(STAGE_TEXT_VIEW);
        observer.on_stage_start(STAGE_TEXT_VIEW);
        let clock = StageClock::start();
        let view = analyzer.analyze_text_view(corpus);
        observer.on_stage_end(STAGE_TEXT_VIEW, &StageReport::new(clock.elapsed()));
        Some(view)
    } else {
        None
    };

    // Stage 2: Domain view
    trace_stage!(STAGE_DOMAIN_VIEW);
    observer.on_stage_start(STAGE_DOMAIN_VIEW);
    let clock = StageClock::start();
    let report = match domain {
        Domain::Plan => DomainReport::Plan(analyzer.analyze_plan_view(corpus)?),
        Domain::Recipe => DomainReport::Recipe(analyzer.analyze_plan_view(corpus)?),
        Domain::Route => DomainReport::Route(analyzer.analyze_travel_view(corpus)?),
    };
    observer.on_stage_end(STAGE_DOMAIN_VIEW, &StageReport::new(clock.elapsed()));

    // Stage 3: Render
    trace_stage!(STAGE_RENDER);
    observer.on_stage_start(STAGE_RENDER);
    let clock = StageClock::start();
    let synopsis = synopsis::render(&report)?;
    observer.on_stage_end(STAGE_RENDER, &StageReport::new(clock.elapsed()));

    // Stage 4: Build graph
    trace_stage!(STAGE_GRAPH);
    observer.on_stage_start(STAGE_GRAPH);
    let clock = StageClock::start();
    let graph = ranker.build_graph(corpus.steps().filter(|step| !step.is_empty()))?;
    let stage = StageReportBuilder::new(clock.elapsed())
        .nodes(graph.num_nodes)
        .edges(graph.num_edges())
        .build();
    observer.on_stage_end(STAGE_GRAPH, &stage);

    // Stage 5: Rank
    trace_stage!(STAGE_RANK);
    observer.on_stage_start(STAGE_RANK);
    let clock = StageClock::start();
    let ranking = ranker.rank_graph(&graph);
    let stage = StageReportBuilder::new(clock.elapsed())
        .iterations(ranking.iterations)
        .converged(ranking.converged)
        .build();
    observer.on_stage_end(STAGE_RANK, &stage);

    Ok(Digest {
        domain,
        text_view,
        report,
        synopsis,
        ranking,
    })
}

/// Summarize with a JSON run spec
///
/// The spec is checked with the default [`ValidationEngine`]; warnings are
/// tolerated, errors fail with [`SummaryError::InvalidConfig`]. The spec's
/// domain wins over `domain` when both are given.
pub fn summarize_with_spec(
    corpus: &Corpus,
    spec: &SummarySpec,
    domain: Option<Domain>,
    observer: &mut impl PipelineObserver,
) -> Result<Digest> {
    let report = ValidationEngine::with_defaults().validate(spec);
    if report.has_errors() {
        let messages: Vec<String> = report.errors().map(|e| e.to_string()).collect();
        return Err(SummaryError::InvalidConfig(messages.join("; ")));
    }

    #[cfg(feature = "tracing")]
    for warning in report.warnings() {
        tracing::warn!(%warning, "run spec warning");
    }

    let domain = spec
        .domain
        .or(domain)
        .ok_or_else(|| SummaryError::InvalidConfig("no domain given".to_string()))?;
    summarize(corpus, domain, &spec.to_config(), observer)
}

/// Summarize independent corpora in parallel
///
/// Results keep the input order; each run succeeds or fails on its own.
pub fn summarize_batch(
    jobs: &[(Corpus, Domain)],
    config: &SummarizerConfig,
) -> Vec<Result<Digest>> {
    jobs.par_iter()
        .map(|(corpus, domain)| summarize(corpus, *domain, config, &mut NoopObserver))
        .collect()
}
