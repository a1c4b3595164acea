//! Pipeline observer: stage boundary hooks for logging and profiling.
//!
//! Observers receive notifications at stage boundaries without coupling to
//! stage logic. [`NoopObserver`] costs nothing; [`StageTimingObserver`]
//! records a [`StageReport`] per stage.

use std::time::{Duration, Instant};

use serde::Serialize;

pub const STAGE_VALIDATE: &str = "validate";
pub const STAGE_TEXT_VIEW: &str = "text_view";
pub const STAGE_DOMAIN_VIEW: &str = "domain_view";
pub const STAGE_RENDER: &str = "render";
pub const STAGE_GRAPH: &str = "graph";
pub const STAGE_RANK: &str = "rank";

/// Measures one stage's wall-clock time
#[derive(Debug, Clone, Copy)]
pub struct StageClock {
    started: Instant,
}

impl StageClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// What happened in one stage
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StageReport {
    pub elapsed: Duration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edges: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iterations: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub converged: Option<bool>,
}

impl StageReport {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            elapsed,
            ..Self::default()
        }
    }
}

/// Fluent construction of a [`StageReport`] with graph/solver details
#[derive(Debug, Clone)]
pub struct StageReportBuilder {
    report: StageReport,
}

impl StageReportBuilder {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            report: StageReport::new(elapsed),
        }
    }

    pub fn nodes(mut self, nodes: usize) -> Self {
        self.report.nodes = Some(nodes);
        self
    }

    pub fn edges(mut self, edges: usize) -> Self {
        self.report.edges = Some(edges);
        self
    }

    pub fn iterations(mut self, iterations: usize) -> Self {
        self.report.iterations = Some(iterations);
        self
    }

    pub fn converged(mut self, converged: bool) -> Self {
        self.report.converged = Some(converged);
        self
    }

    pub fn build(self) -> StageReport {
        self.report
    }
}

/// Receives stage boundary notifications from the runner
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}

    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Records the report of every finished stage, in order
#[derive(Debug, Clone, Default)]
pub struct StageTimingObserver {
    stages: Vec<(&'static str, StageReport)>,
}

impl StageTimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finished stages in execution order
    pub fn stages(&self) -> &[(&'static str, StageReport)] {
        &self.stages
    }

    /// Report for a stage, if it ran
    pub fn report(&self, stage: &str) -> Option<&StageReport> {
        self.stages.iter().find(|(s, _)| *s == stage).map(|(_, r)| r)
    }

    /// Sum of all stage durations
    pub fn total(&self) -> Duration {
        self.stages.iter().map(|(_, r)| r.elapsed).sum()
    }
}

impl PipelineObserver for StageTimingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.stages.push((stage, report.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_builder() {
        let report = StageReportBuilder::new(Duration::from_millis(3))
            .nodes(9)
            .edges(16)
            .iterations(40)
            .converged(true)
            .build();

        assert_eq!(report.nodes, Some(9));
        assert_eq!(report.edges, Some(16));
        assert_eq!(report.iterations, Some(40));
        assert_eq!(report.converged, Some(true));
    }

    #[test]
    fn test_timing_observer_records_in_order() {
        let mut observer = StageTimingObserver::new();
        observer.on_stage_start(STAGE_GRAPH);
        observer.on_stage_end(STAGE_GRAPH, &StageReport::new(Duration::from_millis(2)));
        observer.on_stage_end(STAGE_RANK, &StageReport::new(Duration::from_millis(5)));

        let names: Vec<_> = observer.stages().iter().map(|(s, _)| *s).collect();
        assert_eq!(names, vec![STAGE_GRAPH, STAGE_RANK]);
        assert_eq!(observer.total(), Duration::from_millis(7));
        assert!(observer.report(STAGE_RENDER).is_none());
    }

    #[test]
    fn test_report_serialization_skips_empty_fields() {
        let value = serde_json::to_value(StageReport::new(Duration::from_secs(1))).unwrap();
        assert!(value.get("nodes").is_none());
        assert!(value.get("elapsed").is_some());
    }
}
