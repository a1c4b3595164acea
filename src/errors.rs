//! Error types
//!
//! Every failure in this crate is a local validation failure over the input
//! corpus or configuration. Computation is deterministic, so none of these
//! are worth retrying without changing the input.

use thiserror::Error;

/// Errors produced by the analyzers, the renderer and the pipeline
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SummaryError {
    /// The corpus holds no sequences
    #[error("corpus is empty: at least one sequence is required")]
    EmptyCorpus,

    /// No distinct steps were available to build a similarity graph
    #[error("no distinct steps to rank")]
    EmptyGraph,

    /// A non-empty step produced no head token
    #[error("step {step} of sequence {sequence} has no head token")]
    MalformedStep { sequence: usize, step: usize },

    /// The renderer needed a statistic the report does not carry
    #[error("missing statistic `{0}` in salience report")]
    MissingStatistic(&'static str),

    /// A configured resource bound was exceeded
    #[error("{what} limit exceeded: {actual} > {limit}")]
    LimitExceeded {
        what: &'static str,
        limit: usize,
        actual: usize,
    },

    /// The configuration failed validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A raw record could not be parsed into a sequence
    #[error("record {record}: {message}")]
    Parse { record: usize, message: String },
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, SummaryError>;
