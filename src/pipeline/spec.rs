//! Summarization run specification.
//!
//! A [`SummarySpec`] is the JSON form of a run's configuration: an optional
//! domain, option overrides on top of the defaults, and strictness. It is the
//! input to [`super::validation::ValidationEngine`].
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "v": 1,
//!   "domain": "route",
//!   "options": {
//!     "ngram_size": 3,
//!     "similarity_threshold": 0.2,
//!     "top_k": 6,
//!     "max_nodes": 5000
//!   },
//!   "strict": false
//! }
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SummaryError};
use crate::types::{Domain, SummarizerConfig};

/// Current spec version
pub const SPEC_VERSION: u32 = 1;

/// Top-level run specification (v1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarySpec {
    /// Spec version (currently `1`).
    pub v: u32,

    /// Domain of the corpus, if fixed by the spec.
    #[serde(default)]
    pub domain: Option<Domain>,

    /// Option overrides. Omitted options keep their defaults.
    #[serde(default)]
    pub options: OptionsSpec,

    /// If `true`, unrecognized fields are errors; if `false`, warnings.
    #[serde(default)]
    pub strict: bool,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

/// Option overrides; every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionsSpec {
    #[serde(default)]
    pub ngram_size: Option<usize>,
    #[serde(default)]
    pub rare_threshold: Option<usize>,
    #[serde(default)]
    pub text_view_limit: Option<usize>,
    #[serde(default)]
    pub similarity_threshold: Option<f64>,
    #[serde(default)]
    pub top_k: Option<usize>,
    #[serde(default)]
    pub damping: Option<f64>,
    #[serde(default)]
    pub max_iterations: Option<usize>,
    #[serde(default)]
    pub convergence_threshold: Option<f64>,
    #[serde(default)]
    pub max_nodes: Option<usize>,
    #[serde(default)]
    pub stopwords: Option<bool>,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl SummarySpec {
    /// Parse a spec from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SummaryError::InvalidConfig(e.to_string()))
    }

    /// Defaults overlaid with this spec's options (not validated)
    pub fn to_config(&self) -> SummarizerConfig {
        let o = &self.options;
        let base = SummarizerConfig::default();
        SummarizerConfig {
            ngram_size: o.ngram_size.unwrap_or(base.ngram_size),
            rare_threshold: o.rare_threshold.unwrap_or(base.rare_threshold),
            text_view_limit: o.text_view_limit.unwrap_or(base.text_view_limit),
            similarity_threshold: o.similarity_threshold.unwrap_or(base.similarity_threshold),
            top_k: o.top_k.unwrap_or(base.top_k),
            damping: o.damping.unwrap_or(base.damping),
            max_iterations: o.max_iterations.unwrap_or(base.max_iterations),
            convergence_threshold: o
                .convergence_threshold
                .unwrap_or(base.convergence_threshold),
            max_nodes: o.max_nodes.or(base.max_nodes),
            stopwords: o.stopwords.unwrap_or(base.stopwords),
        }
    }
}
