//! Validation engine for run configuration.
//!
//! The engine runs all registered [`ValidationRule`]s against a
//! [`SummarizerConfig`] (and, when validating a document, the
//! [`SummarySpec`] it came from) and collects every diagnostic into a
//! [`ValidationReport`]. It never short-circuits on the first error, so
//! users see all problems at once.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use stepsum::pipeline::validation::ValidationEngine;
//!
//! let engine = ValidationEngine::with_defaults();
//! let report = engine.validate(&spec);
//! if report.has_errors() {
//!     for err in report.errors() {
//!         eprintln!("{err}");
//!     }
//! }
//! ```

use std::collections::HashMap;

use serde::Serialize;

use super::errors::{ErrorCode, SpecError};
use super::spec::{SummarySpec, SPEC_VERSION};
use crate::types::SummarizerConfig;

// ─── Severity ───────────────────────────────────────────────────────────────

/// Whether a diagnostic is a hard error or a soft warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

// ─── Diagnostic ─────────────────────────────────────────────────────────────

/// A single validation finding attached to a [`SpecError`].
#[derive(Debug, Clone, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: Severity,
    #[serde(flatten)]
    pub error: SpecError,
}

impl ValidationDiagnostic {
    pub fn error(err: SpecError) -> Self {
        Self {
            severity: Severity::Error,
            error: err,
        }
    }

    pub fn warning(err: SpecError) -> Self {
        Self {
            severity: Severity::Warning,
            error: err,
        }
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// Collected diagnostics from running all validation rules.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    /// Iterate over error-severity diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &SpecError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| &d.error)
    }

    /// Iterate over warning-severity diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &SpecError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .map(|d| &d.error)
    }

    /// Returns `true` if any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Returns `true` if there are no errors (warnings are acceptable).
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

// ─── Rule trait ─────────────────────────────────────────────────────────────

/// A single validation rule.
///
/// `spec` is present only when a JSON document is being validated; rules
/// about document structure return nothing without it.
pub trait ValidationRule: Send + Sync {
    /// Short, stable identifier for this rule (e.g., `"ngram_size"`).
    fn name(&self) -> &str;

    fn validate(
        &self,
        config: &SummarizerConfig,
        spec: Option<&SummarySpec>,
    ) -> Vec<ValidationDiagnostic>;
}

// ─── Engine ─────────────────────────────────────────────────────────────────

/// Runs a set of [`ValidationRule`]s and collects all diagnostics.
pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    /// Create an empty engine with no rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create an engine pre-loaded with the default rule set.
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Box::new(VersionRule));
        engine.add_rule(Box::new(NgramSizeRule));
        engine.add_rule(Box::new(RangeRule));
        engine.add_rule(Box::new(CountsRule));
        engine.add_rule(Box::new(UnknownFieldsRule));
        engine
    }

    /// Register an additional rule.
    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Names of the registered rules, in run order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Validate a spec document and the config it produces.
    pub fn validate(&self, spec: &SummarySpec) -> ValidationReport {
        self.run(&spec.to_config(), Some(spec))
    }

    /// Validate a config built in code.
    pub fn validate_config(&self, config: &SummarizerConfig) -> ValidationReport {
        self.run(config, None)
    }

    fn run(&self, config: &SummarizerConfig, spec: Option<&SummarySpec>) -> ValidationReport {
        let mut report = ValidationReport::default();
        for rule in &self.rules {
            report.diagnostics.extend(rule.validate(config, spec));
        }
        report
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Concrete rules
// ═══════════════════════════════════════════════════════════════════════════

// ─── 1. Spec version ────────────────────────────────────────────────────────

struct VersionRule;

impl ValidationRule for VersionRule {
    fn name(&self) -> &str {
        "version"
    }

    fn validate(
        &self,
        _config: &SummarizerConfig,
        spec: Option<&SummarySpec>,
    ) -> Vec<ValidationDiagnostic> {
        match spec {
            Some(spec) if spec.v != SPEC_VERSION => vec![ValidationDiagnostic::error(
                SpecError::new(
                    ErrorCode::UnsupportedVersion,
                    "/v",
                    format!("unsupported spec version {}", spec.v),
                )
                .with_hint(format!("Set \"v\": {SPEC_VERSION}")),
            )],
            _ => vec![],
        }
    }
}

// ─── 2. N-grams need at least two steps ─────────────────────────────────────

struct NgramSizeRule;

impl ValidationRule for NgramSizeRule {
    fn name(&self) -> &str {
        "ngram_size"
    }

    fn validate(
        &self,
        config: &SummarizerConfig,
        _spec: Option<&SummarySpec>,
    ) -> Vec<ValidationDiagnostic> {
        if config.ngram_size < 2 {
            vec![ValidationDiagnostic::error(
                SpecError::new(
                    ErrorCode::OutOfRange,
                    "/options/ngram_size",
                    format!("ngram_size must be at least 2, got {}", config.ngram_size),
                )
                .with_hint("The default is 3"),
            )]
        } else {
            vec![]
        }
    }
}

// ─── 3. Real-valued options within their ranges ─────────────────────────────

struct RangeRule;

impl ValidationRule for RangeRule {
    fn name(&self) -> &str {
        "ranges"
    }

    fn validate(
        &self,
        config: &SummarizerConfig,
        _spec: Option<&SummarySpec>,
    ) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();

        let t = config.similarity_threshold;
        if !(0.0..=1.0).contains(&t) {
            out.push(ValidationDiagnostic::error(SpecError::new(
                ErrorCode::OutOfRange,
                "/options/similarity_threshold",
                format!("similarity_threshold must be within [0, 1], got {t}"),
            )));
        }

        let d = config.damping;
        if !(d > 0.0 && d < 1.0) {
            out.push(ValidationDiagnostic::error(
                SpecError::new(
                    ErrorCode::OutOfRange,
                    "/options/damping",
                    format!("damping must be within (0, 1), got {d}"),
                )
                .with_hint("The standard value is 0.85"),
            ));
        }

        let eps = config.convergence_threshold;
        if !(eps.is_finite() && eps > 0.0) {
            out.push(ValidationDiagnostic::error(SpecError::new(
                ErrorCode::OutOfRange,
                "/options/convergence_threshold",
                format!("convergence_threshold must be a positive number, got {eps}"),
            )));
        }

        out
    }
}

// ─── 4. Counts and limits must be positive ──────────────────────────────────

struct CountsRule;

impl ValidationRule for CountsRule {
    fn name(&self) -> &str {
        "counts"
    }

    fn validate(
        &self,
        config: &SummarizerConfig,
        _spec: Option<&SummarySpec>,
    ) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();

        let checks: &[(&str, usize)] = &[
            ("top_k", config.top_k),
            ("max_iterations", config.max_iterations),
            ("rare_threshold", config.rare_threshold),
        ];
        for &(field, value) in checks {
            if value == 0 {
                out.push(ValidationDiagnostic::error(SpecError::new(
                    ErrorCode::OutOfRange,
                    format!("/options/{field}"),
                    format!("{field} must be at least 1"),
                )));
            }
        }

        if config.max_nodes == Some(0) {
            out.push(ValidationDiagnostic::error(
                SpecError::new(
                    ErrorCode::LimitExceeded,
                    "/options/max_nodes",
                    "max_nodes must be greater than 0",
                )
                .with_hint("Remove max_nodes to disable the limit, or set it to a positive value"),
            ));
        }

        out
    }
}

// ─── 5. Unknown fields (strict → error, non-strict → warning) ──────────────

struct UnknownFieldsRule;

impl UnknownFieldsRule {
    /// Collect unknown-field diagnostics at the given JSON pointer `path`
    /// from fields captured by `#[serde(flatten)]`.
    fn check_unknowns(
        path: &str,
        unknowns: &HashMap<String, serde_json::Value>,
        strict: bool,
    ) -> Vec<ValidationDiagnostic> {
        let mut keys: Vec<&String> = unknowns.keys().collect();
        keys.sort();
        keys.into_iter()
            .map(|key| {
                let diag_fn = if strict {
                    ValidationDiagnostic::error
                } else {
                    ValidationDiagnostic::warning
                };
                diag_fn(
                    SpecError::new(
                        ErrorCode::UnknownField,
                        format!("{path}/{key}"),
                        format!("unrecognized field \"{key}\""),
                    )
                    .with_hint("Check spelling or remove this field"),
                )
            })
            .collect()
    }
}

impl ValidationRule for UnknownFieldsRule {
    fn name(&self) -> &str {
        "unknown_fields"
    }

    fn validate(
        &self,
        _config: &SummarizerConfig,
        spec: Option<&SummarySpec>,
    ) -> Vec<ValidationDiagnostic> {
        let Some(spec) = spec else {
            return vec![];
        };
        let mut out = Self::check_unknowns("", &spec.unknown_fields, spec.strict);
        out.extend(Self::check_unknowns(
            "/options",
            &spec.options.unknown_fields,
            spec.strict,
        ));
        out
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(json: &str) -> SummarySpec {
        SummarySpec::from_json(json).unwrap()
    }

    fn engine() -> ValidationEngine {
        ValidationEngine::with_defaults()
    }

    // ─── Valid specs ────────────────────────────────────────────────────

    #[test]
    fn test_minimal_spec_is_valid() {
        let report = engine().validate(&spec(r#"{ "v": 1 }"#));
        assert!(report.is_valid());
        assert!(report.is_empty());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(engine().validate_config(&SummarizerConfig::default()).is_empty());
    }

    #[test]
    fn test_boundary_values_are_valid() {
        let report = engine().validate(&spec(
            r#"{
                "v": 1,
                "options": { "ngram_size": 2, "similarity_threshold": 1.0, "top_k": 1, "max_nodes": 1 }
            }"#,
        ));
        assert!(report.is_valid());
    }

    // ─── Rule: version ──────────────────────────────────────────────────

    #[test]
    fn test_unsupported_version() {
        let report = engine().validate(&spec(r#"{ "v": 2 }"#));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].code, ErrorCode::UnsupportedVersion);
        assert_eq!(errs[0].path, "/v");
    }

    // ─── Rule: ngram_size ───────────────────────────────────────────────

    #[test]
    fn test_ngram_size_one_fails() {
        let report = engine().validate_config(&SummarizerConfig::default().with_ngram_size(1));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].path, "/options/ngram_size");
    }

    // ─── Rule: ranges ───────────────────────────────────────────────────

    #[test]
    fn test_out_of_range_values_all_reported() {
        let config = SummarizerConfig::default()
            .with_similarity_threshold(1.5)
            .with_damping(1.0)
            .with_convergence_threshold(0.0);
        let report = engine().validate_config(&config);
        let paths: Vec<_> = report.errors().map(|e| e.path.as_str()).collect();

        assert_eq!(
            paths,
            vec![
                "/options/similarity_threshold",
                "/options/damping",
                "/options/convergence_threshold",
            ]
        );
        assert!(report.errors().all(|e| e.code == ErrorCode::OutOfRange));
    }

    #[test]
    fn test_nan_threshold_rejected() {
        let config = SummarizerConfig::default().with_similarity_threshold(f64::NAN);
        assert!(engine().validate_config(&config).has_errors());
    }

    // ─── Rule: counts ───────────────────────────────────────────────────

    #[test]
    fn test_zero_counts_fail() {
        let report = engine().validate(&spec(
            r#"{ "v": 1, "options": { "top_k": 0, "max_iterations": 0, "max_nodes": 0 } }"#,
        ));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 3);
        assert_eq!(errs[2].code, ErrorCode::LimitExceeded);
        assert_eq!(errs[2].path, "/options/max_nodes");
    }

    // ─── Rule: unknown_fields ───────────────────────────────────────────

    #[test]
    fn test_unknown_fields_warn_when_not_strict() {
        let report = engine().validate(&spec(
            r#"{ "v": 1, "bogus": true, "options": { "window": 4 } }"#,
        ));
        assert!(report.is_valid());
        let paths: Vec<_> = report.warnings().map(|w| w.path.as_str()).collect();
        assert_eq!(paths, vec!["/bogus", "/options/window"]);
    }

    #[test]
    fn test_unknown_fields_error_when_strict() {
        let report = engine().validate(&spec(
            r#"{ "v": 1, "strict": true, "options": { "window": 4 } }"#,
        ));
        assert!(report.has_errors());
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs[0].code, ErrorCode::UnknownField);
    }

    #[test]
    fn test_unknown_fields_ignored_for_plain_config() {
        assert!(engine().validate_config(&SummarizerConfig::default()).is_empty());
    }

    // ─── Engine ─────────────────────────────────────────────────────────

    #[test]
    fn test_custom_rule() {
        struct MaxTopK;

        impl ValidationRule for MaxTopK {
            fn name(&self) -> &str {
                "max_top_k"
            }

            fn validate(
                &self,
                config: &SummarizerConfig,
                _spec: Option<&SummarySpec>,
            ) -> Vec<ValidationDiagnostic> {
                if config.top_k > 10 {
                    vec![ValidationDiagnostic::warning(SpecError::new(
                        ErrorCode::OutOfRange,
                        "/options/top_k",
                        "top_k above 10 makes a long summary",
                    ))]
                } else {
                    vec![]
                }
            }
        }

        let mut engine = ValidationEngine::with_defaults();
        engine.add_rule(Box::new(MaxTopK));
        assert_eq!(engine.rule_names().last(), Some(&"max_top_k"));

        let report = engine.validate_config(&SummarizerConfig::default().with_top_k(20));
        assert!(report.is_valid());
        assert_eq!(report.warnings().count(), 1);
    }
}
