//! Step structure extraction
//!
//! Analyzers that need to tell an action apart from its arguments go through
//! [`StepStructureExtractor`] instead of splitting strings themselves, so a
//! stricter per-domain grammar can replace the positional default.
//!
//! # Contract
//!
//! - **Input**: one step string, borrowed.
//! - **Output**: `None` when the step carries no head token at all (empty or
//!   whitespace-only), otherwise the head and the remaining tokens.
//! - Borrowed slices point into the input; no allocation is required.

/// A step split into its head token and the tokens after it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepParts<'a> {
    /// Action / step name
    pub head: &'a str,
    /// Arguments, objects or ingredients, in order
    pub rest: Vec<&'a str>,
}

/// Splits a step into head and secondary tokens.
pub trait StepStructureExtractor {
    /// Extract the structure of `step`, or `None` if it has no head token.
    fn extract<'a>(&self, step: &'a str) -> Option<StepParts<'a>>;
}

/// Positional extractor: first whitespace-delimited token is the head.
///
/// This is the default for every domain.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstTokenExtractor;

impl StepStructureExtractor for FirstTokenExtractor {
    #[inline]
    fn extract<'a>(&self, step: &'a str) -> Option<StepParts<'a>> {
        let mut tokens = step.split_whitespace();
        let head = tokens.next()?;
        Some(StepParts {
            head,
            rest: tokens.collect(),
        })
    }
}
