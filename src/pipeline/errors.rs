//! Structured configuration errors.
//!
//! Each [`SpecError`] carries a stable [`ErrorCode`], a JSON-pointer path
//! into the spec document, a message, and an optional hint for fixing it.

use serde::Serialize;

/// Stable machine-readable error codes for spec diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Spec version is not supported
    UnsupportedVersion,
    /// A value is outside its allowed range
    OutOfRange,
    /// A resource limit is unusable
    LimitExceeded,
    /// A field is not part of the schema
    UnknownField,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnsupportedVersion => "unsupported_version",
            Self::OutOfRange => "out_of_range",
            Self::LimitExceeded => "limit_exceeded",
            Self::UnknownField => "unknown_field",
        }
    }
}

/// One problem found in a spec or config
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecError {
    pub code: ErrorCode,
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl SpecError {
    pub fn new(code: ErrorCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            path: path.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl std::fmt::Display for SpecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code.as_str(), self.path, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " (hint: {hint})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_hint() {
        let err = SpecError::new(ErrorCode::OutOfRange, "/options/top_k", "top_k must be at least 1")
            .with_hint("Use a positive value");
        assert_eq!(
            err.to_string(),
            "[out_of_range] /options/top_k: top_k must be at least 1 (hint: Use a positive value)"
        );
    }

    #[test]
    fn test_serialize_code_snake_case() {
        let err = SpecError::new(ErrorCode::UnknownField, "/window", "unrecognized field");
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["code"], "unknown_field");
        assert!(value.get("hint").is_none());
    }
}
