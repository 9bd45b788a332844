//! Structured error types shared across SAR crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`SarError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (lexemes, identifiers, sizes, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

/// Canonical error type for the SAR codec.
///
/// Every failure is a synchronous, non-retryable value error; nothing in the
/// codec recovers silently or retries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum SarError {
    /// Expression-tree construction and lookup errors.
    #[error("entity error: {0}")]
    Entity(ErrorInfo),
    /// Logic statement construction errors.
    #[error("statement error: {0}")]
    Statement(ErrorInfo),
    /// Vocabulary and axiom registry configuration errors; fatal at startup.
    #[error("vocabulary error: {0}")]
    Vocabulary(ErrorInfo),
    /// Tokenization and detokenization errors.
    #[error("tokenize error: {0}")]
    Tokenize(ErrorInfo),
    /// Mask generation errors.
    #[error("mask error: {0}")]
    Mask(ErrorInfo),
    /// Mask merging errors.
    #[error("merge error: {0}")]
    Merge(ErrorInfo),
    /// State diff encoding errors.
    #[error("diff error: {0}")]
    Diff(ErrorInfo),
    /// Action encode/decode errors, including malformed predictions.
    #[error("action error: {0}")]
    Action(ErrorInfo),
}

impl SarError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            SarError::Entity(info)
            | SarError::Statement(info)
            | SarError::Vocabulary(info)
            | SarError::Tokenize(info)
            | SarError::Mask(info)
            | SarError::Merge(info)
            | SarError::Diff(info)
            | SarError::Action(info) => info,
        }
    }
}
