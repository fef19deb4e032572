//! Error model for SEXP evaluation.
//!
//! Every fault in the engine surfaces as a `SexpError` wrapped in a
//! `SexpValue::Error` result. Errors never escape the engine as panics;
//! the function execution path converts internal faults into
//! `ErrorKind::Runtime` results before they reach the caller.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of failure categories.
///
/// New kinds force a review of every consumer that matches on them, which
/// is intentional — hosts render these to mission designers and need to
/// handle each one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// An argument had a type the operation cannot work with.
    TypeMismatch,
    /// Too few or too many arguments.
    ArgumentCountMismatch,
    /// Division or modulo by zero, overflow to a non-finite number.
    ArithmeticError,
    /// A numeric or string-length constraint was violated.
    ValueOutOfRange,
    /// A declarative validation rule failed (bad scope name, custom rule).
    ValidationError,
    /// An unexpected internal fault, converted from a caught panic.
    RuntimeError,
}

impl ErrorKind {
    /// Human-readable form used in diagnostic text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TypeMismatch => "type mismatch",
            Self::ArgumentCountMismatch => "argument count mismatch",
            Self::ArithmeticError => "arithmetic error",
            Self::ValueOutOfRange => "value out of range",
            Self::ValidationError => "validation error",
            Self::RuntimeError => "runtime error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An evaluation error: kind, message, and optional diagnostic hints.
///
/// Displayed as `kind: message`, which is the form hosts render directly.
/// `context` carries where the error arose (function name, argument index)
/// and `suggestion` a human-actionable fix ("add 1 more argument").
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize, Deserialize)]
#[error("{kind}: {message}")]
pub struct SexpError {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl SexpError {
    /// Create an error with a kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: None,
            suggestion: None,
        }
    }

    /// A `TypeMismatch` error.
    pub fn type_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TypeMismatch, message)
    }

    /// An `ArgumentCountMismatch` error.
    pub fn argument_count(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ArgumentCountMismatch, message)
    }

    /// An `ArithmeticError` error.
    pub fn arithmetic(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ArithmeticError, message)
    }

    /// A `ValueOutOfRange` error.
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ValueOutOfRange, message)
    }

    /// A `ValidationError` error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ValidationError, message)
    }

    /// A `RuntimeError` error.
    pub fn runtime(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RuntimeError, message)
    }

    /// Attach context describing where the error arose.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Attach a human-actionable suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_kind_colon_message() {
        let err = SexpError::arithmetic("division by zero");
        assert_eq!(err.to_string(), "arithmetic error: division by zero");
    }

    #[test]
    fn builders_attach_hints() {
        let err = SexpError::argument_count("expected 2 arguments, got 1")
            .with_context("in '+' argument 2")
            .with_suggestion("add 1 more argument");
        assert_eq!(err.kind, ErrorKind::ArgumentCountMismatch);
        assert_eq!(err.context.as_deref(), Some("in '+' argument 2"));
        assert_eq!(err.suggestion.as_deref(), Some("add 1 more argument"));
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_value(ErrorKind::TypeMismatch).unwrap();
        assert_eq!(json, serde_json::json!("type_mismatch"));
    }
}
