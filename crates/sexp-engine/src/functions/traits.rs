//! Core function traits and descriptor types.

use std::fmt;
use std::time::Duration;

use sexp_types::{SexpValue, ValueType};

use crate::validator::ArgumentValidator;

use super::context::ExecContext;

/// Category a function is filed under in the registry and help listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionCategory {
    Logical,
    Comparison,
    Arithmetic,
    Conditional,
    String,
    Variable,
}

impl FunctionCategory {
    /// Human-readable category name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Logical => "Logical",
            Self::Comparison => "Comparison",
            Self::Arithmetic => "Arithmetic",
            Self::Conditional => "Conditional",
            Self::String => "String",
            Self::Variable => "Variable",
        }
    }
}

impl fmt::Display for FunctionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An example showing how to call a function.
#[derive(Debug, Clone)]
pub struct FunctionExample {
    /// Short description of what the example demonstrates.
    pub description: String,
    /// The example expression.
    pub code: String,
}

impl FunctionExample {
    /// Create a new example.
    pub fn new(description: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            code: code.into(),
        }
    }
}

/// Static metadata describing a function.
#[derive(Debug, Clone)]
pub struct FunctionDescriptor {
    /// Primary name (used for lookup).
    pub name: String,
    /// Category for help grouping.
    pub category: FunctionCategory,
    /// Short description.
    pub description: String,
    /// Signature string shown in help, e.g. `(if <cond> <then> [<else>])`.
    pub signature: String,
    /// Minimum accepted argument count.
    pub min_args: usize,
    /// Maximum accepted argument count. `None` means unbounded.
    pub max_args: Option<usize>,
    /// Accepted types at any position. Empty means any type.
    pub accepted_types: Vec<ValueType>,
    /// True when the function has no side effects.
    pub is_pure: bool,
    /// True when results may be cached for identical arguments.
    pub is_cacheable: bool,
    /// Usage examples.
    pub examples: Vec<FunctionExample>,
}

impl FunctionDescriptor {
    /// Create a descriptor. Arity defaults to zero-or-more, any type,
    /// pure and non-cacheable.
    pub fn new(
        name: impl Into<String>,
        category: FunctionCategory,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            description: description.into(),
            signature: String::new(),
            min_args: 0,
            max_args: None,
            accepted_types: Vec::new(),
            is_pure: true,
            is_cacheable: false,
            examples: Vec::new(),
        }
    }

    /// Set the signature string.
    pub fn signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = signature.into();
        self
    }

    /// Accept between `min` and `max` arguments, inclusive.
    pub fn arity(mut self, min: usize, max: usize) -> Self {
        debug_assert!(min <= max, "arity bounds must be ordered");
        self.min_args = min;
        self.max_args = Some(max);
        self
    }

    /// Accept `min` or more arguments, unbounded above.
    pub fn arity_at_least(mut self, min: usize) -> Self {
        self.min_args = min;
        self.max_args = None;
        self
    }

    /// Restrict accepted types at every position.
    pub fn accept_types(mut self, types: &[ValueType]) -> Self {
        self.accepted_types = types.to_vec();
        self
    }

    /// Mark the function as side-effecting.
    pub fn impure(mut self) -> Self {
        self.is_pure = false;
        self
    }

    /// Mark results as cacheable for identical arguments.
    pub fn cacheable(mut self) -> Self {
        debug_assert!(self.is_pure, "only pure functions may be cacheable");
        self.is_cacheable = true;
        self
    }

    /// Add a usage example.
    pub fn example(mut self, description: impl Into<String>, code: impl Into<String>) -> Self {
        self.examples
            .push(FunctionExample::new(description, code));
        self
    }
}

/// Per-function execution bookkeeping.
///
/// Owned by the registry entry for the function and updated only on its
/// execute path; other functions never see or touch these counters.
#[derive(Debug, Clone, Default)]
pub struct PerformanceCounters {
    /// Number of calls, successful or not.
    pub call_count: u64,
    /// Number of calls that produced an error result.
    pub error_count: u64,
    /// Cumulative execution time across all calls.
    pub total_time: Duration,
    /// Execution time of the most recent call.
    pub last_time: Duration,
    /// Message of the most recent error, if any.
    pub last_error: Option<String>,
}

impl PerformanceCounters {
    pub(crate) fn record(&mut self, elapsed: Duration, error: Option<&str>) {
        self.call_count += 1;
        self.total_time += elapsed;
        self.last_time = elapsed;
        if let Some(message) = error {
            self.error_count += 1;
            self.last_error = Some(message.to_string());
        }
    }

    /// Mean execution time, zero when never called.
    pub fn average_time(&self) -> Duration {
        if self.call_count == 0 {
            Duration::ZERO
        } else {
            self.total_time / self.call_count as u32
        }
    }
}

/// A function that can be registered and executed.
///
/// Implementations are plain computations: they read their pre-evaluated
/// arguments, optionally touch the variable store through the context, and
/// return a value. The validate-then-execute lifecycle, panic containment,
/// and counter updates live in the registry entry, not here.
pub trait SexpFunction: Send + Sync {
    /// The function's static metadata.
    fn descriptor(&self) -> FunctionDescriptor;

    /// Extra validation rules beyond the descriptor's arity/type bounds.
    fn validator(&self) -> Option<&ArgumentValidator> {
        None
    }

    /// Execute with pre-evaluated arguments.
    fn call(&self, args: &[SexpValue], ctx: &mut ExecContext<'_>) -> SexpValue;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_builder_defaults() {
        let desc = FunctionDescriptor::new("and", FunctionCategory::Logical, "logical and");
        assert_eq!(desc.min_args, 0);
        assert_eq!(desc.max_args, None);
        assert!(desc.accepted_types.is_empty());
        assert!(desc.is_pure);
        assert!(!desc.is_cacheable);
    }

    #[test]
    fn descriptor_builder_sets_fields() {
        let desc = FunctionDescriptor::new("if", FunctionCategory::Conditional, "branch select")
            .signature("(if <cond> <then> [<else>])")
            .arity(2, 3)
            .example("pick a branch", r#"(if true "yes" "no")"#);
        assert_eq!(desc.min_args, 2);
        assert_eq!(desc.max_args, Some(3));
        assert_eq!(desc.examples.len(), 1);
    }

    #[test]
    fn counters_record_calls_and_errors() {
        let mut counters = PerformanceCounters::default();
        counters.record(Duration::from_micros(10), None);
        counters.record(Duration::from_micros(30), Some("division by zero"));

        assert_eq!(counters.call_count, 2);
        assert_eq!(counters.error_count, 1);
        assert_eq!(counters.total_time, Duration::from_micros(40));
        assert_eq!(counters.last_time, Duration::from_micros(30));
        assert_eq!(counters.last_error.as_deref(), Some("division by zero"));
        assert_eq!(counters.average_time(), Duration::from_micros(20));
    }
}
