//! Declarative argument validation.
//!
//! An [`ArgumentValidator`] is a reusable, ordered rule list composed with
//! builder-style calls. Rules run in insertion order and the first failure
//! determines the returned error, so composing a count rule before type
//! rules guarantees count violations are reported first.
//!
//! Positional rules (types-at, numeric-range, string-length) skip silently
//! when the referenced index is out of bounds: count validation is
//! expected to have caught that case already. This is a documented
//! convention of rule composition, not a guess.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use sexp_types::{coerce, SexpError, SexpValue, ValueType};

/// Predicate used by custom rules. Receives the full argument list.
pub type CustomCheck = Box<dyn Fn(&[SexpValue]) -> bool + Send + Sync>;

/// A single validation rule.
pub enum ValidationRule {
    /// Exactly `n` arguments.
    ExactCount(usize),
    /// At least `n` arguments.
    MinCount(usize),
    /// At most `n` arguments.
    MaxCount(usize),
    /// Between `min` and `max` arguments, inclusive.
    CountRange(usize, usize),
    /// The argument at `index` must have one of the allowed types.
    TypesAt {
        index: usize,
        allowed: Vec<ValueType>,
    },
    /// Every argument must have one of the allowed types.
    AllowedTypes(Vec<ValueType>),
    /// The argument at `index`, coerced to a number, must lie in `[min, max]`.
    NumericRange { index: usize, min: f64, max: f64 },
    /// The display string of the argument at `index` must have a length
    /// in `[min, max]` characters.
    StringLength {
        index: usize,
        min: usize,
        max: usize,
    },
    /// An arbitrary predicate over the whole argument list.
    Custom {
        check: CustomCheck,
        description: String,
    },
}

impl fmt::Debug for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExactCount(n) => write!(f, "ExactCount({n})"),
            Self::MinCount(n) => write!(f, "MinCount({n})"),
            Self::MaxCount(n) => write!(f, "MaxCount({n})"),
            Self::CountRange(min, max) => write!(f, "CountRange({min}, {max})"),
            Self::TypesAt { index, allowed } => write!(f, "TypesAt({index}, {allowed:?})"),
            Self::AllowedTypes(allowed) => write!(f, "AllowedTypes({allowed:?})"),
            Self::NumericRange { index, min, max } => {
                write!(f, "NumericRange({index}, {min}..={max})")
            }
            Self::StringLength { index, min, max } => {
                write!(f, "StringLength({index}, {min}..={max})")
            }
            Self::Custom { description, .. } => write!(f, "Custom({description:?})"),
        }
    }
}

/// Snapshot of validator activity, for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidatorStats {
    pub validations: u64,
    pub failures: u64,
}

/// An ordered, reusable set of validation rules.
#[derive(Debug, Default)]
pub struct ArgumentValidator {
    rules: Vec<ValidationRule>,
    validations: AtomicU64,
    failures: AtomicU64,
}

impl ArgumentValidator {
    /// Create an empty validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require exactly `count` arguments.
    pub fn require_exact_count(mut self, count: usize) -> Self {
        self.rules.push(ValidationRule::ExactCount(count));
        self
    }

    /// Require at least `count` arguments.
    pub fn require_min_count(mut self, count: usize) -> Self {
        self.rules.push(ValidationRule::MinCount(count));
        self
    }

    /// Require at most `count` arguments.
    pub fn require_max_count(mut self, count: usize) -> Self {
        self.rules.push(ValidationRule::MaxCount(count));
        self
    }

    /// Require between `min` and `max` arguments, inclusive.
    pub fn require_count_range(mut self, min: usize, max: usize) -> Self {
        debug_assert!(min <= max, "count range must be ordered");
        self.rules.push(ValidationRule::CountRange(min, max));
        self
    }

    /// Require the argument at `index` (0-based) to have one of `allowed`.
    pub fn require_types_at(mut self, index: usize, allowed: &[ValueType]) -> Self {
        self.rules.push(ValidationRule::TypesAt {
            index,
            allowed: allowed.to_vec(),
        });
        self
    }

    /// Allow only the given types at any position.
    pub fn allow_types(mut self, allowed: &[ValueType]) -> Self {
        self.rules
            .push(ValidationRule::AllowedTypes(allowed.to_vec()));
        self
    }

    /// Require the argument at `index` to be a number in `[min, max]`.
    pub fn require_numeric_range(mut self, index: usize, min: f64, max: f64) -> Self {
        self.rules.push(ValidationRule::NumericRange { index, min, max });
        self
    }

    /// Require the display string at `index` to have `min..=max` characters.
    pub fn require_string_length(mut self, index: usize, min: usize, max: usize) -> Self {
        self.rules.push(ValidationRule::StringLength { index, min, max });
        self
    }

    /// Add a custom predicate with a description used in the error message.
    pub fn add_custom_validator(
        mut self,
        check: impl Fn(&[SexpValue]) -> bool + Send + Sync + 'static,
        description: impl Into<String>,
    ) -> Self {
        self.rules.push(ValidationRule::Custom {
            check: Box::new(check),
            description: description.into(),
        });
        self
    }

    /// Number of composed rules.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Diagnostic counters. Never affects control flow.
    pub fn stats(&self) -> ValidatorStats {
        ValidatorStats {
            validations: self.validations.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }

    /// Apply every rule in insertion order; the first failure wins.
    pub fn validate(&self, args: &[SexpValue], function_name: &str) -> Result<(), SexpError> {
        self.validations.fetch_add(1, Ordering::Relaxed);
        for rule in &self.rules {
            if let Err(err) = apply_rule(rule, args, function_name) {
                self.failures.fetch_add(1, Ordering::Relaxed);
                return Err(err);
            }
        }
        Ok(())
    }
}

fn apply_rule(
    rule: &ValidationRule,
    args: &[SexpValue],
    function_name: &str,
) -> Result<(), SexpError> {
    match rule {
        ValidationRule::ExactCount(n) => check_count(args.len(), *n, *n, function_name),
        ValidationRule::MinCount(n) => check_count(args.len(), *n, usize::MAX, function_name),
        ValidationRule::MaxCount(n) => check_count(args.len(), 0, *n, function_name),
        ValidationRule::CountRange(min, max) => check_count(args.len(), *min, *max, function_name),
        ValidationRule::TypesAt { index, allowed } => match args.get(*index) {
            Some(arg) => check_type(arg, allowed, *index, function_name),
            // Out-of-bounds index: count rules are responsible for this.
            None => Ok(()),
        },
        ValidationRule::AllowedTypes(allowed) => {
            for (index, arg) in args.iter().enumerate() {
                check_type(arg, allowed, index, function_name)?;
            }
            Ok(())
        }
        ValidationRule::NumericRange { index, min, max } => {
            let Some(arg) = args.get(*index) else {
                return Ok(());
            };
            if arg.is_error() {
                // Error arguments pass through; the operator propagates them.
                return Ok(());
            }
            let n = coerce::to_number(arg)
                .map_err(|err| err.with_context(format!("in '{function_name}' argument {}", index + 1)))?;
            if n < *min || n > *max {
                return Err(SexpError::out_of_range(format!(
                    "'{function_name}' argument {} is {}, outside {}..={}",
                    index + 1,
                    coerce::to_display_string(arg),
                    min,
                    max
                ))
                .with_suggestion(format!("use a value between {min} and {max}")));
            }
            Ok(())
        }
        ValidationRule::StringLength { index, min, max } => {
            let Some(arg) = args.get(*index) else {
                return Ok(());
            };
            if arg.is_error() {
                return Ok(());
            }
            let len = coerce::to_display_string(arg).chars().count();
            if len < *min || len > *max {
                return Err(SexpError::out_of_range(format!(
                    "'{function_name}' argument {} has length {len}, outside {min}..={max}",
                    index + 1
                ))
                .with_suggestion(format!(
                    "use text between {min} and {max} characters long"
                )));
            }
            Ok(())
        }
        ValidationRule::Custom { check, description } => {
            if check(args) {
                Ok(())
            } else {
                Err(SexpError::validation(format!(
                    "'{function_name}' arguments failed check: {description}"
                )))
            }
        }
    }
}

fn check_count(got: usize, min: usize, max: usize, function_name: &str) -> Result<(), SexpError> {
    if got < min {
        let missing = min - got;
        return Err(SexpError::argument_count(format!(
            "'{function_name}' expects at least {min} argument{}, got {got}",
            plural(min)
        ))
        .with_suggestion(format!("add {missing} more argument{}", plural(missing))));
    }
    if got > max {
        let excess = got - max;
        return Err(SexpError::argument_count(format!(
            "'{function_name}' expects at most {max} argument{}, got {got}",
            plural(max)
        ))
        .with_suggestion(format!("remove {excess} argument{}", plural(excess))));
    }
    Ok(())
}

fn check_type(
    arg: &SexpValue,
    allowed: &[ValueType],
    index: usize,
    function_name: &str,
) -> Result<(), SexpError> {
    // Error arguments pass through so operators can propagate them.
    if arg.is_error() {
        return Ok(());
    }
    if allowed.is_empty() || allowed.contains(&arg.value_type()) {
        return Ok(());
    }
    let allowed_list = allowed
        .iter()
        .map(ValueType::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    Err(SexpError::type_mismatch(format!(
        "'{function_name}' argument {} is {}, expected {}",
        index + 1,
        arg.value_type(),
        allowed_list
    ))
    .with_context(format!("in '{function_name}' argument {}", index + 1))
    .with_suggestion(format!("convert to one of: {allowed_list}")))
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
