//! Comparison operators: = != < > <= >=.
//!
//! The first argument is compared pairwise against every remaining one
//! using the shared cross-type rule; the result is true only if every
//! pairwise comparison satisfies the operator. `(< 1 5 10)` therefore
//! reads "1 is less than 5 and less than 10", not as a chain.

use std::cmp::Ordering;

use sexp_types::{coerce, SexpValue};

use crate::functions::{ExecContext, FunctionCategory, FunctionDescriptor, SexpFunction};

/// Compare the first argument against every remaining argument.
///
/// Error arguments propagate unchanged through the shared comparison.
fn compare_all(args: &[SexpValue], satisfies: fn(Ordering) -> bool) -> SexpValue {
    let first = &args[0];
    for other in &args[1..] {
        match coerce::compare_values(first, other) {
            Ok(ordering) => {
                if !satisfies(ordering) {
                    return SexpValue::boolean(false);
                }
            }
            Err(err) => return SexpValue::error(err),
        }
    }
    SexpValue::boolean(true)
}

macro_rules! comparison_function {
    ($type_name:ident, $name:literal, $aliased:literal, $doc:literal, $satisfies:expr) => {
        #[doc = $doc]
        pub struct $type_name;

        impl SexpFunction for $type_name {
            fn descriptor(&self) -> FunctionDescriptor {
                FunctionDescriptor::new($name, FunctionCategory::Comparison, $doc)
                    .signature(concat!("(", $name, " <value> <value> ...)"))
                    .arity_at_least(2)
                    .cacheable()
                    .example("Compare against every argument", $aliased)
            }

            fn call(&self, args: &[SexpValue], _ctx: &mut ExecContext<'_>) -> SexpValue {
                compare_all(args, $satisfies)
            }
        }
    };
}

comparison_function!(
    Equals,
    "=",
    "(= hull-strength 100)",
    "True when every argument equals the first",
    |ordering| ordering == Ordering::Equal
);

comparison_function!(
    NotEquals,
    "!=",
    "(!= target-count 0)",
    "True when no remaining argument equals the first",
    |ordering| ordering != Ordering::Equal
);

comparison_function!(
    LessThan,
    "<",
    "(< 1 5 10)",
    "True when the first argument is less than every other",
    |ordering| ordering == Ordering::Less
);

comparison_function!(
    GreaterThan,
    ">",
    "(> hull-strength 25 10)",
    "True when the first argument is greater than every other",
    |ordering| ordering == Ordering::Greater
);

comparison_function!(
    LessOrEqual,
    "<=",
    "(<= fuel-used fuel-budget)",
    "True when the first argument is at most every other",
    |ordering| ordering != Ordering::Greater
);

comparison_function!(
    GreaterOrEqual,
    ">=",
    "(>= score par-score)",
    "True when the first argument is at least every other",
    |ordering| ordering != Ordering::Less
);
