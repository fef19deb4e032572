//! String operators: string-equals / string-contains.
//!
//! Both are case-sensitive, unlike the case-normalized cross-type
//! comparison rule — mission designers reach for these exactly when case
//! matters. Non-text arguments coerce through the shared display-string
//! rule; error arguments propagate unchanged.

use sexp_types::{coerce, SexpValue};

use crate::functions::{ExecContext, FunctionCategory, FunctionDescriptor, SexpFunction};

/// Case-sensitive exact match of every remaining argument against the first.
pub struct StringEquals;

impl SexpFunction for StringEquals {
    fn descriptor(&self) -> FunctionDescriptor {
        FunctionDescriptor::new("string-equals", FunctionCategory::String, "Case-sensitive equality against the first argument")
            .signature("(string-equals <text> <text> ...)")
            .arity_at_least(2)
            .cacheable()
            .example("Check a callsign", r#"(string-equals callsign "Alpha 1")"#)
    }

    fn call(&self, args: &[SexpValue], _ctx: &mut ExecContext<'_>) -> SexpValue {
        if let Some(err) = args.iter().find_map(SexpValue::as_error) {
            return SexpValue::error(err.clone());
        }
        let first = coerce::to_display_string(&args[0]);
        let all_equal = args[1..]
            .iter()
            .all(|arg| coerce::to_display_string(arg) == first);
        SexpValue::boolean(all_equal)
    }
}

/// Case-sensitive substring search. An empty needle is always found.
pub struct StringContains;

impl SexpFunction for StringContains {
    fn descriptor(&self) -> FunctionDescriptor {
        FunctionDescriptor::new("string-contains", FunctionCategory::String, "True when the first argument contains the second")
            .signature("(string-contains <haystack> <needle>)")
            .arity(2, 2)
            .cacheable()
            .example("Match a wing by prefix", r#"(string-contains ship-name "Alpha")"#)
    }

    fn call(&self, args: &[SexpValue], _ctx: &mut ExecContext<'_>) -> SexpValue {
        if let Some(err) = args.iter().find_map(SexpValue::as_error) {
            return SexpValue::error(err.clone());
        }
        let haystack = coerce::to_display_string(&args[0]);
        let needle = coerce::to_display_string(&args[1]);
        SexpValue::boolean(haystack.contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::VariableStore;
    use sexp_types::SexpError;

    fn call(f: &dyn SexpFunction, args: &[SexpValue]) -> SexpValue {
        let mut store = VariableStore::new();
        let mut ctx = ExecContext::new(&mut store);
        f.call(args, &mut ctx)
    }

    #[test]
    fn string_equals_is_case_sensitive() {
        assert_eq!(
            call(
                &StringEquals,
                &[SexpValue::text("Alpha"), SexpValue::text("Alpha")]
            ),
            SexpValue::boolean(true)
        );
        assert_eq!(
            call(
                &StringEquals,
                &[SexpValue::text("Alpha"), SexpValue::text("alpha")]
            ),
            SexpValue::boolean(false)
        );
    }

    #[test]
    fn string_equals_checks_every_argument_against_first() {
        assert_eq!(
            call(
                &StringEquals,
                &[
                    SexpValue::text("go"),
                    SexpValue::text("go"),
                    SexpValue::text("go")
                ]
            ),
            SexpValue::boolean(true)
        );
        assert_eq!(
            call(
                &StringEquals,
                &[
                    SexpValue::text("go"),
                    SexpValue::text("go"),
                    SexpValue::text("stop")
                ]
            ),
            SexpValue::boolean(false)
        );
    }

    #[test]
    fn string_equals_coerces_non_text() {
        assert_eq!(
            call(
                &StringEquals,
                &[SexpValue::text("5"), SexpValue::number(5.0)]
            ),
            SexpValue::boolean(true)
        );
    }

    #[test]
    fn string_contains_substring_search() {
        assert_eq!(
            call(
                &StringContains,
                &[SexpValue::text("Alpha 1"), SexpValue::text("pha")]
            ),
            SexpValue::boolean(true)
        );
        assert_eq!(
            call(
                &StringContains,
                &[SexpValue::text("Alpha 1"), SexpValue::text("beta")]
            ),
            SexpValue::boolean(false)
        );
        // Case-sensitive.
        assert_eq!(
            call(
                &StringContains,
                &[SexpValue::text("Alpha"), SexpValue::text("alpha")]
            ),
            SexpValue::boolean(false)
        );
    }

    #[test]
    fn empty_needle_is_always_found() {
        assert_eq!(
            call(
                &StringContains,
                &[SexpValue::text("anything"), SexpValue::text("")]
            ),
            SexpValue::boolean(true)
        );
        assert_eq!(
            call(&StringContains, &[SexpValue::text(""), SexpValue::text("")]),
            SexpValue::boolean(true)
        );
    }

    #[test]
    fn error_arguments_propagate() {
        let err = SexpError::runtime("upstream");
        let result = call(
            &StringContains,
            &[SexpValue::error(err.clone()), SexpValue::text("x")],
        );
        assert_eq!(result.as_error(), Some(&err));
    }
}
