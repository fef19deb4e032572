//! Conditional operators: if / when / cond.
//!
//! Branch arguments arrive already evaluated by the host — these
//! operators only select among produced values and never trigger lazy
//! sub-evaluation. Conditions go through the shared to-boolean rule, so
//! an error condition reads as false and the conditional degrades instead
//! of aborting.

use sexp_types::{coerce, SexpValue};

use crate::functions::{ExecContext, FunctionCategory, FunctionDescriptor, SexpFunction};

/// Two-way branch select with an optional else value.
pub struct If;

impl SexpFunction for If {
    fn descriptor(&self) -> FunctionDescriptor {
        FunctionDescriptor::new("if", FunctionCategory::Conditional, "Select the then-value or the optional else-value")
            .signature("(if <cond> <then> [<else>])")
            .arity(2, 3)
            .example("Branch on an objective", r#"(if objective-complete "done" "pending")"#)
    }

    fn call(&self, args: &[SexpValue], _ctx: &mut ExecContext<'_>) -> SexpValue {
        if coerce::to_boolean(&args[0]) {
            args[1].clone()
        } else {
            args.get(2).cloned().unwrap_or_else(SexpValue::void)
        }
    }
}

/// Guarded sequence: the last expression value when the condition holds.
pub struct When;

impl SexpFunction for When {
    fn descriptor(&self) -> FunctionDescriptor {
        FunctionDescriptor::new("when", FunctionCategory::Conditional, "The last expression when the condition is truthy, else void")
            .signature("(when <cond> <expr> ...)")
            .arity_at_least(1)
            .example("Chain of staged effects", "(when docked (play-cutscene) (award-bonus))")
    }

    fn call(&self, args: &[SexpValue], _ctx: &mut ExecContext<'_>) -> SexpValue {
        if !coerce::to_boolean(&args[0]) {
            return SexpValue::void();
        }
        // The expressions form a sequence; only the last value matters.
        match args.len() {
            1 => SexpValue::void(),
            n => args[n - 1].clone(),
        }
    }
}

/// Multi-way branch over alternating condition/expression pairs, with an
/// optional trailing default.
pub struct Cond;

impl SexpFunction for Cond {
    fn descriptor(&self) -> FunctionDescriptor {
        FunctionDescriptor::new("cond", FunctionCategory::Conditional, "First expression whose preceding condition is truthy")
            .signature("(cond <c1> <e1> <c2> <e2> ... [<default>])")
            .arity_at_least(2)
            .example("Grade an outcome", r#"(cond (> s 90) "gold" (> s 50) "silver" "bronze")"#)
    }

    fn call(&self, args: &[SexpValue], _ctx: &mut ExecContext<'_>) -> SexpValue {
        // Walk condition/expression pairs positionally; the host has
        // already evaluated both halves of every pair.
        let mut pairs = args.chunks_exact(2);
        for pair in &mut pairs {
            if coerce::to_boolean(&pair[0]) {
                return pair[1].clone();
            }
        }
        // A trailing odd argument is the default.
        match pairs.remainder() {
            [default] => default.clone(),
            _ => SexpValue::void(),
        }
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
    fn if_selects_branches() {
        assert_eq!(
            call(
                &If,
                &[
                    SexpValue::boolean(true),
                    SexpValue::text("yes"),
                    SexpValue::text("no")
                ]
            ),
            SexpValue::text("yes")
        );
        assert_eq!(
            call(
                &If,
                &[
                    SexpValue::boolean(false),
                    SexpValue::text("yes"),
                    SexpValue::text("no")
                ]
            ),
            SexpValue::text("no")
        );
    }

    #[test]
    fn if_without_else_is_void() {
        assert_eq!(
            call(&If, &[SexpValue::boolean(false), SexpValue::text("yes")]),
            SexpValue::void()
        );
    }

    #[test]
    fn if_condition_errors_read_as_false() {
        let result = call(
            &If,
            &[
                SexpValue::error(SexpError::runtime("bad cond")),
                SexpValue::text("yes"),
                SexpValue::text("no"),
            ],
        );
        assert_eq!(result, SexpValue::text("no"));
    }

    #[test]
    fn when_yields_last_expression() {
        let result = call(
            &When,
            &[
                SexpValue::boolean(true),
                SexpValue::text("staged"),
                SexpValue::number(7.0),
            ],
        );
        assert_eq!(result, SexpValue::number(7.0));
    }

    #[test]
    fn when_false_or_bare_is_void() {
        assert_eq!(
            call(&When, &[SexpValue::boolean(false), SexpValue::text("x")]),
            SexpValue::void()
        );
        assert_eq!(call(&When, &[SexpValue::boolean(true)]), SexpValue::void());
    }

    #[test]
    fn cond_returns_first_truthy_pair() {
        let result = call(
            &Cond,
            &[
                SexpValue::boolean(false),
                SexpValue::text("a"),
                SexpValue::boolean(true),
                SexpValue::text("b"),
                SexpValue::boolean(true),
                SexpValue::text("c"),
            ],
        );
        assert_eq!(result, SexpValue::text("b"));
    }

    #[test]
    fn cond_falls_back_to_trailing_default() {
        let result = call(
            &Cond,
            &[
                SexpValue::boolean(false),
                SexpValue::text("a"),
                SexpValue::boolean(false),
                SexpValue::text("b"),
                SexpValue::text("default"),
            ],
        );
        assert_eq!(result, SexpValue::text("default"));
    }

    #[test]
    fn cond_without_default_is_void() {
        let result = call(&Cond, &[SexpValue::boolean(false), SexpValue::text("a")]);
        assert_eq!(result, SexpValue::void());
    }
}
