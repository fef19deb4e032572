//! and / or / xor / not — logical operators.
//!
//! AND, OR, and XOR visit every argument with no short-circuit: mission
//! audit logs depend on seeing all sub-evaluations, so a determined truth
//! value must not stop the pass. Error arguments coerce falsy for the
//! truth decision and the first one is reported only when no definite
//! truth value was otherwise reached.

use sexp_types::{coerce, SexpError, SexpValue};

use crate::functions::{ExecContext, FunctionCategory, FunctionDescriptor, SexpFunction};

/// Walk every argument, returning the truthy count among non-error
/// arguments, whether any non-error argument was falsy, and the first
/// error encountered.
fn truth_pass(args: &[SexpValue]) -> (usize, bool, Option<SexpError>) {
    let mut truthy = 0;
    let mut saw_falsy = false;
    let mut first_error = None;
    for arg in args {
        if let Some(err) = arg.as_error() {
            if first_error.is_none() {
                first_error = Some(err.clone());
            }
            continue;
        }
        if coerce::to_boolean(arg) {
            truthy += 1;
        } else {
            saw_falsy = true;
        }
    }
    (truthy, saw_falsy, first_error)
}

/// Logical AND: true iff every argument is truthy. Empty is true.
pub struct And;

impl SexpFunction for And {
    fn descriptor(&self) -> FunctionDescriptor {
        FunctionDescriptor::new("and", FunctionCategory::Logical, "True when every argument is truthy")
            .signature("(and <expr> ...)")
            .cacheable()
            .example("Both objectives complete", "(and (> kills 5) (= escort-alive true))")
    }

    fn call(&self, args: &[SexpValue], _ctx: &mut ExecContext<'_>) -> SexpValue {
        let (_, saw_falsy, first_error) = truth_pass(args);
        if saw_falsy {
            return SexpValue::boolean(false);
        }
        if let Some(err) = first_error {
            return SexpValue::error(err);
        }
        SexpValue::boolean(true)
    }
}

/// Logical OR: true iff any argument is truthy. Empty is false.
pub struct Or;

impl SexpFunction for Or {
    fn descriptor(&self) -> FunctionDescriptor {
        FunctionDescriptor::new("or", FunctionCategory::Logical, "True when any argument is truthy")
            .signature("(or <expr> ...)")
            .cacheable()
            .example("Either exit works", "(or door-open vent-open)")
    }

    fn call(&self, args: &[SexpValue], _ctx: &mut ExecContext<'_>) -> SexpValue {
        let (truthy, _, first_error) = truth_pass(args);
        if truthy > 0 {
            return SexpValue::boolean(true);
        }
        if let Some(err) = first_error {
            return SexpValue::error(err);
        }
        SexpValue::boolean(false)
    }
}

/// Logical XOR: true iff an odd count of arguments is truthy.
pub struct Xor;

impl SexpFunction for Xor {
    fn descriptor(&self) -> FunctionDescriptor {
        FunctionDescriptor::new("xor", FunctionCategory::Logical, "True when an odd count of arguments is truthy")
            .signature("(xor <expr> ...)")
            .cacheable()
            .example("Exactly one beacon lit", "(xor beacon-a beacon-b)")
    }

    fn call(&self, args: &[SexpValue], _ctx: &mut ExecContext<'_>) -> SexpValue {
        let (truthy, _, first_error) = truth_pass(args);
        // Parity cannot be decided around an unknown, so errors win here.
        if let Some(err) = first_error {
            return SexpValue::error(err);
        }
        SexpValue::boolean(truthy % 2 == 1)
    }
}

/// Logical NOT: negate the truthiness of the single argument.
pub struct Not;

impl SexpFunction for Not {
    fn descriptor(&self) -> FunctionDescriptor {
        FunctionDescriptor::new("not", FunctionCategory::Logical, "Negate the truthiness of the argument")
            .signature("(not <expr>)")
            .arity(1, 1)
            .cacheable()
            .example("Objective still open", "(not objective-complete)")
    }

    fn call(&self, args: &[SexpValue], _ctx: &mut ExecContext<'_>) -> SexpValue {
        if let Some(err) = args[0].as_error() {
            return SexpValue::error(err.clone());
        }
        SexpValue::boolean(!coerce::to_boolean(&args[0]))
    }
}
