//! Arithmetic operators: + - * / mod.
//!
//! Operands coerce through the shared to-number rule and folds run left to
//! right. Division and modulo by zero are explicit arithmetic errors — the
//! legacy editor silently produced undefined results here, and that must
//! not come back. Non-finite fold results (overflow) are errors too; a
//! `NaN` or `Infinity` never leaks out of these operators.

use sexp_types::{coerce, SexpError, SexpValue};

use crate::functions::{ExecContext, FunctionCategory, FunctionDescriptor, SexpFunction};

/// Wrap a fold result, converting non-finite values into errors.
fn finite(name: &str, value: f64) -> SexpValue {
    if value.is_finite() {
        SexpValue::number(value)
    } else {
        SexpValue::error(
            SexpError::arithmetic(format!("'{name}' result is not a finite number"))
                .with_suggestion("check the operands for overflow"),
        )
    }
}

/// Coerce every argument to a number, stopping at the first error.
fn numbers(args: &[SexpValue]) -> Result<Vec<f64>, SexpError> {
    args.iter().map(coerce::to_number).collect()
}

/// Addition: fold over all arguments. Empty sum is 0.
pub struct Add;

impl SexpFunction for Add {
    fn descriptor(&self) -> FunctionDescriptor {
        FunctionDescriptor::new("+", FunctionCategory::Arithmetic, "Sum of all arguments")
            .signature("(+ <number> ...)")
            .cacheable()
            .example("Total score", "(+ kills assists 10)")
    }

    fn call(&self, args: &[SexpValue], _ctx: &mut ExecContext<'_>) -> SexpValue {
        match numbers(args) {
            Ok(operands) => finite("+", operands.iter().sum()),
            Err(err) => SexpValue::error(err),
        }
    }
}

/// Subtraction: `a - b - c ...`; a single argument negates.
pub struct Subtract;

impl SexpFunction for Subtract {
    fn descriptor(&self) -> FunctionDescriptor {
        FunctionDescriptor::new("-", FunctionCategory::Arithmetic, "Difference, folding left to right; unary negates")
            .signature("(- <number> ...)")
            .arity_at_least(1)
            .cacheable()
            .example("Remaining hull", "(- hull-strength damage)")
    }

    fn call(&self, args: &[SexpValue], _ctx: &mut ExecContext<'_>) -> SexpValue {
        let operands = match numbers(args) {
            Ok(operands) => operands,
            Err(err) => return SexpValue::error(err),
        };
        if operands.len() == 1 {
            return finite("-", -operands[0]);
        }
        let result = operands[1..]
            .iter()
            .fold(operands[0], |acc, n| acc - n);
        finite("-", result)
    }
}

/// Multiplication: fold over all arguments. Empty product is 1.
pub struct Multiply;

impl SexpFunction for Multiply {
    fn descriptor(&self) -> FunctionDescriptor {
        FunctionDescriptor::new("*", FunctionCategory::Arithmetic, "Product of all arguments")
            .signature("(* <number> ...)")
            .cacheable()
            .example("Score with multiplier", "(* base-score 2)")
    }

    fn call(&self, args: &[SexpValue], _ctx: &mut ExecContext<'_>) -> SexpValue {
        match numbers(args) {
            Ok(operands) => finite("*", operands.iter().product()),
            Err(err) => SexpValue::error(err),
        }
    }
}

/// Division: `a / b / c ...`; a single argument is the reciprocal.
/// Any zero divisor is an arithmetic error.
pub struct Divide;

impl SexpFunction for Divide {
    fn descriptor(&self) -> FunctionDescriptor {
        FunctionDescriptor::new("/", FunctionCategory::Arithmetic, "Quotient, folding left to right; unary is the reciprocal")
            .signature("(/ <number> ...)")
            .arity_at_least(1)
            .cacheable()
            .example("Average over three waves", "(/ total-kills 3)")
    }

    fn call(&self, args: &[SexpValue], _ctx: &mut ExecContext<'_>) -> SexpValue {
        let operands = match numbers(args) {
            Ok(operands) => operands,
            Err(err) => return SexpValue::error(err),
        };
        let (mut acc, divisors) = if operands.len() == 1 {
            (1.0, &operands[..])
        } else {
            (operands[0], &operands[1..])
        };
        for divisor in divisors {
            if *divisor == 0.0 {
                return SexpValue::error(
                    SexpError::arithmetic("division by zero")
                        .with_suggestion("guard the divisor with a comparison first"),
                );
            }
            acc /= divisor;
        }
        finite("/", acc)
    }
}

/// Modulo of exactly two arguments. A zero divisor is an arithmetic error.
pub struct Modulo;

impl SexpFunction for Modulo {
    fn descriptor(&self) -> FunctionDescriptor {
        FunctionDescriptor::new("mod", FunctionCategory::Arithmetic, "Remainder of the first argument divided by the second")
            .signature("(mod <number> <number>)")
            .arity(2, 2)
            .cacheable()
            .example("Every third wave", "(mod wave-number 3)")
    }

    fn call(&self, args: &[SexpValue], _ctx: &mut ExecContext<'_>) -> SexpValue {
        let operands = match numbers(args) {
            Ok(operands) => operands,
            Err(err) => return SexpValue::error(err),
        };
        if operands[1] == 0.0 {
            return SexpValue::error(
                SexpError::arithmetic("modulo by zero")
                    .with_suggestion("guard the divisor with a comparison first"),
            );
        }
        finite("mod", operands[0] % operands[1])
    }
}
