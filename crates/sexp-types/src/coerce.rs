//! Cross-type coercion rules.
//!
//! Every operator funnels heterogeneous inputs through these helpers, so
//! the rules live in exactly one place. The legacy editor duplicated them
//! per operator and the copies drifted; keeping a single implementation is
//! a hard requirement of this rewrite.

use std::cmp::Ordering;

use crate::error::SexpError;
use crate::value::{SexpValue, ValueKind};

/// Coerce a value to a number.
///
/// - `Number` → itself
/// - `Text` → parsed as int, then float; empty or unparsable → `0.0`
/// - `Boolean` → `1.0` / `0.0`
/// - `Void` → `0.0`
/// - `Object` → `TypeMismatch` error
/// - `Error` → the error, propagated unchanged
pub fn to_number(value: &SexpValue) -> Result<f64, SexpError> {
    match value.kind() {
        ValueKind::Number(n) => Ok(*n),
        ValueKind::Text(s) => Ok(parse_numeric_text(s).unwrap_or(0.0)),
        ValueKind::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
        ValueKind::Void => Ok(0.0),
        ValueKind::Object(_) => Err(SexpError::type_mismatch(
            "cannot convert an object reference to a number",
        )
        .with_suggestion("pass a number, text, or boolean instead")),
        ValueKind::Error(err) => Err(err.clone()),
    }
}

/// Coerce a value to a boolean. Infallible.
///
/// - `Boolean` → itself
/// - `Number` → `value != 0`
/// - `Text` → empty is false; numeric text uses its numeric truthiness;
///   any other non-empty text is true
/// - `Object` → true iff non-null
/// - `Void` / `Error` → false (errors degrade conditionals instead of
///   aborting them)
pub fn to_boolean(value: &SexpValue) -> bool {
    match value.kind() {
        ValueKind::Boolean(b) => *b,
        ValueKind::Number(n) => *n != 0.0,
        ValueKind::Text(s) => match parse_numeric_text(s) {
            Some(n) => n != 0.0,
            None => !s.is_empty(),
        },
        ValueKind::Object(obj) => obj.is_some(),
        ValueKind::Void | ValueKind::Error(_) => false,
    }
}

/// Coerce a value to its display string.
///
/// Integral numbers are formatted without a trailing decimal; errors use
/// the `kind: message` diagnostic form.
pub fn to_display_string(value: &SexpValue) -> String {
    match value.kind() {
        ValueKind::Number(n) => format_number(*n),
        ValueKind::Text(s) => s.clone(),
        ValueKind::Boolean(b) => b.to_string(),
        ValueKind::Object(Some(obj)) => obj.to_string(),
        ValueKind::Object(None) => "null".to_string(),
        ValueKind::Void => "void".to_string(),
        ValueKind::Error(err) => err.to_string(),
    }
}

/// Compare two values under the shared cross-type rule.
///
/// Error values propagate unchanged. If both sides have a numeric
/// interpretation they compare numerically (with float tolerance for
/// equality); otherwise both are rendered as display strings and compared
/// case-normalized under natural ordering.
pub fn compare_values(left: &SexpValue, right: &SexpValue) -> Result<Ordering, SexpError> {
    if let Some(err) = left.as_error() {
        return Err(err.clone());
    }
    if let Some(err) = right.as_error() {
        return Err(err.clone());
    }
    match (numeric_comparand(left), numeric_comparand(right)) {
        (Some(a), Some(b)) => {
            if (a - b).abs() < f64::EPSILON {
                Ok(Ordering::Equal)
            } else if a < b {
                Ok(Ordering::Less)
            } else {
                Ok(Ordering::Greater)
            }
        }
        _ => Ok(natural_compare(
            &to_display_string(left).to_lowercase(),
            &to_display_string(right).to_lowercase(),
        )),
    }
}

/// The numeric interpretation of a value for comparison purposes.
///
/// Unlike `to_number`, text must actually parse: "5" compares numerically
/// but "apple" falls back to the string comparison path.
fn numeric_comparand(value: &SexpValue) -> Option<f64> {
    match value.kind() {
        ValueKind::Number(n) => Some(*n),
        ValueKind::Text(s) => parse_numeric_text(s),
        ValueKind::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
        ValueKind::Object(_) | ValueKind::Void | ValueKind::Error(_) => None,
    }
}

/// Parse text as int, then float. Non-finite results count as unparsable.
fn parse_numeric_text(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Some(i as f64);
    }
    trimmed.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Format a number, dropping the decimal point when it is integral.
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Natural, locale-agnostic string ordering: digit runs compare as
/// numbers, everything else compares per character ("wing2" < "wing10").
fn natural_compare(a: &str, b: &str) -> Ordering {
    let mut ca = a.chars().peekable();
    let mut cb = b.chars().peekable();
    loop {
        match (ca.peek().copied(), cb.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                if x.is_ascii_digit() && y.is_ascii_digit() {
                    let run_a = take_digit_run(&mut ca);
                    let run_b = take_digit_run(&mut cb);
                    match compare_digit_runs(&run_a, &run_b) {
                        Ordering::Equal => continue,
                        other => return other,
                    }
                }
                match x.cmp(&y) {
                    Ordering::Equal => {
                        ca.next();
                        cb.next();
                    }
                    other => return other,
                }
            }
        }
    }
}

fn take_digit_run(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.peek() {
        if c.is_ascii_digit() {
            run.push(*c);
            chars.next();
        } else {
            break;
        }
    }
    run
}

/// Compare digit runs numerically without overflowing: longer run of
/// significant digits wins, equal lengths compare lexically.
fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let sa = a.trim_start_matches('0');
    let sb = b.trim_start_matches('0');
    match sa.len().cmp(&sb.len()) {
        Ordering::Equal => match sa.cmp(sb) {
            // "007" and "7" are numerically equal; fall back to run length
            // so the ordering stays total.
            Ordering::Equal => a.len().cmp(&b.len()),
            other => other,
        },
        other => other,
    }
}
