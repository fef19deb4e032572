//! Integration tests for end-to-end expression evaluation.
//!
//! These drive the engine the way a host evaluator does: resolve by name,
//! pass pre-evaluated argument lists, consume tagged result values.

use sexp_engine::{coerce, ErrorKind, SexpEngine, SexpValue};

/// Helper to create an engine with the standard library.
fn make_engine() -> SexpEngine {
    SexpEngine::new()
}

fn num(n: f64) -> SexpValue {
    SexpValue::number(n)
}

// ============================================================================
// The canonical nested scenario: if(=( +(2,3), 5), "yes", "no")
// ============================================================================

#[test]
fn nested_conditional_scenario() {
    let mut engine = make_engine();

    let sum = engine.execute("+", &[num(2.0), num(3.0)]);
    assert_eq!(sum, num(5.0));

    let matches = engine.execute("=", &[sum, num(5.0)]);
    assert_eq!(matches, SexpValue::boolean(true));

    let result = engine.execute(
        "if",
        &[matches, SexpValue::text("yes"), SexpValue::text("no")],
    );
    assert_eq!(result, SexpValue::text("yes"));
}

#[test]
fn results_carry_function_name_metadata() {
    let mut engine = make_engine();
    let result = engine.execute("+", &[num(1.0), num(2.0)]);
    let meta = result.meta().expect("execute should tag results");
    assert_eq!(meta.function, "+");
}

// ============================================================================
// Error degradation: a bad sub-expression weakens, never crashes
// ============================================================================

#[test]
fn division_by_zero_degrades_a_conditional() {
    let mut engine = make_engine();

    let quotient = engine.execute("/", &[num(10.0), num(0.0)]);
    let err = quotient.as_error().expect("expected arithmetic error");
    assert_eq!(err.kind, ErrorKind::ArithmeticError);

    // The error value feeds the conditional as a falsy condition.
    let result = engine.execute(
        "if",
        &[quotient, SexpValue::text("yes"), SexpValue::text("no")],
    );
    assert_eq!(result, SexpValue::text("no"));
}

#[test]
fn errors_render_as_diagnostic_text() {
    let mut engine = make_engine();
    let result = engine.execute("mod", &[num(10.0), num(0.0)]);
    assert_eq!(
        coerce::to_display_string(&result),
        "arithmetic error: modulo by zero"
    );
}

#[test]
fn unknown_function_suggests_a_close_name() {
    let mut engine = make_engine();
    let result = engine.execute("string-contain", &[]);
    let err = result.as_error().expect("expected validation error");
    assert_eq!(err.kind, ErrorKind::ValidationError);
    assert_eq!(
        err.suggestion.as_deref(),
        Some("did you mean 'string-contains'?")
    );
}

// ============================================================================
// Validation ordering and reporting through the full lifecycle
// ============================================================================

#[test]
fn count_violation_reported_before_type_violation() {
    let mut engine = make_engine();
    // set-variable needs two arguments; the single one is also the wrong
    // type, but the count rule must win.
    let result = engine.execute("set-variable", &[num(1.0)]);
    let err = result.as_error().expect("expected error");
    assert_eq!(err.kind, ErrorKind::ArgumentCountMismatch);
    assert_eq!(err.suggestion.as_deref(), Some("add 1 more argument"));
}

#[test]
fn type_violation_names_function_and_index() {
    let mut engine = make_engine();
    let result = engine.execute("set-variable", &[num(1.0), num(2.0)]);
    let err = result.as_error().expect("expected error");
    assert_eq!(err.kind, ErrorKind::TypeMismatch);
    assert!(err.message.contains("'set-variable' argument 1"));
}

// ============================================================================
// Variable scopes end to end
// ============================================================================

#[test]
fn variable_lifecycle_across_scopes() {
    let mut engine = make_engine();

    engine.execute(
        "set-variable",
        &[
            SexpValue::text("ace-unlocked"),
            SexpValue::boolean(true),
            SexpValue::text("campaign"),
        ],
    );
    engine.execute(
        "set-variable",
        &[SexpValue::text("wave"), num(2.0)],
    );

    // Unscoped lookup searches local first, then campaign, then global.
    assert_eq!(
        engine.execute("get-variable", &[SexpValue::text("ace-unlocked")]),
        SexpValue::boolean(true)
    );
    assert_eq!(
        engine.execute("list-variables", &[]),
        SexpValue::text("ace-unlocked, wave")
    );

    // Clearing local leaves the campaign variable alone.
    assert_eq!(
        engine.execute("clear-variables", &[SexpValue::text("local")]),
        num(1.0)
    );
    assert_eq!(
        engine.execute("has-variable", &[SexpValue::text("ace-unlocked")]),
        SexpValue::boolean(true)
    );
}

#[test]
fn bad_scope_name_fails_loudly() {
    let mut engine = make_engine();
    let result = engine.execute(
        "set-variable",
        &[
            SexpValue::text("x"),
            num(1.0),
            SexpValue::text("universe"),
        ],
    );
    let err = result.as_error().expect("expected error");
    assert_eq!(err.kind, ErrorKind::ValidationError);
    assert!(err.message.contains("universe"));
}

// ============================================================================
// Logical identities through the registry
// ============================================================================

#[test]
fn logical_identities() {
    let mut engine = make_engine();
    assert_eq!(engine.execute("and", &[]), SexpValue::boolean(true));
    assert_eq!(engine.execute("or", &[]), SexpValue::boolean(false));
    assert_eq!(engine.execute("xor", &[]), SexpValue::boolean(false));

    let t = SexpValue::boolean(true);
    let f = SexpValue::boolean(false);
    assert_eq!(
        engine.execute("and", &[t.clone(), f.clone(), t.clone()]),
        SexpValue::boolean(false)
    );
    assert_eq!(
        engine.execute("xor", &[t.clone(), f.clone(), f.clone(), t.clone()]),
        SexpValue::boolean(false)
    );
    assert_eq!(
        engine.execute("xor", &[t, f.clone(), f.clone(), f]),
        SexpValue::boolean(true)
    );
}

// ============================================================================
// Performance bookkeeping
// ============================================================================

#[test]
fn performance_report_tracks_calls_and_errors() {
    let mut engine = make_engine();
    engine.execute("+", &[num(1.0), num(2.0)]);
    engine.execute("+", &[num(3.0), num(4.0)]);
    engine.execute("/", &[num(1.0), num(0.0)]);

    let report = engine.registry().performance_report();
    let add = report
        .iter()
        .find(|(name, _)| name == "+")
        .map(|(_, counters)| counters)
        .expect("+ should be in the report");
    assert_eq!(add.call_count, 2);
    assert_eq!(add.error_count, 0);

    let divide = report
        .iter()
        .find(|(name, _)| name == "/")
        .map(|(_, counters)| counters)
        .expect("/ should be in the report");
    assert_eq!(divide.call_count, 1);
    assert_eq!(divide.error_count, 1);
    assert!(divide
        .last_error
        .as_deref()
        .is_some_and(|msg| msg.contains("division by zero")));
}

#[test]
fn repeated_execution_hits_the_lookup_cache() {
    let mut engine = make_engine();
    for _ in 0..5 {
        engine.execute("+", &[num(1.0), num(1.0)]);
    }
    let stats = engine.registry().cache_stats();
    assert_eq!(stats.misses, 1);
    assert!(stats.hits >= 4);
}
