//! SEXP expression engine — the evaluation core for mission scripting.
//!
//! A small, statically-categorized expression engine: hosts resolve a
//! function name through the registry, hand over an already-evaluated
//! argument list, and get back a tagged [`SexpValue`]. Every operator runs
//! a validate-then-execute lifecycle with per-function performance
//! bookkeeping; faults surface as error values, never as panics.
//!
//! # Architecture
//!
//! ```text
//! SexpEngine
//! ├── FunctionRegistry        name/alias → FunctionEntry (+ LRU lookup cache)
//! │   └── FunctionEntry       descriptor + counters + validate/execute lifecycle
//! │       └── dyn SexpFunction  (and, or, =, +, if, set-variable, ...)
//! └── VariableStore           local / campaign / global scopes
//! ```
//!
//! The engine is single-threaded and synchronous by design: each call is a
//! pure computation or a bounded mutation of the variable store, and runs
//! to completion before returning. Hosts that need concurrency serialize
//! access themselves.

pub mod engine;
pub mod functions;
pub mod help;
pub mod scope;
pub mod validator;

pub use engine::SexpEngine;
pub use functions::{
    register_builtins, ExecContext, FunctionCategory, FunctionDescriptor, FunctionEntry,
    FunctionExample, FunctionRegistry, PerformanceCounters, SexpFunction,
};
pub use scope::{VariableScope, VariableStore};
pub use validator::{ArgumentValidator, ValidationRule, ValidatorStats};

// Re-export the value model so hosts can depend on one crate.
pub use sexp_types::{
    coerce, json_to_value, value_to_json, ErrorKind, EvalMeta, ObjectRef, SexpError, SexpValue,
    ValueKind, ValueType,
};
