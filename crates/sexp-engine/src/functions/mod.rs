//! Function system for the SEXP engine.
//!
//! Every operator is a function — logical, comparison, arithmetic,
//! conditional, string, and variable operators all implement the same
//! `SexpFunction` trait and register under a name plus optional aliases.
//!
//! # Architecture
//!
//! ```text
//! FunctionRegistry
//! ├── Builtins (and, or, =, +, if, set-variable, ...)
//! └── Host functions (mission/AI bridges, registered at startup)
//! ```

mod builtin;
mod context;
mod registry;
mod traits;

pub use builtin::register_builtins;
pub use context::ExecContext;
pub use registry::{CacheStats, FunctionEntry, FunctionRegistry};
pub use traits::{
    FunctionCategory, FunctionDescriptor, FunctionExample, PerformanceCounters, SexpFunction,
};
