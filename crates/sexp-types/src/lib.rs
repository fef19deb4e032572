//! Pure data types for the SEXP engine — values, errors, coercion rules.
//!
//! This crate is a leaf dependency with no interpreter state and no I/O.
//! It exists so that consumers (editors, debugging UIs, host bridges) can
//! work with the engine's value model without pulling in the function
//! registry and operator library from `sexp-engine`.

pub mod coerce;
pub mod error;
pub mod json;
pub mod value;

// Flat re-exports for convenience
pub use error::*;
pub use json::*;
pub use value::*;
