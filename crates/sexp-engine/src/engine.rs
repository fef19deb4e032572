//! The engine facade: registry plus variable store, wired explicitly.
//!
//! There is no ambient global registry. Hosts construct a `SexpEngine` at
//! application wiring time, register any bridge functions, and pass the
//! engine by reference to whatever evaluates expressions.

use sexp_types::{coerce, SexpError, SexpValue};

use crate::functions::{register_builtins, ExecContext, FunctionRegistry};
use crate::scope::VariableStore;

/// The SEXP evaluation engine.
///
/// Owns the function registry (populated once, then read-mostly) and the
/// script variable store (the only mutable shared resource). Evaluation is
/// single-threaded, synchronous, and non-blocking: every call runs to
/// completion before returning.
pub struct SexpEngine {
    registry: FunctionRegistry,
    variables: VariableStore,
}

impl SexpEngine {
    /// Create an engine with the standard operator library registered.
    pub fn new() -> Self {
        let mut registry = FunctionRegistry::new();
        register_builtins(&mut registry);
        Self {
            registry,
            variables: VariableStore::new(),
        }
    }

    /// Create an engine over a pre-populated registry.
    ///
    /// For hosts that assemble their own function set (standard library
    /// plus mission/AI bridges) before handing it to the engine.
    pub fn with_registry(registry: FunctionRegistry) -> Self {
        Self {
            registry,
            variables: VariableStore::new(),
        }
    }

    /// The function registry.
    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    /// Mutable registry access, for startup-time registration of host
    /// bridge functions.
    pub fn registry_mut(&mut self) -> &mut FunctionRegistry {
        &mut self.registry
    }

    /// The script variable store.
    pub fn variables(&self) -> &VariableStore {
        &self.variables
    }

    /// Mutable variable store access, for host-driven setup/persistence.
    pub fn variables_mut(&mut self) -> &mut VariableStore {
        &mut self.variables
    }

    /// Execute a function by name with pre-evaluated arguments.
    ///
    /// Resolution goes through the registry; the entry runs the full
    /// validate-then-execute lifecycle. All faults come back as error
    /// values.
    #[tracing::instrument(level = "debug", skip(self, args), fields(function = %name, arg_count = args.len()))]
    pub fn execute(&mut self, name: &str, args: &[SexpValue]) -> SexpValue {
        let mut ctx = ExecContext::new(&mut self.variables);
        let result = self.registry.execute(name, args, &mut ctx);
        if let Some(err) = result.as_error() {
            tracing::debug!(function = %name, error = %err, "evaluation produced an error value");
        }
        result
    }

    /// Execute and coerce the result to a boolean, the trigger-check form.
    ///
    /// Error results read as false, so a broken condition disables its
    /// trigger rather than crashing the mission.
    pub fn execute_bool(&mut self, name: &str, args: &[SexpValue]) -> bool {
        coerce::to_boolean(&self.execute(name, args))
    }

    /// Execute and coerce the result to a number.
    pub fn execute_number(&mut self, name: &str, args: &[SexpValue]) -> Result<f64, SexpError> {
        coerce::to_number(&self.execute(name, args))
    }
}

impl Default for SexpEngine {
    fn default() -> Self {
        Self::new()
    }
}
