//! Execution context passed to functions.

use crate::scope::VariableStore;

/// Context a function call runs against.
///
/// Gives operators access to the variable store, the engine's only mutable
/// shared resource. Caller-supplied arguments are never mutated; anything a
/// function changes goes through this context.
pub struct ExecContext<'a> {
    /// Script variable store (local/campaign/global scopes).
    pub variables: &'a mut VariableStore,
}

impl<'a> ExecContext<'a> {
    /// Create a context over the given variable store.
    pub fn new(variables: &'a mut VariableStore) -> Self {
        Self { variables }
    }
}
