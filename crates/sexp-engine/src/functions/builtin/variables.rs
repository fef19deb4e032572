//! Variable operators: get / set / has / remove / clear / list.
//!
//! All of them address the three-scope store (local, campaign, global).
//! When no scope argument is given, lookups search local → campaign →
//! global, writes land in local, and clear/list span every scope. Scope
//! names parse case-insensitively; anything unknown is a validation error.

use sexp_types::{coerce, SexpError, SexpValue, ValueType};

use crate::functions::{ExecContext, FunctionCategory, FunctionDescriptor, SexpFunction};
use crate::scope::VariableScope;
use crate::validator::ArgumentValidator;

/// Extract the variable name, propagating an error argument unchanged.
fn name_arg(args: &[SexpValue]) -> Result<String, SexpError> {
    if let Some(err) = args[0].as_error() {
        return Err(err.clone());
    }
    match args[0].as_text() {
        Some(name) => Ok(name.to_string()),
        // The positional type rule already rejected non-text; this covers
        // direct calls that bypass the lifecycle.
        None => Err(SexpError::type_mismatch("variable name must be text")),
    }
}

/// Parse the optional scope argument at `index`.
fn scope_arg(args: &[SexpValue], index: usize) -> Result<Option<VariableScope>, SexpError> {
    let Some(arg) = args.get(index) else {
        return Ok(None);
    };
    if let Some(err) = arg.as_error() {
        return Err(err.clone());
    }
    VariableScope::parse(&coerce::to_display_string(arg)).map(Some)
}

/// Read a variable; void when unset.
pub struct GetVariable {
    validator: ArgumentValidator,
}

impl Default for GetVariable {
    fn default() -> Self {
        Self {
            validator: ArgumentValidator::new()
                .require_types_at(0, &[ValueType::Text])
                .require_types_at(1, &[ValueType::Text]),
        }
    }
}

impl SexpFunction for GetVariable {
    fn descriptor(&self) -> FunctionDescriptor {
        FunctionDescriptor::new("get-variable", FunctionCategory::Variable, "Read a variable, searching local, campaign, then global")
            .signature("(get-variable <name> [<scope>])")
            .arity(1, 2)
            .impure()
            .example("Read from any scope", r#"(get-variable "kills")"#)
            .example("Read one scope only", r#"(get-variable "kills" "campaign")"#)
    }

    fn validator(&self) -> Option<&ArgumentValidator> {
        Some(&self.validator)
    }

    fn call(&self, args: &[SexpValue], ctx: &mut ExecContext<'_>) -> SexpValue {
        let (name, scope) = match (name_arg(args), scope_arg(args, 1)) {
            (Ok(name), Ok(scope)) => (name, scope),
            (Err(err), _) | (_, Err(err)) => return SexpValue::error(err),
        };
        let found = match scope {
            Some(scope) => ctx.variables.get_in(scope, &name),
            None => ctx.variables.get(&name),
        };
        found.cloned().unwrap_or_else(SexpValue::void)
    }
}

/// Write a variable; echoes the stored value.
pub struct SetVariable {
    validator: ArgumentValidator,
}

impl Default for SetVariable {
    fn default() -> Self {
        Self {
            validator: ArgumentValidator::new()
                .require_types_at(0, &[ValueType::Text])
                .require_types_at(2, &[ValueType::Text]),
        }
    }
}

impl SexpFunction for SetVariable {
    fn descriptor(&self) -> FunctionDescriptor {
        FunctionDescriptor::new("set-variable", FunctionCategory::Variable, "Write a variable, to the local scope unless told otherwise")
            .signature("(set-variable <name> <value> [<scope>])")
            .arity(2, 3)
            .impure()
            .example("Track mission state", r#"(set-variable "kills" 3)"#)
            .example("Persist across missions", r#"(set-variable "ace-unlocked" true "campaign")"#)
    }

    fn validator(&self) -> Option<&ArgumentValidator> {
        Some(&self.validator)
    }

    fn call(&self, args: &[SexpValue], ctx: &mut ExecContext<'_>) -> SexpValue {
        let (name, scope) = match (name_arg(args), scope_arg(args, 2)) {
            (Ok(name), Ok(scope)) => (name, scope),
            (Err(err), _) | (_, Err(err)) => return SexpValue::error(err),
        };
        let value = args[1].clone();
        ctx.variables
            .set(scope.unwrap_or(VariableScope::Local), name, value.clone());
        value
    }
}

/// True when the variable exists.
pub struct HasVariable {
    validator: ArgumentValidator,
}

impl Default for HasVariable {
    fn default() -> Self {
        Self {
            validator: ArgumentValidator::new()
                .require_types_at(0, &[ValueType::Text])
                .require_types_at(1, &[ValueType::Text]),
        }
    }
}

impl SexpFunction for HasVariable {
    fn descriptor(&self) -> FunctionDescriptor {
        FunctionDescriptor::new("has-variable", FunctionCategory::Variable, "True when the variable exists")
            .signature("(has-variable <name> [<scope>])")
            .arity(1, 2)
            .impure()
            .example("Check before reading", r#"(has-variable "bonus-armed")"#)
    }

    fn validator(&self) -> Option<&ArgumentValidator> {
        Some(&self.validator)
    }

    fn call(&self, args: &[SexpValue], ctx: &mut ExecContext<'_>) -> SexpValue {
        let (name, scope) = match (name_arg(args), scope_arg(args, 1)) {
            (Ok(name), Ok(scope)) => (name, scope),
            (Err(err), _) | (_, Err(err)) => return SexpValue::error(err),
        };
        let found = match scope {
            Some(scope) => ctx.variables.has_in(scope, &name),
            None => ctx.variables.has(&name),
        };
        SexpValue::boolean(found)
    }
}

/// Remove a variable; true when something was removed.
pub struct RemoveVariable {
    validator: ArgumentValidator,
}

impl Default for RemoveVariable {
    fn default() -> Self {
        Self {
            validator: ArgumentValidator::new()
                .require_types_at(0, &[ValueType::Text])
                .require_types_at(1, &[ValueType::Text]),
        }
    }
}

impl SexpFunction for RemoveVariable {
    fn descriptor(&self) -> FunctionDescriptor {
        FunctionDescriptor::new("remove-variable", FunctionCategory::Variable, "Remove a variable; true when it existed")
            .signature("(remove-variable <name> [<scope>])")
            .arity(1, 2)
            .impure()
            .example("Disarm a one-shot trigger", r#"(remove-variable "bonus-armed")"#)
    }

    fn validator(&self) -> Option<&ArgumentValidator> {
        Some(&self.validator)
    }

    fn call(&self, args: &[SexpValue], ctx: &mut ExecContext<'_>) -> SexpValue {
        let (name, scope) = match (name_arg(args), scope_arg(args, 1)) {
            (Ok(name), Ok(scope)) => (name, scope),
            (Err(err), _) | (_, Err(err)) => return SexpValue::error(err),
        };
        let removed = match scope {
            Some(scope) => ctx.variables.remove_in(scope, &name),
            None => ctx.variables.remove(&name),
        };
        SexpValue::boolean(removed.is_some())
    }
}

/// Clear one scope, or all of them; returns the number removed.
pub struct ClearVariables {
    validator: ArgumentValidator,
}

impl Default for ClearVariables {
    fn default() -> Self {
        Self {
            validator: ArgumentValidator::new().require_types_at(0, &[ValueType::Text]),
        }
    }
}

impl SexpFunction for ClearVariables {
    fn descriptor(&self) -> FunctionDescriptor {
        FunctionDescriptor::new("clear-variables", FunctionCategory::Variable, "Clear one scope, or every scope; returns the count removed")
            .signature("(clear-variables [<scope>])")
            .arity(0, 1)
            .impure()
            .example("Reset per-mission state", r#"(clear-variables "local")"#)
    }

    fn validator(&self) -> Option<&ArgumentValidator> {
        Some(&self.validator)
    }

    fn call(&self, args: &[SexpValue], ctx: &mut ExecContext<'_>) -> SexpValue {
        let scope = match scope_arg(args, 0) {
            Ok(scope) => scope,
            Err(err) => return SexpValue::error(err),
        };
        let removed = match scope {
            Some(scope) => ctx.variables.clear_scope(scope),
            None => ctx.variables.clear_all(),
        };
        SexpValue::number(removed as f64)
    }
}

/// Sorted variable names, comma-separated.
pub struct ListVariables {
    validator: ArgumentValidator,
}

impl Default for ListVariables {
    fn default() -> Self {
        Self {
            validator: ArgumentValidator::new().require_types_at(0, &[ValueType::Text]),
        }
    }
}

impl SexpFunction for ListVariables {
    fn descriptor(&self) -> FunctionDescriptor {
        FunctionDescriptor::new("list-variables", FunctionCategory::Variable, "Comma-separated sorted names in one scope, or all scopes")
            .signature("(list-variables [<scope>])")
            .arity(0, 1)
            .impure()
            .example("Inspect campaign state", r#"(list-variables "campaign")"#)
    }

    fn validator(&self) -> Option<&ArgumentValidator> {
        Some(&self.validator)
    }

    fn call(&self, args: &[SexpValue], ctx: &mut ExecContext<'_>) -> SexpValue {
        let scope = match scope_arg(args, 0) {
            Ok(scope) => scope,
            Err(err) => return SexpValue::error(err),
        };
        let names = match scope {
            Some(scope) => ctx.variables.names_in(scope),
            None => ctx.variables.names(),
        };
        SexpValue::text(names.join(", "))
    }
}
