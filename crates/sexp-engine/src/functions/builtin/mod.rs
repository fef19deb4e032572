//! Built-in operator library.
//!
//! The standard functions every mission script can rely on. Hosts add
//! their own bridge functions next to these at startup.

mod arithmetic;
mod compare;
mod conditional;
mod logic;
mod strings;
mod variables;

use super::FunctionRegistry;

/// Register the full standard library with the registry.
pub fn register_builtins(registry: &mut FunctionRegistry) {
    registry.register(logic::And, &[]);
    registry.register(logic::Or, &[]);
    registry.register(logic::Xor, &[]);
    registry.register(logic::Not, &[]);

    registry.register(compare::Equals, &["equals", "=="]);
    registry.register(compare::NotEquals, &["not-equals", "<>"]);
    registry.register(compare::LessThan, &["less-than"]);
    registry.register(compare::GreaterThan, &["greater-than"]);
    registry.register(compare::LessOrEqual, &["less-than-or-equal"]);
    registry.register(compare::GreaterOrEqual, &["greater-than-or-equal"]);

    registry.register(arithmetic::Add, &["add"]);
    registry.register(arithmetic::Subtract, &["subtract"]);
    registry.register(arithmetic::Multiply, &["multiply"]);
    registry.register(arithmetic::Divide, &["divide"]);
    registry.register(arithmetic::Modulo, &["modulo", "%"]);

    registry.register(conditional::If, &[]);
    registry.register(conditional::When, &[]);
    registry.register(conditional::Cond, &[]);

    registry.register(strings::StringEquals, &["string="]);
    registry.register(strings::StringContains, &[]);

    registry.register(variables::GetVariable::default(), &["get-var"]);
    registry.register(variables::SetVariable::default(), &["set-var"]);
    registry.register(variables::HasVariable::default(), &["has-var"]);
    registry.register(variables::RemoveVariable::default(), &["remove-var"]);
    registry.register(variables::ClearVariables::default(), &[]);
    registry.register(variables::ListVariables::default(), &[]);
}
