//! Help system for the SEXP engine.
//!
//! Provides a topic-based overview embedded at compile time, plus dynamic
//! per-function help generated from registered descriptors. Read-only
//! tooling surface (editor autocomplete, documentation) — never on the
//! execution hot path.

use crate::functions::{FunctionCategory, FunctionRegistry};

/// Help topics the engine can answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpTopic {
    /// What the engine is, list of topics.
    Overview,
    /// List of all registered functions.
    Functions,
    /// Help for a specific function.
    Function(String),
}

impl HelpTopic {
    /// Parse a topic string.
    ///
    /// Returns `Overview` for empty input, known topic names for their
    /// topics, and `Function(name)` for anything else.
    pub fn parse_topic(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "" | "overview" | "help" => Self::Overview,
            "functions" | "operators" | "builtins" => Self::Functions,
            other => Self::Function(other.to_string()),
        }
    }
}

// Embedded at compile time from the crate-local docs/help/ directory.
const OVERVIEW: &str = include_str!("../docs/help/overview.md");

/// Get help content for a topic.
pub fn get_help(topic: &HelpTopic, registry: &FunctionRegistry) -> String {
    match topic {
        HelpTopic::Overview => OVERVIEW.to_string(),
        HelpTopic::Functions => format_function_list(registry),
        HelpTopic::Function(name) => format_function_help(name, registry),
    }
}

/// Format help for a single function from its descriptor.
pub fn format_function_help(name: &str, registry: &FunctionRegistry) -> String {
    let Some(entry) = registry.get(name) else {
        return format!(
            "Unknown topic or function: {name}\n\nUse 'help functions' for the function list."
        );
    };
    let descriptor = entry.descriptor();

    let mut output = String::new();
    output.push_str(&format!("{} — {}\n", descriptor.name, descriptor.description));
    if !descriptor.signature.is_empty() {
        output.push_str(&format!("  {}\n", descriptor.signature));
    }
    output.push('\n');

    output.push_str(&format!("Category: {}\n", descriptor.category));
    output.push_str(&format!("Arguments: {}\n", format_arity(descriptor.min_args, descriptor.max_args)));
    if !descriptor.accepted_types.is_empty() {
        let types = descriptor
            .accepted_types
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        output.push_str(&format!("Accepts: {types}\n"));
    }
    if !entry.aliases().is_empty() {
        output.push_str(&format!("Aliases: {}\n", entry.aliases().join(", ")));
    }

    if !descriptor.examples.is_empty() {
        output.push_str("\nExamples:\n");
        for example in &descriptor.examples {
            output.push_str(&format!("  # {}\n", example.description));
            output.push_str(&format!("  {}\n\n", example.code));
        }
    }

    output
}

/// Format a list of all functions grouped by category.
pub fn format_function_list(registry: &FunctionRegistry) -> String {
    let mut output = String::new();
    output.push_str("# Registered Functions\n\n");

    let max_len = registry
        .entries()
        .map(|entry| entry.descriptor().name.len())
        .max()
        .unwrap_or(0);

    for category in registry.categories() {
        let mut functions: Vec<(&str, &str)> = registry
            .entries()
            .filter(|entry| entry.descriptor().category == category)
            .map(|entry| {
                (
                    entry.descriptor().name.as_str(),
                    entry.descriptor().description.as_str(),
                )
            })
            .collect();
        if functions.is_empty() {
            continue;
        }
        functions.sort_by_key(|(name, _)| *name);

        output.push_str(&format!("## {category}\n\n"));
        for (name, description) in functions {
            output.push_str(&format!("  {:width$}  {}\n", name, description, width = max_len));
        }
        output.push('\n');
    }

    output.push_str("---\n");
    output.push_str("Use 'help <function>' for detailed help on a specific function.\n");
    output
}

fn format_arity(min: usize, max: Option<usize>) -> String {
    match max {
        Some(max) if min == max => format!("exactly {min}"),
        Some(max) => format!("{min} to {max}"),
        None if min == 0 => "any number".to_string(),
        None => format!("{min} or more"),
    }
}

/// List available static help topics (for autocomplete).
pub fn list_topics() -> Vec<(&'static str, &'static str)> {
    vec![
        ("overview", "What the engine is, list of topics"),
        ("functions", "List of registered functions by category"),
    ]
}

/// Per-function help text, the introspection surface hosts expose.
pub fn get_help_text(registry: &FunctionRegistry, name: &str) -> Option<String> {
    registry.get(name).map(|_| format_function_help(name, registry))
}
