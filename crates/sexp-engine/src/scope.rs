//! Variable scope management.
//!
//! Script variables live in three named scopes — local, campaign, global —
//! searched in that order when an operation names no explicit scope.
//! Local holds per-mission state, campaign persists across missions of a
//! campaign, global across everything the host keeps alive.
//!
//! The store is the only mutable shared resource in the engine. It takes
//! `&mut` and adds no internal locking; hosts serialize concurrent access.

use std::collections::HashMap;

use sexp_types::{SexpError, SexpValue};

/// One of the three variable namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableScope {
    Local,
    Campaign,
    Global,
}

impl VariableScope {
    /// All scopes in search order (innermost first).
    pub const SEARCH_ORDER: [VariableScope; 3] = [Self::Local, Self::Campaign, Self::Global];

    /// Parse a scope name case-insensitively.
    ///
    /// Anything other than `local`, `campaign`, or `global` is a
    /// `ValidationError`.
    pub fn parse(name: &str) -> Result<Self, SexpError> {
        match name.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "campaign" => Ok(Self::Campaign),
            "global" => Ok(Self::Global),
            other => Err(SexpError::validation(format!("unknown scope '{other}'"))
                .with_suggestion("use one of: local, campaign, global")),
        }
    }

    /// The canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Campaign => "campaign",
            Self::Global => "global",
        }
    }
}

impl std::fmt::Display for VariableScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Script variable store with local, campaign, and global scopes.
#[derive(Debug, Clone, Default)]
pub struct VariableStore {
    local: HashMap<String, SexpValue>,
    campaign: HashMap<String, SexpValue>,
    global: HashMap<String, SexpValue>,
}

impl VariableStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn map(&self, scope: VariableScope) -> &HashMap<String, SexpValue> {
        match scope {
            VariableScope::Local => &self.local,
            VariableScope::Campaign => &self.campaign,
            VariableScope::Global => &self.global,
        }
    }

    fn map_mut(&mut self, scope: VariableScope) -> &mut HashMap<String, SexpValue> {
        match scope {
            VariableScope::Local => &mut self.local,
            VariableScope::Campaign => &mut self.campaign,
            VariableScope::Global => &mut self.global,
        }
    }

    /// Set a variable in an explicit scope.
    pub fn set(&mut self, scope: VariableScope, name: impl Into<String>, value: SexpValue) {
        self.map_mut(scope).insert(name.into(), value);
    }

    /// Get a variable from an explicit scope.
    pub fn get_in(&self, scope: VariableScope, name: &str) -> Option<&SexpValue> {
        self.map(scope).get(name)
    }

    /// Get a variable, searching local → campaign → global.
    pub fn get(&self, name: &str) -> Option<&SexpValue> {
        VariableScope::SEARCH_ORDER
            .iter()
            .find_map(|scope| self.map(*scope).get(name))
    }

    /// Check for a variable in an explicit scope.
    pub fn has_in(&self, scope: VariableScope, name: &str) -> bool {
        self.map(scope).contains_key(name)
    }

    /// Check for a variable in any scope.
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Remove a variable from an explicit scope.
    ///
    /// Returns the removed value if it existed.
    pub fn remove_in(&mut self, scope: VariableScope, name: &str) -> Option<SexpValue> {
        self.map_mut(scope).remove(name)
    }

    /// Remove a variable, searching local → campaign → global.
    ///
    /// Only the first occurrence found is removed.
    pub fn remove(&mut self, name: &str) -> Option<SexpValue> {
        for scope in VariableScope::SEARCH_ORDER {
            if let Some(value) = self.map_mut(scope).remove(name) {
                return Some(value);
            }
        }
        None
    }

    /// Clear one scope. Returns the number of variables removed.
    pub fn clear_scope(&mut self, scope: VariableScope) -> usize {
        let map = self.map_mut(scope);
        let count = map.len();
        map.clear();
        count
    }

    /// Clear every scope. Returns the number of variables removed.
    pub fn clear_all(&mut self) -> usize {
        VariableScope::SEARCH_ORDER
            .iter()
            .map(|scope| self.clear_scope(*scope))
            .sum()
    }

    /// Sorted variable names in one scope.
    pub fn names_in(&self, scope: VariableScope) -> Vec<&str> {
        let mut names: Vec<&str> = self.map(scope).keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Sorted, deduplicated variable names across all scopes.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = VariableScope::SEARCH_ORDER
            .iter()
            .flat_map(|scope| self.map(*scope).keys().map(String::as_str))
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Total variable count across all scopes.
    pub fn len(&self) -> usize {
        self.local.len() + self.campaign.len() + self.global.len()
    }

    /// True when no scope holds any variable.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_scope_is_case_insensitive() {
        assert_eq!(VariableScope::parse("LOCAL").unwrap(), VariableScope::Local);
        assert_eq!(
            VariableScope::parse("Campaign").unwrap(),
            VariableScope::Campaign
        );
        assert_eq!(
            VariableScope::parse("global").unwrap(),
            VariableScope::Global
        );
    }

    #[test]
    fn parse_unknown_scope_is_validation_error() {
        let err = VariableScope::parse("galaxy").unwrap_err();
        assert_eq!(err.kind, sexp_types::ErrorKind::ValidationError);
        assert!(err.suggestion.is_some());
    }

    #[test]
    fn set_and_get_in_explicit_scope() {
        let mut store = VariableStore::new();
        store.set(VariableScope::Campaign, "kills", SexpValue::number(3.0));
        assert_eq!(
            store.get_in(VariableScope::Campaign, "kills"),
            Some(&SexpValue::number(3.0))
        );
        assert_eq!(store.get_in(VariableScope::Local, "kills"), None);
    }

    #[test]
    fn search_order_prefers_local() {
        let mut store = VariableStore::new();
        store.set(VariableScope::Global, "score", SexpValue::number(1.0));
        store.set(VariableScope::Local, "score", SexpValue::number(2.0));
        assert_eq!(store.get("score"), Some(&SexpValue::number(2.0)));
    }

    #[test]
    fn search_falls_through_to_outer_scopes() {
        let mut store = VariableStore::new();
        store.set(VariableScope::Global, "difficulty", SexpValue::text("hard"));
        assert_eq!(store.get("difficulty"), Some(&SexpValue::text("hard")));
        assert!(store.has("difficulty"));
        assert!(!store.has_in(VariableScope::Local, "difficulty"));
    }

    #[test]
    fn remove_takes_innermost_occurrence_only() {
        let mut store = VariableStore::new();
        store.set(VariableScope::Local, "flag", SexpValue::boolean(true));
        store.set(VariableScope::Global, "flag", SexpValue::boolean(false));

        assert_eq!(store.remove("flag"), Some(SexpValue::boolean(true)));
        assert_eq!(store.get("flag"), Some(&SexpValue::boolean(false)));
    }

    #[test]
    fn clear_scope_counts_removed() {
        let mut store = VariableStore::new();
        store.set(VariableScope::Local, "a", SexpValue::number(1.0));
        store.set(VariableScope::Local, "b", SexpValue::number(2.0));
        store.set(VariableScope::Global, "c", SexpValue::number(3.0));

        assert_eq!(store.clear_scope(VariableScope::Local), 2);
        assert_eq!(store.len(), 1);
        assert_eq!(store.clear_all(), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn names_are_sorted_and_deduplicated() {
        let mut store = VariableStore::new();
        store.set(VariableScope::Local, "zeta", SexpValue::void());
        store.set(VariableScope::Campaign, "alpha", SexpValue::void());
        store.set(VariableScope::Global, "alpha", SexpValue::void());

        assert_eq!(store.names(), vec!["alpha", "zeta"]);
        assert_eq!(store.names_in(VariableScope::Campaign), vec!["alpha"]);
    }
}
