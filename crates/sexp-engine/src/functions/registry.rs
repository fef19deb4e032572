//! Function registry: name and alias lookup, category listing, search.
//!
//! The registry owns every registered function for its lifetime.
//! Registration is a startup-time write phase; after that the registry is
//! read-mostly, so `get` runs through a bounded least-recently-used lookup
//! cache guarded by a read-write lock, with recency tracked in atomics so
//! cache hits only take the read lock.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, RwLock};
use std::time::{Duration, Instant};

use sexp_types::{EvalMeta, SexpError, SexpValue};

use super::context::ExecContext;
use super::traits::{FunctionCategory, FunctionDescriptor, PerformanceCounters, SexpFunction};

/// Default lookup cache capacity. Mission scripts lean on a small working
/// set of operators, so a modest cache covers the hot path.
const DEFAULT_CACHE_CAPACITY: usize = 64;

/// A registered function: descriptor snapshot, implementation, aliases,
/// and execution bookkeeping.
pub struct FunctionEntry {
    descriptor: FunctionDescriptor,
    function: Box<dyn SexpFunction>,
    aliases: Vec<String>,
    counters: Mutex<PerformanceCounters>,
}

impl FunctionEntry {
    fn new(descriptor: FunctionDescriptor, function: Box<dyn SexpFunction>, aliases: Vec<String>) -> Self {
        Self {
            descriptor,
            function,
            aliases,
            counters: Mutex::new(PerformanceCounters::default()),
        }
    }

    /// The function's metadata, snapshotted at registration.
    pub fn descriptor(&self) -> &FunctionDescriptor {
        &self.descriptor
    }

    /// Aliases the function is also registered under.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Snapshot of the function's performance counters.
    pub fn counters(&self) -> PerformanceCounters {
        self.lock_counters().clone()
    }

    fn lock_counters(&self) -> std::sync::MutexGuard<'_, PerformanceCounters> {
        self.counters
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Check arity and accepted types from the descriptor, then run the
    /// function's own validator.
    pub fn validate(&self, args: &[SexpValue]) -> Result<(), SexpError> {
        let name = &self.descriptor.name;
        let got = args.len();
        if got < self.descriptor.min_args {
            let min = self.descriptor.min_args;
            let missing = min - got;
            return Err(SexpError::argument_count(format!(
                "'{name}' expects at least {min} argument{}, got {got}",
                plural(min)
            ))
            .with_suggestion(format!("add {missing} more argument{}", plural(missing))));
        }
        if let Some(max) = self.descriptor.max_args {
            if got > max {
                let excess = got - max;
                return Err(SexpError::argument_count(format!(
                    "'{name}' expects at most {max} argument{}, got {got}",
                    plural(max)
                ))
                .with_suggestion(format!("remove {excess} argument{}", plural(excess))));
            }
        }
        if !self.descriptor.accepted_types.is_empty() {
            for (index, arg) in args.iter().enumerate() {
                // Error arguments pass through; operators propagate them.
                if arg.is_error() {
                    continue;
                }
                if !self.descriptor.accepted_types.contains(&arg.value_type()) {
                    let allowed = self
                        .descriptor
                        .accepted_types
                        .iter()
                        .map(|t| t.as_str())
                        .collect::<Vec<_>>()
                        .join(", ");
                    return Err(SexpError::type_mismatch(format!(
                        "'{name}' argument {} is {}, expected {}",
                        index + 1,
                        arg.value_type(),
                        allowed
                    ))
                    .with_suggestion(format!("convert to one of: {allowed}")));
                }
            }
        }
        if let Some(validator) = self.function.validator() {
            validator.validate(args, name)?;
        }
        Ok(())
    }

    /// Run the validate-then-execute lifecycle.
    ///
    /// Validation failures are recorded and returned unwrapped. On success
    /// the implementation runs inside a panic guard — an internal fault
    /// becomes a `RuntimeError` result — and the outcome is tagged with
    /// the function name and elapsed time.
    pub fn execute(&self, args: &[SexpValue], ctx: &mut ExecContext<'_>) -> SexpValue {
        if let Err(err) = self.validate(args) {
            self.lock_counters()
                .record(Duration::ZERO, Some(&err.to_string()));
            return SexpValue::error(err);
        }

        let start = Instant::now();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.function.call(args, ctx)));
        let elapsed = start.elapsed();

        let result = match outcome {
            Ok(value) => value,
            Err(payload) => {
                let reason = panic_message(payload.as_ref());
                tracing::error!(function = %self.descriptor.name, %reason, "function panicked");
                SexpValue::error(
                    SexpError::runtime(format!(
                        "'{}' failed internally: {reason}",
                        self.descriptor.name
                    ))
                    .with_suggestion("report this expression to the mission tooling maintainers"),
                )
            }
        };

        let error_message = result.as_error().map(|err| err.to_string());
        self.lock_counters()
            .record(elapsed, error_message.as_deref());

        result.with_meta(EvalMeta {
            function: self.descriptor.name.clone(),
            elapsed,
        })
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

struct CacheSlot {
    index: usize,
    last_used: AtomicU64,
}

/// Lookup cache statistics, for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

/// Name-indexed function registry with an LRU lookup cache.
pub struct FunctionRegistry {
    entries: Vec<FunctionEntry>,
    names: HashMap<String, usize>,
    categories: Vec<FunctionCategory>,
    cache: RwLock<HashMap<String, CacheSlot>>,
    cache_capacity: usize,
    tick: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionRegistry {
    /// Create an empty registry with the default cache capacity.
    pub fn new() -> Self {
        Self::with_cache_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// Create an empty registry with a specific lookup cache capacity.
    pub fn with_cache_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            names: HashMap::new(),
            categories: Vec::new(),
            cache: RwLock::new(HashMap::new()),
            cache_capacity: capacity.max(1),
            tick: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// Register a function under its primary name and the given aliases.
    ///
    /// Fails loudly — returns false and logs — if the primary name or any
    /// alias is already taken, leaving the existing registration intact.
    pub fn register(&mut self, function: impl SexpFunction + 'static, aliases: &[&str]) -> bool {
        let descriptor = function.descriptor();
        let mut names = Vec::with_capacity(aliases.len() + 1);
        names.push(descriptor.name.clone());
        names.extend(aliases.iter().map(|alias| (*alias).to_string()));

        for name in &names {
            if self.names.contains_key(name) {
                tracing::warn!(
                    function = %descriptor.name,
                    taken = %name,
                    "registration rejected: name already registered"
                );
                return false;
            }
        }

        tracing::debug!(function = %descriptor.name, aliases = ?aliases, "registered function");
        if !self.categories.contains(&descriptor.category) {
            self.categories.push(descriptor.category);
        }
        let index = self.entries.len();
        let alias_list = names[1..].to_vec();
        self.entries
            .push(FunctionEntry::new(descriptor, Box::new(function), alias_list));
        for name in names {
            self.names.insert(name, index);
        }
        true
    }

    /// Look up a function by name or alias.
    ///
    /// Cache hits bump recency under the read lock; misses fall back to
    /// the authoritative name map and repopulate the cache.
    pub fn get(&self, name: &str) -> Option<&FunctionEntry> {
        if let Some(slot) = self.read_cache().get(name) {
            slot.last_used.store(self.next_tick(), Ordering::Relaxed);
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Some(&self.entries[slot.index]);
        }

        let index = *self.names.get(name)?;
        self.misses.fetch_add(1, Ordering::Relaxed);
        self.cache_insert(name, index);
        Some(&self.entries[index])
    }

    /// Resolve and execute in one step.
    ///
    /// Unknown names produce a `ValidationError` result with a suggestion
    /// drawn from fuzzy search when one is close enough.
    pub fn execute(&self, name: &str, args: &[SexpValue], ctx: &mut ExecContext<'_>) -> SexpValue {
        match self.get(name) {
            Some(entry) => entry.execute(args, ctx),
            None => {
                let mut err = SexpError::validation(format!("unknown function '{name}'"));
                if let Some(descriptor) = self.search(name).first() {
                    err = err.with_suggestion(format!("did you mean '{}'?", descriptor.name));
                }
                SexpValue::error(err)
            }
        }
    }

    /// Case-insensitive substring search over names, aliases, and
    /// descriptions. Tooling surface, not the hot execution path.
    pub fn search(&self, query: &str) -> Vec<&FunctionDescriptor> {
        let query = query.to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        let mut matches: Vec<&FunctionDescriptor> = self
            .entries
            .iter()
            .filter(|entry| {
                let descriptor = &entry.descriptor;
                descriptor.name.to_lowercase().contains(&query)
                    || entry
                        .aliases
                        .iter()
                        .any(|alias| alias.to_lowercase().contains(&query))
                    || descriptor.description.to_lowercase().contains(&query)
            })
            .map(|entry| &entry.descriptor)
            .collect();
        matches.sort_by(|a, b| a.name.cmp(&b.name));
        matches
    }

    /// Distinct registered categories, in first-registration order.
    pub fn categories(&self) -> Vec<FunctionCategory> {
        self.categories.clone()
    }

    /// Iterate all registered entries in registration order.
    pub fn entries(&self) -> impl Iterator<Item = &FunctionEntry> {
        self.entries.iter()
    }

    /// Per-function counter snapshots, sorted by function name.
    pub fn performance_report(&self) -> Vec<(String, PerformanceCounters)> {
        let mut report: Vec<(String, PerformanceCounters)> = self
            .entries
            .iter()
            .map(|entry| (entry.descriptor.name.clone(), entry.counters()))
            .collect();
        report.sort_by(|(a, _), (b, _)| a.cmp(b));
        report
    }

    /// Lookup cache statistics.
    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }

    /// Number of registered functions (aliases not counted).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn next_tick(&self) -> u64 {
        self.tick.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn read_cache(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, CacheSlot>> {
        self.cache
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn cache_insert(&self, name: &str, index: usize) {
        let mut cache = self
            .cache
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if cache.len() >= self.cache_capacity && !cache.contains_key(name) {
            // Evict the least recently used slot.
            if let Some(oldest) = cache
                .iter()
                .min_by_key(|(_, slot)| slot.last_used.load(Ordering::Relaxed))
                .map(|(key, _)| key.clone())
            {
                cache.remove(&oldest);
                self.evictions.fetch_add(1, Ordering::Relaxed);
            }
        }
        cache.insert(
            name.to_string(),
            CacheSlot {
                index,
                last_used: AtomicU64::new(self.next_tick()),
            },
        );
    }
}
