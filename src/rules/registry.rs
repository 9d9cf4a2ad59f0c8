//! Rule registry
//!
//! Maps rule names to implementations. Every [`Validator`](crate::Validator)
//! owns a registry; the process-wide default registry (built-ins plus any
//! custom registrations) seeds validators that do not bring their own.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;

use crate::rules::{Rule, builtin};

/// A named collection of rules.
#[derive(Clone, Default)]
pub struct RuleRegistry {
    rules: HashMap<String, Arc<dyn Rule>>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry pre-loaded with every built-in rule kind.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        builtin::install(&mut registry);
        registry
    }

    /// Registers a rule under a name, replacing any previous registration
    /// (built-ins included).
    pub fn register(&mut self, name: impl Into<String>, rule: impl Rule + 'static) {
        self.rules.insert(name.into(), Arc::new(rule));
    }

    /// Registers an already-shared rule.
    pub fn register_arc(&mut self, name: impl Into<String>, rule: Arc<dyn Rule>) {
        self.rules.insert(name.into(), rule);
    }

    /// Removes a rule by name. Returns `true` if it was registered.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.rules.remove(name).is_some()
    }

    /// Whether a rule name is registered.
    #[must_use]
    pub fn has_rule(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Looks up a rule by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn Rule>> {
        self.rules.get(name).cloned()
    }

    /// All registered rule names, sorted.
    #[must_use]
    pub fn rule_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.rules.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.rule_names())
            .finish()
    }
}

static DEFAULT_REGISTRY: LazyLock<RwLock<RuleRegistry>> =
    LazyLock::new(|| RwLock::new(RuleRegistry::with_builtins()));

/// The process-wide default registry.
///
/// Custom rules registered here are picked up by every validator
/// constructed afterwards; existing validators keep the snapshot they were
/// built with.
pub fn default_registry() -> &'static RwLock<RuleRegistry> {
    &DEFAULT_REGISTRY
}
