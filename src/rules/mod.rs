//! Rule engine: context, trait, registry, and built-in rule kinds
//!
//! A rule receives a [`RuleContext`] and returns `None` (pass) or the
//! resolved user-facing message (fail). Rules never panic and never report
//! anything for values they do not apply to: a wrong-shaped parameter or a
//! value outside the rule's domain is a pass, so the dedicated format rules
//! (`number`, `date`, ...) stay the sole reporters of format errors.

pub mod builtin;
pub mod message;
pub mod registry;

use indexmap::IndexMap;
use serde_json::Value;

use crate::path::PathSegment;

pub use registry::{RuleRegistry, default_registry};

// ============================================================================
// RULE CONTEXT
// ============================================================================

/// Everything a rule may look at, assembled per check and immutable.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// The rule name being evaluated (used for message lookup).
    pub rule_name: &'a str,
    /// The field value; `Null` when the field is absent from the data.
    pub value: &'a Value,
    /// The rule parameter from the spec.
    pub param: &'a Value,
    /// Message overrides from the field spec.
    pub messages: &'a IndexMap<String, String>,
    /// The full form data tree (for cross-field rules).
    pub all_data: &'a Value,
    /// The current field's path segments.
    pub path: &'a [PathSegment],
}

impl RuleContext<'_> {
    /// Resolves the failure message: spec override if present, else the
    /// rule's default template, with `{0}`/`{1}` substituted from `args`.
    #[must_use]
    pub fn message(&self, default_template: &str, args: &[&str]) -> String {
        let template = self
            .messages
            .get(self.rule_name)
            .map_or(default_template, String::as_str);
        message::render(template, args)
    }
}

// ============================================================================
// RULE TRAIT
// ============================================================================

/// A single rule kind.
///
/// `None` means the rule passes (including "does not apply"); `Some` is the
/// resolved failure message for the field.
pub trait Rule: Send + Sync {
    /// Checks the rule against the context.
    fn validate(&self, ctx: &RuleContext<'_>) -> Option<String>;
}

impl<F> Rule for F
where
    F: Fn(&RuleContext<'_>) -> Option<String> + Send + Sync,
{
    fn validate(&self, ctx: &RuleContext<'_>) -> Option<String> {
        self(ctx)
    }
}

// ============================================================================
// CANONICAL ORDER
// ============================================================================

/// Fixed rule evaluation order: presence, then format, then bounds, then
/// cross-field/content. Rules a field configures run in this order, with
/// unknown or custom names last in lexicographic order, so "first failing
/// rule wins" is deterministic across independent implementations.
pub const CANONICAL_RULE_ORDER: &[&str] = &[
    "required",
    "number",
    "digits",
    "email",
    "url",
    "date",
    "dateISO",
    "match",
    "min",
    "max",
    "range",
    "minlength",
    "maxlength",
    "rangelength",
    "step",
    "mincount",
    "maxcount",
    "equalTo",
    "notEqual",
    "enddate",
    "unique",
    "accept",
];

/// Sort key for a rule name within the canonical order.
#[must_use]
pub fn rule_priority(name: &str) -> usize {
    CANONICAL_RULE_ORDER
        .iter()
        .position(|known| *known == name)
        .unwrap_or(CANONICAL_RULE_ORDER.len())
}

/// Orders a field's configured rule names canonically.
#[must_use]
pub fn sorted_rule_names<'a, I>(names: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut names: Vec<&str> = names.into_iter().collect();
    names.sort_by_key(|name| (rule_priority(name), *name));
    names
}
