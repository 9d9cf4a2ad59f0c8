//! Presence rule
//!
//! The only rule that fires on an empty value; every other rule skips
//! empties, so a field without `required` is free to stay blank.

use serde_json::Value;

use crate::core::is_empty_value;
use crate::rules::{Rule, RuleContext};

const DEFAULT_MESSAGE: &str = "This field is required.";

/// `required`: the value must be present and non-empty.
///
/// A parameter of `false` disables the rule, so specs can toggle
/// requiredness without rewriting the rule map.
pub struct Required;

impl Rule for Required {
    fn validate(&self, ctx: &RuleContext<'_>) -> Option<String> {
        if ctx.param == &Value::Bool(false) {
            return None;
        }
        if is_empty_value(ctx.value) {
            return Some(ctx.message(DEFAULT_MESSAGE, &[]));
        }
        None
    }
}
