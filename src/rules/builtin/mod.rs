//! Built-in rule kinds
//!
//! Grouped by concern: presence, format, numeric bounds, length bounds,
//! collection rules, and cross-field comparisons. Every rule follows the
//! same two laws: it never fires on a value outside its domain, and a
//! malformed parameter makes the rule inapplicable (a pass), never an error.

mod collection;
mod compare;
mod format;
mod length;
mod numeric;
mod required;

pub use collection::{Accept, MaxCount, MinCount, Unique};
pub use compare::{EndDate, EqualTo, NotEqual};
pub use format::{Date, DateIso, Digits, Email, Match, Number, Url};
pub use length::{MaxLength, MinLength, RangeLength};
pub use numeric::{Max, Min, Range, Step};
pub use required::Required;

use serde_json::Value;

use crate::core::coerce_number;
use crate::rules::registry::RuleRegistry;

/// Registers every built-in rule under its canonical name.
pub fn install(registry: &mut RuleRegistry) {
    registry.register("required", Required);
    registry.register("number", Number);
    registry.register("digits", Digits);
    registry.register("email", Email);
    registry.register("url", Url);
    registry.register("date", Date);
    registry.register("dateISO", DateIso);
    registry.register("match", Match);
    registry.register("min", Min);
    registry.register("max", Max);
    registry.register("range", Range);
    registry.register("minlength", MinLength);
    registry.register("maxlength", MaxLength);
    registry.register("rangelength", RangeLength);
    registry.register("step", Step);
    registry.register("mincount", MinCount);
    registry.register("maxcount", MaxCount);
    registry.register("equalTo", EqualTo);
    registry.register("notEqual", NotEqual);
    registry.register("enddate", EndDate);
    registry.register("unique", Unique);
    registry.register("accept", Accept);
}

/// Numeric parameter, or `None` when the parameter is not a number.
fn param_number(param: &Value) -> Option<f64> {
    coerce_number(param)
}

/// Two-element numeric parameter (`[min, max]`).
fn param_bounds(param: &Value) -> Option<(f64, f64)> {
    let items = param.as_array()?;
    if items.len() != 2 {
        return None;
    }
    Some((coerce_number(&items[0])?, coerce_number(&items[1])?))
}

/// Length as the length rules measure it: characters for strings, item
/// count for arrays. Other types have no length.
fn value_length(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

/// Item count for collection rules: arrays by position, objects (keyed
/// group items) by entry.
fn item_count(value: &Value) -> Option<usize> {
    match value {
        Value::Array(items) => Some(items.len()),
        Value::Object(map) => Some(map.len()),
        _ => None,
    }
}
