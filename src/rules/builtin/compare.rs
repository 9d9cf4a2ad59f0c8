//! Cross-field rules: equalTo, notEqual, enddate
//!
//! The parameter names another field, relative (leading dots) or absolute.
//! Each leading dot pops one segment from the current field's path, so
//! `.password` from `account.confirm` lands on `account.password`.

use serde_json::Value;

use crate::core::coerce_number;
use crate::path::{get_value, resolve_relative};
use crate::rules::builtin::format::parse_date;
use crate::rules::{Rule, RuleContext};

const EQUAL_TO_MESSAGE: &str = "Please enter the same value again.";
const NOT_EQUAL_MESSAGE: &str = "Please enter a different value.";
const END_DATE_MESSAGE: &str = "Please enter an end date on or after the start date.";

/// `equalTo`: the value must equal the referenced field's value.
pub struct EqualTo;

impl Rule for EqualTo {
    fn validate(&self, ctx: &RuleContext<'_>) -> Option<String> {
        let Value::String(target) = ctx.param else {
            return None;
        };
        let resolved = resolve_relative(ctx.path, target);
        let other = get_value(ctx.all_data, &resolved).unwrap_or(&Value::Null);
        if loose_equal(ctx.value, other) {
            return None;
        }
        Some(ctx.message(EQUAL_TO_MESSAGE, &[]))
    }
}

/// `notEqual`: the value must differ from the referenced field's value.
///
/// A parameter without a leading dot that resolves to no field is compared
/// as a literal, so `{"notEqual": "admin"}` forbids the word itself.
pub struct NotEqual;

impl Rule for NotEqual {
    fn validate(&self, ctx: &RuleContext<'_>) -> Option<String> {
        let Value::String(target) = ctx.param else {
            return None;
        };
        let resolved = resolve_relative(ctx.path, target);
        let literal;
        let other = match get_value(ctx.all_data, &resolved) {
            Some(value) => value,
            None if !target.starts_with('.') => {
                literal = Value::String(target.clone());
                &literal
            }
            None => &Value::Null,
        };
        if loose_equal(ctx.value, other) {
            return Some(ctx.message(NOT_EQUAL_MESSAGE, &[]));
        }
        None
    }
}

/// `enddate`: the value must be a date on or after the referenced field's
/// date. Inapplicable unless both sides parse as dates; the `date` rule
/// owns format reporting.
pub struct EndDate;

impl Rule for EndDate {
    fn validate(&self, ctx: &RuleContext<'_>) -> Option<String> {
        let Value::String(target) = ctx.param else {
            return None;
        };
        let end = ctx.value.as_str().and_then(parse_date)?;
        let resolved = resolve_relative(ctx.path, target);
        let start = get_value(ctx.all_data, &resolved)
            .and_then(Value::as_str)
            .and_then(parse_date)?;
        if end >= start {
            return None;
        }
        Some(ctx.message(END_DATE_MESSAGE, &[]))
    }
}

/// Equality with numeric coercion, so `"18"` equals `18` the way the
/// condition engine compares them.
fn loose_equal(left: &Value, right: &Value) -> bool {
    if let (Some(l), Some(r)) = (coerce_number(left), coerce_number(right)) {
        return l == r;
    }
    left == right
}
