//! Value helpers shared by the rule engine and the condition engine
//!
//! These define the three judgments the whole core hangs on: truthiness
//! (for `display_target`), emptiness (for `required` and the empty-skip
//! contract), and numeric coercion (for every numeric rule and ordering
//! comparison).

use std::sync::LazyLock;

use serde_json::Value;

/// Full-match numeric grammar. A string coerces to a number only when the
/// entire string matches; `"12abc"` is "not a number", never an error.
static NUMERIC_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^[-+]?(\d+\.?\d*|\d*\.?\d+)$").expect("numeric grammar regex")
});

/// Standard truthiness: `null`, `false`, `0`, and `""` are falsy;
/// everything else, including non-empty containers, is truthy.
///
/// Note that the *string* `"false"` is truthy — `display_target` does no
/// boolean-string parsing.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Emptiness as `required` sees it: `null`, blank strings (including
/// whitespace-only), empty arrays, and empty objects are empty; `0` and
/// `false` are values a user deliberately entered and are not.
#[must_use]
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Coerces a value to a number for numeric rules and ordering comparisons.
///
/// Strings must fully match the numeric grammar (plus literal `Infinity` /
/// `-Infinity`); anything else returns `None`, which rules treat as
/// *inapplicable* — the dedicated `number` rule is the sole reporter of
/// format errors.
#[must_use]
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => match s.as_str() {
            "Infinity" => Some(f64::INFINITY),
            "-Infinity" => Some(f64::NEG_INFINITY),
            s if NUMERIC_RE.is_match(s) => s.parse::<f64>().ok(),
            _ => None,
        },
        _ => None,
    }
}

/// Human-readable type name for diagnostics.
#[must_use]
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
