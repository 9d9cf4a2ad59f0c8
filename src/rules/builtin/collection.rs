//! Collection rules: unique, mincount, maxcount, accept
//!
//! These operate on the items of a "multiple" group (array or keyed map)
//! and on file-like values.

use serde_json::Value;

use crate::core::is_empty_value;
use crate::rules::builtin::{item_count, param_number};
use crate::rules::message::display_param;
use crate::rules::{Rule, RuleContext};

const UNIQUE_MESSAGE: &str = "Values must be unique.";
const MIN_COUNT_MESSAGE: &str = "Please provide at least {0} items.";
const MAX_COUNT_MESSAGE: &str = "Please provide no more than {0} items.";
const ACCEPT_MESSAGE: &str = "Please enter a value with a valid extension.";

/// `unique`: items of the collection must not repeat.
///
/// With a string parameter, items are compared by that member field (for
/// groups of objects); with any other parameter, by whole value. Empty
/// members are ignored, so half-filled rows do not collide on blank.
pub struct Unique;

impl Rule for Unique {
    fn validate(&self, ctx: &RuleContext<'_>) -> Option<String> {
        let items: Vec<&Value> = match ctx.value {
            Value::Array(items) => items.iter().collect(),
            Value::Object(map) => map.values().collect(),
            _ => return None,
        };

        let mut seen: Vec<&Value> = Vec::with_capacity(items.len());
        for item in items {
            let compared = match ctx.param {
                Value::String(field) => match item.get(field) {
                    Some(member) => member,
                    None => continue,
                },
                _ => item,
            };
            if is_empty_value(compared) {
                continue;
            }
            if seen.contains(&compared) {
                return Some(ctx.message(UNIQUE_MESSAGE, &[]));
            }
            seen.push(compared);
        }
        None
    }
}

/// `mincount`: the collection must have at least the given number of items.
pub struct MinCount;

impl Rule for MinCount {
    fn validate(&self, ctx: &RuleContext<'_>) -> Option<String> {
        let bound = param_number(ctx.param)?;
        let count = item_count(ctx.value)? as f64;
        if count >= bound {
            return None;
        }
        Some(ctx.message(MIN_COUNT_MESSAGE, &[&display_param(ctx.param)]))
    }
}

/// `maxcount`: the collection must have at most the given number of items.
pub struct MaxCount;

impl Rule for MaxCount {
    fn validate(&self, ctx: &RuleContext<'_>) -> Option<String> {
        let bound = param_number(ctx.param)?;
        let count = item_count(ctx.value)? as f64;
        if count <= bound {
            return None;
        }
        Some(ctx.message(MAX_COUNT_MESSAGE, &[&display_param(ctx.param)]))
    }
}

/// `accept`: file-like values must match an extension / MIME whitelist.
///
/// The parameter is a comma-separated string or array of entries:
/// `.pdf` (extension), `image/*` or `image/png` (MIME, `*` wildcards the
/// subtype), or a bare extension like `png`. The value is a filename
/// string, an object with `name` / `type` members, or an array of either.
pub struct Accept;

impl Rule for Accept {
    fn validate(&self, ctx: &RuleContext<'_>) -> Option<String> {
        let specs = accept_specs(ctx.param);
        if specs.is_empty() {
            return None;
        }

        let entries: Vec<&Value> = match ctx.value {
            Value::Array(items) => items.iter().collect(),
            single @ (Value::String(_) | Value::Object(_)) => vec![single],
            _ => return None,
        };

        for entry in entries {
            let (name, mime) = file_identity(entry);
            if name.is_none() && mime.is_none() {
                continue;
            }
            let accepted = specs
                .iter()
                .any(|spec| spec_matches(spec, name.as_deref(), mime.as_deref()));
            if !accepted {
                return Some(ctx.message(ACCEPT_MESSAGE, &[]));
            }
        }
        None
    }
}

fn accept_specs(param: &Value) -> Vec<String> {
    match param {
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_ascii_lowercase)
            .collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_ascii_lowercase)
            .collect(),
        _ => Vec::new(),
    }
}

fn file_identity(entry: &Value) -> (Option<String>, Option<String>) {
    match entry {
        Value::String(name) => (Some(name.to_ascii_lowercase()), None),
        Value::Object(map) => (
            map.get("name")
                .and_then(Value::as_str)
                .map(str::to_ascii_lowercase),
            map.get("type")
                .and_then(Value::as_str)
                .map(str::to_ascii_lowercase),
        ),
        _ => (None, None),
    }
}

fn spec_matches(spec: &str, name: Option<&str>, mime: Option<&str>) -> bool {
    if let Some(ext) = spec.strip_prefix('.') {
        return name.is_some_and(|n| {
            n.rsplit('.').next().is_some_and(|actual| actual == ext) && n.contains('.')
        });
    }
    if spec.contains('/') {
        let Some(mime) = mime else { return false };
        if let Some(prefix) = spec.strip_suffix("/*") {
            return mime.split('/').next() == Some(prefix);
        }
        return mime == spec;
    }
    // Bare token is an extension without the dot.
    name.is_some_and(|n| n.contains('.') && n.rsplit('.').next() == Some(spec))
}
