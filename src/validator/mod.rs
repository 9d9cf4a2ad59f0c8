//! Validator orchestrator
//!
//! Walks a field spec tree against a form data tree, decides visibility
//! per field, and runs each visible field's rules in canonical order.
//! Validation is a pure read of the data: at most one error per field,
//! first failing rule wins, and repeated runs over the same input produce
//! the same report.

use serde_json::Value;

use crate::condition::{ConditionScope, evaluate_condition, parse_condition};
use crate::core::{ValidationError, ValidationReport, is_empty_value, is_truthy};
use crate::path::{
    FieldPath, PathSegment, get_value, is_unique_key, parse_path, path_to_string,
};
use crate::rules::{RuleContext, RuleRegistry, default_registry, sorted_rule_names};
use crate::spec::FieldSpec;

/// Validates form data against a field spec.
#[derive(Debug, Clone)]
pub struct Validator {
    spec: FieldSpec,
    registry: RuleRegistry,
}

impl Validator {
    /// Creates a validator using a snapshot of the process-wide default
    /// registry. Rules registered on the default registry later are not
    /// picked up by this instance.
    #[must_use]
    pub fn new(spec: FieldSpec) -> Self {
        let registry = default_registry().read().clone();
        Self { spec, registry }
    }

    /// Creates a validator with an explicit registry.
    #[must_use]
    pub fn with_registry(spec: FieldSpec, registry: RuleRegistry) -> Self {
        Self { spec, registry }
    }

    /// The spec this validator was built from.
    #[must_use]
    pub fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    /// Validates the whole data tree and collects every field's first
    /// failure. Never panics; malformed specs degrade to visible fields
    /// and skipped rules.
    #[must_use]
    pub fn validate(&self, data: &Value) -> ValidationReport {
        let mut errors = Vec::new();
        let mut path = FieldPath::new();
        self.walk_properties(&self.spec, &mut path, data, &mut errors);
        if !errors.is_empty() {
            tracing::debug!(error_count = errors.len(), "validation failed");
        }
        ValidationReport::from_errors(errors)
    }

    /// Validates a single field by path with an explicit candidate value
    /// (which may differ from what `data` currently holds). Returns the
    /// first failing rule's message, or `None` when the field passes, is
    /// hidden (itself or through a hidden ancestor), or has no spec.
    #[must_use]
    pub fn validate_field(&self, path: &str, value: &Value, data: &Value) -> Option<String> {
        let segments = parse_path(path);

        // Descend the spec chain segment by segment, checking visibility
        // at every level so this agrees with `validate`: a hidden ancestor
        // group hides the whole subtree. Index and key segments step into
        // a "multiple" group's item template, which the group node itself
        // describes.
        let mut spec = &self.spec;
        let mut walked = FieldPath::new();
        for segment in &segments {
            walked.push(segment.clone());
            if let PathSegment::Name(name) = segment {
                spec = spec.properties.get(name)?;
                if !self.is_visible(spec, &walked, data) {
                    return None;
                }
            }
        }

        let mut errors = Vec::new();
        self.run_rules(spec, &segments, value, data, &mut errors);
        errors.into_iter().next().map(|error| error.message)
    }

    // ------------------------------------------------------------------
    // Walk
    // ------------------------------------------------------------------

    fn walk_properties(
        &self,
        group: &FieldSpec,
        path: &mut FieldPath,
        data: &Value,
        errors: &mut Vec<ValidationError>,
    ) {
        for (name, child) in &group.properties {
            path.push(PathSegment::Name(name.clone()));
            self.walk_field(child, path, data, errors);
            path.pop();
        }
    }

    fn walk_field(
        &self,
        spec: &FieldSpec,
        path: &mut FieldPath,
        data: &Value,
        errors: &mut Vec<ValidationError>,
    ) {
        if !self.is_visible(spec, path, data) {
            // Hidden fields and their descendants produce no errors.
            return;
        }

        let null = Value::Null;
        let value = get_value(data, path).unwrap_or(&null);

        self.run_rules(spec, path, value, data, errors);

        if spec.multiple {
            self.walk_group_items(spec, path, value, data, errors);
        } else if spec.is_group() {
            self.walk_properties(spec, path, data, errors);
        }
    }

    /// Walks each item of a "multiple" group. Arrays address items by
    /// index, keyed maps by unique-key token; both walk the same item
    /// template in insertion order.
    fn walk_group_items(
        &self,
        spec: &FieldSpec,
        path: &mut FieldPath,
        value: &Value,
        data: &Value,
        errors: &mut Vec<ValidationError>,
    ) {
        match value {
            Value::Array(items) => {
                for index in 0..items.len() {
                    path.push(PathSegment::Index(index));
                    self.walk_properties(spec, path, data, errors);
                    path.pop();
                }
            }
            Value::Object(map) => {
                for key in map.keys().filter(|key| is_unique_key(key)) {
                    path.push(PathSegment::Key(key.clone()));
                    self.walk_properties(spec, path, data, errors);
                    path.pop();
                }
            }
            _ => {}
        }
    }

    // ------------------------------------------------------------------
    // Visibility
    // ------------------------------------------------------------------

    /// Decides field visibility. `display_switch` (a condition expression)
    /// wins over `display_target` (a truthiness check of another field).
    /// Condition errors fail open: a field with a broken condition stays
    /// visible and validated rather than silently exempt.
    fn is_visible(&self, spec: &FieldSpec, path: &[PathSegment], data: &Value) -> bool {
        if let Some(expr) = &spec.display_switch {
            let scope = ConditionScope::new(path, data);
            return match parse_condition(expr).and_then(|ast| evaluate_condition(&ast, &scope)) {
                Ok(visible) => visible,
                Err(err) => {
                    tracing::warn!(
                        field = %path_to_string(path),
                        condition = expr,
                        %err,
                        "condition failed, field treated as visible"
                    );
                    true
                }
            };
        }
        if let Some(target) = &spec.display_target {
            let scope = ConditionScope::new(path, data);
            return is_truthy(scope.resolve_field(target).unwrap_or(&Value::Null));
        }
        true
    }

    // ------------------------------------------------------------------
    // Rule chain
    // ------------------------------------------------------------------

    /// Runs a field's rules in canonical order and records the first
    /// failure. Empty values skip every rule except `required`; unknown
    /// rule names pass with a warning.
    fn run_rules(
        &self,
        spec: &FieldSpec,
        path: &[PathSegment],
        value: &Value,
        data: &Value,
        errors: &mut Vec<ValidationError>,
    ) {
        let rules = self.effective_rules(spec);
        if rules.is_empty() {
            return;
        }

        let empty = is_empty_value(value);
        let ordered = sorted_rule_names(rules.iter().map(|(name, _)| name.as_str()));

        for name in ordered {
            if empty && name != "required" {
                continue;
            }
            let Some(rule) = self.registry.get(name) else {
                tracing::warn!(rule = name, "unknown rule, treated as pass");
                continue;
            };
            let Some((_, param)) = rules.iter().find(|(n, _)| n == name) else {
                continue;
            };
            let ctx = RuleContext {
                rule_name: name,
                value,
                param,
                messages: &spec.messages,
                all_data: data,
                path,
            };
            if let Some(message) = rule.validate(&ctx) {
                errors.push(ValidationError::new(path_to_string(path), message));
                return;
            }
        }
    }

    /// The field's configured rules plus the implicit rules its `min` /
    /// `max` attributes carry: item-count bounds (`mincount` / `maxcount`)
    /// on a "multiple" group, numeric bounds (`min` / `max`) on anything
    /// else. Explicit rule-map entries win over the implicit ones.
    fn effective_rules(&self, spec: &FieldSpec) -> Vec<(String, Value)> {
        let mut rules: Vec<(String, Value)> = spec
            .rules
            .iter()
            .map(|(name, param)| (name.clone(), param.clone()))
            .collect();
        let (min_rule, max_rule) = if spec.multiple {
            ("mincount", "maxcount")
        } else {
            ("min", "max")
        };
        if let Some(min) = spec.min {
            if !rules.iter().any(|(name, _)| name == min_rule) {
                rules.push((min_rule.to_string(), Value::from(min)));
            }
        }
        if let Some(max) = spec.max {
            if !rules.iter().any(|(name, _)| name == max_rule) {
                rules.push((max_rule.to_string(), Value::from(max)));
            }
        }
        rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec(value: Value) -> FieldSpec {
        serde_json::from_value(value).expect("spec fixture")
    }

    fn email_form() -> Validator {
        Validator::new(spec(json!({
            "type": "group",
            "properties": {
                "email": {
                    "type": "text",
                    "rules": {"required": true, "email": true},
                    "messages": {"required": "Email is required"}
                }
            }
        })))
    }

    #[test]
    fn test_missing_required_field() {
        let report = email_form().validate(&json!({}));
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].path, "email");
        assert_eq!(report.errors[0].message, "Email is required");
    }

    #[test]
    fn test_first_failing_rule_wins() {
        // "not-an-email" is present, so required passes and email fires.
        let report = email_form().validate(&json!({"email": "not-an-email"}));
        assert_eq!(report.errors.len(), 1);
        assert_eq!(
            report.errors[0].message,
            "Please enter a valid email address."
        );
    }

    #[test]
    fn test_valid_data_gives_empty_report() {
        let report = email_form().validate(&json!({"email": "a@b.co"}));
        assert!(report.valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_empty_value_skips_non_required_rules() {
        let validator = Validator::new(spec(json!({
            "type": "group",
            "properties": {
                "nickname": {
                    "type": "text",
                    "rules": {"minlength": 3, "email": true}
                }
            }
        })));
        assert!(validator.validate(&json!({})).valid);
        assert!(validator.validate(&json!({"nickname": ""})).valid);
        assert!(!validator.validate(&json!({"nickname": "ab"})).valid);
    }

    #[test]
    fn test_hidden_field_is_skipped() {
        let validator = Validator::new(spec(json!({
            "type": "group",
            "properties": {
                "kind": {"type": "text"},
                "detail": {
                    "type": "text",
                    "display_switch": "kind == 'other'",
                    "rules": {"required": true}
                }
            }
        })));
        assert!(validator.validate(&json!({"kind": "simple"})).valid);
        let report = validator.validate(&json!({"kind": "other"}));
        assert_eq!(report.errors[0].path, "detail");
    }

    #[test]
    fn test_broken_condition_fails_open() {
        let validator = Validator::new(spec(json!({
            "type": "group",
            "properties": {
                "detail": {
                    "type": "text",
                    "display_switch": "kind == ",
                    "rules": {"required": true}
                }
            }
        })));
        // Unparsable condition: the field stays visible and required fires.
        assert!(!validator.validate(&json!({})).valid);
    }

    #[test]
    fn test_display_target_truthiness() {
        let validator = Validator::new(spec(json!({
            "type": "group",
            "properties": {
                "subscribe": {"type": "checkbox"},
                "frequency": {
                    "type": "text",
                    "display_target": "subscribe",
                    "rules": {"required": true}
                }
            }
        })));
        assert!(validator.validate(&json!({"subscribe": false})).valid);
        assert!(validator.validate(&json!({})).valid);
        assert!(!validator.validate(&json!({"subscribe": true})).valid);
    }

    #[test]
    fn test_multiple_group_array_items() {
        let validator = contacts_form();
        let report = validator.validate(&json!({
            "contacts": [
                {"value": "a@b.co"},
                {"value": "nope"}
            ]
        }));
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].path, "contacts[1].value");
    }

    #[test]
    fn test_multiple_group_keyed_items() {
        let validator = contacts_form();
        let report = validator.validate(&json!({
            "contacts": {
                "__aaaaaaaaaaaaa__": {"value": "a@b.co"},
                "__bbbbbbbbbbbbb__": {"value": "nope"}
            }
        }));
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].path, "contacts[__bbbbbbbbbbbbb__].value");
    }

    #[test]
    fn test_multiple_group_count_bounds() {
        let validator = contacts_form();
        let report = validator.validate(&json!({
            "contacts": [
                {"value": "a@b.co"},
                {"value": "b@b.co"},
                {"value": "c@b.co"}
            ]
        }));
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].path, "contacts");
        assert_eq!(
            report.errors[0].message,
            "Please provide no more than 2 items."
        );
    }

    #[test]
    fn test_validate_field_candidate_value() {
        let validator = email_form();
        let data = json!({"email": "a@b.co"});
        assert_eq!(
            validator.validate_field("email", &json!("nope"), &data),
            Some("Please enter a valid email address.".to_string())
        );
        assert_eq!(validator.validate_field("email", &json!("x@y.io"), &data), None);
    }

    #[test]
    fn test_validate_field_respects_hidden_ancestors() {
        let validator = Validator::new(spec(json!({
            "type": "group",
            "properties": {
                "show_address": {"type": "checkbox"},
                "address": {
                    "type": "group",
                    "display_target": "show_address",
                    "properties": {
                        "street": {"type": "text", "rules": {"required": true}}
                    }
                }
            }
        })));

        // Group hidden: both entry points agree that street has no error.
        let hidden = json!({"show_address": false});
        assert!(validator.validate(&hidden).valid);
        assert_eq!(
            validator.validate_field("address.street", &json!(""), &hidden),
            None
        );

        let shown = json!({"show_address": true});
        assert_eq!(
            validator.validate_field("address.street", &json!(""), &shown),
            Some("This field is required.".to_string())
        );
    }

    #[test]
    fn test_scalar_min_max_attributes_are_numeric_bounds() {
        let validator = Validator::new(spec(json!({
            "type": "group",
            "properties": {
                "age": {
                    "type": "number",
                    "min": 13,
                    "max": 120,
                    "rules": {"number": true}
                }
            }
        })));

        let report = validator.validate(&json!({"age": 7}));
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].path, "age");
        assert_eq!(
            report.errors[0].message,
            "Please enter a value greater than or equal to 13."
        );
        assert!(!validator.validate(&json!({"age": 121})).valid);
        assert!(validator.validate(&json!({"age": 13})).valid);
        assert!(validator.validate(&json!({"age": "120"})).valid);
    }

    #[test]
    fn test_explicit_min_rule_wins_over_attribute() {
        let validator = Validator::new(spec(json!({
            "type": "group",
            "properties": {
                "age": {"type": "number", "min": 13, "rules": {"min": 10}}
            }
        })));
        assert!(validator.validate(&json!({"age": 11})).valid);
        assert!(!validator.validate(&json!({"age": 9})).valid);
    }

    #[test]
    fn test_validate_field_unknown_path() {
        let validator = email_form();
        assert_eq!(
            validator.validate_field("ghost", &json!("x"), &json!({})),
            None
        );
    }

    #[test]
    fn test_unknown_rule_passes() {
        let validator = Validator::new(spec(json!({
            "type": "group",
            "properties": {
                "field": {"type": "text", "rules": {"telepathy": true}}
            }
        })));
        assert!(validator.validate(&json!({"field": "x"})).valid);
    }

    #[test]
    fn test_validation_is_idempotent() {
        let validator = contacts_form();
        let data = json!({"contacts": [{"value": "nope"}]});
        let first = validator.validate(&data);
        let second = validator.validate(&data);
        assert_eq!(first, second);
    }

    fn contacts_form() -> Validator {
        Validator::new(spec(json!({
            "type": "group",
            "properties": {
                "contacts": {
                    "type": "group",
                    "multiple": true,
                    "min": 1,
                    "max": 2,
                    "properties": {
                        "value": {
                            "type": "text",
                            "rules": {"required": true, "email": true}
                        }
                    }
                }
            }
        })))
    }
}
