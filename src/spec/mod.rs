//! Declarative field specification tree
//!
//! A [`FieldSpec`] describes one form field: its validation rules, message
//! overrides, nested group structure, and visibility conditions. The core
//! receives an already-deserialized tree; loading from YAML/JSON source
//! formats is the caller's concern.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Specification of a single field or group.
///
/// Known attributes are modeled explicitly; anything else the source
/// document carries (UI hints, vendor extensions) is collected untouched in
/// [`extra`](FieldSpec::extra) and ignored by validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field type discriminant (`text`, `select`, `group`, ...). Only the
    /// rendering layer interprets this.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,

    /// Rule name → rule parameter. Insertion order is preserved for
    /// round-tripping, but evaluation follows the canonical priority order,
    /// not this order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub rules: IndexMap<String, Value>,

    /// Rule name → message template override. Templates use positional
    /// `{0}` / `{1}` placeholders.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub messages: IndexMap<String, String>,

    /// Nested group: child field name → child spec.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, FieldSpec>,

    /// Whether this group repeats. Data for a multiple group is an array
    /// or a unique-key-keyed mapping; both validate identically.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub multiple: bool,

    /// Lower bound: item count on a multiple group, numeric value
    /// otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,

    /// Upper bound: item count on a multiple group, numeric value
    /// otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,

    /// Boolean expression deciding visibility. Malformed expressions
    /// fail open: the field stays visible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_switch: Option<String>,

    /// Single-field truthiness shorthand for visibility.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_target: Option<String>,

    /// Everything else from the source document. Consumed only by the
    /// rendering layer.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl FieldSpec {
    /// A bare spec with no rules or children.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True if this spec declares nested properties.
    #[must_use]
    pub fn is_group(&self) -> bool {
        !self.properties.is_empty()
    }

    /// True if any visibility condition is configured.
    #[must_use]
    pub fn has_visibility_condition(&self) -> bool {
        self.display_switch.is_some() || self.display_target.is_some()
    }
}
