//! # formspec
//!
//! Schema-driven form validation core: a declarative field spec tree, a
//! path resolver for nested form data, a rule engine with a registry of
//! named rule kinds, and a small boolean condition language for field
//! visibility.
//!
//! ## Overview
//!
//! A form is described by a [`FieldSpec`] tree (usually deserialized from
//! JSON or YAML) and validated against its data, a [`serde_json::Value`]
//! tree. The [`Validator`] walks both trees together: it resolves each
//! field's visibility, runs the field's rules in a fixed canonical order,
//! and reports at most one error per field.
//!
//! ```
//! use formspec::Validator;
//! use serde_json::json;
//!
//! let spec = serde_json::from_value(json!({
//!     "type": "group",
//!     "properties": {
//!         "email": {
//!             "type": "text",
//!             "rules": {"required": true, "email": true}
//!         }
//!     }
//! }))
//! .unwrap();
//!
//! let validator = Validator::new(spec);
//! let report = validator.validate(&json!({"email": "a@b.co"}));
//! assert!(report.valid);
//!
//! let report = validator.validate(&json!({"email": "nope"}));
//! assert_eq!(report.errors[0].path, "email");
//! ```
//!
//! ## Guarantees
//!
//! - `validate` is a pure read: the data tree is never mutated and repeated
//!   runs over the same input produce identical reports.
//! - No panic escapes `validate` or `validate_field`; malformed specs
//!   degrade (unknown rules pass, broken conditions leave fields visible).
//! - An empty value fails only `required`; every other rule skips empties.
//!
//! Custom rules plug in through [`rules::RuleRegistry`], either per
//! validator or process-wide via [`rules::default_registry`].

pub mod condition;
pub mod core;
pub mod path;
pub mod rules;
pub mod spec;
pub mod validator;

pub use self::core::{ValidationError, ValidationReport};
pub use path::{
    FieldPath, PathSegment, delete_value, generate_unique_key, get_value, get_value_by_path,
    is_unique_key, keys_to_indices, parse_path, path_to_string, resolve_relative, set_value,
};
pub use rules::{Rule, RuleContext, RuleRegistry, default_registry};
pub use spec::FieldSpec;
pub use validator::Validator;
