//! Shared error and value primitives
//!
//! Everything user-facing that can go wrong during validation is data
//! (`ValidationError`), never a Rust error. `ConditionError` is the internal
//! taxonomy for `display_switch` parsing and evaluation; callers recover
//! from it fail-open.

pub mod error;
pub mod value;

pub use error::{ConditionError, ConditionResult, ValidationError, ValidationReport};
pub use value::{coerce_number, is_empty_value, is_truthy, value_type_name};
