//! Error types for the validation core
//!
//! Two very different failure families live here:
//!
//! - [`ValidationError`] / [`ValidationReport`] — expected, user-facing
//!   outcomes of running a validator. These are plain data returned from
//!   `validate`, never raised.
//! - [`ConditionError`] — internal failures of the `display_switch`
//!   expression engine. The orchestrator recovers from these fail-open
//!   (a field with a broken condition stays visible).

use serde::{Deserialize, Serialize};

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A single field failure: the canonical path of the field plus the
/// resolved, user-facing message.
///
/// Paths use the canonical notation of the path resolver, e.g.
/// `contacts[0].value` or `contacts[__k3f9x27ab01cd__].value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Canonical path of the failing field.
    pub path: String,
    /// Resolved message after template substitution.
    pub message: String,
}

impl ValidationError {
    /// Creates a validation error for a path.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

// ============================================================================
// VALIDATION REPORT
// ============================================================================

/// The outcome of a full validation pass.
///
/// Invariant: `valid == errors.is_empty()`, enforced by the only
/// constructor. Two independent engine implementations fed the same
/// `(spec, data)` must produce byte-identical reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// True when no field produced an error.
    pub valid: bool,
    /// One error per failing field, in spec walk order.
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    /// Builds a report from collected errors, deriving `valid`.
    #[must_use]
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// A report with no errors.
    #[must_use]
    pub fn ok() -> Self {
        Self::from_errors(Vec::new())
    }
}

// ============================================================================
// CONDITION ERROR
// ============================================================================

/// Failure inside the `display_switch` expression engine.
///
/// Never escapes `validate`/`validate_field`: visibility defaults to
/// `true` whenever one of these is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConditionError {
    /// The expression could not be tokenized or parsed.
    #[error("condition syntax error: {0}")]
    Syntax(String),

    /// The expression parsed but could not be evaluated against the data
    /// (e.g. ordering comparison on non-numeric operands).
    #[error("condition evaluation error: {0}")]
    Eval(String),
}

impl ConditionError {
    /// Creates a syntax error.
    pub fn syntax(msg: impl Into<String>) -> Self {
        Self::Syntax(msg.into())
    }

    /// Creates an evaluation error.
    pub fn eval(msg: impl Into<String>) -> Self {
        Self::Eval(msg.into())
    }
}

/// Result alias for condition parsing and evaluation.
pub type ConditionResult<T> = Result<T, ConditionError>;
