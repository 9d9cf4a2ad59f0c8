//! Evaluator for condition ASTs
//!
//! Field references resolve against the current field's sibling scope
//! first, then fall back to an absolute lookup from the data root. A field
//! that resolves nowhere evaluates as `null`: equality against it works,
//! ordering on it is an evaluation error (which the orchestrator treats as
//! visible).

use serde_json::Value;

use crate::condition::ast::{CompareOp, CondExpr, LogicOp};
use crate::core::{ConditionError, ConditionResult, coerce_number, is_truthy, value_type_name};
use crate::path::{PathSegment, get_value, parse_path};

/// Where a condition is being evaluated: the path of the field carrying the
/// condition, and the full form data tree.
#[derive(Debug, Clone, Copy)]
pub struct ConditionScope<'a> {
    /// Path of the field whose visibility is being decided.
    pub current_path: &'a [PathSegment],
    /// Root of the form data.
    pub form_data: &'a Value,
}

impl<'a> ConditionScope<'a> {
    /// Creates a scope.
    pub fn new(current_path: &'a [PathSegment], form_data: &'a Value) -> Self {
        Self {
            current_path,
            form_data,
        }
    }

    /// Resolves a dotted field reference: sibling scope first, then
    /// absolute from the root.
    #[must_use]
    pub fn resolve_field(&self, name: &str) -> Option<&'a Value> {
        let relative = parse_path(name);
        if let Some(parent_len) = self.current_path.len().checked_sub(1) {
            let mut sibling: Vec<PathSegment> = self.current_path[..parent_len].to_vec();
            sibling.extend(relative.iter().cloned());
            if let Some(value) = get_value(self.form_data, &sibling) {
                return Some(value);
            }
        }
        get_value(self.form_data, &relative)
    }
}

/// Evaluates a parsed condition to a boolean.
pub fn evaluate_condition(expr: &CondExpr, scope: &ConditionScope<'_>) -> ConditionResult<bool> {
    Ok(is_truthy(&eval_value(expr, scope)?))
}

fn eval_value(expr: &CondExpr, scope: &ConditionScope<'_>) -> ConditionResult<Value> {
    match expr {
        CondExpr::Literal(value) => Ok(value.clone()),

        CondExpr::Field(name) => Ok(scope.resolve_field(name).cloned().unwrap_or(Value::Null)),

        CondExpr::Compare { left, op, right } => {
            let left = eval_value(left, scope)?;
            let right = eval_value(right, scope)?;
            compare(&left, *op, &right).map(Value::Bool)
        }

        CondExpr::Logical { left, op, right } => {
            let left_val = evaluate_condition(left, scope)?;
            // Short-circuit: the right side is only evaluated when needed.
            match op {
                LogicOp::And if !left_val => Ok(Value::Bool(false)),
                LogicOp::Or if left_val => Ok(Value::Bool(true)),
                _ => Ok(Value::Bool(evaluate_condition(right, scope)?)),
            }
        }
    }
}

fn compare(left: &Value, op: CompareOp, right: &Value) -> ConditionResult<bool> {
    // Numeric comparison wins whenever both sides coerce, so "18" == 18
    // and "2" < 10 behave as the form author expects.
    if let (Some(l), Some(r)) = (coerce_number(left), coerce_number(right)) {
        return Ok(match op {
            CompareOp::Eq => l == r,
            CompareOp::Ne => l != r,
            CompareOp::Ge => l >= r,
            CompareOp::Le => l <= r,
            CompareOp::Gt => l > r,
            CompareOp::Lt => l < r,
        });
    }

    match op {
        CompareOp::Eq => Ok(loose_eq(left, right)),
        CompareOp::Ne => Ok(!loose_eq(left, right)),
        _ => match (left, right) {
            (Value::String(l), Value::String(r)) => Ok(match op {
                CompareOp::Ge => l >= r,
                CompareOp::Le => l <= r,
                CompareOp::Gt => l > r,
                _ => l < r,
            }),
            _ => Err(ConditionError::eval(format!(
                "cannot order {} {} {}",
                value_type_name(left),
                op,
                value_type_name(right)
            ))),
        },
    }
}

fn loose_eq(left: &Value, right: &Value) -> bool {
    left == right
}
