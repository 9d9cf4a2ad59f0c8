//! Condition engine for `display_switch` expressions
//!
//! A small boolean language over form data: comparisons
//! (`field OP literal` with `==`, `!=`, `>=`, `<=`, `>`, `<`) combined by
//! `&&` / `||` with strict left-to-right evaluation unless parenthesized.
//!
//! Parsing and evaluation are pure and never panic. Both return explicit
//! `Result`s; the orchestrator turns any failure into "visible" (fail-open)
//! so a malformed condition can never permanently hide a field.

pub mod ast;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{CompareOp, CondExpr, LogicOp};
pub use eval::{ConditionScope, evaluate_condition};
pub use parser::parse_condition;
