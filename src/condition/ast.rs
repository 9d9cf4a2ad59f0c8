//! AST node types for parsed conditions

use serde_json::Value;

/// A parsed condition expression.
#[derive(Debug, Clone, PartialEq)]
pub enum CondExpr {
    /// Literal value (number, string, boolean).
    Literal(Value),

    /// Field reference by dotted path, resolved at evaluation time
    /// (sibling scope first, then absolute).
    Field(String),

    /// Comparison (`left op right`).
    Compare {
        left: Box<CondExpr>,
        op: CompareOp,
        right: Box<CondExpr>,
    },

    /// `&&` / `||` combination. Built left-associative, so a chain without
    /// parentheses evaluates strictly left to right.
    Logical {
        left: Box<CondExpr>,
        op: LogicOp,
        right: Box<CondExpr>,
    },
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Ge,
    Le,
    Gt,
    Lt,
}

impl CompareOp {
    /// Source notation for the operator.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Ge => ">=",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Lt => "<",
        }
    }
}

/// Logical connectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicOp {
    And,
    Or,
}

impl std::fmt::Display for CompareOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
