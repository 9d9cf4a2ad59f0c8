//! Parser for condition expressions
//!
//! Recursive descent over the token stream. `&&` and `||` share one
//! precedence level and associate left, so mixed chains evaluate in source
//! order; parentheses override.

use serde_json::Value;

use crate::condition::ast::{CompareOp, CondExpr, LogicOp};
use crate::condition::lexer::Lexer;
use crate::condition::token::Token;
use crate::core::{ConditionError, ConditionResult};

/// Parses a `display_switch` expression into an AST.
///
/// Pure and total: malformed input yields `Err`, never a panic. The
/// fail-open decision (treat `Err` as visible) belongs to the caller.
pub fn parse_condition(expr: &str) -> ConditionResult<CondExpr> {
    let tokens = Lexer::new(expr).tokenize()?;
    let mut parser = Parser::new(tokens);
    let ast = parser.parse_expression()?;
    parser.expect(Token::Eof)?;
    Ok(ast)
}

struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// expression := clause ( ("&&" | "||") clause )*
    fn parse_expression(&mut self) -> ConditionResult<CondExpr> {
        let mut left = self.parse_clause()?;

        while self.current().is_logic_op() {
            let op = match self.current() {
                Token::And => LogicOp::And,
                _ => LogicOp::Or,
            };
            self.advance();
            let right = self.parse_clause()?;
            left = CondExpr::Logical {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    /// clause := operand ( compare-op operand )?
    fn parse_clause(&mut self) -> ConditionResult<CondExpr> {
        let left = self.parse_operand()?;

        if !self.current().is_compare_op() {
            return Ok(left);
        }
        let op = match self.current() {
            Token::Eq => CompareOp::Eq,
            Token::Ne => CompareOp::Ne,
            Token::Ge => CompareOp::Ge,
            Token::Le => CompareOp::Le,
            Token::Gt => CompareOp::Gt,
            _ => CompareOp::Lt,
        };
        self.advance();
        let right = self.parse_operand()?;

        Ok(CondExpr::Compare {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    /// operand := field | literal | "(" expression ")"
    fn parse_operand(&mut self) -> ConditionResult<CondExpr> {
        match self.current().clone() {
            Token::Field(name) => {
                self.advance();
                Ok(CondExpr::Field(name))
            }
            Token::Number(n) => {
                self.advance();
                Ok(CondExpr::Literal(
                    serde_json::Number::from_f64(n)
                        .map(Value::Number)
                        .unwrap_or(Value::Null),
                ))
            }
            Token::Str(s) => {
                self.advance();
                Ok(CondExpr::Literal(Value::String(s)))
            }
            Token::Bool(b) => {
                self.advance();
                Ok(CondExpr::Literal(Value::Bool(b)))
            }
            Token::LeftParen => {
                self.advance();
                let inner = self.parse_expression()?;
                self.expect(Token::RightParen)?;
                Ok(inner)
            }
            token => Err(ConditionError::syntax(format!("unexpected token {token}"))),
        }
    }

    fn current(&self) -> &Token {
        self.tokens.get(self.position).unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    fn expect(&mut self, expected: Token) -> ConditionResult<()> {
        if self.current() == &expected {
            self.advance();
            Ok(())
        } else {
            Err(ConditionError::syntax(format!(
                "expected {}, found {}",
                expected,
                self.current()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_comparison() {
        let ast = parse_condition("age >= 18").unwrap();
        assert!(matches!(
            ast,
            CondExpr::Compare {
                op: CompareOp::Ge,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_logical_chain_is_left_associative() {
        // a == 1 || b == 2 && c == 3 groups as ((a==1 || b==2) && c==3).
        let ast = parse_condition("a == 1 || b == 2 && c == 3").unwrap();
        let CondExpr::Logical { left, op, .. } = ast else {
            panic!("expected logical root");
        };
        assert_eq!(op, LogicOp::And);
        assert!(matches!(
            *left,
            CondExpr::Logical {
                op: LogicOp::Or,
                ..
            }
        ));
    }

    #[test]
    fn test_parentheses_override_order() {
        let ast = parse_condition("a == 1 || (b == 2 && c == 3)").unwrap();
        let CondExpr::Logical { op, right, .. } = ast else {
            panic!("expected logical root");
        };
        assert_eq!(op, LogicOp::Or);
        assert!(matches!(
            *right,
            CondExpr::Logical {
                op: LogicOp::And,
                ..
            }
        ));
    }

    #[test]
    fn test_bare_field_clause() {
        let ast = parse_condition("enabled").unwrap();
        assert_eq!(ast, CondExpr::Field("enabled".into()));
    }

    #[test]
    fn test_malformed_inputs_return_err() {
        assert!(parse_condition("age >=").is_err());
        assert!(parse_condition("== 3").is_err());
        assert!(parse_condition("(a == 1").is_err());
        assert!(parse_condition("a == 1 extra").is_err());
        assert!(parse_condition("").is_err());
    }
}
