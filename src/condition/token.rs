//! Token types for the condition language

/// A lexed token.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Bare identifier or dotted field path (`age`, `user.status`).
    Field(String),
    /// Numeric literal.
    Number(f64),
    /// Quoted string literal (single or double quotes).
    Str(String),
    /// `true` / `false` keyword.
    Bool(bool),

    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `>=`
    Ge,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `<`
    Lt,

    /// `&&`
    And,
    /// `||`
    Or,

    /// `(`
    LeftParen,
    /// `)`
    RightParen,

    /// End of input.
    Eof,
}

impl Token {
    /// True for the six comparison operators.
    #[must_use]
    pub fn is_compare_op(&self) -> bool {
        matches!(
            self,
            Token::Eq | Token::Ne | Token::Ge | Token::Le | Token::Gt | Token::Lt
        )
    }

    /// True for `&&` / `||`.
    #[must_use]
    pub fn is_logic_op(&self) -> bool {
        matches!(self, Token::And | Token::Or)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Field(name) => write!(f, "{name}"),
            Token::Number(n) => write!(f, "{n}"),
            Token::Str(s) => write!(f, "'{s}'"),
            Token::Bool(b) => write!(f, "{b}"),
            Token::Eq => write!(f, "=="),
            Token::Ne => write!(f, "!="),
            Token::Ge => write!(f, ">="),
            Token::Le => write!(f, "<="),
            Token::Gt => write!(f, ">"),
            Token::Lt => write!(f, "<"),
            Token::And => write!(f, "&&"),
            Token::Or => write!(f, "||"),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::Eof => write!(f, "<eof>"),
        }
    }
}
