//! Lexer for condition expressions
//!
//! Converts a `display_switch` string into tokens. Field references are
//! lexed as one token including dots (`user.status`), so the parser never
//! has to reassemble paths.

use crate::condition::token::Token;
use crate::core::{ConditionError, ConditionResult};

/// Lexer over a condition string.
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer for the input string.
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// Tokenizes the entire input, ending with [`Token::Eof`].
    pub fn tokenize(&mut self) -> ConditionResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token == Token::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }
        Ok(tokens)
    }

    fn next_token(&mut self) -> ConditionResult<Token> {
        self.skip_whitespace();

        let Some(ch) = self.current_char() else {
            return Ok(Token::Eof);
        };

        match ch {
            '(' => {
                self.advance();
                Ok(Token::LeftParen)
            }
            ')' => {
                self.advance();
                Ok(Token::RightParen)
            }
            '=' if self.peek() == Some('=') => {
                self.advance();
                self.advance();
                Ok(Token::Eq)
            }
            '!' if self.peek() == Some('=') => {
                self.advance();
                self.advance();
                Ok(Token::Ne)
            }
            '>' if self.peek() == Some('=') => {
                self.advance();
                self.advance();
                Ok(Token::Ge)
            }
            '<' if self.peek() == Some('=') => {
                self.advance();
                self.advance();
                Ok(Token::Le)
            }
            '>' => {
                self.advance();
                Ok(Token::Gt)
            }
            '<' => {
                self.advance();
                Ok(Token::Lt)
            }
            '&' if self.peek() == Some('&') => {
                self.advance();
                self.advance();
                Ok(Token::And)
            }
            '|' if self.peek() == Some('|') => {
                self.advance();
                self.advance();
                Ok(Token::Or)
            }
            '"' | '\'' => self.read_string(ch),
            ch if ch.is_ascii_digit() => self.read_number(false),
            '-' if self.peek().is_some_and(|c| c.is_ascii_digit()) => {
                self.advance();
                self.read_number(true)
            }
            ch if ch.is_alphabetic() || ch == '_' => Ok(self.read_field()),
            _ => Err(ConditionError::syntax(format!(
                "unexpected character '{}' at position {}",
                ch, self.position
            ))),
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn peek(&self) -> Option<char> {
        let current = self.current_char()?;
        self.input[self.position + current.len_utf8()..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.position += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.current_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn read_string(&mut self, quote: char) -> ConditionResult<Token> {
        self.advance(); // opening quote
        let start = self.position;
        while let Some(ch) = self.current_char() {
            if ch == quote {
                let text = self.input[start..self.position].to_string();
                self.advance(); // closing quote
                return Ok(Token::Str(text));
            }
            self.advance();
        }
        Err(ConditionError::syntax("unterminated string literal"))
    }

    fn read_number(&mut self, negative: bool) -> ConditionResult<Token> {
        let start = self.position;
        let mut seen_dot = false;
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                self.advance();
            } else if ch == '.' && !seen_dot && self.peek().is_some_and(|c| c.is_ascii_digit()) {
                seen_dot = true;
                self.advance();
            } else {
                break;
            }
        }
        let text = &self.input[start..self.position];
        text.parse::<f64>()
            .map(|n| Token::Number(if negative { -n } else { n }))
            .map_err(|_| ConditionError::syntax(format!("invalid number literal '{text}'")))
    }

    fn read_field(&mut self) -> Token {
        let start = self.position;
        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' {
                self.advance();
            } else if ch == '.' && self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
                // Dot joins path parts; a trailing dot is not consumed.
                self.advance();
            } else {
                break;
            }
        }
        let name = &self.input[start..self.position];
        match name {
            "true" => Token::Bool(true),
            "false" => Token::Bool(false),
            _ => Token::Field(name.to_string()),
        }
    }
}
