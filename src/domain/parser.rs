//! Boolean expression parser and evaluator.
//!
//! Recursive descent over a token slice with one-token lookahead:
//!
//! ```text
//! expr   := term (OR term)*
//! term   := factor (AND factor)*
//! factor := NOT factor | LPAREN expr RPAREN | TRUE | FALSE
//! ```
//!
//! Evaluation happens while parsing. Every operand is parsed even once the fold
//! has settled, so a malformed tail is always reported.

use crate::domain::error::ParseError;
use crate::domain::tokenizer::Token;

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    fn consume(&mut self, expected: Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn found(&self) -> String {
        self.peek()
            .map(|t| format!("'{}'", t))
            .unwrap_or_else(|| "end of input".to_string())
    }

    fn error(&self, message: String) -> ParseError {
        ParseError {
            message,
            position: self.pos,
        }
    }

    fn parse_expr(&mut self) -> Result<bool, ParseError> {
        let mut value = self.parse_term()?;
        while self.consume(Token::Or) {
            let rhs = self.parse_term()?;
            value = value || rhs;
        }
        Ok(value)
    }

    fn parse_term(&mut self) -> Result<bool, ParseError> {
        let mut value = self.parse_factor()?;
        while self.consume(Token::And) {
            let rhs = self.parse_factor()?;
            value = value && rhs;
        }
        Ok(value)
    }

    fn parse_factor(&mut self) -> Result<bool, ParseError> {
        match self.peek() {
            Some(Token::Not) => {
                self.advance();
                Ok(!self.parse_factor()?)
            }
            Some(Token::LParen) => {
                self.advance();
                let value = self.parse_expr()?;
                if !self.consume(Token::RParen) {
                    return Err(self.error(format!("expected ')', found {}", self.found())));
                }
                Ok(value)
            }
            Some(Token::True) => {
                self.advance();
                Ok(true)
            }
            Some(Token::False) => {
                self.advance();
                Ok(false)
            }
            _ => Err(self.error(format!("expected factor, found {}", self.found()))),
        }
    }

    fn parse(&mut self) -> Result<bool, ParseError> {
        let value = self.parse_expr()?;
        if self.pos < self.tokens.len() {
            return Err(self.error(format!(
                "unexpected token after expression: {}",
                self.found()
            )));
        }
        Ok(value)
    }
}

/// Evaluate a complete token sequence to a single boolean.
pub fn parse(tokens: &[Token]) -> Result<bool, ParseError> {
    Parser::new(tokens).parse()
}
