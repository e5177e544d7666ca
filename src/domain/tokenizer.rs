//! Boolean expression tokenizer.
//!
//! Scans the text produced by the expression synthesizer into a materialized token
//! sequence. Keywords are case-insensitive; `!`, `(` and `)` are single-character
//! tokens. Anything else is a lexical error carrying the character offset and the
//! unscanned remainder.

use crate::domain::error::LexError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    True,
    False,
    And,
    Or,
    Not,
    LParen,
    RParen,
}

impl Token {
    pub fn as_str(self) -> &'static str {
        match self {
            Token::True => "true",
            Token::False => "false",
            Token::And => "and",
            Token::Or => "or",
            Token::Not => "!",
            Token::LParen => "(",
            Token::RParen => ")",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

struct Tokenizer<'a> {
    chars: Vec<char>,
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().collect(),
            input,
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn remaining_from(&self, start: usize) -> String {
        self.chars[start..].iter().collect()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn keyword(&mut self) -> Result<Token, LexError> {
        let start = self.pos;
        while self.peek().is_some_and(char::is_alphabetic) {
            self.pos += 1;
        }
        let word: String = self.chars[start..self.pos].iter().collect();

        match word.to_lowercase().as_str() {
            "true" => Ok(Token::True),
            "false" => Ok(Token::False),
            "and" => Ok(Token::And),
            "or" => Ok(Token::Or),
            _ => Err(LexError::UnknownKeyword {
                position: start,
                word,
                remaining: self.remaining_from(start),
            }),
        }
    }

    fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace();
            let Some(ch) = self.peek() else {
                break;
            };
            match ch {
                '!' => {
                    tokens.push(Token::Not);
                    self.pos += 1;
                }
                '(' => {
                    tokens.push(Token::LParen);
                    self.pos += 1;
                }
                ')' => {
                    tokens.push(Token::RParen);
                    self.pos += 1;
                }
                c if c.is_alphabetic() => tokens.push(self.keyword()?),
                _ => {
                    return Err(LexError::UnexpectedChar {
                        position: self.pos,
                        remaining: self.remaining_from(self.pos),
                    });
                }
            }
        }
        tracing::trace!(input = self.input, tokens = tokens.len(), "tokenized expression");
        Ok(tokens)
    }
}

/// Lex a boolean expression into its complete token sequence.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Tokenizer::new(input).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_literals_and_connectives() {
        let tokens = tokenize("true and false or true").unwrap();
        assert_eq!(
            tokens,
            vec![Token::True, Token::And, Token::False, Token::Or, Token::True]
        );
    }

    #[test]
    fn tokenize_negation_without_space() {
        let tokens = tokenize("true and !false").unwrap();
        assert_eq!(
            tokens,
            vec![Token::True, Token::And, Token::Not, Token::False]
        );
    }

    #[test]
    fn tokenize_parentheses() {
        let tokens = tokenize("(true or false)").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::LParen,
                Token::True,
                Token::Or,
                Token::False,
                Token::RParen
            ]
        );
    }

    #[test]
    fn keywords_are_case_insensitive() {
        let tokens = tokenize("TRUE And fAlSe OR True").unwrap();
        assert_eq!(
            tokens,
            vec![Token::True, Token::And, Token::False, Token::Or, Token::True]
        );
    }

    #[test]
    fn whitespace_variants_are_skipped() {
        let tokens = tokenize("  true\tand\n\r false  ").unwrap();
        assert_eq!(tokens, vec![Token::True, Token::And, Token::False]);
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize("   ").unwrap().is_empty());
    }

    #[test]
    fn letter_run_is_greedy() {
        let err = tokenize("trueand false").unwrap_err();
        match err {
            LexError::UnknownKeyword {
                position,
                word,
                remaining,
            } => {
                assert_eq!(position, 0);
                assert_eq!(word, "trueand");
                assert_eq!(remaining, "trueand false");
            }
            other => panic!("expected UnknownKeyword, got {other:?}"),
        }
    }

    #[test]
    fn error_on_digit() {
        let err = tokenize("true and 1").unwrap_err();
        assert_eq!(
            err,
            LexError::UnexpectedChar {
                position: 9,
                remaining: "1".into()
            }
        );
    }

    #[test]
    fn error_on_symbol_reports_remaining_text() {
        let err = tokenize("true && false").unwrap_err();
        assert_eq!(err.position(), 5);
        assert_eq!(err.remaining(), "&& false");
        assert!(err.to_string().contains("'&& false'"));
    }

    #[test]
    fn error_on_unknown_keyword_names_word() {
        let err = tokenize("true xor false").unwrap_err();
        assert_eq!(err.position(), 5);
        assert!(err.to_string().contains("'xor'"));
        assert_eq!(err.remaining(), "xor false");
    }

    #[test]
    fn token_display() {
        assert_eq!(Token::Not.to_string(), "!");
        assert_eq!(Token::LParen.to_string(), "(");
        assert_eq!(Token::False.to_string(), "false");
    }
}
