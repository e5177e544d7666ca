//! Domain error types.

use crate::domain::tokenizer::Token;

/// A lexical error raised while scanning a boolean expression.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("unknown grammar found at position {position}: '{remaining}'")]
    UnexpectedChar { position: usize, remaining: String },

    #[error("expected keyword (true, false, and, or) at position {position}, found '{word}'")]
    UnknownKeyword {
        position: usize,
        word: String,
        remaining: String,
    },
}

impl LexError {
    /// Character offset of the first unscannable character.
    pub fn position(&self) -> usize {
        match self {
            LexError::UnexpectedChar { position, .. } | LexError::UnknownKeyword { position, .. } => {
                *position
            }
        }
    }

    /// Input left unscanned, starting at [`LexError::position`].
    pub fn remaining(&self) -> &str {
        match self {
            LexError::UnexpectedChar { remaining, .. }
            | LexError::UnknownKeyword { remaining, .. } => remaining,
        }
    }

    /// Format the error with a caret pointing at the error position in the input.
    pub fn display_with_context(&self, input: &str) -> String {
        let caret = " ".repeat(self.position()) + "^";
        format!("{input}\n{caret}\n{self}")
    }
}

/// A grammar violation in a token stream. `position` is a token index.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("parse error at token {position}: {message}")]
pub struct ParseError {
    pub message: String,
    pub position: usize,
}

impl ParseError {
    /// Render the token stream with a caret under the offending token.
    pub fn display_with_context(&self, tokens: &[Token]) -> String {
        let mut line = String::new();
        let mut offset = None;
        for (i, token) in tokens.iter().enumerate() {
            if i > 0 {
                line.push(' ');
            }
            if i == self.position {
                offset = Some(line.len());
            }
            line.push_str(token.as_str());
        }
        let column = offset.unwrap_or_else(|| if tokens.is_empty() { 0 } else { line.len() + 1 });
        let caret = " ".repeat(column) + "^";
        format!("{line}\n{caret}\n{self}")
    }
}

/// Failure of a single `Rule::is_true` evaluation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Top-level error type for sigchain.
#[derive(Debug, thiserror::Error)]
pub enum SigchainError {
    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid rule: {reason}")]
    RuleInvalid { reason: String },

    #[error(transparent)]
    Expression(#[from] EvalError),

    #[error("no data for {code} on {exchange}")]
    NoData { code: String, exchange: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SigchainError {
    /// Process exit status for this error category.
    pub fn exit_status(&self) -> u8 {
        match self {
            SigchainError::Io(_) => 1,
            SigchainError::ConfigParse { .. }
            | SigchainError::ConfigMissing { .. }
            | SigchainError::ConfigInvalid { .. } => 2,
            SigchainError::Data { .. } => 3,
            SigchainError::RuleInvalid { .. } | SigchainError::Expression(_) => 4,
            SigchainError::NoData { .. } => 5,
        }
    }
}

impl From<&SigchainError> for std::process::ExitCode {
    fn from(err: &SigchainError) -> Self {
        std::process::ExitCode::from(err.exit_status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_error_accessors() {
        let err = LexError::UnknownKeyword {
            position: 5,
            word: "maybe".into(),
            remaining: "maybe or true".into(),
        };
        assert_eq!(err.position(), 5);
        assert_eq!(err.remaining(), "maybe or true");
        assert!(err.to_string().contains("'maybe'"));
    }

    #[test]
    fn lex_error_context_caret() {
        let err = LexError::UnexpectedChar {
            position: 5,
            remaining: "1 and true".into(),
        };
        let ctx = err.display_with_context("true 1 and true");
        let lines: Vec<&str> = ctx.lines().collect();
        assert_eq!(lines[0], "true 1 and true");
        assert_eq!(lines[1], "     ^");
        assert!(lines[2].contains("position 5"));
    }

    #[test]
    fn parse_error_context_points_at_token() {
        let tokens = [Token::True, Token::And, Token::RParen];
        let err = ParseError {
            message: "expected factor, found ')'".into(),
            position: 2,
        };
        let ctx = err.display_with_context(&tokens);
        let lines: Vec<&str> = ctx.lines().collect();
        assert_eq!(lines[0], "true and )");
        assert_eq!(lines[1], "         ^");
    }

    #[test]
    fn parse_error_context_past_end() {
        let tokens = [Token::True, Token::And];
        let err = ParseError {
            message: "expected factor, found end of input".into(),
            position: 2,
        };
        let ctx = err.display_with_context(&tokens);
        assert_eq!(ctx.lines().nth(1), Some("         ^"));
    }

    #[test]
    fn eval_error_is_transparent() {
        let err: EvalError = ParseError {
            message: "unexpected token".into(),
            position: 3,
        }
        .into();
        assert_eq!(err.to_string(), "parse error at token 3: unexpected token");
    }

    #[test]
    fn exit_codes_by_category() {
        let missing = SigchainError::ConfigMissing {
            section: "entry".into(),
            key: "operator1".into(),
        };
        assert_eq!(missing.exit_status(), 2);

        let expr = SigchainError::Expression(EvalError::Lex(LexError::UnexpectedChar {
            position: 0,
            remaining: "1".into(),
        }));
        assert_eq!(expr.exit_status(), 4);

        let no_data = SigchainError::NoData {
            code: "BTCUSD".into(),
            exchange: "GDAX".into(),
        };
        assert_eq!(no_data.exit_status(), 5);
    }
}
