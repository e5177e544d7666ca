//! Core domain types and logic.

pub mod config_validation;
pub mod direction;
pub mod error;
pub mod expression;
pub mod indicator;
pub mod ohlcv;
pub mod operator;
pub mod parser;
pub mod rule;
pub mod signal;
pub mod signal_kind;
pub mod strategy;
pub mod tokenizer;
