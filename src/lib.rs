//! sigchain: signal chain rule engine.
//!
//! Hexagonal architecture: the rule engine and its expression interpreter live in
//! [`domain`], port traits in [`ports`], concrete signals, configuration and data
//! sources in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
pub mod logging;
