//! A single link in a signal chain.

use crate::domain::ohlcv::OhlcvBar;
use crate::domain::operator::Operator;
use crate::ports::signal_port::Signal;
use std::fmt;

/// An atomic condition plus its relation to the next node in the chain.
///
/// The operator is only meaningful when the node has a successor; the owning `Rule`
/// ignores it on the terminal node.
pub struct SignalNode {
    signal: Box<dyn Signal>,
    operator: Option<Operator>,
    label: String,
}

impl SignalNode {
    pub fn new(label: impl Into<String>, signal: Box<dyn Signal>) -> Self {
        Self {
            signal,
            operator: None,
            label: label.into(),
        }
    }

    pub fn with_operator(mut self, operator: Operator) -> Self {
        self.operator = Some(operator);
        self
    }

    pub fn evaluate(&self) -> bool {
        self.signal.evaluate()
    }

    pub fn is_ready(&self) -> bool {
        self.signal.is_ready()
    }

    pub fn operator(&self) -> Option<Operator> {
        self.operator
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn update(&mut self, bar: &OhlcvBar) {
        self.signal.update(bar);
    }
}

impl fmt::Debug for SignalNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalNode")
            .field("label", &self.label)
            .field("operator", &self.operator)
            .field("ready", &self.is_ready())
            .finish()
    }
}
