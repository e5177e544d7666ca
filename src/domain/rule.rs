//! Signal chain rule.
//!
//! A `Rule` owns an ordered, non-empty chain of [`SignalNode`]s. The successor of node
//! `i` is node `i + 1`. Evaluation renders the chain to expression text, lexes it and
//! parses it back to a single boolean; nothing is cached between calls.

use crate::domain::error::{EvalError, SigchainError};
use crate::domain::expression::synthesize;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::parser::parse;
use crate::domain::signal::SignalNode;
use crate::domain::tokenizer::tokenize;
use std::fmt;

#[derive(Debug)]
pub struct Rule {
    nodes: Vec<SignalNode>,
}

impl Rule {
    /// Build a rule from nodes in link order.
    ///
    /// Fails when the chain is empty or when a node with a successor has no operator.
    pub fn new(nodes: Vec<SignalNode>) -> Result<Self, SigchainError> {
        if nodes.is_empty() {
            return Err(SigchainError::RuleInvalid {
                reason: "signal chain is empty".into(),
            });
        }
        let last = nodes.len() - 1;
        if let Some((i, node)) = nodes
            .iter()
            .enumerate()
            .take(last)
            .find(|(_, node)| node.operator().is_none())
        {
            return Err(SigchainError::RuleInvalid {
                reason: format!(
                    "node {} ({}) has a successor but no operator",
                    i,
                    node.label()
                ),
            });
        }
        Ok(Self { nodes })
    }

    /// True only when every node has enough history.
    pub fn is_ready(&self) -> bool {
        self.nodes.iter().all(SignalNode::is_ready)
    }

    pub fn is_true(&self) -> Result<bool, EvalError> {
        let expression = self.expression();
        let tokens = tokenize(&expression)?;
        let value = parse(&tokens)?;
        tracing::debug!(rule = %self, %expression, value, "evaluated rule");
        Ok(value)
    }

    /// Feed a bar to every node in link order.
    pub fn update(&mut self, bar: &OhlcvBar) {
        for node in &mut self.nodes {
            node.update(bar);
        }
    }

    /// The expression text `is_true` would evaluate right now.
    pub fn expression(&self) -> String {
        synthesize(&self.nodes)
    }

    /// `label OP label OP ... label`, without the terminal operator.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        for (i, node) in self.nodes.iter().enumerate() {
            out.push_str(node.label());
            if i + 1 < self.nodes.len() {
                if let Some(op) = node.operator() {
                    out.push_str(&format!(" {op} "));
                }
            }
        }
        out
    }

    pub fn nodes(&self) -> &[SignalNode] {
        &self.nodes
    }

    pub fn head(&self) -> &SignalNode {
        &self.nodes[0]
    }

    pub fn successor(&self, index: usize) -> Option<&SignalNode> {
        self.nodes.get(index + 1)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
