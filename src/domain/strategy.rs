//! Entry/exit rule pair and the per-bar trading decision.

use crate::domain::error::EvalError;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::rule::Rule;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Entry rule not ready yet.
    Wait,
    /// Flat and the entry rule fired.
    Enter,
    /// Holding and the exit rule fired.
    Exit,
    /// Nothing to do this bar.
    Hold,
}

#[derive(Debug)]
pub struct Strategy {
    pub name: String,
    pub entry: Rule,
    pub exit: Rule,
}

impl Strategy {
    pub fn new(name: impl Into<String>, entry: Rule, exit: Rule) -> Self {
        Self {
            name: name.into(),
            entry,
            exit,
        }
    }

    /// Feed `bar` to both rules, then decide.
    ///
    /// Nothing happens until the entry rule is ready. When flat only the entry rule is
    /// evaluated; when holding only the exit rule is.
    pub fn decide(&mut self, bar: &OhlcvBar, holding: bool) -> Result<Decision, EvalError> {
        self.entry.update(bar);
        self.exit.update(bar);

        if !self.entry.is_ready() {
            return Ok(Decision::Wait);
        }

        let decision = if !holding {
            if self.entry.is_true()? {
                Decision::Enter
            } else {
                Decision::Hold
            }
        } else if self.exit.is_true()? {
            Decision::Exit
        } else {
            Decision::Hold
        };

        tracing::debug!(time = %bar.time, holding, ?decision, "strategy decision");
        Ok(decision)
    }
}
