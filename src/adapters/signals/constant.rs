use crate::domain::ohlcv::OhlcvBar;
use crate::ports::signal_port::Signal;

/// Always ready, always the same value. Fills empty slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantSignal(pub bool);

impl Signal for ConstantSignal {
    fn is_ready(&self) -> bool {
        true
    }

    fn evaluate(&self) -> bool {
        self.0
    }

    fn update(&mut self, _bar: &OhlcvBar) {}
}
