//! `Signal` implementations backed by the batch indicators.
//!
//! Each signal keeps a bounded window of recent bars, recomputes its indicator over
//! that window on every update and advances a small state machine. `evaluate` only
//! reads the state.

pub mod channel_breakout;
pub mod constant;
pub mod crossing_average;
pub mod donchian;
pub mod oscillator;

pub use channel_breakout::ChannelBreakoutSignal;
pub use constant::ConstantSignal;
pub use crossing_average::{CrossingAverageSignal, CrossingLines, CrossingState};
pub use donchian::DonchianSignal;
pub use oscillator::{OscillatorSignal, OscillatorSource, ThresholdState};

use crate::domain::ohlcv::OhlcvBar;
use std::collections::VecDeque;

/// Fixed-capacity bar window, oldest first.
#[derive(Debug, Clone)]
pub struct BarHistory {
    bars: VecDeque<OhlcvBar>,
    capacity: usize,
}

impl BarHistory {
    /// A window that keeps at least `warmup * 3` bars so recursive indicators settle.
    pub fn new(history_bars: usize, warmup: usize) -> Self {
        let capacity = history_bars.max(warmup.saturating_mul(3)).max(1);
        Self {
            bars: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, bar: &OhlcvBar) {
        if self.bars.len() == self.capacity {
            self.bars.pop_front();
        }
        self.bars.push_back(bar.clone());
    }

    pub fn as_slice(&mut self) -> &[OhlcvBar] {
        self.bars.make_contiguous()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
