//! Close against a delayed high/low channel.
//!
//! The channel spans `period` bars ending `CHANNEL_DELAY` bars back, so a breakout is
//! measured against where the range stood a few bars ago. Each bar records whether the
//! close is above the channel, below it or inside. Long holds while every state in the
//! survival window is above; short while every state is below.

use crate::adapters::signals::{BarHistory, ThresholdState};
use crate::domain::direction::Direction;
use crate::domain::indicator::{calculate_delayed_channel, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;
use crate::ports::signal_port::Signal;
use std::collections::VecDeque;

pub const CHANNEL_DELAY: usize = 5;

#[derive(Debug, Clone)]
pub struct ChannelBreakoutSignal {
    period: usize,
    direction: Direction,
    survival: usize,
    history: BarHistory,
    states: VecDeque<ThresholdState>,
}

impl ChannelBreakoutSignal {
    pub fn new(period: usize, direction: Direction, survival: usize, history_bars: usize) -> Self {
        let survival = survival.max(1);
        Self {
            period,
            direction,
            survival,
            history: BarHistory::new(history_bars, period + CHANNEL_DELAY),
            states: VecDeque::with_capacity(survival),
        }
    }

    /// Newest state last.
    pub fn states(&self) -> Vec<ThresholdState> {
        self.states.iter().copied().collect()
    }
}

impl Signal for ChannelBreakoutSignal {
    fn is_ready(&self) -> bool {
        self.states.len() == self.survival
    }

    fn evaluate(&self) -> bool {
        if !self.is_ready() {
            return false;
        }
        let target = match self.direction {
            Direction::LongOnly => ThresholdState::AboveUpper,
            Direction::ShortOnly => ThresholdState::BelowLower,
        };
        self.states.iter().all(|&s| s == target)
    }

    fn update(&mut self, bar: &OhlcvBar) {
        self.history.push(bar);
        let channel =
            calculate_delayed_channel(self.history.as_slice(), self.period, CHANNEL_DELAY)
                .latest();
        let Some(IndicatorValue::Channel { upper, lower }) = channel else {
            return;
        };
        let state = ThresholdState::position(bar.close, lower, upper);
        tracing::trace!(close = bar.close, upper, lower, ?state, "channel update");
        if self.states.len() == self.survival {
            self.states.pop_front();
        }
        self.states.push_back(state);
    }
}
