//! Donchian channel breakout with a survival window.
//!
//! Each bar marks +1 when the close reaches the upper band of the preceding `period`
//! bars, -1 when it reaches the lower band and 0 otherwise. The signal holds only when
//! every mark in the window agrees.

use crate::adapters::signals::BarHistory;
use crate::domain::indicator::{calculate_donchian, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::direction::Direction;
use crate::ports::signal_port::Signal;
use std::collections::VecDeque;

pub const SURVIVAL_BARS: usize = 2;

#[derive(Debug, Clone)]
pub struct DonchianSignal {
    period: usize,
    direction: Direction,
    history: BarHistory,
    marks: VecDeque<i8>,
}

impl DonchianSignal {
    pub fn new(period: usize, direction: Direction, history_bars: usize) -> Self {
        Self {
            period,
            direction,
            history: BarHistory::new(history_bars, period + 1),
            marks: VecDeque::with_capacity(SURVIVAL_BARS),
        }
    }

    /// Newest mark last.
    pub fn marks(&self) -> Vec<i8> {
        self.marks.iter().copied().collect()
    }
}

impl Signal for DonchianSignal {
    fn is_ready(&self) -> bool {
        self.marks.len() == SURVIVAL_BARS
    }

    fn evaluate(&self) -> bool {
        if !self.is_ready() {
            return false;
        }
        let target = self.direction.sign();
        self.marks.iter().all(|&m| m == target)
    }

    fn update(&mut self, bar: &OhlcvBar) {
        self.history.push(bar);
        let channel = calculate_donchian(self.history.as_slice(), self.period).latest();
        let Some(IndicatorValue::Channel { upper, lower }) = channel else {
            return;
        };
        let mark = if bar.close >= upper {
            1
        } else if bar.close <= lower {
            -1
        } else {
            0
        };
        if self.marks.len() == SURVIVAL_BARS {
            self.marks.pop_front();
        }
        self.marks.push_back(mark);
    }
}
