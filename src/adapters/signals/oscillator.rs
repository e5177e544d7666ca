//! Oscillator against a lower and an upper threshold.
//!
//! The oscillator's position (below, between, above) is folded with the previous state
//! into one of seven states. Long fires when the value comes back up through the lower
//! threshold; short fires when it comes back down through the upper one.
//!
//! With a survival window longer than one bar, the crossing must also have been
//! preceded by a run of states on the same side: every state in the window must sit
//! below the middle for a long signal and above it for a short one.

use crate::adapters::signals::BarHistory;
use crate::domain::indicator::{
    calculate_adx, calculate_bollinger, calculate_cci, calculate_roc, calculate_rsi,
    calculate_stochastic, calculate_williams_r, IndicatorValue,
};
use crate::domain::indicator::bollinger::DEFAULT_MULT_X100;
use crate::domain::indicator::stochastic::DEFAULT_D_PERIOD;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::direction::Direction;
use crate::ports::signal_port::Signal;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdState {
    CrossedLowerFromAbove,
    BelowLower,
    CrossedLowerFromBelow,
    InBetween,
    CrossedUpperFromAbove,
    AboveUpper,
    CrossedUpperFromBelow,
}

impl ThresholdState {
    /// Signed encoding: magnitude 2 is "outside", 3 is "just crossed outward",
    /// 1 is "just crossed back inward", the sign picks the threshold.
    pub fn code(self) -> i8 {
        match self {
            ThresholdState::CrossedLowerFromAbove => -3,
            ThresholdState::BelowLower => -2,
            ThresholdState::CrossedLowerFromBelow => -1,
            ThresholdState::InBetween => 0,
            ThresholdState::CrossedUpperFromAbove => 1,
            ThresholdState::AboveUpper => 2,
            ThresholdState::CrossedUpperFromBelow => 3,
        }
    }

    fn from_code(code: i8) -> ThresholdState {
        match code {
            -3 => ThresholdState::CrossedLowerFromAbove,
            -2 => ThresholdState::BelowLower,
            -1 => ThresholdState::CrossedLowerFromBelow,
            1 => ThresholdState::CrossedUpperFromAbove,
            2 => ThresholdState::AboveUpper,
            3 => ThresholdState::CrossedUpperFromBelow,
            _ => ThresholdState::InBetween,
        }
    }

    /// Where a value sits relative to the thresholds: `BelowLower`, `InBetween` or
    /// `AboveUpper`.
    pub fn position(value: f64, lower: f64, upper: f64) -> ThresholdState {
        if value > upper {
            ThresholdState::AboveUpper
        } else if value < lower {
            ThresholdState::BelowLower
        } else {
            ThresholdState::InBetween
        }
    }

    /// Fold the current position into the previous state.
    pub fn next(previous: ThresholdState, position: ThresholdState) -> ThresholdState {
        let p = previous.code();
        let a = position.code();
        let code = if a == 0 {
            if p.abs() > 1 { p.signum() } else { 0 }
        } else if p * a <= 0 || (p + a).abs() == 3 {
            a.signum() * 3
        } else {
            a.signum() * 2
        };
        ThresholdState::from_code(code)
    }
}

/// What is being compared against the thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OscillatorSource {
    /// RSI against 30/70.
    Rsi { period: usize },
    /// Rate of change in percent against -5/5.
    Momentum { period: usize },
    /// CCI against -100/100.
    Cci { period: usize },
    /// Stochastic %K against 20/80.
    Stochastic { period: usize },
    /// Close against Bollinger bands (2 standard deviations).
    Bollinger { period: usize },
    /// Williams %R against -80/-20.
    WilliamsR { period: usize },
    /// ADX against 25 on both sides.
    Adx { period: usize },
}

impl OscillatorSource {
    pub fn warmup(&self) -> usize {
        match *self {
            OscillatorSource::Rsi { period } | OscillatorSource::Momentum { period } => period + 1,
            OscillatorSource::Cci { period }
            | OscillatorSource::Bollinger { period }
            | OscillatorSource::WilliamsR { period } => period,
            OscillatorSource::Stochastic { period } => period + DEFAULT_D_PERIOD - 1,
            OscillatorSource::Adx { period } => 2 * period,
        }
    }

    /// `(value, lower, upper)` at the newest bar, once defined.
    fn reading(&self, bars: &[OhlcvBar]) -> Option<(f64, f64, f64)> {
        match *self {
            OscillatorSource::Rsi { period } => {
                let v = calculate_rsi(bars, period).latest()?.primary();
                Some((v, 30.0, 70.0))
            }
            OscillatorSource::Momentum { period } => {
                let v = calculate_roc(bars, period).latest()?.primary();
                Some((v, -5.0, 5.0))
            }
            OscillatorSource::Cci { period } => {
                let v = calculate_cci(bars, period).latest()?.primary();
                Some((v, -100.0, 100.0))
            }
            OscillatorSource::Stochastic { period } => {
                let v = calculate_stochastic(bars, period, DEFAULT_D_PERIOD)
                    .latest()?
                    .primary();
                Some((v, 20.0, 80.0))
            }
            OscillatorSource::Bollinger { period } => {
                let close = bars.last()?.close;
                match calculate_bollinger(bars, period, DEFAULT_MULT_X100).latest()? {
                    IndicatorValue::Bollinger { upper, lower, .. } => Some((close, lower, upper)),
                    _ => None,
                }
            }
            OscillatorSource::WilliamsR { period } => {
                let v = calculate_williams_r(bars, period).latest()?.primary();
                Some((v, -80.0, -20.0))
            }
            OscillatorSource::Adx { period } => {
                let v = calculate_adx(bars, period).latest()?.primary();
                Some((v, 25.0, 25.0))
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct OscillatorSignal {
    source: OscillatorSource,
    direction: Direction,
    survival: usize,
    history: BarHistory,
    states: VecDeque<ThresholdState>,
}

impl OscillatorSignal {
    /// `survival` is the number of consecutive states that must agree; 0 is treated as 1.
    pub fn new(
        source: OscillatorSource,
        direction: Direction,
        survival: usize,
        history_bars: usize,
    ) -> Self {
        let survival = survival.max(1);
        Self {
            source,
            direction,
            survival,
            history: BarHistory::new(history_bars, source.warmup()),
            states: VecDeque::with_capacity(survival),
        }
    }

    /// Newest state.
    pub fn state(&self) -> Option<ThresholdState> {
        self.states.back().copied()
    }

    pub fn survival(&self) -> usize {
        self.survival
    }
}

impl Signal for OscillatorSignal {
    fn is_ready(&self) -> bool {
        self.states.len() == self.survival
    }

    fn evaluate(&self) -> bool {
        if !self.is_ready() {
            return false;
        }
        let (trigger, side) = match self.direction {
            Direction::LongOnly => (ThresholdState::CrossedLowerFromBelow, -1),
            Direction::ShortOnly => (ThresholdState::CrossedUpperFromAbove, 1),
        };
        self.state() == Some(trigger) && self.states.iter().all(|s| s.code().signum() == side)
    }

    fn update(&mut self, bar: &OhlcvBar) {
        self.history.push(bar);
        let Some((value, lower, upper)) = self.source.reading(self.history.as_slice()) else {
            return;
        };
        let position = ThresholdState::position(value, lower, upper);
        let state = match self.state() {
            Some(previous) => ThresholdState::next(previous, position),
            None => position,
        };
        tracing::trace!(source = ?self.source, value, ?state, "oscillator update");
        if self.states.len() == self.survival {
            self.states.pop_front();
        }
        self.states.push_back(state);
    }
}
