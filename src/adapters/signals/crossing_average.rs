//! Fast line versus slow line crossover.

use crate::adapters::signals::BarHistory;
use crate::domain::indicator::{
    calculate_ema, calculate_macd, calculate_ppo, calculate_sma, IndicatorValue,
};
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::direction::Direction;
use crate::ports::signal_port::Signal;

/// The pair of lines being compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossingLines {
    Sma { fast: usize, slow: usize },
    Ema { fast: usize, slow: usize },
    /// MACD line against its own signal line.
    Macd { fast: usize, slow: usize, signal: usize },
    /// PPO line against its moving average.
    Ppo {
        fast: usize,
        slow: usize,
        base: usize,
        smoothing: usize,
    },
}

impl CrossingLines {
    pub fn warmup(&self) -> usize {
        match *self {
            CrossingLines::Sma { fast, slow } | CrossingLines::Ema { fast, slow } => {
                fast.max(slow)
            }
            CrossingLines::Macd { fast, slow, signal } => fast.max(slow) + signal,
            CrossingLines::Ppo {
                fast,
                slow,
                base,
                smoothing,
            } => fast.max(slow).max(base) + smoothing - 1,
        }
    }

    /// fast - slow at the newest bar, once both lines are defined.
    fn difference(&self, bars: &[OhlcvBar]) -> Option<f64> {
        match *self {
            CrossingLines::Sma { fast, slow } => {
                let f = calculate_sma(bars, fast).latest()?;
                let s = calculate_sma(bars, slow).latest()?;
                Some(f.primary() - s.primary())
            }
            CrossingLines::Ema { fast, slow } => {
                let f = calculate_ema(bars, fast).latest()?;
                let s = calculate_ema(bars, slow).latest()?;
                Some(f.primary() - s.primary())
            }
            CrossingLines::Macd { fast, slow, signal } => {
                match calculate_macd(bars, fast, slow, signal).latest()? {
                    IndicatorValue::Macd { histogram, .. } => Some(histogram),
                    _ => None,
                }
            }
            CrossingLines::Ppo {
                fast,
                slow,
                base,
                smoothing,
            } => match calculate_ppo(bars, fast, slow, base, smoothing).latest()? {
                IndicatorValue::Macd { histogram, .. } => Some(histogram),
                _ => None,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossingState {
    Bullish,
    Bearish,
    Flat,
    FastCrossedSlowFromBelow,
    FastCrossedSlowFromAbove,
}

/// Long fires on the bar the fast line crosses above the slow one, short on the bar it
/// crosses below.
#[derive(Debug, Clone)]
pub struct CrossingAverageSignal {
    lines: CrossingLines,
    direction: Direction,
    history: BarHistory,
    last_sign: i8,
    state: Option<CrossingState>,
}

impl CrossingAverageSignal {
    pub fn new(lines: CrossingLines, direction: Direction, history_bars: usize) -> Self {
        Self {
            lines,
            direction,
            history: BarHistory::new(history_bars, lines.warmup()),
            last_sign: 0,
            state: None,
        }
    }

    pub fn state(&self) -> Option<CrossingState> {
        self.state
    }

    fn next_state(last: i8, sign: i8) -> CrossingState {
        match (last, sign) {
            (-1, 1) => CrossingState::FastCrossedSlowFromBelow,
            (1, -1) => CrossingState::FastCrossedSlowFromAbove,
            (_, 1) => CrossingState::Bullish,
            (_, -1) => CrossingState::Bearish,
            _ => CrossingState::Flat,
        }
    }
}

impl Signal for CrossingAverageSignal {
    fn is_ready(&self) -> bool {
        self.state.is_some()
    }

    fn evaluate(&self) -> bool {
        match (self.direction, self.state) {
            (Direction::LongOnly, Some(CrossingState::FastCrossedSlowFromBelow)) => true,
            (Direction::ShortOnly, Some(CrossingState::FastCrossedSlowFromAbove)) => true,
            _ => false,
        }
    }

    fn update(&mut self, bar: &OhlcvBar) {
        self.history.push(bar);
        let Some(diff) = self.lines.difference(self.history.as_slice()) else {
            return;
        };
        let sign = if diff > 0.0 {
            1
        } else if diff < 0.0 {
            -1
        } else {
            0
        };
        let state = Self::next_state(self.last_sign, sign);
        tracing::trace!(lines = ?self.lines, diff, ?state, "crossing update");
        self.state = Some(state);
        self.last_sign = sign;
    }
}
