//! Technical indicator calculators.
//!
//! Every calculator is a batch function over a bar slice that returns one
//! `IndicatorPoint` per input bar. Points inside the warmup window are marked invalid.
//! Signal adapters recompute a series over their bounded history on each update and
//! read the newest point with [`IndicatorSeries::latest`].

pub mod adx;
pub mod bollinger;
pub mod cci;
pub mod donchian;
pub mod ema;
pub mod macd;
pub mod ppo;
pub mod roc;
pub mod rsi;
pub mod sma;
pub mod stochastic;
pub mod williams_r;

pub use adx::calculate_adx;
pub use bollinger::calculate_bollinger;
pub use cci::calculate_cci;
pub use donchian::{calculate_delayed_channel, calculate_donchian};
pub use ema::calculate_ema;
pub use macd::calculate_macd;
pub use ppo::calculate_ppo;
pub use roc::calculate_roc;
pub use rsi::calculate_rsi;
pub use sma::calculate_sma;
pub use stochastic::calculate_stochastic;
pub use williams_r::calculate_williams_r;

use chrono::NaiveDateTime;
use std::fmt;

#[derive(Debug, Clone)]
pub struct IndicatorPoint {
    pub time: NaiveDateTime,
    pub valid: bool,
    pub value: IndicatorValue,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorValue {
    Simple(f64),
    Macd {
        line: f64,
        signal: f64,
        histogram: f64,
    },
    Stochastic {
        k: f64,
        d: f64,
    },
    Bollinger {
        upper: f64,
        middle: f64,
        lower: f64,
    },
    Channel {
        upper: f64,
        lower: f64,
    },
    Directional {
        adx: f64,
        plus_di: f64,
        minus_di: f64,
    },
}

impl IndicatorValue {
    /// The headline number of a value: the line for MACD and PPO, %K for stochastic,
    /// the middle band for Bollinger, the midpoint for a channel, ADX for directional.
    pub fn primary(&self) -> f64 {
        match *self {
            IndicatorValue::Simple(v) => v,
            IndicatorValue::Macd { line, .. } => line,
            IndicatorValue::Stochastic { k, .. } => k,
            IndicatorValue::Bollinger { middle, .. } => middle,
            IndicatorValue::Channel { upper, lower } => (upper + lower) / 2.0,
            IndicatorValue::Directional { adx, .. } => adx,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Ema(usize),
    Rsi(usize),
    Roc(usize),
    Cci(usize),
    WilliamsR(usize),
    Adx(usize),
    Donchian(usize),
    DelayedChannel {
        period: usize,
        delay: usize,
    },
    Macd {
        fast: usize,
        slow: usize,
        signal: usize,
    },
    Ppo {
        fast: usize,
        slow: usize,
        base: usize,
        smoothing: usize,
    },
    Stochastic {
        k_period: usize,
        d_period: usize,
    },
    Bollinger {
        period: usize,
        stddev_mult_x100: u32,
    },
}

#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    pub(crate) fn empty(indicator_type: IndicatorType) -> Self {
        Self {
            indicator_type,
            values: Vec::new(),
        }
    }

    /// Value of the newest point, if that point is past warmup.
    pub fn latest(&self) -> Option<IndicatorValue> {
        self.values
            .last()
            .filter(|p| p.valid)
            .map(|p| p.value)
    }

    /// Value of the point before the newest, if valid.
    pub fn previous(&self) -> Option<IndicatorValue> {
        let n = self.values.len();
        if n < 2 {
            return None;
        }
        let point = &self.values[n - 2];
        point.valid.then_some(point.value)
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Ema(period) => write!(f, "EMA({})", period),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorType::Roc(period) => write!(f, "ROC({})", period),
            IndicatorType::Cci(period) => write!(f, "CCI({})", period),
            IndicatorType::WilliamsR(period) => write!(f, "WILLR({})", period),
            IndicatorType::Adx(period) => write!(f, "ADX({})", period),
            IndicatorType::Donchian(period) => write!(f, "DONCHIAN({})", period),
            IndicatorType::DelayedChannel { period, delay } => {
                write!(f, "CHANNEL({},{})", period, delay)
            }
            IndicatorType::Macd { fast, slow, signal } => {
                write!(f, "MACD({},{},{})", fast, slow, signal)
            }
            IndicatorType::Ppo {
                fast,
                slow,
                base,
                smoothing,
            } => write!(f, "PPO({},{},{},{})", fast, slow, base, smoothing),
            IndicatorType::Stochastic { k_period, d_period } => {
                write!(f, "STOCHASTIC({},{})", k_period, d_period)
            }
            IndicatorType::Bollinger {
                period,
                stddev_mult_x100,
            } => {
                let mult = *stddev_mult_x100 as f64 / 100.0;
                write!(f, "BOLLINGER({},{})", period, mult)
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_type_display() {
        assert_eq!(IndicatorType::Sma(20).to_string(), "SMA(20)");
        assert_eq!(IndicatorType::Donchian(20).to_string(), "DONCHIAN(20)");
        let macd = IndicatorType::Macd {
            fast: 12,
            slow: 26,
            signal: 9,
        };
        assert_eq!(macd.to_string(), "MACD(12,26,9)");
        let boll = IndicatorType::Bollinger {
            period: 20,
            stddev_mult_x100: 200,
        };
        assert_eq!(boll.to_string(), "BOLLINGER(20,2)");
        let ppo = IndicatorType::Ppo {
            fast: 12,
            slow: 26,
            base: 120,
            smoothing: 120,
        };
        assert_eq!(ppo.to_string(), "PPO(12,26,120,120)");
        assert_eq!(
            IndicatorType::DelayedChannel { period: 20, delay: 5 }.to_string(),
            "CHANNEL(20,5)"
        );
    }

    #[test]
    fn latest_skips_warmup() {
        let bars = test_bars::from_closes(&[1.0, 2.0, 3.0]);
        let series = calculate_sma(&bars, 3);
        assert_eq!(series.latest(), Some(IndicatorValue::Simple(2.0)));
        assert_eq!(series.previous(), None);

        let short = calculate_sma(&bars[..2], 3);
        assert_eq!(short.latest(), None);
    }

    #[test]
    fn latest_on_empty_series() {
        let series = IndicatorSeries::empty(IndicatorType::Rsi(14));
        assert!(series.latest().is_none());
        assert!(series.previous().is_none());
    }

    #[test]
    fn primary_values() {
        assert_eq!(IndicatorValue::Simple(4.0).primary(), 4.0);
        let macd = IndicatorValue::Macd {
            line: 1.5,
            signal: 1.0,
            histogram: 0.5,
        };
        assert_eq!(macd.primary(), 1.5);
        let channel = IndicatorValue::Channel {
            upper: 10.0,
            lower: 6.0,
        };
        assert_eq!(channel.primary(), 8.0);
        let directional = IndicatorValue::Directional {
            adx: 30.0,
            plus_di: 25.0,
            minus_di: 10.0,
        };
        assert_eq!(directional.primary(), 30.0);
    }
}
