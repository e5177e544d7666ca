//! MACD (Moving Average Convergence Divergence).
//!
//! Line = EMA(fast) - EMA(slow); signal = EMA(signal) of the line, seeded with the mean
//! of its first `signal` defined values; histogram = line - signal.
//! Warmup: max(fast, slow) - 1 + signal - 1 bars.

use crate::domain::indicator::{
    calculate_ema, IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue,
};
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

pub fn calculate_macd(
    bars: &[OhlcvBar],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> IndicatorSeries {
    let indicator_type = IndicatorType::Macd {
        fast,
        slow,
        signal: signal_period,
    };
    if bars.is_empty() || fast == 0 || slow == 0 || signal_period == 0 {
        return IndicatorSeries::empty(indicator_type);
    }

    let fast_ema = calculate_ema(bars, fast);
    let slow_ema = calculate_ema(bars, slow);
    let line_start = fast.max(slow) - 1;
    let signal_start = line_start + signal_period - 1;
    let k = 2.0 / (signal_period as f64 + 1.0);

    let mut values = Vec::with_capacity(bars.len());
    let mut seed = 0.0;
    let mut signal = 0.0;

    for (i, bar) in bars.iter().enumerate() {
        let line = fast_ema.values[i].value.primary() - slow_ema.values[i].value.primary();
        let valid = i >= signal_start;

        if i >= line_start {
            if i < signal_start {
                seed += line;
            } else if i == signal_start {
                signal = (seed + line) / signal_period as f64;
            } else {
                signal = line * k + signal * (1.0 - k);
            }
        }

        let (line, signal) = if valid { (line, signal) } else { (0.0, 0.0) };
        values.push(IndicatorPoint {
            time: bar.time,
            valid,
            value: IndicatorValue::Macd {
                line,
                signal,
                histogram: line - signal,
            },
        });
    }

    IndicatorSeries {
        indicator_type,
        values,
    }
}
