//! Percentage Price Oscillator.
//!
//! Line = 100 × (EMA(fast) - EMA(slow)) / EMA(base); signal = SMA(smoothing) of the
//! line; histogram = line - signal. A zero base EMA yields a zero line.
//! Warmup: max(fast, slow, base) - 1 + smoothing - 1 bars.

use crate::domain::indicator::{
    calculate_ema, IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue,
};
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_BASE: usize = 120;
pub const DEFAULT_SMOOTHING: usize = 120;

pub fn calculate_ppo(
    bars: &[OhlcvBar],
    fast: usize,
    slow: usize,
    base: usize,
    smoothing: usize,
) -> IndicatorSeries {
    let indicator_type = IndicatorType::Ppo {
        fast,
        slow,
        base,
        smoothing,
    };
    if bars.is_empty() || fast == 0 || slow == 0 || base == 0 || smoothing == 0 {
        return IndicatorSeries::empty(indicator_type);
    }

    let fast_ema = calculate_ema(bars, fast);
    let slow_ema = calculate_ema(bars, slow);
    let base_ema = calculate_ema(bars, base);
    let line_start = fast.max(slow).max(base) - 1;
    let signal_start = line_start + smoothing - 1;

    let lines: Vec<f64> = (0..bars.len())
        .map(|i| {
            let denominator = base_ema.values[i].value.primary();
            if i < line_start || denominator == 0.0 {
                return 0.0;
            }
            let spread = fast_ema.values[i].value.primary() - slow_ema.values[i].value.primary();
            100.0 * spread / denominator
        })
        .collect();

    let values = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let valid = i >= signal_start;
            let value = if valid {
                let line = lines[i];
                let signal =
                    lines[i + 1 - smoothing..=i].iter().sum::<f64>() / smoothing as f64;
                IndicatorValue::Macd {
                    line,
                    signal,
                    histogram: line - signal,
                }
            } else {
                IndicatorValue::Macd {
                    line: 0.0,
                    signal: 0.0,
                    histogram: 0.0,
                }
            };
            IndicatorPoint {
                time: bar.time,
                valid,
                value,
            }
        })
        .collect();

    IndicatorSeries {
        indicator_type,
        values,
    }
}
