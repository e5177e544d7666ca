//! Exponential Moving Average.
//!
//! k = 2/(n+1), seeded with the SMA of the first n closes, then
//! EMA[i] = C[i]*k + EMA[i-1]*(1-k). Warmup: first (n-1) bars are invalid.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_ema(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    if period == 0 || bars.is_empty() {
        return IndicatorSeries::empty(IndicatorType::Ema(period));
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut values = Vec::with_capacity(bars.len());
    let mut seed = 0.0;
    let mut ema = 0.0;

    for (i, bar) in bars.iter().enumerate() {
        let valid = if i + 1 < period {
            seed += bar.close;
            false
        } else if i + 1 == period {
            seed += bar.close;
            ema = seed / period as f64;
            true
        } else {
            ema = bar.close * k + ema * (1.0 - k);
            true
        };
        values.push(IndicatorPoint {
            time: bar.time,
            valid,
            value: IndicatorValue::Simple(if valid { ema } else { 0.0 }),
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Ema(period),
        values,
    }
}
