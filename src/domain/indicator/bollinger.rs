//! Bollinger Bands.
//!
//! Middle = SMA(n) of closes; upper/lower = middle ± mult × population stddev.
//! Warmup: first (n-1) bars are invalid.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_MULT_X100: u32 = 200;

pub fn calculate_bollinger(
    bars: &[OhlcvBar],
    period: usize,
    stddev_mult_x100: u32,
) -> IndicatorSeries {
    let indicator_type = IndicatorType::Bollinger {
        period,
        stddev_mult_x100,
    };
    if period == 0 {
        return IndicatorSeries::empty(indicator_type);
    }

    let mult = stddev_mult_x100 as f64 / 100.0;
    let values = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let valid = i + 1 >= period;
            let value = if valid {
                let window = &bars[i + 1 - period..=i];
                let mean = window.iter().map(|b| b.close).sum::<f64>() / period as f64;
                let variance = window
                    .iter()
                    .map(|b| (b.close - mean).powi(2))
                    .sum::<f64>()
                    / period as f64;
                let width = mult * variance.sqrt();
                IndicatorValue::Bollinger {
                    upper: mean + width,
                    middle: mean,
                    lower: mean - width,
                }
            } else {
                IndicatorValue::Bollinger {
                    upper: 0.0,
                    middle: 0.0,
                    lower: 0.0,
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
