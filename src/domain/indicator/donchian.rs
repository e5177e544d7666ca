//! Donchian channel of the preceding bars.
//!
//! For bar i: upper = max(high[i-n..i]), lower = min(low[i-n..i]). The current bar is
//! excluded so a close can break out of the channel. Warmup: first n bars are invalid.
//!
//! The delayed channel ends `delay` bars back: for bar i the window is
//! `[i+1-delay-n, i+1-delay)`. A delay of 1 is the plain Donchian channel.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_donchian(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    channel(bars, period, 1, IndicatorType::Donchian(period))
}

pub fn calculate_delayed_channel(bars: &[OhlcvBar], period: usize, delay: usize) -> IndicatorSeries {
    channel(
        bars,
        period,
        delay,
        IndicatorType::DelayedChannel { period, delay },
    )
}

fn channel(
    bars: &[OhlcvBar],
    period: usize,
    delay: usize,
    indicator_type: IndicatorType,
) -> IndicatorSeries {
    let values = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let valid = period > 0 && i + 1 >= delay + period;
            let value = if valid {
                let end = i + 1 - delay;
                let window = &bars[end - period..end];
                IndicatorValue::Channel {
                    upper: window.iter().map(|b| b.high).fold(f64::MIN, f64::max),
                    lower: window.iter().map(|b| b.low).fold(f64::MAX, f64::min),
                }
            } else {
                IndicatorValue::Channel {
                    upper: 0.0,
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
