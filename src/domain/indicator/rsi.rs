//! Relative Strength Index with Wilder smoothing.
//!
//! The first average gain/loss is the simple mean over the first n price changes; after
//! that avg = (prev_avg * (n-1) + current) / n. RSI = 100 - 100 / (1 + gain/loss), and
//! 100 when there are no losses. Warmup: first n bars are invalid.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

fn rsi_from(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

pub fn calculate_rsi(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let mut values = Vec::with_capacity(bars.len());
    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    let n = period as f64;

    for (i, bar) in bars.iter().enumerate() {
        let mut point = IndicatorPoint {
            time: bar.time,
            valid: false,
            value: IndicatorValue::Simple(0.0),
        };

        if period > 0 && i > 0 {
            let change = bar.close - bars[i - 1].close;
            let gain = change.max(0.0);
            let loss = (-change).max(0.0);

            if i < period {
                avg_gain += gain;
                avg_loss += loss;
            } else if i == period {
                avg_gain = (avg_gain + gain) / n;
                avg_loss = (avg_loss + loss) / n;
                point.valid = true;
            } else {
                avg_gain = (avg_gain * (n - 1.0) + gain) / n;
                avg_loss = (avg_loss * (n - 1.0) + loss) / n;
                point.valid = true;
            }

            if point.valid {
                point.value = IndicatorValue::Simple(rsi_from(avg_gain, avg_loss));
            }
        }

        values.push(point);
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Rsi(period),
        values,
    }
}
