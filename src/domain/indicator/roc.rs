//! Rate of change, in percent. Backs the momentum-percent signal.
//!
//! ROC(n)[i] = (C[i] - C[i-n]) / C[i-n] * 100, and 0 when C[i-n] is 0.
//! Warmup: first n bars are invalid.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_roc(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let values = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let valid = period > 0 && i >= period;
            let value = if valid {
                let base = bars[i - period].close;
                if base == 0.0 {
                    0.0
                } else {
                    (bar.close - base) / base * 100.0
                }
            } else {
                0.0
            };
            IndicatorPoint {
                time: bar.time,
                valid,
                value: IndicatorValue::Simple(value),
            }
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::Roc(period),
        values,
    }
}
