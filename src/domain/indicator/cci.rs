//! Commodity Channel Index.
//!
//! CCI = (TP - SMA(TP)) / (0.015 × mean absolute deviation of TP), over typical prices
//! TP = (H + L + C) / 3. Zero when the deviation is zero. Warmup: first (n-1) bars.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

const LAMBERT: f64 = 0.015;

pub fn calculate_cci(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    if period == 0 {
        return IndicatorSeries::empty(IndicatorType::Cci(period));
    }

    let typical: Vec<f64> = bars.iter().map(OhlcvBar::typical_price).collect();
    let values = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let valid = i + 1 >= period;
            let cci = if valid {
                let window = &typical[i + 1 - period..=i];
                let mean = window.iter().sum::<f64>() / period as f64;
                let deviation =
                    window.iter().map(|tp| (tp - mean).abs()).sum::<f64>() / period as f64;
                if deviation == 0.0 {
                    0.0
                } else {
                    (typical[i] - mean) / (LAMBERT * deviation)
                }
            } else {
                0.0
            };
            IndicatorPoint {
                time: bar.time,
                valid,
                value: IndicatorValue::Simple(cci),
            }
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::Cci(period),
        values,
    }
}
