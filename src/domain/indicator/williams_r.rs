//! Williams %R.
//!
//! %R = -100 × (highest high - C) / (highest high - lowest low) over the last n bars,
//! -50 when the range is flat. -100 means the close sits on the low, 0 on the high.
//! Warmup: first (n-1) bars are invalid.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_williams_r(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    if period == 0 {
        return IndicatorSeries::empty(IndicatorType::WilliamsR(period));
    }

    let values = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let valid = i + 1 >= period;
            let value = if valid {
                let window = &bars[i + 1 - period..=i];
                let highest = window.iter().map(|b| b.high).fold(f64::MIN, f64::max);
                let lowest = window.iter().map(|b| b.low).fold(f64::MAX, f64::min);
                let range = highest - lowest;
                if range > 0.0 {
                    (highest - bar.close) / range * -100.0
                } else {
                    -50.0
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
        indicator_type: IndicatorType::WilliamsR(period),
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::test_bars::from_hlc;
    use approx::assert_relative_eq;

    #[test]
    fn williams_r_position_in_range() {
        // window high 12, low 8, close 11 -> -25
        let bars = from_hlc(&[(10.0, 8.0, 9.0), (12.0, 9.0, 10.0), (11.0, 9.0, 11.0)]);
        let series = calculate_williams_r(&bars, 3);
        assert!(!series.values[1].valid);
        assert_relative_eq!(series.latest().unwrap().primary(), -25.0);
    }

    #[test]
    fn williams_r_extremes() {
        let at_high = from_hlc(&[(10.0, 5.0, 6.0), (12.0, 6.0, 12.0)]);
        assert_relative_eq!(calculate_williams_r(&at_high, 2).latest().unwrap().primary(), 0.0);

        let at_low = from_hlc(&[(10.0, 5.0, 6.0), (12.0, 4.0, 4.0)]);
        assert_relative_eq!(
            calculate_williams_r(&at_low, 2).latest().unwrap().primary(),
            -100.0
        );
    }

    #[test]
    fn williams_r_flat_range_is_neutral() {
        let bars = from_hlc(&[(5.0, 5.0, 5.0); 4]);
        assert_relative_eq!(calculate_williams_r(&bars, 3).latest().unwrap().primary(), -50.0);
    }

    #[test]
    fn williams_r_zero_period() {
        let bars = from_hlc(&[(1.0, 1.0, 1.0)]);
        assert!(calculate_williams_r(&bars, 0).values.is_empty());
    }
}
