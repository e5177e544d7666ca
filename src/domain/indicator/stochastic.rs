//! Stochastic oscillator.
//!
//! %K = 100 × (C - lowest low) / (highest high - lowest low) over the last `k_period`
//! bars, 50 when the range is flat. %D = SMA(`d_period`) of %K.
//! A point is valid once %D is defined: warmup is (k_period - 1) + (d_period - 1) bars.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_D_PERIOD: usize = 3;

fn percent_k(window: &[OhlcvBar]) -> f64 {
    let highest = window.iter().map(|b| b.high).fold(f64::MIN, f64::max);
    let lowest = window.iter().map(|b| b.low).fold(f64::MAX, f64::min);
    let range = highest - lowest;
    match window.last() {
        Some(bar) if range > 0.0 => (bar.close - lowest) / range * 100.0,
        _ => 50.0,
    }
}

pub fn calculate_stochastic(bars: &[OhlcvBar], k_period: usize, d_period: usize) -> IndicatorSeries {
    let indicator_type = IndicatorType::Stochastic { k_period, d_period };
    if k_period == 0 || d_period == 0 {
        return IndicatorSeries::empty(indicator_type);
    }

    let k_values: Vec<Option<f64>> = (0..bars.len())
        .map(|i| (i + 1 >= k_period).then(|| percent_k(&bars[i + 1 - k_period..=i])))
        .collect();

    let values = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let d = if i + 1 >= k_period + d_period - 1 {
                let window = &k_values[i + 1 - d_period..=i];
                let sum: f64 = window.iter().flatten().sum();
                Some(sum / d_period as f64)
            } else {
                None
            };
            let (valid, k, d) = match (k_values[i], d) {
                (Some(k), Some(d)) => (true, k, d),
                _ => (false, 0.0, 0.0),
            };
            IndicatorPoint {
                time: bar.time,
                valid,
                value: IndicatorValue::Stochastic { k, d },
            }
        })
        .collect();

    IndicatorSeries {
        indicator_type,
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::test_bars::from_hlc;
    use approx::assert_relative_eq;

    fn kd(value: IndicatorValue) -> (f64, f64) {
        match value {
            IndicatorValue::Stochastic { k, d } => (k, d),
            other => panic!("expected stochastic value, got {other:?}"),
        }
    }

    #[test]
    fn stochastic_warmup() {
        let bars = from_hlc(&[(2.0, 1.0, 1.5); 6]);
        let series = calculate_stochastic(&bars, 3, 2);
        let valid: Vec<bool> = series.values.iter().map(|p| p.valid).collect();
        assert_eq!(valid, vec![false, false, false, true, true, true]);
    }

    #[test]
    fn stochastic_k_position_in_range() {
        // window high 12, low 8, close 11 -> 75
        let bars = from_hlc(&[(10.0, 8.0, 9.0), (12.0, 9.0, 10.0), (11.0, 9.0, 11.0)]);
        let series = calculate_stochastic(&bars, 3, 1);
        let (k, d) = kd(series.values[2].value);
        assert_relative_eq!(k, 75.0);
        assert_relative_eq!(d, 75.0);
    }

    #[test]
    fn stochastic_d_smooths_k() {
        let bars = from_hlc(&[
            (10.0, 0.0, 5.0),
            (10.0, 0.0, 10.0),
            (10.0, 0.0, 0.0),
        ]);
        let series = calculate_stochastic(&bars, 1, 2);
        // single-bar windows: k = 50, 100, 0
        let (k, d) = kd(series.values[2].value);
        assert_relative_eq!(k, 0.0);
        assert_relative_eq!(d, 50.0);
    }

    #[test]
    fn stochastic_flat_range_is_neutral() {
        let bars = from_hlc(&[(5.0, 5.0, 5.0); 3]);
        let series = calculate_stochastic(&bars, 3, 1);
        assert_relative_eq!(series.latest().unwrap().primary(), 50.0);
    }

    #[test]
    fn stochastic_zero_periods() {
        let bars = from_hlc(&[(1.0, 1.0, 1.0)]);
        assert!(calculate_stochastic(&bars, 0, 3).values.is_empty());
        assert!(calculate_stochastic(&bars, 14, 0).values.is_empty());
    }
}
