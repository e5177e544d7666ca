//! Average Directional Index (Wilder).
//!
//! For each bar after the first: TR = max(H-L, |H-Cprev|, |L-Cprev|),
//! +DM = H-Hprev when it exceeds Lprev-L and is positive, -DM symmetrically.
//! TR and both DMs are Wilder-smoothed over n (seeded with the sum of the first n),
//! ±DI = 100 × smoothed DM / smoothed TR, DX = 100 × |+DI - -DI| / (+DI + -DI).
//! ADX is seeded with the mean of the first n DX values, then
//! ADX = (ADXprev × (n-1) + DX) / n. Warmup: first (2n-1) bars are invalid.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_adx(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    if period == 0 || bars.is_empty() {
        return IndicatorSeries::empty(IndicatorType::Adx(period));
    }

    let n = period as f64;
    let first_adx = 2 * period - 1;
    let mut tr_sum = 0.0;
    let mut plus_sum = 0.0;
    let mut minus_sum = 0.0;
    let mut dx_seed = 0.0;
    let mut adx = 0.0;
    let mut values = Vec::with_capacity(bars.len());

    for (i, bar) in bars.iter().enumerate() {
        let mut valid = false;
        let mut plus_di = 0.0;
        let mut minus_di = 0.0;

        if i >= 1 {
            let prev = &bars[i - 1];
            let tr = (bar.high - bar.low)
                .max((bar.high - prev.close).abs())
                .max((bar.low - prev.close).abs());
            let up = bar.high - prev.high;
            let down = prev.low - bar.low;
            let plus_dm = if up > down && up > 0.0 { up } else { 0.0 };
            let minus_dm = if down > up && down > 0.0 { down } else { 0.0 };

            if i <= period {
                tr_sum += tr;
                plus_sum += plus_dm;
                minus_sum += minus_dm;
            } else {
                tr_sum = tr_sum - tr_sum / n + tr;
                plus_sum = plus_sum - plus_sum / n + plus_dm;
                minus_sum = minus_sum - minus_sum / n + minus_dm;
            }

            if i >= period {
                if tr_sum > 0.0 {
                    plus_di = 100.0 * plus_sum / tr_sum;
                    minus_di = 100.0 * minus_sum / tr_sum;
                }
                let di_sum = plus_di + minus_di;
                let dx = if di_sum > 0.0 {
                    100.0 * (plus_di - minus_di).abs() / di_sum
                } else {
                    0.0
                };

                if i < first_adx {
                    dx_seed += dx;
                } else if i == first_adx {
                    adx = (dx_seed + dx) / n;
                    valid = true;
                } else {
                    adx = (adx * (n - 1.0) + dx) / n;
                    valid = true;
                }
            }
        }

        let value = if valid {
            IndicatorValue::Directional {
                adx,
                plus_di,
                minus_di,
            }
        } else {
            IndicatorValue::Directional {
                adx: 0.0,
                plus_di: 0.0,
                minus_di: 0.0,
            }
        };
        values.push(IndicatorPoint {
            time: bar.time,
            valid,
            value,
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Adx(period),
        values,
    }
}
