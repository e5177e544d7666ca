//! Indicator selectors for configured chain slots.

use std::fmt;

/// What a chain slot is backed by. Codes are the configuration wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    None,
    SimpleMovingAverage,
    MovingAverageConvergenceDivergence,
    Stochastic,
    RelativeStrengthIndex,
    CommodityChannelIndex,
    MomentumPercent,
    WilliamsPercentR,
    PercentagePriceOscillator,
    AverageDirectionalIndex,
    NormalizedAverageTrueRange,
    BollingerBands,
    ExponentialMovingAverage,
    ChannelBreakout,
    DonchianTrend,
}

impl SignalKind {
    pub fn from_code(code: i64) -> Option<SignalKind> {
        let kind = match code {
            -1 => SignalKind::None,
            0 => SignalKind::SimpleMovingAverage,
            1 => SignalKind::MovingAverageConvergenceDivergence,
            2 => SignalKind::Stochastic,
            3 => SignalKind::RelativeStrengthIndex,
            4 => SignalKind::CommodityChannelIndex,
            5 => SignalKind::MomentumPercent,
            6 => SignalKind::WilliamsPercentR,
            7 => SignalKind::PercentagePriceOscillator,
            8 => SignalKind::AverageDirectionalIndex,
            9 => SignalKind::NormalizedAverageTrueRange,
            10 => SignalKind::BollingerBands,
            11 => SignalKind::ExponentialMovingAverage,
            12 => SignalKind::ChannelBreakout,
            13 => SignalKind::DonchianTrend,
            _ => return None,
        };
        Some(kind)
    }

    /// Lookback used when the config asks to ignore its own periods.
    pub fn default_period(self) -> usize {
        match self {
            SignalKind::RelativeStrengthIndex => 11,
            SignalKind::MomentumPercent => 60,
            SignalKind::Stochastic => 14,
            SignalKind::CommodityChannelIndex
            | SignalKind::BollingerBands
            | SignalKind::AverageDirectionalIndex
            | SignalKind::ChannelBreakout
            | SignalKind::DonchianTrend => 20,
            SignalKind::PercentagePriceOscillator => 120,
            _ => 14,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SignalKind::None => "None",
            SignalKind::SimpleMovingAverage => "SimpleMovingAverage",
            SignalKind::MovingAverageConvergenceDivergence => "MovingAverageConvergenceDivergence",
            SignalKind::Stochastic => "Stochastic",
            SignalKind::RelativeStrengthIndex => "RelativeStrengthIndex",
            SignalKind::CommodityChannelIndex => "CommodityChannelIndex",
            SignalKind::MomentumPercent => "MomentumPercent",
            SignalKind::WilliamsPercentR => "WilliamsPercentR",
            SignalKind::PercentagePriceOscillator => "PercentagePriceOscillator",
            SignalKind::AverageDirectionalIndex => "AverageDirectionalIndex",
            SignalKind::NormalizedAverageTrueRange => "NormalizedAverageTrueRange",
            SignalKind::BollingerBands => "BollingerBands",
            SignalKind::ExponentialMovingAverage => "ExponentialMovingAverage",
            SignalKind::ChannelBreakout => "ChannelBreakout",
            SignalKind::DonchianTrend => "DonchianTrend",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
