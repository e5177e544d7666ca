//! Builds entry and exit rules from configuration.
//!
//! Slot `i` of a side reads `indicator{i}`, `indicator{i}_direction` and, for every slot
//! except the last, `operator{i}`. Empty slots (`-1`) and normalized ATR (`9`) become an
//! always-true constant signal.

use crate::adapters::signals::{
    ChannelBreakoutSignal, ConstantSignal, CrossingAverageSignal, CrossingLines, DonchianSignal,
    OscillatorSignal, OscillatorSource,
};
use crate::domain::config_validation::{read_rule_settings, read_slots, RuleSettings, SlotSpec};
use crate::domain::error::SigchainError;
use crate::domain::indicator::macd::{DEFAULT_FAST, DEFAULT_SIGNAL, DEFAULT_SLOW};
use crate::domain::indicator::ppo::{DEFAULT_BASE, DEFAULT_SMOOTHING};
use crate::domain::rule::Rule;
use crate::domain::signal::SignalNode;
use crate::domain::signal_kind::SignalKind;
use crate::domain::strategy::Strategy;
use crate::ports::config_port::ConfigPort;
use crate::ports::signal_port::Signal;

const DEFAULT_FAST_AVERAGE: usize = 50;
const DEFAULT_SLOW_AVERAGE: usize = 200;

/// Survival windows used when `enable_survival` is set.
pub const STOCHASTIC_SURVIVAL: usize = 3;
pub const BAND_SURVIVAL: usize = 4;

fn average_periods(settings: &RuleSettings) -> (usize, usize) {
    match settings.periods {
        Some(p) => (p.fast, p.slow),
        None => (DEFAULT_FAST_AVERAGE, DEFAULT_SLOW_AVERAGE),
    }
}

fn single_period(kind: SignalKind, settings: &RuleSettings) -> usize {
    settings
        .periods
        .map(|p| p.period)
        .unwrap_or_else(|| kind.default_period())
}

/// Consecutive bars a signal of this kind must hold before it fires.
pub fn survival_window(kind: SignalKind, settings: &RuleSettings) -> usize {
    if !settings.survival {
        return 1;
    }
    match kind {
        SignalKind::Stochastic => STOCHASTIC_SURVIVAL,
        SignalKind::BollingerBands | SignalKind::ChannelBreakout => BAND_SURVIVAL,
        _ => 1,
    }
}

/// Instantiate the signal for one slot.
pub fn build_signal(slot: &SlotSpec, settings: &RuleSettings) -> Box<dyn Signal> {
    let direction = slot.direction;
    let history = settings.history_bars;
    let period = single_period(slot.kind, settings);
    let survival = survival_window(slot.kind, settings);
    let oscillator = |source: OscillatorSource| -> Box<dyn Signal> {
        Box::new(OscillatorSignal::new(source, direction, survival, history))
    };

    match slot.kind {
        SignalKind::None | SignalKind::NormalizedAverageTrueRange => Box::new(ConstantSignal(true)),
        SignalKind::SimpleMovingAverage => {
            let (fast, slow) = average_periods(settings);
            Box::new(CrossingAverageSignal::new(
                CrossingLines::Sma { fast, slow },
                direction,
                history,
            ))
        }
        SignalKind::ExponentialMovingAverage => {
            let (fast, slow) = average_periods(settings);
            Box::new(CrossingAverageSignal::new(
                CrossingLines::Ema { fast, slow },
                direction,
                history,
            ))
        }
        SignalKind::MovingAverageConvergenceDivergence => {
            let lines = match settings.periods {
                Some(p) => CrossingLines::Macd {
                    fast: p.fast,
                    slow: p.slow,
                    signal: p.signal,
                },
                None => CrossingLines::Macd {
                    fast: DEFAULT_FAST,
                    slow: DEFAULT_SLOW,
                    signal: DEFAULT_SIGNAL,
                },
            };
            Box::new(CrossingAverageSignal::new(lines, direction, history))
        }
        SignalKind::PercentagePriceOscillator => {
            let lines = match settings.periods {
                Some(p) => CrossingLines::Ppo {
                    fast: p.fast,
                    slow: p.slow,
                    base: p.period,
                    smoothing: p.period,
                },
                None => CrossingLines::Ppo {
                    fast: DEFAULT_FAST,
                    slow: DEFAULT_SLOW,
                    base: DEFAULT_BASE,
                    smoothing: DEFAULT_SMOOTHING,
                },
            };
            Box::new(CrossingAverageSignal::new(lines, direction, history))
        }
        SignalKind::Stochastic => oscillator(OscillatorSource::Stochastic { period }),
        SignalKind::RelativeStrengthIndex => oscillator(OscillatorSource::Rsi { period }),
        SignalKind::CommodityChannelIndex => oscillator(OscillatorSource::Cci { period }),
        SignalKind::MomentumPercent => oscillator(OscillatorSource::Momentum { period }),
        SignalKind::BollingerBands => oscillator(OscillatorSource::Bollinger { period }),
        SignalKind::WilliamsPercentR => oscillator(OscillatorSource::WilliamsR { period }),
        SignalKind::AverageDirectionalIndex => oscillator(OscillatorSource::Adx { period }),
        SignalKind::ChannelBreakout => Box::new(ChannelBreakoutSignal::new(
            period, direction, survival, history,
        )),
        SignalKind::DonchianTrend => Box::new(DonchianSignal::new(period, direction, history)),
    }
}

/// Build the rule for one side (`entry` or `exit`).
pub fn build_rule(
    config: &dyn ConfigPort,
    side: &str,
    settings: &RuleSettings,
) -> Result<Rule, SigchainError> {
    let slots = read_slots(config, side, settings.max_signals)?;
    let mut nodes = Vec::with_capacity(slots.len());

    for slot in &slots {
        tracing::debug!(
            side,
            slot = slot.index,
            kind = %slot.kind,
            direction = ?slot.direction,
            operator = ?slot.operator,
            "configured signal slot"
        );
        let node = SignalNode::new(slot.kind.name(), build_signal(slot, settings));
        nodes.push(match slot.operator {
            Some(op) => node.with_operator(op),
            None => node,
        });
    }

    Rule::new(nodes)
}

/// Build the strategy's entry and exit rules.
pub fn build_strategy(config: &dyn ConfigPort) -> Result<Strategy, SigchainError> {
    let settings = read_rule_settings(config)?;
    let entry = build_rule(config, "entry", &settings)?;
    let exit = build_rule(config, "exit", &settings)?;
    Ok(Strategy::new(settings.name, entry, exit))
}
