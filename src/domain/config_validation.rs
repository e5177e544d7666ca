//! Rule configuration reading and validation.
//!
//! Checks every `[rule]`, `[entry]` and `[exit]` key before any chain is built, and
//! hands the signal factory typed settings so it never re-parses raw strings.

use crate::domain::error::SigchainError;
use crate::domain::direction::Direction;
use crate::domain::operator::Operator;
use crate::domain::signal_kind::SignalKind;
use crate::ports::config_port::ConfigPort;

pub const RULE_SECTION: &str = "rule";
pub const SIDES: [&str; 2] = ["entry", "exit"];

pub const DEFAULT_MAX_SIGNALS: i64 = 5;
pub const DEFAULT_HISTORY_BARS: i64 = 256;

/// Lookbacks taken from `[rule]` when periods are not ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Periods {
    pub period: usize,
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSettings {
    pub name: String,
    pub max_signals: usize,
    pub history_bars: usize,
    /// `None` when `ignore_period` is set; each indicator then uses its own defaults.
    pub periods: Option<Periods>,
    /// `enable_survival`: stochastic, Bollinger and channel breakout signals must hold
    /// for several consecutive bars before they fire.
    pub survival: bool,
}

/// One configured chain slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSpec {
    pub index: usize,
    pub kind: SignalKind,
    pub direction: Direction,
    /// Absent only on the last slot.
    pub operator: Option<Operator>,
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> SigchainError {
    SigchainError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn parse_int(section: &str, key: &str, raw: &str) -> Result<i64, SigchainError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| invalid(section, key, format!("expected an integer, found '{}'", raw.trim())))
}

/// Integer value that must be present.
pub fn required_int(config: &dyn ConfigPort, section: &str, key: &str) -> Result<i64, SigchainError> {
    match config.get_string(section, key) {
        Some(raw) if !raw.trim().is_empty() => parse_int(section, key, &raw),
        _ => Err(SigchainError::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        }),
    }
}

/// Integer value with a fallback when absent. A present but malformed value is an error.
pub fn optional_int(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: i64,
) -> Result<i64, SigchainError> {
    match config.get_string(section, key) {
        Some(raw) if !raw.trim().is_empty() => parse_int(section, key, &raw),
        _ => Ok(default),
    }
}

fn positive(section: &str, key: &str, value: i64) -> Result<usize, SigchainError> {
    if value < 1 {
        return Err(invalid(section, key, format!("{key} must be at least 1")));
    }
    usize::try_from(value).map_err(|_| invalid(section, key, format!("{key} is out of range")))
}

fn required_period(config: &dyn ConfigPort, key: &str) -> Result<usize, SigchainError> {
    let value = required_int(config, RULE_SECTION, key)?;
    positive(RULE_SECTION, key, value)
}

pub fn read_rule_settings(config: &dyn ConfigPort) -> Result<RuleSettings, SigchainError> {
    let max_signals = positive(
        RULE_SECTION,
        "max_signals",
        optional_int(config, RULE_SECTION, "max_signals", DEFAULT_MAX_SIGNALS)?,
    )?;
    let history_bars = positive(
        RULE_SECTION,
        "history_bars",
        optional_int(config, RULE_SECTION, "history_bars", DEFAULT_HISTORY_BARS)?,
    )?;

    let periods = if config.get_bool(RULE_SECTION, "ignore_period", false) {
        None
    } else {
        let periods = Periods {
            period: required_period(config, "period")?,
            fast: required_period(config, "fast_period")?,
            slow: required_period(config, "slow_period")?,
            signal: required_period(config, "signal_period")?,
        };
        if periods.fast >= periods.slow {
            return Err(invalid(
                RULE_SECTION,
                "fast_period",
                "fast_period must be less than slow_period",
            ));
        }
        Some(periods)
    };

    let survival = config.get_bool(RULE_SECTION, "enable_survival", false);

    let name = config
        .get_string(RULE_SECTION, "name")
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "sigchain".to_string());

    Ok(RuleSettings {
        name,
        max_signals,
        history_bars,
        periods,
        survival,
    })
}

/// Read slots `1..=max_signals` of one side (`entry` or `exit`).
pub fn read_slots(
    config: &dyn ConfigPort,
    side: &str,
    max_signals: usize,
) -> Result<Vec<SlotSpec>, SigchainError> {
    (1..=max_signals)
        .map(|index| {
            let key = format!("indicator{index}");
            let code = required_int(config, side, &key)?;
            let kind = SignalKind::from_code(code)
                .ok_or_else(|| invalid(side, &key, format!("unknown indicator code {code}")))?;

            let direction_key = format!("indicator{index}_direction");
            let direction_code = optional_int(config, side, &direction_key, 0)?;
            let direction = Direction::from_code(direction_code).ok_or_else(|| {
                invalid(
                    side,
                    &direction_key,
                    format!("direction must be 0 (long) or 1 (short), found {direction_code}"),
                )
            })?;

            let operator = if index < max_signals {
                let op_key = format!("operator{index}");
                let op_code = required_int(config, side, &op_key)?;
                let op = Operator::from_code(op_code).ok_or_else(|| {
                    invalid(side, &op_key, format!("operator must be 0..=5, found {op_code}"))
                })?;
                Some(op)
            } else {
                None
            };

            Ok(SlotSpec {
                index,
                kind,
                direction,
                operator,
            })
        })
        .collect()
}

/// Validate the whole rule configuration without building anything.
pub fn validate_rule_config(config: &dyn ConfigPort) -> Result<(), SigchainError> {
    let settings = read_rule_settings(config)?;
    for side in SIDES {
        read_slots(config, side, settings.max_signals)?;
    }
    Ok(())
}
