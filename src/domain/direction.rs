//! Trade side a signal fires for.

/// `LongOnly` signals fire on bullish conditions, `ShortOnly` on bearish ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    LongOnly,
    ShortOnly,
}

impl Direction {
    /// 0 is long, 1 is short.
    pub fn from_code(code: i64) -> Option<Direction> {
        match code {
            0 => Some(Direction::LongOnly),
            1 => Some(Direction::ShortOnly),
            _ => None,
        }
    }

    /// The mark a breakout-style signal needs to see: +1 for long, -1 for short.
    pub fn sign(self) -> i8 {
        match self {
            Direction::LongOnly => 1,
            Direction::ShortOnly => -1,
        }
    }
}
