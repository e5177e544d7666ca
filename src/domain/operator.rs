//! Chain operators.
//!
//! An `Operator` sits on a signal node and describes how that node relates to the
//! node after it. The integer codes are the configuration wire format and must not
//! be reordered.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    And,
    Or,
    OrInclusive,
    Not,
    Nor,
    NorInclusive,
}

impl Operator {
    pub const ALL: [Operator; 6] = [
        Operator::And,
        Operator::Or,
        Operator::OrInclusive,
        Operator::Not,
        Operator::Nor,
        Operator::NorInclusive,
    ];

    pub fn from_code(code: i64) -> Option<Operator> {
        match code {
            0 => Some(Operator::And),
            1 => Some(Operator::Or),
            2 => Some(Operator::OrInclusive),
            3 => Some(Operator::Not),
            4 => Some(Operator::Nor),
            5 => Some(Operator::NorInclusive),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Operator::And => 0,
            Operator::Or => 1,
            Operator::OrInclusive => 2,
            Operator::Not => 3,
            Operator::Nor => 4,
            Operator::NorInclusive => 5,
        }
    }

    /// Inclusive operators group the node with its successor in parentheses.
    pub fn is_inclusive(self) -> bool {
        matches!(self, Operator::OrInclusive | Operator::NorInclusive)
    }

    /// Negating operators apply `!` to the successor, not to the node itself.
    pub fn negates_successor(self) -> bool {
        matches!(
            self,
            Operator::Not | Operator::Nor | Operator::NorInclusive
        )
    }

    /// Text placed between this node's literal and its successor's.
    pub fn connective(self) -> &'static str {
        match self {
            Operator::And => " and ",
            Operator::Or | Operator::OrInclusive => " or ",
            Operator::Not => " and !",
            Operator::Nor | Operator::NorInclusive => " or !",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::OrInclusive => "OR_INCLUSIVE",
            Operator::Not => "NOT",
            Operator::Nor => "NOR",
            Operator::NorInclusive => "NOR_INCLUSIVE",
        };
        f.write_str(name)
    }
}
