//! Leaf capability for signal chains.

use crate::domain::ohlcv::OhlcvBar;

/// An atomic boolean condition backed by market data.
///
/// Implementations own whatever indicator state they need. `update` is called once per
/// bar for every node in a chain, in chain order, before the chain is evaluated.
pub trait Signal {
    /// True once enough history has been observed for `evaluate` to be meaningful.
    fn is_ready(&self) -> bool;

    /// The condition's current truth value. Must not consult any other signal.
    fn evaluate(&self) -> bool;

    fn update(&mut self, bar: &OhlcvBar);
}
