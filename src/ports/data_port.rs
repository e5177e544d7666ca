//! Market data port.

use crate::domain::error::SigchainError;
use crate::domain::ohlcv::OhlcvBar;
use chrono::NaiveDate;

pub trait DataPort {
    /// Bars for one instrument, oldest first. `start`/`end` are inclusive calendar days;
    /// `None` leaves that side open.
    fn fetch_ohlcv(
        &self,
        code: &str,
        exchange: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<OhlcvBar>, SigchainError>;

    fn list_symbols(&self, exchange: &str) -> Result<Vec<String>, SigchainError>;
}
