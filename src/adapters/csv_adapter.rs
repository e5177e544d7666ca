//! CSV file data adapter.
//!
//! One file per instrument, `<dir>/<CODE>_<EXCHANGE>.csv`, with the header
//! `time,open,high,low,close,volume`. Times are `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS`.

use crate::domain::error::SigchainError;
use crate::domain::ohlcv::OhlcvBar;
use crate::ports::data_port::DataPort;
use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

fn data_error(reason: String) -> SigchainError {
    SigchainError::Data { reason }
}

fn parse_time(raw: &str) -> Result<NaiveDateTime, SigchainError> {
    let raw = raw.trim();
    if let Ok(time) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(time);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| data_error(format!("invalid time '{raw}'")))
}

fn number(record: &csv::StringRecord, index: usize, name: &str, line: u64) -> Result<f64, SigchainError> {
    let raw = record
        .get(index)
        .ok_or_else(|| data_error(format!("line {line}: missing {name} column")))?;
    raw.trim()
        .parse()
        .map_err(|e| data_error(format!("line {line}: invalid {name} value '{raw}': {e}")))
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, code: &str, exchange: &str) -> PathBuf {
        self.base_path.join(format!("{}_{}.csv", code, exchange))
    }
}

impl DataPort for CsvAdapter {
    fn fetch_ohlcv(
        &self,
        code: &str,
        exchange: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<OhlcvBar>, SigchainError> {
        let path = self.csv_path(code, exchange);
        let content = fs::read_to_string(&path)
            .map_err(|e| data_error(format!("failed to read {}: {}", path.display(), e)))?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| data_error(format!("CSV parse error: {}", e)))?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let time = parse_time(
                record
                    .get(0)
                    .ok_or_else(|| data_error(format!("line {line}: missing time column")))?,
            )?;
            let day = time.date();
            if start.is_some_and(|s| day < s) || end.is_some_and(|e| day > e) {
                continue;
            }

            bars.push(OhlcvBar {
                code: code.to_string(),
                time,
                open: number(&record, 1, "open", line)?,
                high: number(&record, 2, "high", line)?,
                low: number(&record, 3, "low", line)?,
                close: number(&record, 4, "close", line)?,
                volume: number(&record, 5, "volume", line)?,
            });
        }

        bars.sort_by_key(|b| b.time);
        tracing::info!(code, exchange, bars = bars.len(), file = %path.display(), "loaded bars");
        Ok(bars)
    }

    fn list_symbols(&self, exchange: &str) -> Result<Vec<String>, SigchainError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| {
            data_error(format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ))
        })?;

        let suffix = format!("_{}.csv", exchange);
        let mut symbols = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| data_error(format!("directory entry error: {}", e)))?;
            let name = entry.file_name();
            if let Some(code) = name.to_string_lossy().strip_suffix(&suffix) {
                symbols.push(code.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_data() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_path_buf();

        let csv_content = "time,open,high,low,close,volume\n\
            2017-06-13 01:00:00,2650.0,2700.5,2640.0,2690.0,12.5\n\
            2017-06-12 23:00:00,2600.0,2660.0,2590.0,2655.0,8.25\n\
            2017-06-14,2690.0,2710.0,2600.0,2610.0,20\n";

        fs::write(path.join("BTCUSD_GDAX.csv"), csv_content).unwrap();
        fs::write(path.join("ETHUSD_GDAX.csv"), "time,open,high,low,close,volume\n").unwrap();
        fs::write(path.join("BHP_ASX.csv"), "time,open,high,low,close,volume\n").unwrap();

        (dir, path)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2017, 6, d).unwrap()
    }

    #[test]
    fn fetch_sorts_by_time_and_parses_both_formats() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let bars = adapter.fetch_ohlcv("BTCUSD", "GDAX", None, None).unwrap();
        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].time, day(12).and_hms_opt(23, 0, 0).unwrap());
        assert_eq!(bars[2].time, day(14).and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(bars[1].high, 2700.5);
        assert_eq!(bars[1].volume, 12.5);
        assert_eq!(bars[0].code, "BTCUSD");
    }

    #[test]
    fn fetch_filters_by_inclusive_days() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let bars = adapter
            .fetch_ohlcv("BTCUSD", "GDAX", Some(day(13)), Some(day(13)))
            .unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].close, 2690.0);

        let bars = adapter
            .fetch_ohlcv("BTCUSD", "GDAX", Some(day(13)), None)
            .unwrap();
        assert_eq!(bars.len(), 2);
    }

    #[test]
    fn fetch_missing_file_is_data_error() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);
        let err = adapter.fetch_ohlcv("XRPUSD", "GDAX", None, None).unwrap_err();
        assert!(matches!(err, SigchainError::Data { .. }));
    }

    #[test]
    fn fetch_rejects_bad_values() {
        let (dir, path) = setup_test_data();
        fs::write(
            dir.path().join("BAD_GDAX.csv"),
            "time,open,high,low,close,volume\n2017-06-12,1.0,x,1.0,1.0,1\n",
        )
        .unwrap();
        let adapter = CsvAdapter::new(path);
        let err = adapter.fetch_ohlcv("BAD", "GDAX", None, None).unwrap_err();
        assert!(err.to_string().contains("invalid high value"));
    }

    #[test]
    fn fetch_rejects_bad_time() {
        let (dir, path) = setup_test_data();
        fs::write(
            dir.path().join("BAD_GDAX.csv"),
            "time,open,high,low,close,volume\n12/06/2017,1,1,1,1,1\n",
        )
        .unwrap();
        let adapter = CsvAdapter::new(path);
        let err = adapter.fetch_ohlcv("BAD", "GDAX", None, None).unwrap_err();
        assert!(err.to_string().contains("invalid time"));
    }

    #[test]
    fn list_symbols_returns_exchange_symbols() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        assert_eq!(adapter.list_symbols("GDAX").unwrap(), vec!["BTCUSD", "ETHUSD"]);
        assert_eq!(adapter.list_symbols("ASX").unwrap(), vec!["BHP"]);
        assert!(adapter.list_symbols("NYSE").unwrap().is_empty());
    }
}
