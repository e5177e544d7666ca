#![allow(dead_code)]

use chrono::{Duration, NaiveDate, NaiveDateTime};
use sigchain::domain::ohlcv::OhlcvBar;
use sigchain::domain::operator::Operator;
use sigchain::domain::rule::Rule;
use sigchain::domain::signal::SignalNode;
use sigchain::ports::signal_port::Signal;
use std::cell::Cell;
use std::io::Write;
use std::rc::Rc;

/// A leaf whose value and readiness are flipped from the test through a [`StubHandle`].
pub struct StubSignal {
    value: Rc<Cell<bool>>,
    ready: Rc<Cell<bool>>,
    updates: Rc<Cell<usize>>,
}

#[derive(Clone)]
pub struct StubHandle {
    value: Rc<Cell<bool>>,
    ready: Rc<Cell<bool>>,
    updates: Rc<Cell<usize>>,
}

impl StubHandle {
    pub fn set(&self, value: bool) {
        self.value.set(value);
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.set(ready);
    }

    pub fn updates(&self) -> usize {
        self.updates.get()
    }
}

pub fn stub(value: bool) -> (StubSignal, StubHandle) {
    let handle = StubHandle {
        value: Rc::new(Cell::new(value)),
        ready: Rc::new(Cell::new(true)),
        updates: Rc::new(Cell::new(0)),
    };
    let signal = StubSignal {
        value: Rc::clone(&handle.value),
        ready: Rc::clone(&handle.ready),
        updates: Rc::clone(&handle.updates),
    };
    (signal, handle)
}

impl Signal for StubSignal {
    fn is_ready(&self) -> bool {
        self.ready.get()
    }

    fn evaluate(&self) -> bool {
        self.value.get()
    }

    fn update(&mut self, _bar: &OhlcvBar) {
        self.updates.set(self.updates.get() + 1);
    }
}

/// Build a rule from node values and the operators between them.
///
/// `operators[i]` links node `i` to node `i + 1`, so it must be one shorter than `values`.
pub fn chain(values: &[bool], operators: &[Operator]) -> (Rule, Vec<StubHandle>) {
    assert_eq!(operators.len() + 1, values.len());
    let mut handles = Vec::new();
    let mut nodes = Vec::new();
    for (i, &value) in values.iter().enumerate() {
        let (signal, handle) = stub(value);
        let node = SignalNode::new(format!("s{i}"), Box::new(signal));
        nodes.push(match operators.get(i) {
            Some(&op) => node.with_operator(op),
            None => node,
        });
        handles.push(handle);
    }
    (Rule::new(nodes).unwrap(), handles)
}

fn joins_with_and(op: Operator) -> bool {
    matches!(op, Operator::And | Operator::Not)
}

/// Direct evaluation of a chain from its operator sequence, without going through text.
///
/// A run of inclusive operators on nodes `i..j` makes nodes `i..=j` one OR'd factor, so
/// `a OR_INCLUSIVE b OR_INCLUSIVE c` is `(a or b or c)`. Inside a run, a negating
/// operator flips the member after it. A negating operator before a factor flips the
/// whole factor. Factors are then folded with AND binding tighter than OR.
pub fn reference_eval(values: &[bool], operators: &[Operator]) -> bool {
    let n = values.len();
    let mut factors: Vec<bool> = Vec::new();
    let mut joins: Vec<Operator> = Vec::new();
    let mut negate_next = false;
    let mut i = 0;

    while i < n {
        let mut end = i;
        while end + 1 < n && operators[end].is_inclusive() {
            end += 1;
        }
        let mut factor = values[i];
        for k in i + 1..=end {
            factor = factor || (values[k] ^ operators[k - 1].negates_successor());
        }
        let trailing = if end + 1 < n { Some(operators[end]) } else { None };

        factors.push(factor ^ negate_next);
        negate_next = trailing.is_some_and(Operator::negates_successor);
        if let Some(op) = trailing {
            joins.push(op);
        }
        i = end + 1;
    }

    let mut result = false;
    let mut term = factors[0];
    for (factor, op) in factors.iter().skip(1).zip(&joins) {
        if joins_with_and(*op) {
            term = term && *factor;
        } else {
            result = result || term;
            term = *factor;
        }
    }
    result || term
}

pub fn make_bar(index: i64, close: f64) -> OhlcvBar {
    let start = NaiveDate::from_ymd_opt(2017, 6, 12)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    OhlcvBar {
        code: "BTCUSD".to_string(),
        time: start + Duration::hours(index),
        open: close,
        high: close + 1.0,
        low: close - 1.0,
        close,
        volume: 10.0,
    }
}

pub fn bars_from_closes(closes: &[f64]) -> Vec<OhlcvBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| make_bar(i as i64, c))
        .collect()
}

pub fn time(hours: i64) -> NaiveDateTime {
    make_bar(hours, 0.0).time
}

pub fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Write `<dir>/<code>_<exchange>.csv` with hourly bars for `closes`.
pub fn write_csv(dir: &std::path::Path, code: &str, exchange: &str, closes: &[f64]) {
    let mut content = String::from("time,open,high,low,close,volume\n");
    for bar in bars_from_closes(closes) {
        content.push_str(&format!(
            "{},{},{},{},{},{}\n",
            bar.time.format("%Y-%m-%d %H:%M:%S"),
            bar.open,
            bar.high,
            bar.low,
            bar.close,
            bar.volume
        ));
    }
    std::fs::write(dir.join(format!("{code}_{exchange}.csv")), content).unwrap();
}
