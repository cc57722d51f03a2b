//! Integration tests for the fetch → reduce → print loop using an in-memory provider.

use chrono::NaiveDate;
use indexlab_core::{
    run_report, DailyBar, DataError, DataProvider, DateWindow, IndexDescriptor, IndexSet,
    MAX_YEARS,
};
use std::collections::HashMap;
use std::sync::Mutex;

/// Provider serving canned bars, with a set of codes that always fail.
struct FakeProvider {
    bars: HashMap<String, Vec<DailyBar>>,
    failing: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeProvider {
    fn new() -> Self {
        Self {
            bars: HashMap::new(),
            failing: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn with_bars(mut self, ts_code: &str, bars: Vec<DailyBar>) -> Self {
        self.bars.insert(ts_code.to_string(), bars);
        self
    }

    fn failing_on(mut self, ts_code: &str) -> Self {
        self.failing.push(ts_code.to_string());
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl DataProvider for FakeProvider {
    fn name(&self) -> &str {
        "fake"
    }

    fn fetch_daily(&self, ts_code: &str, _window: &DateWindow) -> Result<Vec<DailyBar>, DataError> {
        self.calls.lock().unwrap().push(ts_code.to_string());
        if self.failing.iter().any(|c| c == ts_code) {
            return Err(DataError::Network("connection reset".into()));
        }
        Ok(self.bars.get(ts_code).cloned().unwrap_or_default())
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn window() -> DateWindow {
    DateWindow::trailing_years(date(2024, 6, 15), 10).unwrap()
}

fn year_2020() -> Vec<DailyBar> {
    vec![
        DailyBar::new(date(2020, 1, 2), 100.0, 110.0, 95.0, 105.0),
        DailyBar::new(date(2020, 5, 20), 104.0, 120.0, 90.0, 101.0),
        DailyBar::new(date(2020, 12, 31), 108.0, 115.0, 103.0, 112.0),
    ]
}

fn run(provider: &FakeProvider, indexes: &[IndexDescriptor]) -> (String, indexlab_core::ReportSummary) {
    let mut out = Vec::new();
    let summary = run_report(provider, indexes, &window(), MAX_YEARS, &mut out).unwrap();
    (String::from_utf8(out).unwrap(), summary)
}

#[test]
fn end_to_end_single_year_table() {
    let provider = FakeProvider::new().with_bars("000300.SH", year_2020());
    let indexes = vec![IndexDescriptor::new("沪深300", "000300.SH")];

    let (text, summary) = run(&provider, &indexes);

    assert!(summary.all_succeeded());
    assert!(text.contains("[index] 沪深300 (000300.SH)"));
    assert!(text.contains("2020    100.00    120.00     90.00    112.00"));
}

#[test]
fn failure_on_one_index_does_not_stop_the_rest() {
    let provider = FakeProvider::new()
        .with_bars("000001.SH", year_2020())
        .with_bars("000905.SH", year_2020())
        .failing_on("000300.SH");
    let set = IndexSet::default_cn();

    let (text, summary) = run(&provider, set.as_slice());

    // Every index was attempted, in declaration order.
    let expected: Vec<String> = set.as_slice().iter().map(|i| i.ts_code.clone()).collect();
    assert_eq!(provider.calls(), expected);

    assert_eq!(summary.total, 7);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.succeeded, 6);
    assert_eq!(summary.errors[0].0.ts_code, "000300.SH");

    assert!(text.contains("[error] 沪深300 (000300.SH): network unreachable: connection reset"));

    // The index after the failure is still reduced and printed.
    let err_pos = text.find("[error] 沪深300").unwrap();
    let next_pos = text.find("[index] 中证500 (000905.SH)").unwrap();
    assert!(next_pos > err_pos);
    assert!(text[next_pos..].contains("2020    100.00    120.00     90.00    112.00"));
}

#[test]
fn index_without_rows_prints_no_data() {
    let provider = FakeProvider::new();
    let indexes = vec![IndexDescriptor::new("中证1000", "000852.SH")];

    let (text, summary) = run(&provider, &indexes);

    assert!(summary.all_succeeded());
    assert!(text.contains("[index] 中证1000 (000852.SH)"));
    assert!(text.trim_end().ends_with("no data"));
    assert!(!text.contains("year    open"));
}

#[test]
fn long_history_is_capped_to_ten_rows() {
    let bars: Vec<DailyBar> = (2008..=2024)
        .flat_map(|y| {
            vec![
                DailyBar::new(date(y, 1, 5), 10.0, 11.0, 9.0, 10.5),
                DailyBar::new(date(y, 12, 20), 10.5, 12.0, 8.0, 11.5),
            ]
        })
        .collect();
    let provider = FakeProvider::new().with_bars("399006.SZ", bars);
    let indexes = vec![IndexDescriptor::new("创业板指", "399006.SZ")];

    let (text, _) = run(&provider, &indexes);

    let rows: Vec<&str> = text
        .lines()
        .filter(|l| l.starts_with("20"))
        .collect();
    assert_eq!(rows.len(), 10);
    assert!(rows[0].starts_with("2015"));
    assert!(rows[9].starts_with("2024"));
}

#[test]
fn all_failures_still_complete() {
    let provider = FakeProvider::new()
        .failing_on("000016.SH")
        .failing_on("399001.SZ");
    let indexes = vec![
        IndexDescriptor::new("上证50", "000016.SH"),
        IndexDescriptor::new("深证成指", "399001.SZ"),
    ];

    let (text, summary) = run(&provider, &indexes);

    assert!(!summary.all_succeeded());
    assert_eq!(summary.failed, 2);
    assert_eq!(text.matches("[error]").count(), 2);
}
