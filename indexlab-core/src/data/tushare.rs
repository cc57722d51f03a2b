//! Tushare Pro data provider.
//!
//! Every Tushare endpoint is a single JSON POST carrying `api_name`, the
//! token, the call parameters and the requested field list. Results come back
//! as a column list plus row arrays, newest trading day first.
//!
//! One request per index, no retries: a failed call surfaces as a
//! `DataError` and the report moves on to the next index.

use super::provider::{DataError, DataProvider};
use crate::domain::DailyBar;
use crate::window::DateWindow;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Public Tushare Pro endpoint.
pub const DEFAULT_API_URL: &str = "http://api.tushare.pro";

const INDEX_DAILY: &str = "index_daily";
const FIELDS: &str = "trade_date,open,high,low,close";

#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    api_name: &'a str,
    token: &'a str,
    params: IndexDailyParams<'a>,
    fields: &'a str,
}

#[derive(Debug, Serialize)]
struct IndexDailyParams<'a> {
    ts_code: &'a str,
    start_date: String,
    end_date: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    code: i64,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    data: Option<ApiData>,
}

#[derive(Debug, Deserialize)]
struct ApiData {
    fields: Vec<String>,
    #[serde(default)]
    items: Vec<Vec<Value>>,
}

/// Column positions of the fields we read, resolved from the response header.
struct Columns {
    trade_date: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
}

impl Columns {
    fn locate(fields: &[String]) -> Result<Self, DataError> {
        let find = |name: &str| {
            fields
                .iter()
                .position(|f| f == name)
                .ok_or_else(|| DataError::Malformed(format!("missing column '{name}'")))
        };
        Ok(Self {
            trade_date: find("trade_date")?,
            open: find("open")?,
            high: find("high")?,
            low: find("low")?,
            close: find("close")?,
        })
    }
}

/// Tushare Pro data provider.
pub struct TushareProvider {
    client: reqwest::blocking::Client,
    token: String,
    api_url: String,
}

impl TushareProvider {
    pub fn new(token: impl Into<String>, api_url: impl Into<String>) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| DataError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            token: token.into(),
            api_url: api_url.into(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Parse an `index_daily` response into bars, ascending by date.
    fn parse_response(ts_code: &str, resp: ApiResponse) -> Result<Vec<DailyBar>, DataError> {
        if resp.code != 0 {
            return Err(DataError::Api {
                code: resp.code,
                msg: resp.msg.unwrap_or_default(),
            });
        }

        let Some(data) = resp.data else {
            return Ok(Vec::new());
        };
        if data.items.is_empty() {
            return Ok(Vec::new());
        }

        let cols = Columns::locate(&data.fields)?;
        let mut bars = Vec::with_capacity(data.items.len());

        for row in &data.items {
            let cell = |i: usize| {
                row.get(i).ok_or_else(|| {
                    DataError::Malformed(format!(
                        "row has {} cells, expected at least {}",
                        row.len(),
                        i + 1
                    ))
                })
            };

            let date = parse_trade_date(cell(cols.trade_date)?)?;
            let open = parse_price(cell(cols.open)?)?;
            let high = parse_price(cell(cols.high)?)?;
            let low = parse_price(cell(cols.low)?)?;
            let close = parse_price(cell(cols.close)?)?;

            match (open, high, low, close) {
                (Some(open), Some(high), Some(low), Some(close)) => {
                    bars.push(DailyBar::new(date, open, high, low, close));
                }
                _ => tracing::debug!(ts_code, %date, "skipping row with missing prices"),
            }
        }

        bars.sort_by_key(|bar| bar.date);
        Ok(bars)
    }
}

fn parse_trade_date(value: &Value) -> Result<NaiveDate, DataError> {
    let raw = value
        .as_str()
        .ok_or_else(|| DataError::Malformed(format!("trade_date is not a string: {value}")))?;
    NaiveDate::parse_from_str(raw, "%Y%m%d")
        .map_err(|e| DataError::Malformed(format!("invalid trade_date '{raw}': {e}")))
}

/// Null cells are `None`; numbers and numeric strings are accepted.
fn parse_price(value: &Value) -> Result<Option<f64>, DataError> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| DataError::Malformed(format!("price out of range: {n}"))),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|e| DataError::Malformed(format!("invalid price '{s}': {e}"))),
        other => Err(DataError::Malformed(format!("invalid price: {other}"))),
    }
}

impl DataProvider for TushareProvider {
    fn name(&self) -> &str {
        "tushare_pro"
    }

    fn fetch_daily(&self, ts_code: &str, window: &DateWindow) -> Result<Vec<DailyBar>, DataError> {
        let body = ApiRequest {
            api_name: INDEX_DAILY,
            token: &self.token,
            params: IndexDailyParams {
                ts_code,
                start_date: window.start_compact(),
                end_date: window.end_compact(),
            },
            fields: FIELDS,
        };

        tracing::debug!(
            ts_code,
            start = %body.params.start_date,
            end = %body.params.end_date,
            "requesting {INDEX_DAILY}"
        );

        let resp = self
            .client
            .post(&self.api_url)
            .json(&body)
            .send()
            .map_err(|e| DataError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DataError::Network(format!("HTTP {status} for {ts_code}")));
        }

        let parsed: ApiResponse = resp.json().map_err(|e| {
            DataError::Malformed(format!("failed to parse response for {ts_code}: {e}"))
        })?;

        let bars = Self::parse_response(ts_code, parsed)?;
        tracing::debug!(ts_code, rows = bars.len(), "received daily bars");
        Ok(bars)
    }
}
