// Core structs: PricePoint, TimeSeries, analysis results and error kinds
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Daily closing prices for one ticker, ordered by date.
/// An empty series stands for a failed or empty fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    pub ticker: String,
    pub points: Vec<PricePoint>,
}

impl TimeSeries {
    pub fn new(ticker: impl Into<String>, points: Vec<PricePoint>) -> Self {
        Self {
            ticker: ticker.into(),
            points,
        }
    }

    pub fn empty(ticker: impl Into<String>) -> Self {
        Self::new(ticker, Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CombinedRow {
    pub date: NaiveDate,
    pub first: f64,
    pub second: f64,
}

/// Inner join of two series on date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedSeries {
    pub first_ticker: String,
    pub second_ticker: String,
    pub rows: Vec<CombinedRow>,
}

impl CombinedSeries {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn first_column(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.first).collect()
    }

    pub fn second_column(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.second).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CorrelationResult {
    pub coefficient: f64,
    pub p_value: f64,
    pub observations: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendRow {
    pub date: NaiveDate,
    pub close: f64,
    /// `None` until the window has filled.
    pub average: Option<f64>,
}

/// Price column plus its trailing simple moving average.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovingAverageSeries {
    pub ticker: String,
    pub window: usize,
    pub rows: Vec<TrendRow>,
}

impl MovingAverageSeries {
    /// Column name of the derived average, e.g. `MA20`.
    pub fn label(&self) -> String {
        format!("MA{}", self.window)
    }

    pub fn defined_averages(&self) -> Vec<f64> {
        self.rows.iter().filter_map(|r| r.average).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnSummary {
    pub ticker: String,
    pub first_close: f64,
    pub last_close: f64,
    pub observations: usize,
    /// `(last / first - 1) * 100`
    pub total_return_pct: f64,
    /// Sample standard deviation of day-over-day changes, in percent.
    pub volatility_pct: f64,
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("malformed payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing field `{0}`")]
    MissingField(String),
    #[error("field `{field}` has {found} entries, expected {expected}")]
    LengthMismatch {
        field: String,
        expected: usize,
        found: usize,
    },
    #[error("invalid timestamp {0}")]
    InvalidTimestamp(i64),
}

/// The single error kind of the provider boundary.
#[derive(Debug, Error)]
pub enum DataFetchError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("request timed out")]
    Timeout,
    #[error("provider responded with status {0}")]
    Status(u16),
    #[error("{code}: {description}")]
    Provider { code: String, description: String },
    #[error("start date {start} must be before end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    #[error("invalid response: {0}")]
    InvalidResponse(#[from] ParserError),
    #[error("no price data found for {0}")]
    NoData(String),
}

impl From<reqwest::Error> for DataFetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            DataFetchError::Timeout
        } else {
            DataFetchError::Http(e.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
