// Yahoo! Finance chart payload parsing
use crate::model::{DataFetchError, ParserError, PricePoint, TimeSeries};
use crate::utils::local_date;
use serde::Deserialize;
use tracing::debug;

pub trait Parser {
    fn parse(&self, ticker: &str, body: &str) -> Result<TimeSeries, DataFetchError>;
}

/// Parses `v8/finance/chart` responses into a single close column.
pub struct ChartParser {
    adjusted: bool,
}

impl ChartParser {
    pub fn new(adjusted: bool) -> Self {
        Self { adjusted }
    }

    /// Extracts the provider's own error report from a body, if it has one.
    pub fn provider_error(body: &str) -> Option<DataFetchError> {
        let envelope: ChartEnvelope = serde_json::from_str(body).ok()?;
        envelope.chart.error.map(Into::into)
    }
}

impl Parser for ChartParser {
    fn parse(&self, ticker: &str, body: &str) -> Result<TimeSeries, DataFetchError> {
        let envelope: ChartEnvelope = serde_json::from_str(body).map_err(ParserError::from)?;

        if let Some(err) = envelope.chart.error {
            return Err(err.into());
        }

        let result = match envelope.chart.result.and_then(|r| r.into_iter().next()) {
            Some(r) => r,
            None => return Err(DataFetchError::NoData(ticker.to_string())),
        };
        if result.timestamp.is_empty() {
            return Err(DataFetchError::NoData(ticker.to_string()));
        }

        let offset = result.meta.as_ref().map(|m| m.gmtoffset).unwrap_or(0);
        let closes = self.select_closes(result.indicators)?;
        if closes.len() != result.timestamp.len() {
            return Err(ParserError::LengthMismatch {
                field: "close".into(),
                expected: result.timestamp.len(),
                found: closes.len(),
            }
            .into());
        }

        let mut points = Vec::with_capacity(closes.len());
        for (ts, close) in result.timestamp.iter().zip(closes) {
            let date = local_date(*ts, offset).ok_or(ParserError::InvalidTimestamp(*ts))?;
            // null closes mark halted or not-yet-settled sessions
            if let Some(close) = close {
                points.push(PricePoint { date, close });
            }
        }

        debug!("Parsed {} closes for {}", points.len(), ticker);
        Ok(TimeSeries::new(ticker, points))
    }
}

impl ChartParser {
    fn select_closes(&self, indicators: Indicators) -> Result<Vec<Option<f64>>, ParserError> {
        if self.adjusted {
            if let Some(adj) = indicators.adjclose.into_iter().next() {
                return Ok(adj.adjclose);
            }
            debug!("No adjusted closes in payload, using raw closes");
        }
        indicators
            .quote
            .into_iter()
            .next()
            .map(|q| q.close)
            .ok_or_else(|| ParserError::MissingField("indicators.quote".into()))
    }
}

#[derive(Deserialize, Debug)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Deserialize, Debug)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Deserialize, Debug)]
struct ChartError {
    code: String,
    #[serde(default)]
    description: String,
}

impl From<ChartError> for DataFetchError {
    fn from(e: ChartError) -> Self {
        DataFetchError::Provider {
            code: e.code,
            description: e.description,
        }
    }
}

#[derive(Deserialize, Debug)]
struct ChartResult {
    meta: Option<ChartMeta>,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Deserialize, Debug)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Deserialize, Debug)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
    #[serde(default)]
    adjclose: Vec<AdjClose>,
}

#[derive(Deserialize, Debug)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Deserialize, Debug)]
struct AdjClose {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}
