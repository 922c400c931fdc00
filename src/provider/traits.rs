use crate::model::{DataFetchError, TimeSeries};
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRequest {
    pub ticker: String,
    /// Inclusive.
    pub start: NaiveDate,
    /// Exclusive.
    pub end: NaiveDate,
}

/// Source of daily closing prices.
#[async_trait::async_trait]
pub trait PriceProvider: Send + Sync {
    async fn fetch_closes(&self, req: &PriceRequest) -> Result<TimeSeries, DataFetchError>;
}
