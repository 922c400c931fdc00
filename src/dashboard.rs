// One dashboard run: load, analyze, assemble the report.
use crate::analyzer::Analyzer;
use crate::config::DashboardParams;
use crate::model::{CombinedSeries, CorrelationResult, MovingAverageSeries, ReturnSummary, TimeSeries};
use crate::provider::{PriceProvider, PriceRequest};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{error, info};

#[derive(Debug, Clone, Serialize)]
pub struct CorrelationSection {
    pub combined: CombinedSeries,
    /// `None` when the joined data cannot support a correlation.
    pub result: Option<CorrelationResult>,
}

/// Everything one run hands to the renderers. Sections are absent when their
/// inputs were missing.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub params: DashboardParams,
    pub errors: Vec<String>,
    pub primary: Option<TimeSeries>,
    pub secondary: Option<TimeSeries>,
    pub correlation: Option<CorrelationSection>,
    pub trend: Option<MovingAverageSeries>,
    pub summary: Option<ReturnSummary>,
}

pub struct Dashboard<P, A> {
    provider: P,
    analyzer: A,
}

impl<P: PriceProvider, A: Analyzer> Dashboard<P, A> {
    pub fn new(provider: P, analyzer: A) -> Self {
        Self { provider, analyzer }
    }

    /// Fetches one ticker. Failures are logged and recorded in `errors`, and
    /// come back as an empty series.
    pub async fn load(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
        errors: &mut Vec<String>,
    ) -> TimeSeries {
        let req = PriceRequest {
            ticker: ticker.to_string(),
            start,
            end,
        };
        match self.provider.fetch_closes(&req).await {
            Ok(series) => series,
            Err(e) => {
                error!("Error loading {}: {}", ticker, e);
                errors.push(format!("Error loading {}: {}", ticker, e));
                TimeSeries::empty(ticker)
            }
        }
    }

    pub async fn run(&self, params: &DashboardParams) -> DashboardReport {
        info!(
            "Running dashboard for {} / {} ({} .. {}, window {})",
            params.first_ticker,
            params.second_ticker.as_deref().unwrap_or("-"),
            params.start,
            params.end,
            params.ma_window
        );
        let mut errors = Vec::new();

        let primary = self
            .load(&params.first_ticker, params.start, params.end, &mut errors)
            .await;
        let secondary = match &params.second_ticker {
            Some(ticker) => Some(self.load(ticker, params.start, params.end, &mut errors).await),
            None => None,
        };

        let correlation = match &secondary {
            Some(second) if !primary.is_empty() && !second.is_empty() => {
                let combined = self.analyzer.combine(&primary, second);
                if combined.is_empty() {
                    info!(
                        "{} and {} share no dates, skipping correlation",
                        primary.ticker, second.ticker
                    );
                    None
                } else {
                    let result = self.analyzer.correlate(&combined);
                    Some(CorrelationSection { combined, result })
                }
            }
            _ => None,
        };

        let (trend, summary) = if primary.is_empty() {
            (None, None)
        } else {
            (
                Some(self.analyzer.moving_average(&primary, params.ma_window)),
                self.analyzer.summarize(&primary),
            )
        };

        DashboardReport {
            params: params.clone(),
            errors,
            primary: Some(primary).filter(|s| !s.is_empty()),
            secondary: secondary.filter(|s| !s.is_empty()),
            correlation,
            trend,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::AnalyzerImpl;
    use crate::model::{DataFetchError, PricePoint};
    use chrono::Days;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory provider; unknown tickers fail like an unreachable host.
    #[derive(Default)]
    struct StaticProvider {
        data: HashMap<String, Vec<PricePoint>>,
        calls: Mutex<Vec<String>>,
    }

    impl StaticProvider {
        fn with(mut self, ticker: &str, start_day: u64, closes: &[f64]) -> Self {
            let start = day(start_day);
            let points = closes
                .iter()
                .enumerate()
                .map(|(i, &close)| PricePoint {
                    date: start + Days::new(i as u64),
                    close,
                })
                .collect();
            self.data.insert(ticker.to_string(), points);
            self
        }
    }

    #[async_trait::async_trait]
    impl PriceProvider for StaticProvider {
        async fn fetch_closes(&self, req: &PriceRequest) -> Result<TimeSeries, DataFetchError> {
            self.calls.lock().unwrap().push(req.ticker.clone());
            self.data
                .get(&req.ticker)
                .map(|points| TimeSeries::new(req.ticker.clone(), points.clone()))
                .ok_or_else(|| DataFetchError::Http("connection refused".into()))
        }
    }

    fn day(offset: u64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Days::new(offset)
    }

    fn params(first: &str, second: Option<&str>, window: usize) -> DashboardParams {
        DashboardParams {
            first_ticker: first.into(),
            second_ticker: second.map(Into::into),
            start: day(0),
            end: day(60),
            ma_window: window,
        }
    }

    fn ramp(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + i as f64).collect()
    }

    #[tokio::test]
    async fn full_run_with_two_tickers() {
        let provider = StaticProvider::default()
            .with("BTC-USD", 0, &ramp(30))
            .with("ETH-USD", 10, &ramp(30));
        let dashboard = Dashboard::new(provider, AnalyzerImpl::new());
        let report = dashboard.run(&params("BTC-USD", Some("ETH-USD"), 5)).await;

        assert!(report.errors.is_empty());
        let section = report.correlation.expect("correlation section");
        assert_eq!(section.combined.len(), 20);
        let result = section.result.expect("correlation result");
        assert!((result.coefficient - 1.0).abs() < 1e-9);
        assert!(result.p_value < 1e-12);

        let trend = report.trend.expect("trend");
        assert_eq!(trend.defined_averages().len(), 30 - 5 + 1);
        let summary = report.summary.expect("summary");
        assert!((summary.total_return_pct - (129.0 / 100.0 - 1.0) * 100.0).abs() < 1e-9);
        assert!(report.secondary.is_some());
    }

    #[tokio::test]
    async fn compounding_scenario_end_to_end() {
        let provider = StaticProvider::default().with("A", 0, &[100.0, 110.0, 121.0]);
        let dashboard = Dashboard::new(provider, AnalyzerImpl::new());
        let report = dashboard.run(&params("A", None, 5)).await;

        let summary = report.summary.expect("summary");
        assert_eq!(format!("{:.2}%", summary.total_return_pct), "21.00%");
        assert_eq!(format!("{:.2}%", summary.volatility_pct), "0.00%");
        // window larger than the series: trend shown, nothing defined yet
        assert!(report.trend.expect("trend").defined_averages().is_empty());
        assert!(report.correlation.is_none());
    }

    #[tokio::test]
    async fn failed_primary_short_circuits() {
        let provider = StaticProvider::default().with("ETH-USD", 0, &ramp(10));
        let dashboard = Dashboard::new(provider, AnalyzerImpl::new());
        let report = dashboard.run(&params("NOPE", Some("ETH-USD"), 5)).await;

        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("Error loading NOPE:"));
        assert!(report.primary.is_none());
        assert!(report.correlation.is_none());
        assert!(report.trend.is_none());
        assert!(report.summary.is_none());
        // the second ticker still gets its own chart
        assert_eq!(report.secondary.map(|s| s.len()), Some(10));
    }

    #[tokio::test]
    async fn failed_secondary_keeps_primary_sections() {
        let provider = StaticProvider::default().with("A", 0, &ramp(30));
        let dashboard = Dashboard::new(provider, AnalyzerImpl::new());
        let report = dashboard.run(&params("A", Some("NOPE"), 20)).await;

        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("Error loading NOPE:"));
        assert!(report.secondary.is_none());
        assert!(report.correlation.is_none());
        assert_eq!(report.primary.map(|s| s.len()), Some(30));
        assert_eq!(report.trend.expect("trend").defined_averages().len(), 30 - 20 + 1);
        assert!(report.summary.is_some());
    }

    #[tokio::test]
    async fn disjoint_dates_skip_correlation() {
        let provider = StaticProvider::default()
            .with("A", 0, &ramp(5))
            .with("B", 20, &ramp(5));
        let dashboard = Dashboard::new(provider, AnalyzerImpl::new());
        let report = dashboard.run(&params("A", Some("B"), 5)).await;

        assert!(report.errors.is_empty());
        assert!(report.correlation.is_none());
        assert!(report.summary.is_some());
    }

    #[tokio::test]
    async fn single_shared_date_has_no_correlation_result() {
        let provider = StaticProvider::default()
            .with("A", 0, &ramp(5))
            .with("B", 4, &ramp(5));
        let dashboard = Dashboard::new(provider, AnalyzerImpl::new());
        let report = dashboard.run(&params("A", Some("B"), 5)).await;

        let section = report.correlation.expect("section");
        assert_eq!(section.combined.len(), 1);
        assert!(section.result.is_none());
    }

    #[tokio::test]
    async fn absent_second_ticker_is_never_fetched() {
        let provider = StaticProvider::default().with("A", 0, &ramp(5));
        let dashboard = Dashboard::new(provider, AnalyzerImpl::new());
        let report = dashboard.run(&params("A", None, 5)).await;

        assert!(report.secondary.is_none());
        assert_eq!(*dashboard.provider.calls.lock().unwrap(), vec!["A".to_string()]);
    }
}
