use crate::analyzer::alignment::inner_join;
use crate::analyzer::market_indicators::MarketAnalyzer;
use crate::model::{
    CombinedSeries, CorrelationResult, MovingAverageSeries, ReturnSummary, TimeSeries, TrendRow,
};
use tracing::{debug, warn};

/// Trait defining the interface for the price analyzer.
pub trait Analyzer {
    /// Inner-joins the two series on date.
    fn combine(&self, a: &TimeSeries, b: &TimeSeries) -> CombinedSeries;
    /// Pearson correlation over the joined columns, `None` when undefined.
    fn correlate(&self, combined: &CombinedSeries) -> Option<CorrelationResult>;
    fn moving_average(&self, series: &TimeSeries, window: usize) -> MovingAverageSeries;
    /// Total return and volatility, `None` with fewer than two points.
    fn summarize(&self, series: &TimeSeries) -> Option<ReturnSummary>;
}

/// Implementation of the price analyzer.
pub struct AnalyzerImpl;

impl AnalyzerImpl {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AnalyzerImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for AnalyzerImpl {
    fn combine(&self, a: &TimeSeries, b: &TimeSeries) -> CombinedSeries {
        let combined = inner_join(a, b);
        debug!(
            "Joined {} ({}) with {} ({}): {} shared dates",
            a.ticker,
            a.len(),
            b.ticker,
            b.len(),
            combined.len()
        );
        combined
    }

    fn correlate(&self, combined: &CombinedSeries) -> Option<CorrelationResult> {
        let x = combined.first_column();
        let y = combined.second_column();
        match MarketAnalyzer::compute_correlation(&x, &y) {
            Some(r) => Some(CorrelationResult {
                coefficient: r,
                p_value: MarketAnalyzer::correlation_p_value(r, x.len()),
                observations: x.len(),
            }),
            None => {
                warn!(
                    "Correlation between {} and {} is undefined over {} shared dates",
                    combined.first_ticker,
                    combined.second_ticker,
                    combined.len()
                );
                None
            }
        }
    }

    fn moving_average(&self, series: &TimeSeries, window: usize) -> MovingAverageSeries {
        let averages = MarketAnalyzer::moving_average(&series.closes(), window);
        let rows = series
            .points
            .iter()
            .zip(averages)
            .map(|(p, average)| TrendRow {
                date: p.date,
                close: p.close,
                average,
            })
            .collect();

        MovingAverageSeries {
            ticker: series.ticker.clone(),
            window,
            rows,
        }
    }

    fn summarize(&self, series: &TimeSeries) -> Option<ReturnSummary> {
        let (first, last) = match (series.first(), series.last()) {
            (Some(f), Some(l)) if series.len() >= 2 => (f.close, l.close),
            _ => {
                debug!("Not enough data to summarize {}", series.ticker);
                return None;
            }
        };

        let returns = MarketAnalyzer::pct_change(&series.closes());
        Some(ReturnSummary {
            ticker: series.ticker.clone(),
            first_close: first,
            last_close: last,
            observations: series.len(),
            total_return_pct: (last / first - 1.0) * 100.0,
            volatility_pct: MarketAnalyzer::sample_std_dev(&returns) * 100.0,
        })
    }
}
