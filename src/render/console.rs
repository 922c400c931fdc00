// render/console.rs

use crate::dashboard::{CorrelationSection, DashboardReport};
use crate::model::{MovingAverageSeries, RenderError, ReturnSummary, TimeSeries};
use crate::render::chart::{line_chart, Column, CHART_WIDTH};
use crate::render::Renderer;
use crate::utils::format_pct;
use std::io::{self, Stdout, Write};

/// Writes the dashboard as text sections with sparkline charts.
pub struct ConsoleRenderer<W: Write> {
    out: W,
    width: usize,
}

impl ConsoleRenderer<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            width: CHART_WIDTH,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn chart(&mut self, columns: &[Column], shared_scale: bool) -> io::Result<()> {
        for line in line_chart(columns, self.width, shared_scale) {
            writeln!(self.out, "  {}", line)?;
        }
        Ok(())
    }

    fn correlation(&mut self, section: &CorrelationSection) -> io::Result<()> {
        let combined = &section.combined;
        writeln!(self.out, "\n🔗 Correlation Analysis")?;
        match &section.result {
            Some(r) => writeln!(
                self.out,
                "Correlation between {} and {}: r = {:.2} (p = {:.3}) over {} shared dates",
                combined.first_ticker, combined.second_ticker, r.coefficient, r.p_value, r.observations
            )?,
            None => writeln!(
                self.out,
                "Correlation between {} and {}: undefined over {} shared dates",
                combined.first_ticker,
                combined.second_ticker,
                combined.len()
            )?,
        }
        let columns: [Column; 2] = [
            (combined.first_ticker.clone(), combined.rows.iter().map(|r| Some(r.first)).collect()),
            (combined.second_ticker.clone(), combined.rows.iter().map(|r| Some(r.second)).collect()),
        ];
        self.chart(&columns, false)
    }

    fn closing_prices(&mut self, series: &TimeSeries) -> io::Result<()> {
        writeln!(self.out, "\n📊 {} Closing Prices", series.ticker)?;
        let columns: [Column; 1] = [(
            series.ticker.clone(),
            series.points.iter().map(|p| Some(p.close)).collect(),
        )];
        self.chart(&columns, false)
    }

    fn trend(&mut self, trend: &MovingAverageSeries) -> io::Result<()> {
        writeln!(self.out, "\n📉 {} Trend with Moving Averages", trend.ticker)?;
        let columns: [Column; 2] = [
            (trend.ticker.clone(), trend.rows.iter().map(|r| Some(r.close)).collect()),
            (trend.label(), trend.rows.iter().map(|r| r.average).collect()),
        ];
        self.chart(&columns, true)?;
        writeln!(
            self.out,
            "  {} of {} days have a {} value",
            trend.defined_averages().len(),
            trend.rows.len(),
            trend.label()
        )
    }

    fn summary(&mut self, summary: &ReturnSummary) -> io::Result<()> {
        writeln!(self.out, "\n📈 {} Performance Summary", summary.ticker)?;
        writeln!(self.out, "  Total Return: {}", format_pct(summary.total_return_pct))?;
        writeln!(self.out, "  Volatility (Std Dev): {}", format_pct(summary.volatility_pct))
    }
}

impl<W: Write> Renderer for ConsoleRenderer<W> {
    fn render(&mut self, report: &DashboardReport) -> Result<(), RenderError> {
        let params = &report.params;
        writeln!(self.out, "📈 Crypto & Stock Market Analyzer")?;
        writeln!(
            self.out,
            "{}{} | {} → {} | MA{}",
            params.first_ticker,
            params
                .second_ticker
                .as_ref()
                .map(|t| format!(" vs {}", t))
                .unwrap_or_default(),
            params.start,
            params.end,
            params.ma_window
        )?;

        for err in &report.errors {
            writeln!(self.out, "❌ {}", err)?;
        }

        if let Some(section) = &report.correlation {
            self.correlation(section)?;
        }
        if let Some(series) = &report.primary {
            self.closing_prices(series)?;
        }
        if let Some(series) = &report.secondary {
            self.closing_prices(series)?;
        }
        if let Some(trend) = &report.trend {
            self.trend(trend)?;
        }
        if let Some(summary) = &report.summary {
            self.summary(summary)?;
        }

        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardParams;
    use crate::model::{CombinedRow, CombinedSeries, CorrelationResult, PricePoint, TrendRow};
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn params() -> DashboardParams {
        DashboardParams {
            first_ticker: "BTC-USD".into(),
            second_ticker: Some("ETH-USD".into()),
            start: date(1),
            end: date(10),
            ma_window: 5,
        }
    }

    fn render(report: &DashboardReport) -> String {
        let mut renderer = ConsoleRenderer::new(Vec::new());
        renderer.render(report).unwrap();
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn renders_every_section() {
        let primary = TimeSeries::new(
            "BTC-USD",
            vec![
                PricePoint { date: date(1), close: 100.0 },
                PricePoint { date: date(2), close: 110.0 },
                PricePoint { date: date(3), close: 121.0 },
            ],
        );
        let report = DashboardReport {
            params: params(),
            errors: Vec::new(),
            correlation: Some(CorrelationSection {
                combined: CombinedSeries {
                    first_ticker: "BTC-USD".into(),
                    second_ticker: "ETH-USD".into(),
                    rows: vec![
                        CombinedRow { date: date(1), first: 100.0, second: 10.0 },
                        CombinedRow { date: date(2), first: 110.0, second: 12.0 },
                        CombinedRow { date: date(3), first: 121.0, second: 11.0 },
                    ],
                },
                result: Some(CorrelationResult {
                    coefficient: 0.9312,
                    p_value: 0.00049,
                    observations: 3,
                }),
            }),
            trend: Some(MovingAverageSeries {
                ticker: "BTC-USD".into(),
                window: 5,
                rows: primary
                    .points
                    .iter()
                    .map(|p| TrendRow { date: p.date, close: p.close, average: None })
                    .collect(),
            }),
            summary: Some(ReturnSummary {
                ticker: "BTC-USD".into(),
                first_close: 100.0,
                last_close: 121.0,
                observations: 3,
                total_return_pct: 21.0,
                volatility_pct: 0.0,
            }),
            primary: Some(primary),
            secondary: None,
        };

        let text = render(&report);
        assert!(text.contains("BTC-USD vs ETH-USD | 2024-01-01 → 2024-01-10 | MA5"));
        assert!(text.contains("🔗 Correlation Analysis"));
        assert!(text.contains("r = 0.93 (p = 0.000)"));
        assert!(text.contains("📊 BTC-USD Closing Prices"));
        assert!(!text.contains("📊 ETH-USD Closing Prices"));
        assert!(text.contains("📉 BTC-USD Trend with Moving Averages"));
        assert!(text.contains("MA5      (no data)"));
        assert!(text.contains("0 of 3 days have a MA5 value"));
        assert!(text.contains("Total Return: 21.00%"));
        assert!(text.contains("Volatility (Std Dev): 0.00%"));
    }

    #[test]
    fn failed_run_shows_only_errors() {
        let report = DashboardReport {
            params: DashboardParams {
                second_ticker: None,
                ..params()
            },
            errors: vec!["Error loading BTC-USD: request timed out".into()],
            primary: None,
            secondary: None,
            correlation: None,
            trend: None,
            summary: None,
        };

        let text = render(&report);
        assert!(text.contains("BTC-USD | 2024-01-01"));
        assert!(text.contains("❌ Error loading BTC-USD: request timed out"));
        assert!(!text.contains("Correlation"));
        assert!(!text.contains("Performance Summary"));
    }
}
