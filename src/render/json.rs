use crate::dashboard::DashboardReport;
use crate::model::RenderError;
use crate::render::Renderer;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

/// Writes each report as pretty JSON, replacing the previous one.
/// Undefined statistics (NaN) are written as `null`.
pub struct JsonRenderer {
    path: PathBuf,
}

impl JsonRenderer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Renderer for JsonRenderer {
    fn render(&mut self, report: &DashboardReport) -> Result<(), RenderError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut writer, report)?;
        writer.flush()?;
        info!("Saved JSON report: {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardParams;
    use crate::model::ReturnSummary;
    use chrono::NaiveDate;
    use serde_json::Value;

    #[test]
    fn writes_report_with_null_for_undefined_values() {
        let dir = std::env::temp_dir().join(format!("market-analyzer-json-{}", std::process::id()));
        let path = dir.join("nested").join("report.json");
        let report = DashboardReport {
            params: DashboardParams {
                first_ticker: "A".into(),
                second_ticker: None,
                start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
                ma_window: 5,
            },
            errors: vec![],
            primary: None,
            secondary: None,
            correlation: None,
            trend: None,
            summary: Some(ReturnSummary {
                ticker: "A".into(),
                first_close: 10.0,
                last_close: 12.0,
                observations: 2,
                total_return_pct: 20.0,
                volatility_pct: f64::NAN,
            }),
        };

        JsonRenderer::new(&path).render(&report).unwrap();
        let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        fs::remove_dir_all(&dir).ok();

        assert_eq!(written["params"]["first_ticker"], "A");
        assert_eq!(written["params"]["start"], "2024-01-01");
        assert_eq!(written["summary"]["total_return_pct"], 20.0);
        assert!(written["summary"]["volatility_pct"].is_null());
        assert!(written["correlation"].is_null());
    }
}
