use crate::config::AppConfig;
use crate::utils::parse_date;
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Crypto & stock market analyzer", long_about = None)]
pub struct Cli {
    /// Path to the JSON config file.
    #[arg(short, long, default_value = "config.json")]
    pub config: PathBuf,

    /// First ticker, e.g. BTC-USD or AAPL.
    #[arg(long)]
    pub first: Option<String>,

    /// Second ticker to correlate against; pass an empty string to disable.
    #[arg(long)]
    pub second: Option<String>,

    /// Start date (YYYY-MM-DD).
    #[arg(long, value_parser = date_arg)]
    pub start: Option<NaiveDate>,

    /// End date (YYYY-MM-DD), exclusive. Defaults to today.
    #[arg(long, value_parser = date_arg)]
    pub end: Option<NaiveDate>,

    /// Moving average window in days (5-100).
    #[arg(short, long)]
    pub window: Option<usize>,

    /// Re-check the config every N seconds and recompute when it changes.
    #[arg(long)]
    pub watch: Option<u64>,

    /// Also write the report as JSON to this path.
    #[arg(long)]
    pub json: Option<PathBuf>,
}

fn date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).ok_or_else(|| format!("`{}` is not a YYYY-MM-DD date", s))
}

impl Cli {
    /// Layers the command-line flags over a loaded config.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(first) = &self.first {
            config.first_ticker = first.clone();
        }
        if let Some(second) = &self.second {
            config.second_ticker = Some(second.clone());
        }
        if let Some(start) = self.start {
            config.start_date = start;
        }
        if let Some(end) = self.end {
            config.end_date = Some(end);
        }
        if let Some(window) = self.window {
            config.ma_window = window;
        }
        if let Some(interval) = self.watch {
            config.refresh_interval_seconds = Some(interval);
        }
        if let Some(json) = &self.json {
            config.output.json_path = Some(json.clone());
        }
    }
}
