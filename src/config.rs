use crate::model::ConfigError;
use crate::normalizer::normalize_ticker;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const MIN_MA_WINDOW: usize = 5;
pub const MAX_MA_WINDOW: usize = 100;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_seconds: u64,
    /// Use split/dividend adjusted closes when the provider has them.
    pub adjusted_close: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".into(),
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) MarketAnalyzer/0.1".into(),
            timeout_seconds: 10,
            adjusted_close: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where to write the JSON report, if anywhere.
    pub json_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub first_ticker: String,
    pub second_ticker: Option<String>,
    pub start_date: NaiveDate,
    /// Defaults to today when absent.
    pub end_date: Option<NaiveDate>,
    pub ma_window: usize,
    /// Enables watch mode: the config is reloaded on this interval.
    pub refresh_interval_seconds: Option<u64>,
    pub provider: ProviderConfig,
    pub output: OutputConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            first_ticker: "BTC-USD".into(),
            second_ticker: Some("ETH-USD".into()),
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default(),
            end_date: None,
            ma_window: 20,
            refresh_interval_seconds: None,
            provider: ProviderConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

/// Like [`load_config`], but a missing file yields the defaults when
/// `allow_missing` is set. Otherwise a missing file is an I/O error.
pub fn load_or_default(path: &Path, allow_missing: bool) -> Result<AppConfig, ConfigError> {
    if allow_missing && !path.exists() {
        info!("No config at {}, using defaults", path.display());
        return Ok(AppConfig::default());
    }
    load_config(path)
}

/// The inputs of one dashboard run. Two runs with equal params produce the
/// same report for the same provider data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardParams {
    pub first_ticker: String,
    pub second_ticker: Option<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub ma_window: usize,
}

impl DashboardParams {
    pub fn resolve(config: &AppConfig, today: NaiveDate) -> Result<Self, ConfigError> {
        let first_ticker = normalize_ticker(&config.first_ticker)
            .ok_or_else(|| ConfigError::Invalid("first ticker must not be blank".into()))?;
        let second_ticker = config.second_ticker.as_deref().and_then(normalize_ticker);

        if !(MIN_MA_WINDOW..=MAX_MA_WINDOW).contains(&config.ma_window) {
            return Err(ConfigError::Invalid(format!(
                "moving average window {} outside [{}, {}]",
                config.ma_window, MIN_MA_WINDOW, MAX_MA_WINDOW
            )));
        }
        if config.provider.timeout_seconds == 0 {
            return Err(ConfigError::Invalid("provider timeout must be positive".into()));
        }

        Ok(Self {
            first_ticker,
            second_ticker,
            start: config.start_date,
            end: config.end_date.unwrap_or(today),
            ma_window: config.ma_window,
        })
    }
}
