use crate::config::ProviderConfig;
use crate::model::{DataFetchError, TimeSeries};
use crate::normalizer::normalize_series;
use crate::parser::{ChartParser, Parser};
use crate::provider::traits::{PriceProvider, PriceRequest};
use crate::utils::unix_midnight;

use reqwest::{Client, Url};
use std::time::Duration;
use tracing::{debug, info};

pub struct YahooProvider {
    client: Client,
    base_url: String,
    parser: ChartParser,
}

impl YahooProvider {
    pub fn new(cfg: &ProviderConfig) -> Result<Self, DataFetchError> {
        let client = Client::builder()
            .user_agent(cfg.user_agent.as_str())
            .timeout(Duration::from_secs(cfg.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            parser: ChartParser::new(cfg.adjusted_close),
        })
    }

    fn build_url(&self, req: &PriceRequest) -> Result<Url, DataFetchError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| DataFetchError::Http(format!("invalid base url {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| DataFetchError::Http(format!("base url {} cannot have a path", self.base_url)))?
            .extend(["v8", "finance", "chart", req.ticker.as_str()]);
        url.query_pairs_mut()
            .append_pair("period1", &unix_midnight(req.start).to_string())
            .append_pair("period2", &unix_midnight(req.end).to_string())
            .append_pair("interval", "1d")
            .append_pair("events", "history")
            .append_pair("includeAdjustedClose", "true");
        Ok(url)
    }
}

#[async_trait::async_trait]
impl PriceProvider for YahooProvider {
    async fn fetch_closes(&self, req: &PriceRequest) -> Result<TimeSeries, DataFetchError> {
        if req.start >= req.end {
            return Err(DataFetchError::InvalidRange {
                start: req.start,
                end: req.end,
            });
        }

        let url = self.build_url(req)?;
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Yahoo reports unknown symbols as 404 with a chart.error body
            return Err(ChartParser::provider_error(&body)
                .unwrap_or(DataFetchError::Status(status.as_u16())));
        }

        let mut series = self.parser.parse(&req.ticker, &body)?;
        normalize_series(&mut series);
        if series.is_empty() {
            return Err(DataFetchError::NoData(req.ticker.clone()));
        }

        info!(
            "Fetched {} closes for {} ({} .. {})",
            series.len(),
            req.ticker,
            req.start,
            req.end
        );
        Ok(series)
    }
}
