use crate::config::Config;
use crate::errors::{Result, TrackerError};
use crate::models::performer::Performer;
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Backend API the tracker consumes. The production impl talks HTTP; tests
/// substitute their own.
#[async_trait]
pub trait StockBackend {
    /// Fetch the raw daily time-series payload for a symbol.
    async fn fetch_daily(&self, symbol: &str) -> Result<Value>;

    /// Fetch the precomputed S&P 500 top-performers table.
    async fn fetch_performers(&self) -> Result<Vec<Performer>>;
}

/// 后端API客户端
pub struct ApiClient {
    client: Client,
    api_base: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(TrackerError::RequestError)?;

        Ok(Self {
            client,
            api_base: config.api_base.clone(),
        })
    }
}

#[async_trait]
impl StockBackend for ApiClient {
    async fn fetch_daily(&self, symbol: &str) -> Result<Value> {
        let url = format!("{}/api/stocks/{}", self.api_base, symbol);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            // 失败响应的detail字段作为错误信息
            let message = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| body.get("detail").and_then(|d| d.as_str()).map(String::from))
                .unwrap_or_else(|| "Failed to fetch stock data".to_string());
            return Err(TrackerError::ApiError(message));
        }

        let payload = response.json::<Value>().await?;
        Ok(payload)
    }

    async fn fetch_performers(&self) -> Result<Vec<Performer>> {
        let url = format!("{}/api/dashboard/sp500-performers", self.api_base);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(TrackerError::ApiError(format!(
                "Failed to fetch performers: HTTP status {}",
                response.status()
            )));
        }

        let performers = response.json::<Vec<Performer>>().await?;
        info!("fetched {} performers", performers.len());
        Ok(performers)
    }
}
