use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use thiserror::Error;

use market_core::{DepthSnapshotEvent, ExchangeInfoEvent, Ticker24hEvent};

use crate::config::ClientConfig;

use super::quota::QuotaMonitor;

#[derive(Error, Debug)]
pub enum RestError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {code} - {msg}")]
    Api { code: i32, msg: String },
    #[error("Parse error: {0}")]
    Parse(String),
}

/// REST API client for the exchange's public market-data endpoints.
///
/// Every response's used-weight header is fed to the [`QuotaMonitor`]
/// before the payload is returned; quota accounting never blocks a call.
#[derive(Clone)]
pub struct RestClient {
    client: Client,
    base_url: String,
    quota: QuotaMonitor,
}

impl RestClient {
    pub fn new(config: &ClientConfig) -> Result<Self, RestError> {
        let client = Client::builder().timeout(config.request_timeout()).build()?;

        Ok(RestClient {
            client,
            base_url: config.rest_url.clone(),
            quota: QuotaMonitor::new(config.quota_limit, config.quota_warn_threshold),
        })
    }

    /// Get the exchange metadata listing (all tradeable pairs).
    pub async fn exchange_info(&self) -> Result<ExchangeInfoEvent, RestError> {
        self.get("/api/v3/exchangeInfo").await
    }

    /// Get the 24h rolling ticker for a single symbol.
    pub async fn ticker_24hr(&self, symbol: &str) -> Result<Ticker24hEvent, RestError> {
        let path = format!("/api/v3/ticker/24hr?symbol={}", symbol);
        self.get(&path).await
    }

    /// Get 24h rolling tickers for every symbol in one call.
    pub async fn all_tickers_24hr(&self) -> Result<Vec<Ticker24hEvent>, RestError> {
        self.get("/api/v3/ticker/24hr").await
    }

    /// Get an order book depth snapshot at the given level limit.
    pub async fn depth(&self, symbol: &str, limit: usize) -> Result<DepthSnapshotEvent, RestError> {
        let path = format!("/api/v3/depth?symbol={}&limit={}", symbol, limit);
        self.get(&path).await
    }

    /// Most recently observed request-weight usage.
    pub fn quota_usage(&self) -> u32 {
        self.quota.last_usage()
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, RestError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {}", path);

        let resp = self.client.get(&url).send().await?;
        self.quota.observe(resp.headers());

        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, RestError> {
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            if let Ok(err) = serde_json::from_str::<ApiError>(&text) {
                return Err(RestError::Api {
                    code: err.code,
                    msg: err.msg,
                });
            }
            return Err(RestError::Parse(format!("HTTP {}: {}", status, text)));
        }

        serde_json::from_str(&text).map_err(|e| RestError::Parse(e.to_string()))
    }
}

#[derive(Deserialize)]
struct ApiError {
    code: i32,
    msg: String,
}
