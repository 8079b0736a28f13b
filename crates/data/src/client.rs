//! HTTP clients for the aggregation backend and the Ociswap preview API.

use crate::config::EarnConfig;
use crate::error::{DataError, Result};
use crate::providers::{
    LiquidityPreviewSource, PoolSource, PortfolioSource, PreviewRequest, StrategySource,
};
use async_trait::async_trait;
use earn_domain::entities::{
    AddLiquidityPreview, Pool, PortfolioItem, PositionKind, Strategy, StrategyManifest,
};
use reqwest::Client;
use reqwest::header::ACCEPT;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

async fn get_json<T: DeserializeOwned>(http: &Client, url: Url) -> Result<T> {
    debug!(url = %url, "GET");
    let response = http
        .get(url.clone())
        .header(ACCEPT, "application/json")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(DataError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

/// Client for the pools, portfolio and strategies endpoints.
#[derive(Debug, Clone)]
pub struct EarnApiClient {
    http: Client,
    base_url: String,
}

impl EarnApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &EarnConfig) -> Self {
        Self::new(config.api_url.as_str())
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url> {
        let url = format!("{}/{path}", self.base_url);
        if params.is_empty() {
            return Ok(Url::parse(&url)?);
        }
        Ok(Url::parse_with_params(&url, params)?)
    }

    fn pools_url(&self) -> Result<Url> {
        self.endpoint("pools", &[])
    }

    fn portfolio_url(&self, account: &str, kind: PositionKind) -> Result<Url> {
        self.endpoint(
            "portfolio",
            &[("address", account), ("type", kind.as_str())],
        )
    }

    fn strategies_url(&self) -> Result<Url> {
        self.endpoint("strategies", &[])
    }

    fn execute_url(&self, id: u64, account: &str, xrd_amount: Decimal) -> Result<Url> {
        let id = id.to_string();
        let xrd_amount = xrd_amount.normalize().to_string();
        self.endpoint(
            "strategies/execute",
            &[
                ("id", id.as_str()),
                ("account", account),
                ("xrd_amount", xrd_amount.as_str()),
            ],
        )
    }
}

#[async_trait]
impl PoolSource for EarnApiClient {
    async fn fetch_pools(&self) -> Result<Vec<Pool>> {
        let pools: Vec<Pool> = get_json(&self.http, self.pools_url()?).await?;
        debug!(count = pools.len(), "Fetched pools");
        Ok(pools)
    }
}

#[async_trait]
impl PortfolioSource for EarnApiClient {
    async fn fetch_positions(
        &self,
        account: &str,
        kind: PositionKind,
    ) -> Result<Vec<PortfolioItem>> {
        let url = self.portfolio_url(account, kind)?;
        get_json(&self.http, url).await
    }
}

#[async_trait]
impl StrategySource for EarnApiClient {
    async fn fetch_strategies(&self) -> Vec<Strategy> {
        let fetched = match self.strategies_url() {
            Ok(url) => get_json(&self.http, url).await,
            Err(e) => Err(e),
        };
        fetched.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to fetch strategies");
            Vec::new()
        })
    }

    async fn strategy_manifest(
        &self,
        id: u64,
        account: &str,
        xrd_amount: Decimal,
    ) -> Result<StrategyManifest> {
        let url = self.execute_url(id, account, xrd_amount)?;
        get_json(&self.http, url).await
    }
}

/// Client for Ociswap's add-liquidity preview.
#[derive(Debug, Clone)]
pub struct OciswapPreviewClient {
    http: Client,
    url: String,
}

impl OciswapPreviewClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            url: url.into(),
        }
    }

    pub fn from_config(config: &EarnConfig) -> Self {
        Self::new(config.preview_url.as_str())
    }

    fn preview_url(&self, request: &PreviewRequest) -> Result<Url> {
        let params = request.params();
        Ok(Url::parse_with_params(
            &self.url,
            params.iter().map(|(k, v)| (*k, v.as_str())),
        )?)
    }
}

#[async_trait]
impl LiquidityPreviewSource for OciswapPreviewClient {
    async fn add_liquidity_preview(
        &self,
        request: &PreviewRequest,
    ) -> Result<Option<AddLiquidityPreview>> {
        let url = self.preview_url(request)?;
        match get_json(&self.http, url).await {
            Ok(preview) => Ok(Some(preview)),
            Err(e) => {
                warn!(pool = %request.pool_address, error = %e, "Liquidity preview unavailable");
                Ok(None)
            }
        }
    }
}
