//! Backend access for the earn views.
//!
//! Provider traits decouple the views from transport; the HTTP clients
//! implement them against the aggregation backend and the Ociswap preview
//! service. Per-account data goes through a short-lived cache.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod providers;
pub mod service;

pub use cache::{AccountCache, CachedProvider};
pub use client::{EarnApiClient, OciswapPreviewClient};
pub use config::{CacheConfig, EarnConfig};
pub use error::DataError;
pub use providers::{
    AccountDataProvider, LiquidityPreviewSource, PoolSource, PortfolioSource, Positions,
    PreviewRequest, StaticBalances, StrategySource,
};
pub use service::PortfolioService;
