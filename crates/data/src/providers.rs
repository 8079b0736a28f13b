//! Data source seams. Concrete HTTP clients live in [`crate::client`].

use crate::error::Result;
use async_trait::async_trait;
use earn_domain::entities::{
    AddLiquidityPreview, Balances, Pool, PortfolioItem, PositionKind, Strategy, StrategyManifest,
};
use earn_domain::math::TickBounds;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

#[async_trait]
pub trait PoolSource: Send + Sync {
    async fn fetch_pools(&self) -> Result<Vec<Pool>>;
}

#[async_trait]
pub trait PortfolioSource: Send + Sync {
    /// Positions of one kind held by `account`.
    async fn fetch_positions(&self, account: &str, kind: PositionKind)
    -> Result<Vec<PortfolioItem>>;
}

#[async_trait]
pub trait StrategySource: Send + Sync {
    /// Available strategies. Sources that fail report an empty list.
    async fn fetch_strategies(&self) -> Vec<Strategy>;

    /// Transaction manifest that enters strategy `id` with `xrd_amount`.
    async fn strategy_manifest(
        &self,
        id: u64,
        account: &str,
        xrd_amount: Decimal,
    ) -> Result<StrategyManifest>;
}

/// Parameters of an add-liquidity quote. Unset amounts and bounds are left
/// for the service to infer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRequest {
    pub pool_address: String,
    pub x_amount: Option<Decimal>,
    pub y_amount: Option<Decimal>,
    pub bounds: Option<TickBounds>,
}

impl PreviewRequest {
    pub fn new(pool_address: impl Into<String>) -> Self {
        Self {
            pool_address: pool_address.into(),
            x_amount: None,
            y_amount: None,
            bounds: None,
        }
    }

    /// Query parameters, skipping anything unset or zero.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("pool_address", self.pool_address.clone())];
        let amounts = [("x_amount", self.x_amount), ("y_amount", self.y_amount)];
        for (key, amount) in amounts {
            if let Some(amount) = amount.filter(|a| !a.is_zero()) {
                params.push((key, amount.normalize().to_string()));
            }
        }
        if let Some(bounds) = &self.bounds {
            let (left, right) = bounds.to_preview_bounds();
            params.push(("left_bound", left));
            params.push(("right_bound", right));
        }
        params
    }
}

#[async_trait]
pub trait LiquidityPreviewSource: Send + Sync {
    /// `Ok(None)` when the service cannot quote the request.
    async fn add_liquidity_preview(
        &self,
        request: &PreviewRequest,
    ) -> Result<Option<AddLiquidityPreview>>;
}

/// Anything fetched per account: balances, positions.
#[async_trait]
pub trait AccountDataProvider: Send + Sync {
    type Data: Clone + Send + Sync + 'static;

    async fn fetch(&self, account: &str) -> Result<Self::Data>;
}

/// Positions of a single kind, as an account-keyed provider.
pub struct Positions<S> {
    source: Arc<S>,
    kind: PositionKind,
}

impl<S: PortfolioSource> Positions<S> {
    pub fn new(source: Arc<S>, kind: PositionKind) -> Self {
        Self { source, kind }
    }

    pub fn kind(&self) -> PositionKind {
        self.kind
    }
}

#[async_trait]
impl<S: PortfolioSource> AccountDataProvider for Positions<S> {
    type Data = Vec<PortfolioItem>;

    async fn fetch(&self, account: &str) -> Result<Self::Data> {
        self.source.fetch_positions(account, self.kind).await
    }
}

/// Balances supplied up front, for offline use and tests.
/// Unknown accounts have no holdings.
#[derive(Debug, Clone, Default)]
pub struct StaticBalances {
    accounts: HashMap<String, Balances>,
}

impl StaticBalances {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, balances: Balances) -> Self {
        self.accounts.insert(balances.account.clone(), balances);
        self
    }
}

#[async_trait]
impl AccountDataProvider for StaticBalances {
    type Data = Balances;

    async fn fetch(&self, account: &str) -> Result<Balances> {
        Ok(self
            .accounts
            .get(account)
            .cloned()
            .unwrap_or_else(|| Balances::empty(account)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_preview_params_skip_unset_values() {
        let request = PreviewRequest {
            x_amount: Some(dec!(10.50)),
            y_amount: Some(Decimal::ZERO),
            ..PreviewRequest::new("component_1")
        };
        assert_eq!(
            request.params(),
            vec![
                ("pool_address", "component_1".to_string()),
                ("x_amount", "10.5".to_string()),
            ]
        );
    }

    #[test]
    fn test_preview_params_include_bounds() {
        let request = PreviewRequest {
            bounds: Some(TickBounds {
                lower_tick: -23040,
                upper_tick: 22980,
                lower_price: dec!(0.1),
                upper_price: dec!(10),
            }),
            ..PreviewRequest::new("component_1")
        };
        let params = request.params();
        assert!(params.contains(&("left_bound", "-23040".to_string())));
        assert!(params.contains(&("right_bound", "22980".to_string())));
    }

    #[tokio::test]
    async fn test_static_balances() {
        let mut held = Balances::empty("acc");
        held.fungibles.push(earn_domain::entities::ResourceBalance {
            resource_address: "resource_xrd".to_string(),
            balance: dec!(5),
        });
        let provider = StaticBalances::new().with(held.clone());

        assert_eq!(provider.fetch("acc").await.unwrap(), held);
        assert!(provider.fetch("nobody").await.unwrap().fungibles.is_empty());
    }
}
