use crate::cache::CachedProvider;
use crate::config::CacheConfig;
use crate::error::Result;
use crate::providers::{AccountDataProvider, PortfolioSource, Positions};
use earn_domain::entities::{Balances, PortfolioItem, PositionKind};
use earn_domain::metrics::PortfolioTotals;
use std::sync::Arc;
use tracing::info;

/// Cached access to an account's positions and balances.
///
/// Liquidity positions, strategy positions and balances are cached
/// separately; [`PortfolioService::refresh`] drops all three, typically
/// after the user submits a transaction.
pub struct PortfolioService<S: PortfolioSource, B: AccountDataProvider<Data = Balances>> {
    lp: CachedProvider<Positions<S>>,
    strategies: CachedProvider<Positions<S>>,
    balances: CachedProvider<B>,
}

impl<S, B> PortfolioService<S, B>
where
    S: PortfolioSource,
    B: AccountDataProvider<Data = Balances>,
{
    pub fn new(source: Arc<S>, balances: B, config: CacheConfig) -> Self {
        Self {
            lp: CachedProvider::new(Positions::new(Arc::clone(&source), PositionKind::Lp), config),
            strategies: CachedProvider::new(Positions::new(source, PositionKind::Strategy), config),
            balances: CachedProvider::new(balances, config),
        }
    }

    pub async fn positions(&self, account: &str, kind: PositionKind) -> Result<Vec<PortfolioItem>> {
        match kind {
            PositionKind::Lp => self.lp.get(account).await,
            PositionKind::Strategy => self.strategies.get(account).await,
        }
    }

    /// Liquidity positions followed by strategy positions.
    pub async fn all_positions(&self, account: &str) -> Result<Vec<PortfolioItem>> {
        let (mut lp, strategies) = tokio::try_join!(
            self.lp.get(account),
            self.strategies.get(account)
        )?;
        lp.extend(strategies);
        Ok(lp)
    }

    /// Positions of several accounts, concatenated in account order.
    pub async fn positions_for_accounts(&self, accounts: &[String]) -> Result<Vec<PortfolioItem>> {
        let mut items = Vec::new();
        for account in accounts {
            items.extend(self.all_positions(account).await?);
        }
        Ok(items)
    }

    pub async fn totals(&self, account: &str) -> Result<PortfolioTotals> {
        let items = self.all_positions(account).await?;
        Ok(PortfolioTotals::from_items(&items)?)
    }

    pub async fn balances(&self, account: &str) -> Result<Balances> {
        self.balances.get(account).await
    }

    pub async fn refresh(&self) {
        tokio::join!(
            self.lp.refresh(),
            self.strategies.refresh(),
            self.balances.refresh()
        );
        info!("Portfolio caches refreshed");
    }

    /// Drops the cached data of one account, e.g. after it submitted a
    /// transaction.
    pub async fn forget(&self, account: &str) {
        tokio::join!(
            self.lp.invalidate(account),
            self.strategies.invalidate(account),
            self.balances.invalidate(account)
        );
        info!(account, "Account caches dropped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataError;
    use crate::providers::StaticBalances;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeBackend {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl PortfolioSource for FakeBackend {
        async fn fetch_positions(
            &self,
            account: &str,
            kind: PositionKind,
        ) -> Result<Vec<PortfolioItem>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(DataError::Status {
                    url: format!("backend/portfolio?address={account}"),
                    status: 500,
                });
            }
            let mut item = PortfolioItem::new(format!("{account}-{}", kind.as_str()), "ociswap");
            item.strategy = kind == PositionKind::Strategy;
            item.invested = dec!(100);
            item.current_value = dec!(110);
            Ok(vec![item])
        }
    }

    fn service(backend: Arc<FakeBackend>) -> PortfolioService<FakeBackend, StaticBalances> {
        PortfolioService::new(backend, StaticBalances::new(), CacheConfig::default())
    }

    #[tokio::test]
    async fn test_all_positions_lists_lp_first() {
        let backend = Arc::new(FakeBackend::default());
        let service = service(Arc::clone(&backend));

        let items = service.all_positions("acc").await.unwrap();
        let names: Vec<&str> = items.iter().map(|i| i.pool_name.as_str()).collect();
        assert_eq!(names, ["acc-lp", "acc-strategy"]);

        service.positions("acc", PositionKind::Lp).await.unwrap();
        assert_eq!(backend.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_refresh_clears_every_cache() {
        let backend = Arc::new(FakeBackend::default());
        let service = service(Arc::clone(&backend));

        service.all_positions("acc").await.unwrap();
        service.refresh().await;
        service.all_positions("acc").await.unwrap();
        assert_eq!(backend.calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_forget_refetches_one_account() {
        let backend = Arc::new(FakeBackend::default());
        let service = service(Arc::clone(&backend));

        service.all_positions("acc").await.unwrap();
        service.all_positions("other").await.unwrap();
        service.forget("acc").await;

        service.all_positions("acc").await.unwrap();
        service.all_positions("other").await.unwrap();
        assert_eq!(backend.calls.load(Ordering::SeqCst), 6);
    }

    #[tokio::test]
    async fn test_totals() {
        let service = service(Arc::new(FakeBackend::default()));
        let totals = service.totals("acc").await.unwrap();
        assert_eq!(totals.invested, dec!(200));
        assert_eq!(totals.pnl, dec!(20));
        assert_eq!(totals.pnl_percentage, dec!(10));
    }

    #[tokio::test]
    async fn test_errors_propagate() {
        let backend = Arc::new(FakeBackend {
            fail: true,
            ..FakeBackend::default()
        });
        let service = service(backend);
        assert!(matches!(
            service.positions("acc", PositionKind::Lp).await,
            Err(DataError::Status { status: 500, .. })
        ));
    }
}
