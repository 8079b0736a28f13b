//! Short-lived per-account cache.

use crate::config::CacheConfig;
use crate::error::Result;
use crate::providers::AccountDataProvider;
use async_trait::async_trait;
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info};

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    data: V,
    fetched_at: Instant,
}

#[derive(Debug)]
struct CacheState<V> {
    entries: HashMap<String, CacheEntry<V>>,
    /// Bumped on every refresh so fetches started earlier are not stored.
    epoch: u64,
}

/// Account-keyed read-through cache with a fixed time-to-live.
///
/// Fetches run without holding the lock. A value is stored in one write, so
/// readers see either the old entry or the complete new one.
#[derive(Debug)]
pub struct AccountCache<V> {
    state: RwLock<CacheState<V>>,
    ttl: Duration,
}

impl<V: Clone> AccountCache<V> {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            state: RwLock::new(CacheState {
                entries: HashMap::new(),
                epoch: 0,
            }),
            ttl: config.ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The cached value for `account` if it has not expired.
    pub async fn get(&self, account: &str) -> Option<V> {
        let state = self.state.read().await;
        state
            .entries
            .get(account)
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .map(|entry| entry.data.clone())
    }

    /// Returns the cached value, or runs `fetch` and caches its result.
    ///
    /// # Errors
    /// Errors from `fetch` are returned as-is and nothing is cached.
    pub async fn get_or_fetch<F, Fut, E>(&self, account: &str, fetch: F) -> std::result::Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<V, E>>,
    {
        let epoch = {
            let state = self.state.read().await;
            if let Some(entry) = state.entries.get(account) {
                if entry.fetched_at.elapsed() < self.ttl {
                    debug!(account, "Cache hit");
                    return Ok(entry.data.clone());
                }
            }
            state.epoch
        };

        debug!(account, "Cache miss, fetching");
        let data = fetch().await?;

        let mut state = self.state.write().await;
        if state.epoch == epoch {
            state.entries.insert(
                account.to_string(),
                CacheEntry {
                    data: data.clone(),
                    fetched_at: Instant::now(),
                },
            );
        } else {
            debug!(account, "Cache refreshed during fetch, result not stored");
        }
        Ok(data)
    }

    /// Drops one account's entry; other accounts stay cached.
    pub async fn invalidate(&self, account: &str) {
        if self.state.write().await.entries.remove(account).is_some() {
            debug!(account, "Cache entry invalidated");
        }
    }

    /// Drops every entry; the next read of any account fetches.
    pub async fn refresh(&self) {
        let mut state = self.state.write().await;
        let dropped = state.entries.len();
        state.entries.clear();
        state.epoch += 1;
        info!(dropped, epoch = state.epoch, "Cache refreshed");
    }

    /// Number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.state.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Puts an [`AccountCache`] in front of any account-keyed provider.
pub struct CachedProvider<P: AccountDataProvider> {
    provider: P,
    cache: AccountCache<P::Data>,
}

impl<P: AccountDataProvider> CachedProvider<P> {
    pub fn new(provider: P, config: CacheConfig) -> Self {
        Self {
            provider,
            cache: AccountCache::new(config),
        }
    }

    /// Cached read-through fetch.
    pub async fn get(&self, account: &str) -> Result<P::Data> {
        self.cache
            .get_or_fetch(account, || self.provider.fetch(account))
            .await
    }

    pub async fn refresh(&self) {
        self.cache.refresh().await;
    }

    pub async fn invalidate(&self, account: &str) {
        self.cache.invalidate(account).await;
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn cache(&self) -> &AccountCache<P::Data> {
        &self.cache
    }
}

#[async_trait]
impl<P: AccountDataProvider> AccountDataProvider for CachedProvider<P> {
    type Data = P::Data;

    async fn fetch(&self, account: &str) -> Result<Self::Data> {
        self.get(account).await
    }
}
