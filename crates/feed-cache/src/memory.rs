//! In-memory cache implementation.

use async_trait::async_trait;
use feed_core::{DataCache, FinancialMetrics, Price, Result};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Process-lifetime in-memory cache.
///
/// Data is stored in `RwLock`-protected `HashMap`s, one per cache section,
/// and is lost when the cache is dropped. Entries are never expired or
/// evicted; a store under an existing key replaces the previous value
/// (last writer wins).
#[derive(Debug, Default)]
pub struct InMemoryCache {
    prices: RwLock<HashMap<String, Vec<Price>>>,
    metrics: RwLock<HashMap<String, Vec<FinancialMetrics>>>,
}

impl InMemoryCache {
    /// Create a new empty in-memory cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DataCache for InMemoryCache {
    #[instrument(skip(self))]
    async fn get_prices(&self, key: &str) -> Result<Option<Vec<Price>>> {
        let cache = self.prices.read().await;
        match cache.get(key) {
            Some(prices) => {
                debug!("Cache hit for prices");
                Ok(Some(prices.clone()))
            }
            None => {
                debug!("Cache miss for prices");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, prices), fields(count = prices.len()))]
    async fn set_prices(&self, key: &str, prices: &[Price]) -> Result<()> {
        let mut cache = self.prices.write().await;
        cache.insert(key.to_string(), prices.to_vec());
        debug!("Cached {} price records", prices.len());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_financial_metrics(&self, key: &str) -> Result<Option<Vec<FinancialMetrics>>> {
        let cache = self.metrics.read().await;
        match cache.get(key) {
            Some(metrics) => {
                debug!("Cache hit for financial metrics");
                Ok(Some(metrics.clone()))
            }
            None => {
                debug!("Cache miss for financial metrics");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, metrics), fields(count = metrics.len()))]
    async fn set_financial_metrics(&self, key: &str, metrics: &[FinancialMetrics]) -> Result<()> {
        let mut cache = self.metrics.write().await;
        cache.insert(key.to_string(), metrics.to_vec());
        debug!("Cached {} metrics records", metrics.len());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> Result<()> {
        self.prices.write().await.clear();
        self.metrics.write().await.clear();
        debug!("Cleared all cache entries");
        Ok(())
    }
}
