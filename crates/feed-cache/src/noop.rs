//! No-op cache implementation.

use async_trait::async_trait;
use feed_core::{DataCache, FinancialMetrics, Price, Result};
use tracing::trace;

/// A no-op cache that doesn't store anything.
///
/// All `get_*` methods return `Ok(None)` and all `set_*` methods return
/// `Ok(())`. Useful for disabling caching or testing code paths without
/// cache hits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

impl NoopCache {
    /// Create a new no-op cache.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DataCache for NoopCache {
    async fn get_prices(&self, _key: &str) -> Result<Option<Vec<Price>>> {
        trace!("NoopCache: get_prices called, returning None");
        Ok(None)
    }

    async fn set_prices(&self, _key: &str, _prices: &[Price]) -> Result<()> {
        trace!("NoopCache: set_prices called, doing nothing");
        Ok(())
    }

    async fn get_financial_metrics(&self, _key: &str) -> Result<Option<Vec<FinancialMetrics>>> {
        trace!("NoopCache: get_financial_metrics called, returning None");
        Ok(None)
    }

    async fn set_financial_metrics(&self, _key: &str, _metrics: &[FinancialMetrics]) -> Result<()> {
        trace!("NoopCache: set_financial_metrics called, doing nothing");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        trace!("NoopCache: clear called, doing nothing");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use feed_core::{Period, Ticker};

    #[tokio::test]
    async fn test_noop_cache_never_stores() {
        let cache = NoopCache::new();
        let prices = vec![Price::new(
            150.0,
            151.0,
            152.0,
            149.0,
            1_000_000,
            "2024-01-02 00:00:00".to_string(),
        )];

        cache
            .set_prices("AAPL_2024-01-01_2024-01-05", &prices)
            .await
            .unwrap();
        assert!(
            cache
                .get_prices("AAPL_2024-01-01_2024-01-05")
                .await
                .unwrap()
                .is_none()
        );

        let metrics = FinancialMetrics::new(
            Ticker::new("AAPL"),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            Period::Ttm,
            "USD",
        );
        cache
            .set_financial_metrics("AAPL_ttm_2024-01-15_10", &[metrics])
            .await
            .unwrap();
        assert!(
            cache
                .get_financial_metrics("AAPL_ttm_2024-01-15_10")
                .await
                .unwrap()
                .is_none()
        );

        assert!(cache.clear().await.is_ok());
    }

    #[test]
    fn test_noop_cache_is_copy() {
        let cache1 = NoopCache::new();
        let cache2 = cache1; // Copy
        let _cache3 = cache2; // Still works because Copy
    }
}
