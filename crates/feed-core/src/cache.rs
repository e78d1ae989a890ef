//! Cache contract for storing fetched market data.
//!
//! This module defines the [`DataCache`] trait with its two independently
//! keyed sections (prices, financial metrics) and the cache-key
//! construction helpers.
//!
//! Keys are opaque strings matched exactly: no range queries, no key
//! decomposition, no eviction. Two keys are equal iff every constituent
//! query parameter is equal.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{
    error::Result,
    period::Period,
    types::{FinancialMetrics, Price, Ticker},
};

/// Builds the cache key for a price query.
///
/// The `"{ticker}_{start}_{end}"` concatenation is a compatibility
/// contract with previously populated caches and must not change.
#[must_use]
pub fn price_key(ticker: &Ticker, start: NaiveDate, end: NaiveDate) -> String {
    format!("{ticker}_{start}_{end}")
}

/// Builds the cache key for a financial metrics query.
///
/// The `"{ticker}_{period}_{end}_{limit}"` concatenation is a
/// compatibility contract with previously populated caches and must not
/// change.
#[must_use]
pub fn metrics_key(ticker: &Ticker, period: Period, end: NaiveDate, limit: usize) -> String {
    format!("{ticker}_{period}_{end}_{limit}")
}

/// Trait for caching fetched market data.
///
/// Implementations can store data in various backends (in-memory, SQLite)
/// to avoid repeated provider round-trips. `set_*` overwrites
/// unconditionally; there is no merge or partial update.
#[async_trait]
pub trait DataCache: Send + Sync {
    /// Retrieves cached prices stored under `key`.
    ///
    /// Returns `Ok(Some(prices))` on an exact key match, `Ok(None)` otherwise.
    async fn get_prices(&self, key: &str) -> Result<Option<Vec<Price>>>;

    /// Stores prices under `key`, replacing any previous entry.
    async fn set_prices(&self, key: &str, prices: &[Price]) -> Result<()>;

    /// Retrieves cached financial metrics stored under `key`.
    ///
    /// Returns `Ok(Some(metrics))` on an exact key match, `Ok(None)` otherwise.
    async fn get_financial_metrics(&self, key: &str) -> Result<Option<Vec<FinancialMetrics>>>;

    /// Stores financial metrics under `key`, replacing any previous entry.
    async fn set_financial_metrics(&self, key: &str, metrics: &[FinancialMetrics]) -> Result<()>;

    /// Clears all cached data in both sections.
    async fn clear(&self) -> Result<()>;
}
