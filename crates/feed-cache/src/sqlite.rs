//! SQLite-based cache implementation.

use async_trait::async_trait;
use chrono::Utc;
use feed_core::{DataCache, FeedError, FinancialMetrics, Price, Result};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, instrument};

/// SQLite-backed cache for market data.
///
/// Stores one row per cache key with the value serialized as JSON,
/// providing persistence across application restarts while keeping the
/// same exact-key contract as [`InMemoryCache`](crate::InMemoryCache).
#[derive(Debug)]
pub struct SqliteCache {
    conn: Mutex<Connection>,
}

impl SqliteCache {
    /// Create a new SQLite cache at the given path.
    ///
    /// # Arguments
    /// * `path` - Path to the SQLite database file
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or schema creation fails.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| FeedError::Cache(e.to_string()))?;
        let cache = Self {
            conn: Mutex::new(conn),
        };
        cache.initialize_schema()?;
        Ok(cache)
    }

    /// Create an in-memory SQLite cache.
    ///
    /// Useful for testing; data is lost when the cache is dropped.
    ///
    /// # Errors
    /// Returns an error if schema creation fails.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| FeedError::Cache(e.to_string()))?;
        let cache = Self {
            conn: Mutex::new(conn),
        };
        cache.initialize_schema()?;
        Ok(cache)
    }

    /// Initialize the database schema.
    fn initialize_schema(&self) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| FeedError::Cache(e.to_string()))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS price_cache (
                key TEXT PRIMARY KEY,
                data_json TEXT NOT NULL,
                cached_at TEXT NOT NULL
            )",
            [],
        )
        .map_err(|e| FeedError::Cache(e.to_string()))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS metrics_cache (
                key TEXT PRIMARY KEY,
                data_json TEXT NOT NULL,
                cached_at TEXT NOT NULL
            )",
            [],
        )
        .map_err(|e| FeedError::Cache(e.to_string()))?;

        debug!("SQLite cache schema initialized");
        Ok(())
    }

    fn get_json(&self, table: &str, key: &str) -> Result<Option<String>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| FeedError::Cache(e.to_string()))?;
        conn.query_row(
            &format!("SELECT data_json FROM {table} WHERE key = ?1"),
            params![key],
            |row| row.get::<_, String>(0),
        )
        .optional()
        .map_err(|e| FeedError::Cache(e.to_string()))
    }

    fn set_json(&self, table: &str, key: &str, data_json: &str) -> Result<()> {
        let cached_at = Utc::now().to_rfc3339();
        let conn = self
            .conn
            .lock()
            .map_err(|e| FeedError::Cache(e.to_string()))?;
        conn.execute(
            &format!("INSERT OR REPLACE INTO {table} (key, data_json, cached_at) VALUES (?1, ?2, ?3)"),
            params![key, data_json, cached_at],
        )
        .map_err(|e| FeedError::Cache(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl DataCache for SqliteCache {
    #[instrument(skip(self))]
    async fn get_prices(&self, key: &str) -> Result<Option<Vec<Price>>> {
        match self.get_json("price_cache", key)? {
            Some(json) => {
                let prices: Vec<Price> =
                    serde_json::from_str(&json).map_err(|e| FeedError::Cache(e.to_string()))?;
                debug!("Found {} cached price records", prices.len());
                Ok(Some(prices))
            }
            None => {
                debug!("No cached prices found");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, prices), fields(count = prices.len()))]
    async fn set_prices(&self, key: &str, prices: &[Price]) -> Result<()> {
        let json = serde_json::to_string(prices).map_err(|e| FeedError::Cache(e.to_string()))?;
        self.set_json("price_cache", key, &json)?;
        debug!("Cached {} price records", prices.len());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_financial_metrics(&self, key: &str) -> Result<Option<Vec<FinancialMetrics>>> {
        match self.get_json("metrics_cache", key)? {
            Some(json) => {
                let metrics: Vec<FinancialMetrics> =
                    serde_json::from_str(&json).map_err(|e| FeedError::Cache(e.to_string()))?;
                debug!("Found {} cached metrics records", metrics.len());
                Ok(Some(metrics))
            }
            None => {
                debug!("No cached metrics found");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, metrics), fields(count = metrics.len()))]
    async fn set_financial_metrics(&self, key: &str, metrics: &[FinancialMetrics]) -> Result<()> {
        let json = serde_json::to_string(metrics).map_err(|e| FeedError::Cache(e.to_string()))?;
        self.set_json("metrics_cache", key, &json)?;
        debug!("Cached {} metrics records", metrics.len());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| FeedError::Cache(e.to_string()))?;
        conn.execute("DELETE FROM price_cache", [])
            .map_err(|e| FeedError::Cache(e.to_string()))?;
        conn.execute("DELETE FROM metrics_cache", [])
            .map_err(|e| FeedError::Cache(e.to_string()))?;
        debug!("Cleared all cache entries");
        Ok(())
    }
}
