//! Provider traits for fetching market data from a broker.
//!
//! This module defines the adapter surface the retrieval façade consumes:
//!
//! - [`DataProvider`] - Base trait for all providers
//! - [`BarProvider`] - Historical OHLCV bars
//! - [`ReportProvider`] - Raw fundamentals reports
//!
//! Session lifecycle (connect, reconnect, disconnect) is entirely the
//! adapter's concern; callers only ever observe fetch success, failure,
//! or an empty result.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::fmt::Debug;

use crate::{
    error::Result,
    period::ReportType,
    types::{RawBar, Ticker},
};

/// Base trait for all data providers.
///
/// All providers must implement this trait to provide basic metadata
/// about the provider and its capabilities.
pub trait DataProvider: Send + Sync + Debug {
    /// Returns the name of this provider (e.g., "ibkr").
    fn name(&self) -> &str;

    /// Returns a description of this provider.
    fn description(&self) -> &str;
}

/// Provider for historical OHLCV bar data.
#[async_trait]
pub trait BarProvider: DataProvider {
    /// Fetches raw daily bars for a ticker within a date range, inclusive.
    ///
    /// An empty vector means the provider had no data for the range; it is
    /// not an error.
    async fn fetch_bars(
        &self,
        ticker: &Ticker,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RawBar>>;
}

/// Provider for raw fundamentals reports.
#[async_trait]
pub trait ReportProvider: DataProvider {
    /// Fetches the raw structured report text (XML) for a ticker.
    ///
    /// Returns `Ok(None)` when the provider has no report for the ticker;
    /// only transport-level failures are errors.
    async fn fetch_report(&self, ticker: &Ticker, report_type: ReportType)
    -> Result<Option<String>>;
}
