#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/hedgeline/feed/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core traits and types for the cache-first market data feed.
//!
//! This crate provides the foundational abstractions:
//!
//! - [`DataProvider`](provider::DataProvider) - Base trait for all providers
//! - [`BarProvider`](provider::BarProvider) - Historical OHLCV bars
//! - [`ReportProvider`](provider::ReportProvider) - Raw fundamentals reports
//! - [`DataCache`](cache::DataCache) - Exact-match caching contract

/// Cache trait and cache-key construction.
pub mod cache;
/// Error types for feed operations.
pub mod error;
/// Reporting period and report type definitions.
pub mod period;
/// Provider traits for fetching market data.
pub mod provider;
/// Core record types (Ticker, Price, FinancialMetrics, etc.).
pub mod types;

// Re-export commonly used items at crate root
pub use cache::{DataCache, metrics_key, price_key};
pub use error::{FeedError, Result};
pub use period::{Period, ReportType};
pub use provider::{BarProvider, DataProvider, ReportProvider};
pub use types::{
    CompanyNews, FinancialMetrics, InsiderTrade, LineItem, PRICE_TIME_FORMAT, Price, RawBar,
    Ticker,
};
