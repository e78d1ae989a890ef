#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/hedgeline/feed/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Cache-first retrieval façade for financial market data.
//!
//! This crate ties the pieces together: it re-exports the core types and
//! cache implementations, and provides [`DataFeed`], which answers price
//! and fundamentals queries from its cache before falling back to a
//! single provider round-trip.
//!
//! # Features
//!
//! - `ibkr` - Interactive Brokers provider adapter
//! - `cache-sqlite` - SQLite-backed persistent caching

// Core types and traits
pub use feed_core::*;

// Cache implementations
#[cfg(feature = "cache-sqlite")]
pub use feed_cache::SqliteCache;
pub use feed_cache::{InMemoryCache, NoopCache};

// Providers
#[cfg(feature = "ibkr")]
pub use feed_ibkr::IbkrProvider;

mod facade;
/// DataFrame conversion for price series.
pub mod frame;
/// Normalization of raw provider rows.
pub mod normalize;
/// Fundamentals report field extraction.
pub mod report;

pub use facade::{DEFAULT_METRICS_LIMIT, DataFeed};
pub use frame::prices_to_df;
