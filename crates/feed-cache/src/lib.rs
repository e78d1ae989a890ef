#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/hedgeline/feed/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Caching implementations for the cache-first market data feed.
//!
//! This crate provides implementations of the [`DataCache`] trait from `feed-core`:
//!
//! - [`SqliteCache`] - Persistent SQLite-backed cache (default, requires `sqlite` feature)
//! - [`InMemoryCache`] - Process-lifetime in-memory cache
//! - [`NoopCache`] - No-op cache that doesn't store anything

/// In-memory cache implementation.
pub mod memory;
/// No-op cache implementation.
pub mod noop;

/// SQLite-based cache implementation.
#[cfg(feature = "sqlite")]
pub mod sqlite;

// Re-export the trait for convenience
pub use feed_core::DataCache;

// Re-export implementations
pub use memory::InMemoryCache;
pub use noop::NoopCache;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteCache;
