#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/hedgeline/feed/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Interactive Brokers provider adapter.
//!
//! This crate owns everything connection-shaped: the environment-derived
//! TWS/Gateway settings and the translation of feed queries into TWS
//! request parameters. The retrieval façade never sees any of it; it only
//! consumes the [`BarProvider`] and [`ReportProvider`] traits.
//!
//! The socket transport is not wired up yet and the fetch methods return
//! [`FeedError::NotSupported`]. Request construction is final, so a
//! transport can be dropped in without touching callers.
//!
//! # Example
//!
//! ```
//! use feed_ibkr::IbkrProvider;
//!
//! // Connect to TWS paper trading
//! let provider = IbkrProvider::new("127.0.0.1", 7497);
//!
//! // Or pick up IBKR_HOST / IBKR_PORT / IBKR_CLIENT_ID from the environment
//! let from_env = IbkrProvider::from_env();
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;
use feed_core::{
    BarProvider, DataProvider, FeedError, RawBar, ReportProvider, ReportType, Result, Ticker,
};
use tracing::debug;

/// Default TWS host when `IBKR_HOST` is unset.
const DEFAULT_HOST: &str = "127.0.0.1";
/// Default TWS paper-trading port when `IBKR_PORT` is unset.
const DEFAULT_PORT: u16 = 7497;
/// Default API client id when `IBKR_CLIENT_ID` is unset.
const DEFAULT_CLIENT_ID: u32 = 1;

/// Bar size requested for historical data.
const BAR_SIZE: &str = "1 day";
/// Data series requested for historical bars.
const WHAT_TO_SHOW: &str = "ADJUSTED_LAST";
/// Routing exchange used for stock contracts.
const EXCHANGE: &str = "SMART";
/// Contract currency used for stock contracts.
const CURRENCY: &str = "USD";

/// Connection settings for TWS or IB Gateway.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IbkrConfig {
    /// Host address (usually "127.0.0.1").
    pub host: String,
    /// Port number (7496 for TWS live, 7497 for TWS paper, 4001/4002 for Gateway).
    pub port: u16,
    /// API client id; must be unique per connected client.
    pub client_id: u32,
}

impl Default for IbkrConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            client_id: DEFAULT_CLIENT_ID,
        }
    }
}

impl IbkrConfig {
    /// Reads connection settings from `IBKR_HOST`, `IBKR_PORT` and
    /// `IBKR_CLIENT_ID`, falling back to the paper-trading defaults for
    /// unset variables.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Parse`] if a set variable is not a valid number.
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("IBKR_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = match std::env::var("IBKR_PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| FeedError::Parse(format!("invalid IBKR_PORT: {raw}")))?,
            Err(_) => DEFAULT_PORT,
        };
        let client_id = match std::env::var("IBKR_CLIENT_ID") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| FeedError::Parse(format!("invalid IBKR_CLIENT_ID: {raw}")))?,
            Err(_) => DEFAULT_CLIENT_ID,
        };
        Ok(Self {
            host,
            port,
            client_id,
        })
    }
}

/// Parameters for a TWS `reqHistoricalData` call.
///
/// Mirrors the request the feed issues for daily adjusted bars: regular
/// trading hours only, duration counted in days with a one-day floor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoricalBarRequest {
    /// Contract symbol.
    pub symbol: String,
    /// Routing exchange for the contract.
    pub exchange: &'static str,
    /// Contract currency.
    pub currency: &'static str,
    /// Request end bound in TWS `"%Y%m%d %H:%M:%S"` form.
    pub end_date_time: String,
    /// Lookback duration in TWS form, e.g. `"30 D"`.
    pub duration: String,
    /// Bar size setting.
    pub bar_size: &'static str,
    /// Data series to return.
    pub what_to_show: &'static str,
    /// Restrict to regular trading hours.
    pub use_rth: bool,
}

impl HistoricalBarRequest {
    /// Builds the request parameters for daily bars covering `[start, end]`.
    #[must_use]
    pub fn new(ticker: &Ticker, start: NaiveDate, end: NaiveDate) -> Self {
        let duration_days = (end - start).num_days().max(1);
        Self {
            symbol: ticker.to_string(),
            exchange: EXCHANGE,
            currency: CURRENCY,
            end_date_time: format!("{} 00:00:00", end.format("%Y%m%d")),
            duration: format!("{duration_days} D"),
            bar_size: BAR_SIZE,
            what_to_show: WHAT_TO_SHOW,
            use_rth: true,
        }
    }
}

/// Interactive Brokers data provider.
///
/// Request construction and configuration are complete; the socket
/// transport is stubbed.
///
/// # TODO
///
/// - Wire up the TWS socket client (connect/reconnect with `IbkrConfig`)
/// - Issue `reqHistoricalData` from [`HistoricalBarRequest`] and decode bars
/// - Issue `reqFundamentalData` with the [`ReportType`] wire string and
///   return the raw XML payload
#[derive(Clone, Debug)]
pub struct IbkrProvider {
    config: IbkrConfig,
}

impl IbkrProvider {
    /// Creates a provider with explicit host and port and the default
    /// client id.
    #[must_use]
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            config: IbkrConfig {
                host: host.to_string(),
                port,
                ..Default::default()
            },
        }
    }

    /// Creates a provider from explicit connection settings.
    #[must_use]
    pub fn with_config(config: IbkrConfig) -> Self {
        Self { config }
    }

    /// Creates a provider from `IBKR_*` environment variables, falling back
    /// to the paper-trading defaults when a variable is unset or malformed.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            config: IbkrConfig::from_env().unwrap_or_default(),
        }
    }

    /// Returns the connection settings this provider was built with.
    #[must_use]
    pub const fn config(&self) -> &IbkrConfig {
        &self.config
    }
}

impl DataProvider for IbkrProvider {
    fn name(&self) -> &str {
        "ibkr"
    }

    fn description(&self) -> &str {
        "Interactive Brokers TWS API provider - historical daily bars and \
         fundamentals reports via Trader Workstation or IB Gateway"
    }
}

#[async_trait]
impl BarProvider for IbkrProvider {
    async fn fetch_bars(
        &self,
        ticker: &Ticker,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RawBar>> {
        let request = HistoricalBarRequest::new(ticker, start, end);
        debug!(
            host = %self.config.host,
            port = self.config.port,
            symbol = %request.symbol,
            duration = %request.duration,
            end = %request.end_date_time,
            "Would request historical bars"
        );
        Err(FeedError::NotSupported(
            "IBKR transport not yet implemented".to_string(),
        ))
    }
}

#[async_trait]
impl ReportProvider for IbkrProvider {
    async fn fetch_report(
        &self,
        ticker: &Ticker,
        report_type: ReportType,
    ) -> Result<Option<String>> {
        debug!(
            host = %self.config.host,
            port = self.config.port,
            ticker = %ticker,
            report_type = %report_type,
            "Would request fundamentals report"
        );
        Err(FeedError::NotSupported(
            "IBKR transport not yet implemented".to_string(),
        ))
    }
}
