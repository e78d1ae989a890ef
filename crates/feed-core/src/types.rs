//! Core record types for financial market data.
//!
//! This module defines the fundamental data structures:
//!
//! - [`Ticker`] - Trading symbol
//! - [`RawBar`] - One OHLCV sample as returned by a provider, before normalization
//! - [`Price`] - Normalized OHLCV record with canonical timestamp form
//! - [`FinancialMetrics`] - Fundamental metrics for one reporting period
//! - [`LineItem`], [`InsiderTrade`], [`CompanyNews`] - Declared record shapes
//!   for data categories a provider may not support

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::period::Period;

/// A trading symbol/ticker.
///
/// Tickers are automatically uppercased on creation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticker(String);

impl Ticker {
    /// Creates a new ticker from a string, converting to uppercase.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().to_uppercase())
    }

    /// Returns the ticker as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Ticker {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Ticker {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Ticker {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// One OHLCV bar exactly as the provider returned it.
///
/// Raw bars carry a floating-point volume and an unformatted timestamp;
/// the normalizer turns them into [`Price`] records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawBar {
    /// Timestamp of the bar.
    pub time: NaiveDateTime,
    /// Opening price.
    pub open: f64,
    /// Highest price during the period.
    pub high: f64,
    /// Lowest price during the period.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Trading volume as reported, possibly fractional.
    pub volume: f64,
}

impl RawBar {
    /// Creates a new raw bar.
    #[must_use]
    pub const fn new(
        time: NaiveDateTime,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// Canonical timestamp format used for [`Price::time`].
pub const PRICE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A normalized OHLCV price record.
///
/// `volume` is a whole number of shares and `time` is always in
/// `"YYYY-MM-DD HH:MM:SS"` form. Records are immutable once constructed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Price {
    /// Opening price.
    pub open: f64,
    /// Closing price.
    pub close: f64,
    /// Highest price during the period.
    pub high: f64,
    /// Lowest price during the period.
    pub low: f64,
    /// Trading volume.
    pub volume: u64,
    /// Timestamp in [`PRICE_TIME_FORMAT`] form.
    pub time: String,
}

impl Price {
    /// Creates a new price record.
    #[must_use]
    pub fn new(
        open: f64,
        close: f64,
        high: f64,
        low: f64,
        volume: u64,
        time: String,
    ) -> Self {
        Self {
            open,
            close,
            high,
            low,
            volume,
            time,
        }
    }
}

/// Fundamental financial metrics for one (ticker, period, end date, limit) query.
///
/// Only the identifying fields are required. Every metric is an explicit
/// `Option` defaulting to `None`, so "unsupported by provider" stays
/// distinguishable from "value is zero".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FinancialMetrics {
    /// Stock ticker.
    pub ticker: Ticker,
    /// End date of the reporting period.
    pub report_period: NaiveDate,
    /// Reporting period kind.
    pub period: Period,
    /// Reporting currency.
    pub currency: String,

    // Valuation
    /// Market capitalization.
    pub market_cap: Option<f64>,
    /// Enterprise value.
    pub enterprise_value: Option<f64>,
    /// Price-to-earnings ratio.
    pub pe_ratio: Option<f64>,
    /// Price-to-book ratio.
    pub pb_ratio: Option<f64>,
    /// Price-to-sales ratio.
    pub ps_ratio: Option<f64>,
    /// EV/EBITDA ratio.
    pub ev_to_ebitda: Option<f64>,

    // Profitability
    /// Return on equity.
    pub roe: Option<f64>,
    /// Return on assets.
    pub roa: Option<f64>,
    /// Gross profit margin.
    pub gross_margin: Option<f64>,
    /// Operating profit margin.
    pub operating_margin: Option<f64>,
    /// Net profit margin.
    pub net_margin: Option<f64>,

    // Liquidity & Solvency
    /// Debt-to-equity ratio.
    pub debt_to_equity: Option<f64>,
    /// Current ratio.
    pub current_ratio: Option<f64>,
    /// Quick ratio.
    pub quick_ratio: Option<f64>,

    // Dividends
    /// Dividend yield.
    pub dividend_yield: Option<f64>,
    /// Dividend payout ratio.
    pub payout_ratio: Option<f64>,

    // Risk & Price
    /// Beta coefficient.
    pub beta: Option<f64>,
    /// 52-week high price.
    pub week_52_high: Option<f64>,
    /// 52-week low price.
    pub week_52_low: Option<f64>,
}

impl FinancialMetrics {
    /// Creates a metrics record with the identifying fields set and every
    /// metric absent.
    #[must_use]
    pub fn new(
        ticker: Ticker,
        report_period: NaiveDate,
        period: Period,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            ticker,
            report_period,
            period,
            currency: currency.into(),
            ..Default::default()
        }
    }
}

/// A single named line item from a financial statement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Stock ticker.
    pub ticker: Ticker,
    /// End date of the reporting period.
    pub report_period: NaiveDate,
    /// Reporting period kind.
    pub period: Period,
    /// Reporting currency.
    pub currency: String,
    /// Statement line item name (e.g. "free_cash_flow").
    pub name: String,
    /// Reported value, if any.
    pub value: Option<f64>,
}

/// A single insider transaction filing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InsiderTrade {
    /// Stock ticker.
    pub ticker: Ticker,
    /// Date the filing was published.
    pub filing_date: NaiveDate,
    /// Issuer name.
    pub issuer: Option<String>,
    /// Insider name.
    pub name: Option<String>,
    /// Insider title or role.
    pub title: Option<String>,
    /// Whether the insider sits on the board.
    pub is_board_director: Option<bool>,
    /// Date of the transaction.
    pub transaction_date: Option<NaiveDate>,
    /// Number of shares transacted; negative for sales.
    pub transaction_shares: Option<f64>,
    /// Price per share for the transaction.
    pub transaction_price_per_share: Option<f64>,
    /// Shares owned after the transaction.
    pub shares_owned_after_transaction: Option<f64>,
}

/// A single company news article.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompanyNews {
    /// Stock ticker.
    pub ticker: Ticker,
    /// Article headline.
    pub title: String,
    /// Article author, if known.
    pub author: Option<String>,
    /// Publishing source.
    pub source: String,
    /// Publication date.
    pub date: NaiveDate,
    /// Article URL.
    pub url: String,
    /// Sentiment label, if the source provides one.
    pub sentiment: Option<String>,
}
