//! Reporting period and fundamentals report type definitions.
//!
//! This module defines [`Period`] for fundamental data queries and
//! [`ReportType`] for selecting which fundamentals report a provider
//! should return.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reporting period for fundamental data queries.
///
/// The lowercase wire form of a period is part of the metrics cache-key
/// format, so it must stay stable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// Trailing twelve months.
    #[default]
    Ttm,
    /// Annual reporting period.
    Annual,
    /// Quarterly reporting period.
    Quarterly,
}

impl Period {
    /// Returns the lowercase wire form ("ttm", "annual", "quarterly").
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ttm => "ttm",
            Self::Annual => "annual",
            Self::Quarterly => "quarterly",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fundamentals report kinds a provider can be asked for.
///
/// The wire form matches the TWS `reqFundamentalData` report type strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportType {
    /// Financial summary report, used for historical metrics queries.
    FinancialSummary,
    /// Live snapshot report, used for current-date market cap lookups.
    Snapshot,
}

impl ReportType {
    /// Returns the TWS wire form of this report type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FinancialSummary => "ReportsFinSummary",
            Self::Snapshot => "ReportSnapshot",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
