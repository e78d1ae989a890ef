//! DataFrame conversion for price series.

use feed_core::{FeedError, Price, Result};
use polars::prelude::*;

/// Converts normalized price records into a DataFrame sorted by time.
///
/// Columns: `time`, `open`, `close`, `high`, `low`, `volume`. An empty
/// input produces an empty frame with the same schema.
///
/// # Errors
///
/// Returns [`FeedError::Other`] if frame construction fails.
pub fn prices_to_df(prices: &[Price]) -> Result<DataFrame> {
    let mut times = Vec::with_capacity(prices.len());
    let mut opens = Vec::with_capacity(prices.len());
    let mut closes = Vec::with_capacity(prices.len());
    let mut highs = Vec::with_capacity(prices.len());
    let mut lows = Vec::with_capacity(prices.len());
    let mut volumes = Vec::with_capacity(prices.len());

    for price in prices {
        times.push(price.time.clone());
        opens.push(price.open);
        closes.push(price.close);
        highs.push(price.high);
        lows.push(price.low);
        volumes.push(price.volume);
    }

    let df = DataFrame::new(vec![
        Column::new("time".into(), times),
        Column::new("open".into(), opens),
        Column::new("close".into(), closes),
        Column::new("high".into(), highs),
        Column::new("low".into(), lows),
        Column::new("volume".into(), volumes),
    ])
    .map_err(|e| FeedError::Other(e.to_string()))?;

    // Canonical timestamps sort lexicographically in time order.
    df.sort(["time"], SortMultipleOptions::default())
        .map_err(|e| FeedError::Other(e.to_string()))
}
