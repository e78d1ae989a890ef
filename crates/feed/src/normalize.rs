//! Normalization of raw provider rows into canonical records.
//!
//! A [`RawBar`] arrives with a floating-point volume and an unformatted
//! timestamp; [`price_from_bar`] validates it and produces the canonical
//! [`Price`] form. Absent optional fields elsewhere in the data model stay
//! `None` rather than zero, so "unsupported by provider" remains
//! distinguishable from "value is zero".

use feed_core::{FeedError, PRICE_TIME_FORMAT, Price, RawBar, Result};

/// Converts a raw provider bar into a normalized [`Price`].
///
/// Volume is truncated to a whole number of shares and the timestamp is
/// rendered in `"YYYY-MM-DD HH:MM:SS"` form.
///
/// # Errors
///
/// Returns [`FeedError::InvalidParameter`] for non-finite price fields or
/// a negative volume.
pub fn price_from_bar(bar: &RawBar) -> Result<Price> {
    for (name, value) in [
        ("open", bar.open),
        ("high", bar.high),
        ("low", bar.low),
        ("close", bar.close),
    ] {
        if !value.is_finite() {
            return Err(FeedError::InvalidParameter(format!(
                "non-finite {name} in bar at {}",
                bar.time
            )));
        }
    }
    if bar.volume < 0.0 || !bar.volume.is_finite() {
        return Err(FeedError::InvalidParameter(format!(
            "invalid volume {} in bar at {}",
            bar.volume, bar.time
        )));
    }

    Ok(Price::new(
        bar.open,
        bar.close,
        bar.high,
        bar.low,
        bar.volume as u64,
        bar.time.format(PRICE_TIME_FORMAT).to_string(),
    ))
}
