//! Shared year-over-year arithmetic.
//!
//! Trend sequences are ordered most recent first: index 0 is the latest
//! period and index 1 the one before it.

use lifecost_ratings_models::TrendDirection;

/// Half-width of the band, in percent, inside which a primary metric's
/// change counts as stable.
pub const DEAD_BAND_PERCENT: f64 = 2.0;

/// Returns the latest and previous entries, or `None` with fewer than two.
#[must_use]
pub fn latest_pair<T>(trends: &[T]) -> Option<(&T, &T)> {
    match trends {
        [latest, previous, ..] => Some((latest, previous)),
        _ => None,
    }
}

/// Percentage change from `previous` to `latest`.
///
/// Returns `None` when the change is undefined: a zero previous value or a
/// non-finite input.
#[must_use]
pub fn percent_change(latest: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 || !latest.is_finite() || !previous.is_finite() {
        return None;
    }
    Some((latest - previous) / previous * 100.0)
}

/// Direction for a metric where a decrease is an improvement, using the
/// [`DEAD_BAND_PERCENT`] band.
#[must_use]
pub fn direction_lower_is_better(change: Option<f64>) -> TrendDirection {
    match change {
        None => TrendDirection::Unknown,
        Some(c) if c < -DEAD_BAND_PERCENT => TrendDirection::Improving,
        Some(c) if c > DEAD_BAND_PERCENT => TrendDirection::Worsening,
        Some(_) => TrendDirection::Stable,
    }
}
