//! Crime index ratings and safety trends.

use lifecost_ratings_models::{CrimeTrend, RatingBand, SafetyChange};

use crate::band::ThresholdTable;
use crate::trend::{direction_lower_is_better, latest_pair, percent_change};

/// Crime index bands. Lower is safer.
pub const SAFETY_TABLE: ThresholdTable = ThresholdTable::at_most(
    &[
        (
            20.0,
            RatingBand::new(
                "Very Safe",
                "text-green-700 bg-green-50 border-green-200",
                "Significantly below national average",
            ),
        ),
        (
            40.0,
            RatingBand::new(
                "Safe",
                "text-blue-700 bg-blue-50 border-blue-200",
                "Below national average",
            ),
        ),
        (
            60.0,
            RatingBand::new(
                "Moderate",
                "text-yellow-700 bg-yellow-50 border-yellow-200",
                "Near national average",
            ),
        ),
        (
            80.0,
            RatingBand::new(
                "Elevated",
                "text-orange-700 bg-orange-50 border-orange-200",
                "Above national average",
            ),
        ),
    ],
    RatingBand::new(
        "High",
        "text-red-700 bg-red-50 border-red-200",
        "Significantly above national average",
    ),
);

/// Rates an overall crime index.
#[must_use]
pub fn safety_rating(crime_index: f64) -> RatingBand {
    SAFETY_TABLE.rate(crime_index)
}

/// Year-over-year crime change between the two most recent entries.
///
/// Direction follows the overall crime index: a drop of more than 2% is
/// improving, a rise of more than 2% is worsening. Returns `None` with
/// fewer than two entries.
#[must_use]
pub fn year_over_year_change(trends: &[CrimeTrend]) -> Option<SafetyChange> {
    let (latest, previous) = latest_pair(trends)?;

    let overall_change = percent_change(latest.overall_crime_index, previous.overall_crime_index);

    Some(SafetyChange {
        overall_change,
        violent_change: percent_change(latest.violent_crime_rate, previous.violent_crime_rate),
        property_change: percent_change(latest.property_crime_rate, previous.property_crime_rate),
        direction: direction_lower_is_better(overall_change),
    })
}
