//! Commute, car dependency, transit, and congestion ratings.

use lifecost_ratings_models::{CommuteChange, RatingBand, TransportationTrend, TrendDirection};

use crate::band::ThresholdTable;
use crate::trend::{DEAD_BAND_PERCENT, latest_pair, percent_change};

/// Percent change in transit usage or car dependency that moves the
/// overall direction.
pub const MODE_SHIFT_PERCENT: f64 = 5.0;

/// Average commute minutes.
pub const COMMUTE_TABLE: ThresholdTable = ThresholdTable::at_most(
    &[
        (
            20.0,
            RatingBand::new(
                "Excellent",
                "text-green-700 bg-green-50 border-green-200",
                "Very short commute",
            ),
        ),
        (
            30.0,
            RatingBand::new(
                "Good",
                "text-blue-700 bg-blue-50 border-blue-200",
                "Reasonable commute time",
            ),
        ),
        (
            40.0,
            RatingBand::new(
                "Moderate",
                "text-yellow-700 bg-yellow-50 border-yellow-200",
                "Average commute time",
            ),
        ),
        (
            50.0,
            RatingBand::new(
                "Long",
                "text-orange-700 bg-orange-50 border-orange-200",
                "Above average commute",
            ),
        ),
    ],
    RatingBand::new(
        "Very Long",
        "text-red-700 bg-red-50 border-red-200",
        "Lengthy commute time",
    ),
);

/// Car dependency score.
pub const CAR_DEPENDENCY_TABLE: ThresholdTable = ThresholdTable::at_most(
    &[
        (
            30.0,
            RatingBand::new(
                "Low Dependency",
                "text-green-700",
                "Excellent transportation options",
            ),
        ),
        (
            50.0,
            RatingBand::new(
                "Moderate Dependency",
                "text-blue-700",
                "Good alternative options",
            ),
        ),
        (
            70.0,
            RatingBand::new("High Dependency", "text-orange-700", "Limited alternatives"),
        ),
    ],
    RatingBand::new(
        "Very High Dependency",
        "text-red-700",
        "Car essential for most trips",
    ),
);

/// Transit quality score. Higher is better, so bounds are lower bounds.
pub const TRANSIT_QUALITY_TABLE: ThresholdTable = ThresholdTable::at_least(
    &[
        (80.0, RatingBand::labeled("Excellent", "text-green-700")),
        (60.0, RatingBand::labeled("Good", "text-blue-700")),
        (40.0, RatingBand::labeled("Fair", "text-yellow-700")),
        (20.0, RatingBand::labeled("Poor", "text-orange-700")),
    ],
    RatingBand::labeled("Very Poor", "text-red-700"),
);

/// Traffic congestion index.
pub const TRAFFIC_CONGESTION_TABLE: ThresholdTable = ThresholdTable::at_most(
    &[
        (20.0, RatingBand::labeled("Minimal", "text-green-700")),
        (40.0, RatingBand::labeled("Light", "text-blue-700")),
        (60.0, RatingBand::labeled("Moderate", "text-yellow-700")),
        (80.0, RatingBand::labeled("Heavy", "text-orange-700")),
    ],
    RatingBand::labeled("Severe", "text-red-700"),
);

/// Rates an average commute in minutes.
#[must_use]
pub fn commute_time_rating(minutes: f64) -> RatingBand {
    COMMUTE_TABLE.rate(minutes)
}

/// Rates a car dependency score.
#[must_use]
pub fn car_dependency_rating(score: f64) -> RatingBand {
    CAR_DEPENDENCY_TABLE.rate(score)
}

/// Rates a transit quality score.
#[must_use]
pub fn transit_quality_rating(score: f64) -> RatingBand {
    TRANSIT_QUALITY_TABLE.rate(score)
}

/// Rates a traffic congestion index.
#[must_use]
pub fn traffic_congestion_rating(index: f64) -> RatingBand {
    TRAFFIC_CONGESTION_TABLE.rate(index)
}

/// Year-over-year transportation change between the two most recent
/// entries. Returns `None` with fewer than two entries.
///
/// Rising transit usage counts as improving even though its raw change is
/// positive. Improvement signals are checked before worsening ones.
#[must_use]
pub fn year_over_year_change(trends: &[TransportationTrend]) -> Option<CommuteChange> {
    let (latest, previous) = latest_pair(trends)?;

    let commute_change = percent_change(
        latest.avg_commute_time_minutes,
        previous.avg_commute_time_minutes,
    );
    let transit_usage_change = percent_change(
        latest.public_transit_usage_percent,
        previous.public_transit_usage_percent,
    );
    let car_dependency_change =
        percent_change(latest.car_dependency_score, previous.car_dependency_score);

    Some(CommuteChange {
        commute_change,
        transit_usage_change,
        car_dependency_change,
        direction: direction(commute_change, transit_usage_change, car_dependency_change),
    })
}

fn direction(commute: Option<f64>, transit: Option<f64>, car: Option<f64>) -> TrendDirection {
    if commute.is_none() && transit.is_none() && car.is_none() {
        return TrendDirection::Unknown;
    }

    let below = |change: Option<f64>, limit: f64| change.is_some_and(|c| c < -limit);
    let above = |change: Option<f64>, limit: f64| change.is_some_and(|c| c > limit);

    if below(commute, DEAD_BAND_PERCENT)
        || above(transit, MODE_SHIFT_PERCENT)
        || below(car, MODE_SHIFT_PERCENT)
    {
        TrendDirection::Improving
    } else if above(commute, DEAD_BAND_PERCENT)
        || below(transit, MODE_SHIFT_PERCENT)
        || above(car, MODE_SHIFT_PERCENT)
    {
        TrendDirection::Worsening
    } else {
        TrendDirection::Stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trend(commute: f64, transit: f64, car: f64) -> TransportationTrend {
        TransportationTrend {
            year: 2023,
            avg_commute_time_minutes: commute,
            public_transit_usage_percent: transit,
            car_usage_percent: 70.0,
            car_dependency_score: car,
            traffic_congestion_index: 40.0,
        }
    }

    #[test]
    fn commute_bands() {
        assert_eq!(commute_time_rating(20.0).rating, "Excellent");
        assert_eq!(commute_time_rating(21.0).rating, "Good");
        assert_eq!(commute_time_rating(50.0).rating, "Long");
        assert_eq!(commute_time_rating(51.0).rating, "Very Long");
    }

    #[test]
    fn car_dependency_bands() {
        assert_eq!(car_dependency_rating(30.0).rating, "Low Dependency");
        assert_eq!(car_dependency_rating(65.0).rating, "High Dependency");
        assert_eq!(
            car_dependency_rating(71.0).description,
            "Car essential for most trips"
        );
    }

    #[test]
    fn transit_quality_uses_lower_bounds() {
        assert_eq!(transit_quality_rating(80.0).rating, "Excellent");
        assert_eq!(transit_quality_rating(79.9).rating, "Good");
        assert_eq!(transit_quality_rating(20.0).rating, "Poor");
        assert_eq!(transit_quality_rating(19.0).rating, "Very Poor");
    }

    #[test]
    fn congestion_bands() {
        assert_eq!(traffic_congestion_rating(20.0).rating, "Minimal");
        assert_eq!(traffic_congestion_rating(80.0).rating, "Heavy");
        assert_eq!(traffic_congestion_rating(81.0).rating, "Severe");
    }

    #[test]
    fn rising_transit_usage_is_improving() {
        let change =
            year_over_year_change(&[trend(30.0, 11.0, 60.0), trend(30.0, 10.0, 60.0)]).unwrap();
        assert!((change.transit_usage_change.unwrap() - 10.0).abs() < 1e-9);
        assert_eq!(change.direction, TrendDirection::Improving);
    }

    #[test]
    fn longer_commute_is_worsening() {
        let change =
            year_over_year_change(&[trend(33.0, 10.0, 60.0), trend(30.0, 10.0, 60.0)]).unwrap();
        assert_eq!(change.direction, TrendDirection::Worsening);
    }

    #[test]
    fn small_shifts_are_stable() {
        let change =
            year_over_year_change(&[trend(30.3, 10.4, 61.0), trend(30.0, 10.0, 60.0)]).unwrap();
        assert_eq!(change.direction, TrendDirection::Stable);
    }

    #[test]
    fn zero_transit_baseline_still_uses_other_signals() {
        let change =
            year_over_year_change(&[trend(27.0, 5.0, 60.0), trend(30.0, 0.0, 60.0)]).unwrap();
        assert_eq!(change.transit_usage_change, None);
        assert_eq!(change.direction, TrendDirection::Improving);

        let unknown =
            year_over_year_change(&[trend(27.0, 5.0, 60.0), trend(0.0, 0.0, 0.0)]).unwrap();
        assert_eq!(unknown.direction, TrendDirection::Unknown);
    }
}
