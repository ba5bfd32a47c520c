//! Air quality index and particulate ratings.

use lifecost_ratings_models::{AirQualityChange, AirQualityTrend, Pollutant, RatingBand};

use crate::band::ThresholdTable;
use crate::trend::{direction_lower_is_better, latest_pair, percent_change};

/// EPA air quality index bands.
pub const AQI_TABLE: ThresholdTable = ThresholdTable::at_most(
    &[
        (
            50.0,
            RatingBand::new(
                "Good",
                "text-green-700 bg-green-50 border-green-200",
                "Air quality is satisfactory",
            ),
        ),
        (
            100.0,
            RatingBand::new(
                "Moderate",
                "text-yellow-700 bg-yellow-50 border-yellow-200",
                "Acceptable air quality",
            ),
        ),
        (
            150.0,
            RatingBand::new(
                "Unhealthy for Sensitive Groups",
                "text-orange-700 bg-orange-50 border-orange-200",
                "May affect sensitive individuals",
            ),
        ),
        (
            200.0,
            RatingBand::new(
                "Unhealthy",
                "text-red-700 bg-red-50 border-red-200",
                "Everyone may experience health effects",
            ),
        ),
        (
            300.0,
            RatingBand::new(
                "Very Unhealthy",
                "text-red-800 bg-red-100 border-red-300",
                "Health alert: serious effects for everyone",
            ),
        ),
    ],
    RatingBand::new(
        "Hazardous",
        "text-red-900 bg-red-200 border-red-400",
        "Emergency conditions: everyone affected",
    ),
);

const GOOD: RatingBand = RatingBand::labeled("Good", "text-green-700");
const MODERATE: RatingBand = RatingBand::labeled("Moderate", "text-yellow-700");
const SENSITIVE: RatingBand = RatingBand::labeled("Unhealthy (Sensitive)", "text-orange-700");
const UNHEALTHY: RatingBand = RatingBand::labeled("Unhealthy", "text-red-700");
const VERY_UNHEALTHY: RatingBand = RatingBand::labeled("Very Unhealthy", "text-red-800");
const HAZARDOUS: RatingBand = RatingBand::labeled("Hazardous", "text-red-900");

/// PM2.5 concentration bands, in µg/m³.
pub const PM25_TABLE: ThresholdTable = ThresholdTable::at_most(
    &[
        (12.0, GOOD),
        (35.4, MODERATE),
        (55.4, SENSITIVE),
        (150.4, UNHEALTHY),
        (250.4, VERY_UNHEALTHY),
    ],
    HAZARDOUS,
);

/// PM10 concentration bands, in µg/m³.
pub const PM10_TABLE: ThresholdTable = ThresholdTable::at_most(
    &[
        (54.0, GOOD),
        (154.0, MODERATE),
        (254.0, SENSITIVE),
        (354.0, UNHEALTHY),
        (424.0, VERY_UNHEALTHY),
    ],
    HAZARDOUS,
);

/// Rates an air quality index value.
#[must_use]
pub fn aqi_rating(aqi: f64) -> RatingBand {
    AQI_TABLE.rate(aqi)
}

/// Rates a particulate concentration for the given pollutant.
#[must_use]
pub fn pollutant_level(value: f64, pollutant: Pollutant) -> RatingBand {
    match pollutant {
        Pollutant::Pm25 => PM25_TABLE.rate(value),
        Pollutant::Pm10 => PM10_TABLE.rate(value),
    }
}

/// Year-over-year air quality change between the two most recent entries.
/// Direction follows the AQI change. Returns `None` with fewer than two
/// entries.
#[must_use]
pub fn year_over_year_change(trends: &[AirQualityTrend]) -> Option<AirQualityChange> {
    let (latest, previous) = latest_pair(trends)?;

    let aqi_change = percent_change(latest.avg_annual_aqi, previous.avg_annual_aqi);

    Some(AirQualityChange {
        aqi_change,
        pm25_change: percent_change(latest.avg_annual_pm25, previous.avg_annual_pm25),
        pm10_change: percent_change(latest.avg_annual_pm10, previous.avg_annual_pm10),
        direction: direction_lower_is_better(aqi_change),
    })
}
