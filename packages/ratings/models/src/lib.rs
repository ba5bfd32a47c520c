#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Rating band, trend, and year-over-year change types.
//!
//! A rating band is the qualitative bucket a numeric metric falls into.
//! Trend records are time-ordered with the most recent entry first.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Qualitative rating for a numeric metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RatingBand {
    /// Short label (e.g., "Very Safe").
    pub rating: &'static str,
    /// Display color classes.
    pub color: &'static str,
    /// Human-readable description. Empty for domains without one.
    pub description: &'static str,
}

impl RatingBand {
    /// Creates a band with a description.
    #[must_use]
    pub const fn new(
        rating: &'static str,
        color: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            rating,
            color,
            description,
        }
    }

    /// Creates a band without a description.
    #[must_use]
    pub const fn labeled(rating: &'static str, color: &'static str) -> Self {
        Self::new(rating, color, "")
    }
}

/// The metric a rating is computed for.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RatingKind {
    /// Overall crime index.
    Safety,
    /// Effective total tax burden percent.
    TaxBurden,
    /// Combined sales tax percent.
    SalesTax,
    /// Effective property tax percent.
    PropertyTax,
    /// Income tax percent.
    IncomeTax,
    /// Average commute minutes.
    Commute,
    /// Car dependency score.
    CarDependency,
    /// Transit quality score.
    TransitQuality,
    /// Traffic congestion index.
    TrafficCongestion,
    /// Air quality index.
    AirQuality,
    /// PM2.5 concentration.
    Pm25,
    /// PM10 concentration.
    Pm10,
}

impl RatingKind {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Safety,
            Self::TaxBurden,
            Self::SalesTax,
            Self::PropertyTax,
            Self::IncomeTax,
            Self::Commute,
            Self::CarDependency,
            Self::TransitQuality,
            Self::TrafficCongestion,
            Self::AirQuality,
            Self::Pm25,
            Self::Pm10,
        ]
    }
}

/// Particulate pollutant measured for air quality.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Pollutant {
    /// Fine particulate matter, 2.5 micrometers and smaller.
    Pm25,
    /// Coarse particulate matter, 10 micrometers and smaller.
    Pm10,
}

/// Overall direction of a year-over-year change.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TrendDirection {
    /// The metric moved in the desirable direction beyond the dead band.
    Improving,
    /// The metric moved in the undesirable direction beyond the dead band.
    Worsening,
    /// The change stayed inside the dead band.
    Stable,
    /// The deciding change is undefined (zero or invalid baseline).
    Unknown,
}

/// One year of crime statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrimeTrend {
    /// Calendar year.
    pub year: i32,
    /// Violent crimes per 100,000 residents.
    pub violent_crime_rate: f64,
    /// Property crimes per 100,000 residents.
    pub property_crime_rate: f64,
    /// Composite crime index (0-100).
    pub overall_crime_index: f64,
}

/// One year of transportation statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportationTrend {
    /// Calendar year.
    pub year: i32,
    /// Average one-way commute in minutes.
    pub avg_commute_time_minutes: f64,
    /// Share of commuters using public transit.
    pub public_transit_usage_percent: f64,
    /// Share of commuters driving.
    pub car_usage_percent: f64,
    /// Car dependency score (0-100).
    pub car_dependency_score: f64,
    /// Traffic congestion index (0-100).
    pub traffic_congestion_index: f64,
}

/// One year of air quality statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirQualityTrend {
    /// Calendar year.
    pub year: i32,
    /// Annual average AQI.
    pub avg_annual_aqi: f64,
    /// Annual average PM2.5 concentration.
    pub avg_annual_pm25: f64,
    /// Annual average PM10 concentration.
    pub avg_annual_pm10: f64,
    /// Days rated good.
    pub good_air_days: u32,
    /// Days rated unhealthy or worse.
    pub unhealthy_air_days: u32,
}

/// Year-over-year safety change. `None` marks an undefined change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyChange {
    /// Percent change of the overall crime index.
    pub overall_change: Option<f64>,
    /// Percent change of the violent crime rate.
    pub violent_change: Option<f64>,
    /// Percent change of the property crime rate.
    pub property_change: Option<f64>,
    /// Direction decided by the overall crime index.
    pub direction: TrendDirection,
}

/// Year-over-year transportation change. `None` marks an undefined change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommuteChange {
    /// Percent change of average commute time.
    pub commute_change: Option<f64>,
    /// Percent change of public transit usage.
    pub transit_usage_change: Option<f64>,
    /// Percent change of the car dependency score.
    pub car_dependency_change: Option<f64>,
    /// Direction decided by all three changes.
    pub direction: TrendDirection,
}

/// Year-over-year air quality change. `None` marks an undefined change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirQualityChange {
    /// Percent change of the annual average AQI.
    pub aqi_change: Option<f64>,
    /// Percent change of annual average PM2.5.
    pub pm25_change: Option<f64>,
    /// Percent change of annual average PM10.
    pub pm10_change: Option<f64>,
    /// Direction decided by the AQI change.
    pub direction: TrendDirection,
}

/// Savings from moving between two tax burdens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxSavings {
    /// Annual dollars saved (negative when the other location costs more).
    pub annual_savings: f64,
    /// Monthly dollars saved.
    pub monthly_savings: f64,
    /// Relative difference in percent. `None` when the current burden is zero.
    pub percent_difference: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_kind_names_are_kebab_case() {
        assert_eq!(RatingKind::AirQuality.to_string(), "air-quality");
        assert_eq!("pm25".parse::<RatingKind>().unwrap(), RatingKind::Pm25);
        for kind in RatingKind::all() {
            assert_eq!(kind.to_string().parse::<RatingKind>().unwrap(), *kind);
        }
    }

    #[test]
    fn trend_json_is_camel_case() {
        let trend: CrimeTrend = serde_json::from_value(serde_json::json!({
            "year": 2023,
            "violentCrimeRate": 400.0,
            "propertyCrimeRate": 2000.0,
            "overallCrimeIndex": 48.0,
        }))
        .unwrap();
        assert_eq!(trend.year, 2023);
    }

    #[test]
    fn undefined_change_serializes_as_null() {
        let change = SafetyChange {
            overall_change: None,
            violent_change: Some(-1.5),
            property_change: None,
            direction: TrendDirection::Unknown,
        };
        let json = serde_json::to_value(change).unwrap();
        assert!(json["overallChange"].is_null());
        assert_eq!(json["direction"], "unknown");
    }
}
