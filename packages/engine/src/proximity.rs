//! Great-circle proximity search between cities.

use geo::{Distance as _, Haversine, Point};
use lifecost_city_models::{City, Coordinates};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::EngineError;

/// Radius used when a caller does not specify one.
pub const DEFAULT_RADIUS_MILES: f64 = 25.0;

const MILES_TO_KM: f64 = 1.609_34;
const KM_TO_MILES: f64 = 0.621_371;
const METERS_PER_MILE: f64 = 1_609.344;

/// Unit for distances and search radii.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DistanceUnit {
    /// Statute miles.
    #[default]
    Miles,
    /// Kilometers.
    Kilometers,
}

impl DistanceUnit {
    /// Short label used after a formatted distance.
    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::Miles => "mi",
            Self::Kilometers => "km",
        }
    }
}

/// Formats a distance to one decimal place with its unit, e.g. `"12.3 mi"`.
#[must_use]
pub fn format_distance(distance: f64, unit: DistanceUnit) -> String {
    format!("{distance:.1} {}", unit.abbreviation())
}

/// Converts a distance between units.
#[must_use]
pub fn convert_distance(distance: f64, from: DistanceUnit, to: DistanceUnit) -> f64 {
    match (from, to) {
        (DistanceUnit::Miles, DistanceUnit::Kilometers) => distance * MILES_TO_KM,
        (DistanceUnit::Kilometers, DistanceUnit::Miles) => distance * KM_TO_MILES,
        _ => distance,
    }
}

/// Haversine distance between two positions in miles.
#[must_use]
pub fn distance_miles(from: Coordinates, to: Coordinates) -> f64 {
    let a = Point::new(from.lng, from.lat);
    let b = Point::new(to.lng, to.lat);
    Haversine.distance(a, b) / METERS_PER_MILE
}

/// A city found within a search radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyCity {
    /// The nearby city.
    #[serde(flatten)]
    pub city: City,
    /// Distance from the origin in miles.
    pub distance_miles: f64,
    /// Distance from the origin in kilometers.
    pub distance_km: f64,
}

/// Returns the cities within `radius` of `origin`, nearest first.
///
/// The origin itself (matched by slug) is excluded.
///
/// # Errors
///
/// Returns [`EngineError::InvalidRadius`] if `radius` is not a positive,
/// finite number.
pub fn nearby_cities(
    origin: &City,
    cities: &[City],
    radius: f64,
    unit: DistanceUnit,
) -> Result<Vec<NearbyCity>, EngineError> {
    if !(radius.is_finite() && radius > 0.0) {
        return Err(EngineError::InvalidRadius(radius));
    }
    let radius_miles = convert_distance(radius, unit, DistanceUnit::Miles);

    let mut nearby: Vec<NearbyCity> = cities
        .iter()
        .filter(|city| city.slug != origin.slug)
        .filter_map(|city| {
            let miles = distance_miles(origin.coordinates, city.coordinates);
            (miles <= radius_miles).then(|| NearbyCity {
                city: city.clone(),
                distance_miles: miles,
                distance_km: convert_distance(miles, DistanceUnit::Miles, DistanceUnit::Kilometers),
            })
        })
        .collect();

    nearby.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));
    log::debug!(
        "{} cities within {radius} {unit} of {}",
        nearby.len(),
        origin.slug
    );
    Ok(nearby)
}
