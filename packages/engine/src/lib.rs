#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! City filtering, priority ranking, comparison, and proximity engine.
//!
//! Every function here is synchronous and pure over the city records it is
//! handed. The catalog-backed entry points ([`search`], [`compare_by_slug`],
//! [`nearby_by_slug`], [`distance_by_slug`]) take the catalog as an injected [`CityCatalog`] so
//! tests can substitute an in-memory fixture for the real data source.

pub mod compare;
pub mod filter;
pub mod format;
pub mod proximity;
pub mod ranking;

use lifecost_catalog::{CatalogError, CityCatalog};
use lifecost_city_models::{City, Priority};
use thiserror::Error;

use crate::compare::Comparison;
use crate::filter::FilterParams;
use crate::proximity::{DistanceUnit, NearbyCity};
use crate::ranking::RankedCity;

/// Errors that can occur during engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Income must be a positive, finite number for the rent-to-income
    /// ratio to be defined.
    #[error("Invalid income {0}: must be a positive number")]
    InvalidIncome(f64),

    /// Maximum rent must be a finite number.
    #[error("Invalid max rent {0}: must be a finite number")]
    InvalidMaxRent(f64),

    /// Search radius must be a positive, finite distance.
    #[error("Invalid radius {0}: must be a positive number")]
    InvalidRadius(f64),

    /// No city with the requested slug exists.
    #[error("City not found: {slug}")]
    CityNotFound {
        /// The slug that was looked up.
        slug: String,
    },

    /// The catalog could not be read.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Filters the catalog and ranks the matches by the given priorities.
///
/// # Errors
///
/// Returns [`EngineError`] if the filter parameters are invalid or the
/// catalog cannot be read.
pub fn search(
    catalog: &dyn CityCatalog,
    params: &FilterParams,
    priorities: &[Priority],
) -> Result<Vec<RankedCity>, EngineError> {
    params.validate()?;
    let cities = catalog.cities()?;
    let total = cities.len();
    let matched = filter::filter_cities(&cities, params)?;
    log::debug!(
        "search: {} of {total} cities matched, ranking by {priorities:?}",
        matched.len()
    );
    Ok(ranking::rank_cities(matched, priorities))
}

/// Looks up a city, mapping a missing slug to [`EngineError::CityNotFound`].
///
/// # Errors
///
/// Returns [`EngineError`] if the city does not exist or the catalog cannot
/// be read.
pub fn require_city(catalog: &dyn CityCatalog, slug: &str) -> Result<City, EngineError> {
    catalog
        .city_by_slug(slug)?
        .ok_or_else(|| EngineError::CityNotFound {
            slug: slug.to_string(),
        })
}

/// Compares two catalog cities by slug.
///
/// # Errors
///
/// Returns [`EngineError`] if either city does not exist or the catalog
/// cannot be read.
pub fn compare_by_slug(
    catalog: &dyn CityCatalog,
    first: &str,
    second: &str,
) -> Result<Comparison, EngineError> {
    let first = require_city(catalog, first)?;
    let second = require_city(catalog, second)?;
    Ok(compare::compare_cities(&first, &second))
}

/// Finds catalog cities within `radius` of the city identified by `slug`.
///
/// # Errors
///
/// Returns [`EngineError`] if the origin does not exist, the radius is
/// invalid, or the catalog cannot be read.
pub fn nearby_by_slug(
    catalog: &dyn CityCatalog,
    slug: &str,
    radius: f64,
    unit: DistanceUnit,
) -> Result<Vec<NearbyCity>, EngineError> {
    let cities = catalog.cities()?;
    let origin = cities
        .iter()
        .find(|city| city.slug == slug)
        .ok_or_else(|| EngineError::CityNotFound {
            slug: slug.to_string(),
        })?;
    proximity::nearby_cities(origin, &cities, radius, unit)
}

/// Distance between two catalog cities, in `unit`.
///
/// # Errors
///
/// Returns [`EngineError`] if either city does not exist or the catalog
/// cannot be read.
pub fn distance_by_slug(
    catalog: &dyn CityCatalog,
    first: &str,
    second: &str,
    unit: DistanceUnit,
) -> Result<f64, EngineError> {
    let first = require_city(catalog, first)?;
    let second = require_city(catalog, second)?;
    let miles = proximity::distance_miles(first.coordinates, second.coordinates);
    Ok(proximity::convert_distance(miles, DistanceUnit::Miles, unit))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::city;
    use lifecost_catalog::InMemoryCatalog;
    use lifecost_city_models::Coordinates;

    fn catalog() -> InMemoryCatalog {
        let mut cheap = city("cheap");
        cheap.avg_rent = 1_000.0;
        cheap.scores.safety = 40.0;
        let mut pricey = city("pricey");
        pricey.avg_rent = 2_500.0;
        let mut safe = city("safe");
        safe.avg_rent = 1_200.0;
        safe.scores.safety = 90.0;
        InMemoryCatalog::new(vec![cheap, pricey, safe])
    }

    #[test]
    fn search_filters_then_ranks() {
        let results = search(
            &catalog(),
            &FilterParams::new(60_000.0, 1_500.0),
            &[Priority::Safety],
        )
        .unwrap();
        let slugs: Vec<_> = results.iter().map(|r| r.city.slug.as_str()).collect();
        assert_eq!(slugs, ["safe", "cheap"]);
    }

    #[test]
    fn search_rejects_non_positive_income() {
        let err = search(&catalog(), &FilterParams::new(0.0, 1_500.0), &[]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidIncome(_)));
    }

    #[test]
    fn compare_by_slug_reports_missing_city() {
        let err = compare_by_slug(&catalog(), "cheap", "nowhere").unwrap_err();
        assert!(matches!(err, EngineError::CityNotFound { slug } if slug == "nowhere"));
    }

    #[test]
    fn compare_by_slug_orders_sides() {
        let comparison = compare_by_slug(&catalog(), "pricey", "cheap").unwrap();
        assert_eq!(comparison.first.slug, "pricey");
        assert_eq!(comparison.second.slug, "cheap");
    }

    #[test]
    fn distance_by_slug_measures_between_catalog_cities() {
        let mut raleigh = city("raleigh-nc");
        raleigh.coordinates = Coordinates {
            lat: 35.7796,
            lng: -78.6382,
        };
        let mut charlotte = city("charlotte-nc");
        charlotte.coordinates = Coordinates {
            lat: 35.2271,
            lng: -80.8431,
        };
        let catalog = InMemoryCatalog::new(vec![raleigh, charlotte]);

        let (miles, km) = (DistanceUnit::Miles, DistanceUnit::Kilometers);
        let in_miles = distance_by_slug(&catalog, "raleigh-nc", "charlotte-nc", miles).unwrap();
        assert!((125.0..135.0).contains(&in_miles), "got {in_miles}");
        let in_km = distance_by_slug(&catalog, "charlotte-nc", "raleigh-nc", km).unwrap();
        assert!((in_km / in_miles - 1.609_34).abs() < 1e-6);

        let err = distance_by_slug(&catalog, "raleigh-nc", "nowhere", miles).unwrap_err();
        assert!(matches!(err, EngineError::CityNotFound { slug } if slug == "nowhere"));
    }

    #[test]
    fn nearby_by_slug_requires_known_origin() {
        let err = nearby_by_slug(&catalog(), "nowhere", 25.0, DistanceUnit::Miles).unwrap_err();
        assert!(matches!(err, EngineError::CityNotFound { .. }));
    }
}
