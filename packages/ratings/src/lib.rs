#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Domain rating helpers.
//!
//! Each domain maps a numeric metric onto a fixed, ordered
//! [`ThresholdTable`](band::ThresholdTable) and returns a
//! [`RatingBand`]. Safety, transportation, and air quality also compute
//! year-over-year changes from trend series ordered most recent first.

pub mod band;
pub mod environment;
pub mod safety;
pub mod taxes;
pub mod transportation;
pub mod trend;

use lifecost_ratings_models::{Pollutant, RatingBand, RatingKind};

use crate::band::ThresholdTable;

/// Rates `value` for the given metric kind.
///
/// `has_income_tax` only affects [`RatingKind::IncomeTax`].
#[must_use]
pub fn rate(kind: RatingKind, value: f64, has_income_tax: bool) -> RatingBand {
    match kind {
        RatingKind::Safety => safety::safety_rating(value),
        RatingKind::TaxBurden => taxes::tax_burden_rating(value),
        RatingKind::SalesTax => taxes::sales_tax_rating(value),
        RatingKind::PropertyTax => taxes::property_tax_rating(value),
        RatingKind::IncomeTax => taxes::income_tax_rating(value, has_income_tax),
        RatingKind::Commute => transportation::commute_time_rating(value),
        RatingKind::CarDependency => transportation::car_dependency_rating(value),
        RatingKind::TransitQuality => transportation::transit_quality_rating(value),
        RatingKind::TrafficCongestion => transportation::traffic_congestion_rating(value),
        RatingKind::AirQuality => environment::aqi_rating(value),
        RatingKind::Pm25 => environment::pollutant_level(value, Pollutant::Pm25),
        RatingKind::Pm10 => environment::pollutant_level(value, Pollutant::Pm10),
    }
}

/// The threshold table backing a rating kind.
#[must_use]
pub const fn table(kind: RatingKind) -> &'static ThresholdTable {
    match kind {
        RatingKind::Safety => &safety::SAFETY_TABLE,
        RatingKind::TaxBurden => &taxes::TAX_BURDEN_TABLE,
        RatingKind::SalesTax => &taxes::SALES_TAX_TABLE,
        RatingKind::PropertyTax => &taxes::PROPERTY_TAX_TABLE,
        RatingKind::IncomeTax => &taxes::INCOME_TAX_TABLE,
        RatingKind::Commute => &transportation::COMMUTE_TABLE,
        RatingKind::CarDependency => &transportation::CAR_DEPENDENCY_TABLE,
        RatingKind::TransitQuality => &transportation::TRANSIT_QUALITY_TABLE,
        RatingKind::TrafficCongestion => &transportation::TRAFFIC_CONGESTION_TABLE,
        RatingKind::AirQuality => &environment::AQI_TABLE,
        RatingKind::Pm25 => &environment::PM25_TABLE,
        RatingKind::Pm10 => &environment::PM10_TABLE,
    }
}
