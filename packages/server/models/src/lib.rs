#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the LifeCost+ server.
//!
//! Query parameter structs mirror the HTTP query strings (camelCase). City,
//! ranking, comparison, and trend payloads are served in their engine and
//! rating shapes directly; only API-specific envelopes live here.

use lifecost_ratings_models::{RatingBand, RatingKind};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the server is healthy.
    pub healthy: bool,
    /// Server version.
    pub version: String,
    /// Number of cities in the loaded catalog.
    pub city_count: usize,
}

/// JSON body for every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable error message.
    pub error: String,
}

impl ApiError {
    /// Creates an error body.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Query parameters for the city listing endpoint.
///
/// `income` and `maxRent` enable the affordability filter and must be given
/// together.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitiesQueryParams {
    /// Annual income in dollars.
    pub income: Option<f64>,
    /// Maximum monthly rent in dollars.
    pub max_rent: Option<f64>,
    /// Maximum average commute in minutes.
    pub max_commute: Option<f64>,
    /// Minimum safety sub-score.
    pub min_safety: Option<f64>,
    /// Comma-separated priority names.
    pub priorities: Option<String>,
}

/// Query parameters for the nearby cities endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyQueryParams {
    /// Search radius, in `unit`.
    pub radius: Option<f64>,
    /// `miles` (default) or `kilometers`.
    pub unit: Option<String>,
}

/// Query parameters for the comparison endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareQueryParams {
    /// Slug of the left-hand city.
    pub city1: String,
    /// Slug of the right-hand city.
    pub city2: String,
}

/// Query parameters for the rating endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingQueryParams {
    /// Metric value to rate.
    pub value: f64,
    /// Whether the jurisdiction levies an income tax. Defaults to `true`.
    pub has_income_tax: Option<bool>,
}

/// A rated metric value.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRating {
    /// The rated metric.
    pub kind: RatingKind,
    /// The input value.
    pub value: f64,
    /// The matched band.
    #[serde(flatten)]
    pub band: RatingBand,
}
