#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! City record, score, and priority types.
//!
//! This crate defines the canonical city shape shared by the catalog, the
//! filter/ranking/comparison engine, and the API server. City records are
//! immutable within a session and carry pre-computed sub-scores.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Lowest valid value for any score field.
pub const MIN_SCORE: f64 = 0.0;

/// Highest valid value for any score field.
pub const MAX_SCORE: f64 = 100.0;

/// Geographic position of a city center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

/// The five 0-100 sub-scores describing a city, plus the stored overall
/// score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    /// Purchasing power retained after essential expenses.
    pub affordability: f64,
    /// Job market strength.
    pub jobs: f64,
    /// Inverse of average commute time.
    pub commute: f64,
    /// Inverse of crime rate.
    pub safety: f64,
    /// Amenities and quality of life.
    pub lifestyle: f64,
    /// Overall score as stored in the dataset. Never recomputed.
    pub overall: f64,
}

impl Scores {
    /// Returns every score field paired with its name, `overall` last.
    #[must_use]
    pub const fn fields(&self) -> [(&'static str, f64); 6] {
        [
            ("affordability", self.affordability),
            ("jobs", self.jobs),
            ("commute", self.commute),
            ("safety", self.safety),
            ("lifestyle", self.lifestyle),
            ("overall", self.overall),
        ]
    }

    /// Arithmetic mean of the five sub-scores.
    ///
    /// The methodology describes `overall` as this value, but datasets store
    /// `overall` directly and the two can disagree.
    #[must_use]
    pub fn sub_score_mean(&self) -> f64 {
        (self.affordability + self.jobs + self.commute + self.safety + self.lifestyle) / 5.0
    }

    /// Checks that every score field is a finite value in `[0, 100]`.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreRangeError`] for the first field outside the range.
    pub fn validate(&self) -> Result<(), ScoreRangeError> {
        for (field, value) in self.fields() {
            if !(MIN_SCORE..=MAX_SCORE).contains(&value) {
                return Err(ScoreRangeError { field, value });
            }
        }
        Ok(())
    }
}

/// Error returned when a score field falls outside `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreRangeError {
    /// Name of the offending score field.
    pub field: &'static str,
    /// The out-of-range value.
    pub value: f64,
}

impl std::fmt::Display for ScoreRangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid {} score {}: expected {MIN_SCORE}-{MAX_SCORE}",
            self.field, self.value
        )
    }
}

impl std::error::Error for ScoreRangeError {}

/// A U.S. city with cost-of-living metrics and sub-scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    /// URL-safe unique identifier (e.g., `"austin-tx"`).
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Two-letter state abbreviation.
    pub state: String,
    /// City center position.
    #[serde(flatten)]
    pub coordinates: Coordinates,
    /// Median annual household income in dollars.
    pub median_income: f64,
    /// Aggregate monthly cost of living in dollars.
    pub monthly_cost: f64,
    /// Average monthly rent in dollars.
    pub avg_rent: f64,
    /// Average one-way commute in minutes.
    pub commute_time: f64,
    /// Reported crimes per 1,000 residents.
    #[serde(default)]
    pub crime_rate: f64,
    /// Amenities density score.
    #[serde(default)]
    pub amenities_score: f64,
    /// Pre-computed sub-scores.
    pub scores: Scores,
}

impl City {
    /// Annual rent as a fraction of the given annual income.
    ///
    /// The caller must guarantee a positive income; a zero income yields an
    /// infinite ratio.
    #[must_use]
    pub fn rent_to_income(&self, annual_income: f64) -> f64 {
        (self.avg_rent * 12.0) / annual_income
    }

    /// Annual rent as a percentage of this city's own median income.
    #[must_use]
    pub fn rent_to_income_percent(&self) -> f64 {
        self.rent_to_income(self.median_income) * 100.0
    }

    /// Returns the `"Name, ST"` label used in listings.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.name, self.state)
    }
}

/// A user-selectable ranking priority.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Priority {
    /// Affordability sub-score.
    Affordability,
    /// Commute sub-score.
    Commute,
    /// Safety sub-score.
    Safety,
    /// Lifestyle sub-score.
    Lifestyle,
    /// Mean of the lifestyle and safety sub-scores. The catalog has no
    /// dedicated education sub-score.
    Education,
}

impl Priority {
    /// Returns this priority's contribution to a city's ranking score.
    #[must_use]
    pub fn score(self, scores: &Scores) -> f64 {
        match self {
            Self::Affordability => scores.affordability,
            Self::Commute => scores.commute,
            Self::Safety => scores.safety,
            Self::Lifestyle => scores.lifestyle,
            Self::Education => (scores.lifestyle + scores.safety) / 2.0,
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Affordability,
            Self::Commute,
            Self::Safety,
            Self::Lifestyle,
            Self::Education,
        ]
    }

    /// Parses a comma-separated priority list such as
    /// `"affordability,safety"`, skipping blanks.
    ///
    /// # Errors
    ///
    /// Returns the first entry that is not a known priority.
    pub fn parse_list(s: &str) -> Result<Vec<Self>, String> {
        s.split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| p.parse().map_err(|_| p.to_string()))
            .collect()
    }
}
