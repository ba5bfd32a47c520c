//! Data validation for catalog records.
//!
//! Validation reports problems and never repairs them. In particular the
//! stored `overall` score stays authoritative even when it disagrees with
//! the mean of the sub-scores; the disagreement is only flagged.

use std::collections::BTreeSet;

use lifecost_city_models::{City, MAX_SCORE, MIN_SCORE};
use thiserror::Error;

/// Largest allowed gap between the stored `overall` score and the mean of
/// the five sub-scores before a mismatch is reported.
pub const OVERALL_TOLERANCE: f64 = 1.0;

/// A problem found in a catalog record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogIssue {
    /// Two records share a slug.
    #[error("duplicate slug '{slug}'")]
    DuplicateSlug {
        /// The repeated slug.
        slug: String,
    },

    /// A score field is outside `[0, 100]` or not finite.
    #[error("{slug}: {field} score {value} is outside 0-100")]
    ScoreOutOfRange {
        /// City slug.
        slug: String,
        /// Score field name.
        field: &'static str,
        /// Offending value.
        value: f64,
    },

    /// The state is not a two-letter uppercase abbreviation.
    #[error("{slug}: invalid state code '{state}'")]
    InvalidState {
        /// City slug.
        slug: String,
        /// Offending state value.
        state: String,
    },

    /// Median income is zero, negative, or not finite.
    #[error("{slug}: median income {value} must be positive")]
    NonPositiveIncome {
        /// City slug.
        slug: String,
        /// Offending income.
        value: f64,
    },

    /// The stored overall score disagrees with the sub-score mean.
    #[error("{slug}: stored overall {stored} differs from sub-score mean {mean:.1}")]
    OverallMismatch {
        /// City slug.
        slug: String,
        /// Overall score as stored.
        stored: f64,
        /// Mean of the five sub-scores.
        mean: f64,
    },
}

/// Checks every record and returns all issues found, in catalog order.
///
/// Each issue is also logged at `warn` level.
#[must_use]
pub fn validate_catalog(cities: &[City]) -> Vec<CatalogIssue> {
    let mut issues = Vec::new();
    let mut seen = BTreeSet::new();

    for city in cities {
        if !seen.insert(city.slug.as_str()) {
            issues.push(CatalogIssue::DuplicateSlug {
                slug: city.slug.clone(),
            });
        }
        validate_city(city, &mut issues);
    }

    for issue in &issues {
        log::warn!("Catalog issue: {issue}");
    }

    issues
}

fn validate_city(city: &City, issues: &mut Vec<CatalogIssue>) {
    if !is_state_code(&city.state) {
        issues.push(CatalogIssue::InvalidState {
            slug: city.slug.clone(),
            state: city.state.clone(),
        });
    }

    if !(city.median_income.is_finite() && city.median_income > 0.0) {
        issues.push(CatalogIssue::NonPositiveIncome {
            slug: city.slug.clone(),
            value: city.median_income,
        });
    }

    let mut in_range = true;
    for (field, value) in city.scores.fields() {
        if !(MIN_SCORE..=MAX_SCORE).contains(&value) {
            in_range = false;
            issues.push(CatalogIssue::ScoreOutOfRange {
                slug: city.slug.clone(),
                field,
                value,
            });
        }
    }

    // A mean over invalid scores says nothing useful.
    if in_range {
        let mean = city.scores.sub_score_mean();
        if (city.scores.overall - mean).abs() > OVERALL_TOLERANCE {
            issues.push(CatalogIssue::OverallMismatch {
                slug: city.slug.clone(),
                stored: city.scores.overall,
                mean,
            });
        }
    }
}

fn is_state_code(state: &str) -> bool {
    state.len() == 2 && state.bytes().all(|b| b.is_ascii_uppercase())
}
