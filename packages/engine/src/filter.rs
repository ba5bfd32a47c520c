//! Affordability, rent, commute, and safety filtering.

use lifecost_city_models::City;
use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Maximum share of annual income that annual rent may consume. Fixed
/// policy, not user-configurable.
pub const AFFORDABILITY_THRESHOLD: f64 = 0.30;

/// Constraints a city must satisfy to appear in a filtered listing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    /// Annual income in dollars. Must be positive.
    pub income: f64,
    /// Maximum acceptable monthly rent in dollars.
    pub max_rent: f64,
    /// Maximum acceptable average commute in minutes.
    pub max_commute: Option<f64>,
    /// Minimum acceptable safety sub-score.
    pub min_safety: Option<f64>,
}

impl FilterParams {
    /// Creates parameters with no commute or safety constraint.
    #[must_use]
    pub const fn new(income: f64, max_rent: f64) -> Self {
        Self {
            income,
            max_rent,
            max_commute: None,
            min_safety: None,
        }
    }

    /// Adds a maximum commute constraint.
    #[must_use]
    pub const fn with_max_commute(mut self, minutes: f64) -> Self {
        self.max_commute = Some(minutes);
        self
    }

    /// Adds a minimum safety sub-score constraint.
    #[must_use]
    pub const fn with_min_safety(mut self, score: f64) -> Self {
        self.min_safety = Some(score);
        self
    }

    /// Rejects parameters for which the rent-to-income ratio is undefined.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidIncome`] for a non-positive or
    /// non-finite income and [`EngineError::InvalidMaxRent`] for a
    /// non-finite maximum rent.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.income.is_finite() && self.income > 0.0) {
            return Err(EngineError::InvalidIncome(self.income));
        }
        if !self.max_rent.is_finite() {
            return Err(EngineError::InvalidMaxRent(self.max_rent));
        }
        Ok(())
    }

    /// Returns `true` if `city` satisfies every active constraint.
    ///
    /// Assumes [`FilterParams::validate`] has passed.
    #[must_use]
    pub fn matches(&self, city: &City) -> bool {
        let rent_ok = city.avg_rent <= self.max_rent;
        let affordable = city.rent_to_income(self.income) <= AFFORDABILITY_THRESHOLD;

        rent_ok && affordable && matches_constraints(city, self.max_commute, self.min_safety)
    }
}

/// Returns `true` if `city` satisfies the optional commute and safety
/// constraints. An absent constraint always passes.
#[must_use]
pub fn matches_constraints(
    city: &City,
    max_commute: Option<f64>,
    min_safety: Option<f64>,
) -> bool {
    max_commute.is_none_or(|max| city.commute_time <= max)
        && min_safety.is_none_or(|min| city.scores.safety >= min)
}

/// Returns the cities satisfying `params`, in input order.
///
/// # Errors
///
/// Returns [`EngineError`] if `params` fails [`FilterParams::validate`].
pub fn filter_cities(cities: &[City], params: &FilterParams) -> Result<Vec<City>, EngineError> {
    params.validate()?;
    Ok(cities
        .iter()
        .filter(|city| params.matches(city))
        .cloned()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::city;

    fn sample() -> Vec<City> {
        let mut a = city("a");
        a.avg_rent = 1_400.0;
        a.commute_time = 22.0;
        let mut b = city("b");
        b.avg_rent = 1_600.0;
        let mut c = city("c");
        c.avg_rent = 900.0;
        c.commute_time = 40.0;
        c.scores.safety = 30.0;
        let mut d = city("d");
        d.avg_rent = 1_500.0;
        vec![a, b, c, d]
    }

    fn slugs(cities: &[City]) -> Vec<&str> {
        cities.iter().map(|c| c.slug.as_str()).collect()
    }

    #[test]
    fn includes_affordable_city_under_max_rent() {
        let result = filter_cities(&sample(), &FilterParams::new(60_000.0, 1_500.0)).unwrap();
        // 1400 * 12 / 60000 = 0.28; 1500 * 12 / 60000 = 0.30 exactly.
        assert_eq!(slugs(&result), ["a", "c", "d"]);
    }

    #[test]
    fn rent_to_income_threshold_applies_below_max_rent() {
        let result = filter_cities(&sample(), &FilterParams::new(40_000.0, 5_000.0)).unwrap();
        // 1000/month is the ceiling at 40k.
        assert_eq!(slugs(&result), ["c"]);
    }

    #[test]
    fn optional_constraints() {
        let params = FilterParams::new(60_000.0, 1_500.0).with_max_commute(30.0);
        assert_eq!(slugs(&filter_cities(&sample(), &params).unwrap()), ["a", "d"]);

        let params = FilterParams::new(60_000.0, 1_500.0).with_min_safety(50.0);
        assert_eq!(slugs(&filter_cities(&sample(), &params).unwrap()), ["a", "d"]);
    }

    #[test]
    fn constraints_alone_ignore_rent() {
        let cities = sample();
        let matched: Vec<&str> = cities
            .iter()
            .filter(|c| matches_constraints(c, Some(30.0), Some(50.0)))
            .map(|c| c.slug.as_str())
            .collect();
        assert_eq!(matched, ["a", "b", "d"]);

        assert!(cities.iter().all(|c| matches_constraints(c, None, None)));
        assert!(!matches_constraints(&cities[2], None, Some(30.5)));
        assert!(matches_constraints(&cities[2], Some(40.0), Some(30.0)));
    }

    #[test]
    fn every_result_satisfies_the_constraints() {
        let params = FilterParams::new(55_000.0, 1_450.0);
        for c in filter_cities(&sample(), &params).unwrap() {
            assert!(c.avg_rent <= params.max_rent);
            assert!(c.avg_rent * 12.0 / params.income <= AFFORDABILITY_THRESHOLD);
        }
    }

    #[test]
    fn filtering_is_idempotent() {
        let params = FilterParams::new(60_000.0, 1_500.0).with_min_safety(40.0);
        let once = filter_cities(&sample(), &params).unwrap();
        let twice = filter_cities(&once, &params).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn rejects_invalid_income_and_rent() {
        assert!(matches!(
            filter_cities(&sample(), &FilterParams::new(0.0, 1_500.0)),
            Err(EngineError::InvalidIncome(_))
        ));
        assert!(matches!(
            filter_cities(&sample(), &FilterParams::new(-10.0, 1_500.0)),
            Err(EngineError::InvalidIncome(_))
        ));
        assert!(matches!(
            filter_cities(&sample(), &FilterParams::new(f64::NAN, 1_500.0)),
            Err(EngineError::InvalidIncome(_))
        ));
        assert!(matches!(
            filter_cities(&sample(), &FilterParams::new(60_000.0, f64::INFINITY)),
            Err(EngineError::InvalidMaxRent(_))
        ));
    }
}
