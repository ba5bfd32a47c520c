//! Priority-weighted ranking of cities.

use std::collections::BTreeSet;

use lifecost_city_models::{City, Priority};
use serde::{Deserialize, Serialize};

/// A city paired with its ranking score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCity {
    /// The ranked city.
    #[serde(flatten)]
    pub city: City,
    /// Sum of the sub-scores selected by the active priorities.
    pub rank_score: f64,
}

/// Sums the sub-scores selected by `priorities`. Each distinct priority is
/// counted once; an empty set scores zero.
#[must_use]
pub fn ranking_score(city: &City, priorities: &[Priority]) -> f64 {
    priorities
        .iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .fold(0.0, |total, priority| total + priority.score(&city.scores))
}

/// Orders cities by descending ranking score.
///
/// The sort is stable: equal scores, including the all-zero case with no
/// priorities, keep their input order.
#[must_use]
pub fn rank_cities(cities: Vec<City>, priorities: &[Priority]) -> Vec<RankedCity> {
    let mut ranked: Vec<RankedCity> = cities
        .into_iter()
        .map(|city| RankedCity {
            rank_score: ranking_score(&city, priorities),
            city,
        })
        .collect();

    ranked.sort_by(|a, b| b.rank_score.total_cmp(&a.rank_score));
    ranked
}

/// Like [`rank_cities`] but returns only the cities.
#[must_use]
pub fn sort_cities_by_priority(cities: Vec<City>, priorities: &[Priority]) -> Vec<City> {
    rank_cities(cities, priorities)
        .into_iter()
        .map(|ranked| ranked.city)
        .collect()
}
