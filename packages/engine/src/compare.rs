//! Side-by-side comparison of two cities.
//!
//! Each metric has a fixed polarity. The better of the two values under that
//! polarity is highlighted; exact ties and non-comparable values (NaN)
//! highlight neither side.

use lifecost_city_models::City;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::format::ValueFormat;

/// Which direction of a metric is preferable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Polarity {
    /// Larger values win (scores, income).
    HigherIsBetter,
    /// Smaller values win (costs, commute).
    LowerIsBetter,
}

impl Polarity {
    /// Decides which of two values wins under this polarity.
    #[must_use]
    pub fn winner(self, first: f64, second: f64) -> Highlight {
        let (first_wins, second_wins) = match self {
            Self::HigherIsBetter => (first > second, second > first),
            Self::LowerIsBetter => (first < second, second < first),
        };
        match (first_wins, second_wins) {
            (true, _) => Highlight::First,
            (_, true) => Highlight::Second,
            _ => Highlight::Neither,
        }
    }
}

/// Which side of a comparison row is highlighted as better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Highlight {
    /// The first city's value is better.
    First,
    /// The second city's value is better.
    Second,
    /// Tie, or values cannot be compared.
    Neither,
}

impl Highlight {
    /// Returns the highlight for the same row with the cities swapped.
    #[must_use]
    pub const fn swapped(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
            Self::Neither => Self::Neither,
        }
    }
}

/// A compared metric, in display order.
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
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Metric {
    /// Stored overall score.
    Overall,
    /// Aggregate monthly cost.
    MonthlyCost,
    /// Median annual income.
    MedianIncome,
    /// Average monthly rent.
    AvgRent,
    /// Annual rent as a percentage of median income.
    RentRatio,
    /// Average commute minutes.
    CommuteTime,
    /// Affordability sub-score.
    Affordability,
    /// Jobs sub-score.
    Jobs,
    /// Commute sub-score.
    Commute,
    /// Safety sub-score.
    Safety,
    /// Lifestyle sub-score.
    Lifestyle,
}

impl Metric {
    /// Returns every metric in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Overall,
            Self::MonthlyCost,
            Self::MedianIncome,
            Self::AvgRent,
            Self::RentRatio,
            Self::CommuteTime,
            Self::Affordability,
            Self::Jobs,
            Self::Commute,
            Self::Safety,
            Self::Lifestyle,
        ]
    }

    /// Row label shown to users.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Overall => "Overall Score",
            Self::MonthlyCost => "Monthly Cost",
            Self::MedianIncome => "Median Income",
            Self::AvgRent => "Average Rent",
            Self::RentRatio => "Rent-to-Income %",
            Self::CommuteTime => "Commute Time",
            Self::Affordability => "Affordability Score",
            Self::Jobs => "Jobs Score",
            Self::Commute => "Commute Score",
            Self::Safety => "Safety Score",
            Self::Lifestyle => "Lifestyle Score",
        }
    }

    /// Whether higher or lower values are preferable.
    #[must_use]
    pub const fn polarity(self) -> Polarity {
        match self {
            Self::MonthlyCost | Self::AvgRent | Self::RentRatio | Self::CommuteTime => {
                Polarity::LowerIsBetter
            }
            Self::Overall
            | Self::MedianIncome
            | Self::Affordability
            | Self::Jobs
            | Self::Commute
            | Self::Safety
            | Self::Lifestyle => Polarity::HigherIsBetter,
        }
    }

    /// How this metric's values are rendered.
    #[must_use]
    pub const fn format(self) -> ValueFormat {
        match self {
            Self::MonthlyCost | Self::MedianIncome | Self::AvgRent => ValueFormat::Currency,
            Self::RentRatio => ValueFormat::Percent,
            Self::CommuteTime => ValueFormat::Minutes,
            Self::Overall
            | Self::Affordability
            | Self::Jobs
            | Self::Commute
            | Self::Safety
            | Self::Lifestyle => ValueFormat::Score,
        }
    }

    /// Extracts this metric's raw value from a city.
    #[must_use]
    pub fn value(self, city: &City) -> f64 {
        match self {
            Self::Overall => city.scores.overall,
            Self::MonthlyCost => city.monthly_cost,
            Self::MedianIncome => city.median_income,
            Self::AvgRent => city.avg_rent,
            Self::RentRatio => city.rent_to_income_percent(),
            Self::CommuteTime => city.commute_time,
            Self::Affordability => city.scores.affordability,
            Self::Jobs => city.scores.jobs,
            Self::Commute => city.scores.commute,
            Self::Safety => city.scores.safety,
            Self::Lifestyle => city.scores.lifestyle,
        }
    }
}

/// One row of a comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricComparison {
    /// The compared metric.
    pub metric: Metric,
    /// Row label.
    pub label: String,
    /// Raw value for the first city.
    pub first_value: f64,
    /// Raw value for the second city.
    pub second_value: f64,
    /// Formatted value for the first city.
    pub first_display: String,
    /// Formatted value for the second city.
    pub second_display: String,
    /// Which side is better.
    pub highlight: Highlight,
}

/// A full side-by-side comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    /// Left-hand city.
    pub first: City,
    /// Right-hand city.
    pub second: City,
    /// One row per [`Metric`], in [`Metric::all`] order.
    pub rows: Vec<MetricComparison>,
}

impl Comparison {
    /// Returns the row for `metric`.
    #[must_use]
    pub fn row(&self, metric: Metric) -> Option<&MetricComparison> {
        self.rows.iter().find(|row| row.metric == metric)
    }
}

/// Compares one metric between two cities.
#[must_use]
pub fn compare_metric(metric: Metric, first: &City, second: &City) -> MetricComparison {
    let first_value = metric.value(first);
    let second_value = metric.value(second);
    let format = metric.format();

    MetricComparison {
        metric,
        label: metric.label().to_string(),
        first_value,
        second_value,
        first_display: format.render(first_value),
        second_display: format.render(second_value),
        highlight: metric.polarity().winner(first_value, second_value),
    }
}

/// Builds the full comparison table for two cities.
#[must_use]
pub fn compare_cities(first: &City, second: &City) -> Comparison {
    Comparison {
        first: first.clone(),
        second: second.clone(),
        rows: Metric::all()
            .iter()
            .map(|metric| compare_metric(*metric, first, second))
            .collect(),
    }
}
