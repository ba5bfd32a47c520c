//! Tax burden, sales, property, and income tax ratings.

use lifecost_ratings_models::{RatingBand, TaxSavings};

use crate::band::ThresholdTable;

const GREEN: &str = "text-green-700";
const BLUE: &str = "text-blue-700";
const YELLOW: &str = "text-yellow-700";
const ORANGE: &str = "text-orange-700";
const RED: &str = "text-red-700";

/// Effective total tax burden bands, in percent of income.
pub const TAX_BURDEN_TABLE: ThresholdTable = ThresholdTable::at_most(
    &[
        (
            7.0,
            RatingBand::new(
                "Very Low",
                "text-green-700 bg-green-50 border-green-200",
                "Below average tax burden",
            ),
        ),
        (
            9.0,
            RatingBand::new(
                "Low",
                "text-blue-700 bg-blue-50 border-blue-200",
                "Relatively low tax burden",
            ),
        ),
        (
            11.0,
            RatingBand::new(
                "Moderate",
                "text-yellow-700 bg-yellow-50 border-yellow-200",
                "Average tax burden",
            ),
        ),
        (
            13.0,
            RatingBand::new(
                "High",
                "text-orange-700 bg-orange-50 border-orange-200",
                "Above average tax burden",
            ),
        ),
    ],
    RatingBand::new(
        "Very High",
        "text-red-700 bg-red-50 border-red-200",
        "Significantly high tax burden",
    ),
);

/// Combined sales tax bands. Zero is its own band.
pub const SALES_TAX_TABLE: ThresholdTable = ThresholdTable::at_most(
    &[
        (0.0, RatingBand::labeled("No Sales Tax", GREEN)),
        (5.0, RatingBand::labeled("Very Low", GREEN)),
        (7.0, RatingBand::labeled("Low", BLUE)),
        (9.0, RatingBand::labeled("Moderate", YELLOW)),
        (10.0, RatingBand::labeled("High", ORANGE)),
    ],
    RatingBand::labeled("Very High", RED),
);

/// Effective property tax rate bands.
pub const PROPERTY_TAX_TABLE: ThresholdTable = ThresholdTable::at_most(
    &[
        (0.5, RatingBand::labeled("Very Low", GREEN)),
        (1.0, RatingBand::labeled("Low", BLUE)),
        (1.5, RatingBand::labeled("Moderate", YELLOW)),
        (2.0, RatingBand::labeled("High", ORANGE)),
    ],
    RatingBand::labeled("Very High", RED),
);

/// Income tax rate bands. Zero is its own band.
pub const INCOME_TAX_TABLE: ThresholdTable = ThresholdTable::at_most(
    &[
        (0.0, NO_INCOME_TAX),
        (3.0, RatingBand::labeled("Very Low", GREEN)),
        (5.0, RatingBand::labeled("Low", BLUE)),
        (7.0, RatingBand::labeled("Moderate", YELLOW)),
        (9.0, RatingBand::labeled("High", ORANGE)),
    ],
    RatingBand::labeled("Very High", RED),
);

const NO_INCOME_TAX: RatingBand = RatingBand::labeled("No Income Tax", GREEN);

/// Rates an effective total tax burden percentage.
#[must_use]
pub fn tax_burden_rating(percent: f64) -> RatingBand {
    TAX_BURDEN_TABLE.rate(percent)
}

/// Rates a combined sales tax percentage.
#[must_use]
pub fn sales_tax_rating(percent: f64) -> RatingBand {
    SALES_TAX_TABLE.rate(percent)
}

/// Rates an effective property tax percentage.
#[must_use]
pub fn property_tax_rating(percent: f64) -> RatingBand {
    PROPERTY_TAX_TABLE.rate(percent)
}

/// Rates an income tax percentage. Jurisdictions without an income tax
/// rate as "No Income Tax" regardless of `percent`.
#[must_use]
pub fn income_tax_rating(percent: f64, has_income_tax: bool) -> RatingBand {
    if has_income_tax {
        INCOME_TAX_TABLE.rate(percent)
    } else {
        NO_INCOME_TAX
    }
}

/// Savings from moving from `current_burden` to `compare_burden` (both
/// percentages of income) at the given annual income.
#[must_use]
pub fn calculate_tax_savings(
    current_burden: f64,
    compare_burden: f64,
    annual_income: f64,
) -> TaxSavings {
    let annual_savings = annual_income * ((current_burden - compare_burden) / 100.0);
    let percent_difference = (current_burden != 0.0)
        .then(|| (current_burden - compare_burden) / current_burden * 100.0);

    TaxSavings {
        annual_savings,
        monthly_savings: annual_savings / 12.0,
        percent_difference,
    }
}

/// Formats a tax rate with two decimals.
#[must_use]
pub fn format_tax_rate(percent: f64) -> String {
    format!("{percent:.2}%")
}
