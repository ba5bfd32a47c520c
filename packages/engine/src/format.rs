//! Display formatting for comparison values.
//!
//! Non-finite values render as `"N/A"` in every format.

const NOT_AVAILABLE: &str = "N/A";

/// How a metric value is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    /// Whole dollars with thousands separators: `$1,400`.
    Currency,
    /// One decimal place with a trailing percent sign: `28.0%`.
    Percent,
    /// Minutes with a unit suffix: `22 min`.
    Minutes,
    /// Bare number: `72`.
    Score,
}

impl ValueFormat {
    /// Renders `value` in this format.
    #[must_use]
    pub fn render(self, value: f64) -> String {
        match self {
            Self::Currency => format_currency(value),
            Self::Percent => format_percent(value),
            Self::Minutes => format_minutes(value),
            Self::Score => format_number(value),
        }
    }
}

/// Formats whole dollars with a leading `$` and comma separators.
#[must_use]
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let whole = rounded.abs() as u64;
    format!("{sign}${}", group_thousands(whole))
}

/// Formats a percentage with one decimal place.
#[must_use]
pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    format!("{value:.1}%")
}

/// Formats a duration in minutes with a `min` suffix.
#[must_use]
pub fn format_minutes(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    format!("{} min", format_number(value))
}

/// Formats a number without trailing `.0` for whole values.
#[must_use]
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    if value.fract().abs() < f64::EPSILON {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
