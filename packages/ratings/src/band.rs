//! Ordered threshold tables mapping a numeric metric to a [`RatingBand`].

use lifecost_ratings_models::RatingBand;

/// How a table's bounds are compared against a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundKind {
    /// Bounds ascend; the first bound with `value <= bound` matches.
    AtMost,
    /// Bounds descend; the first bound with `value >= bound` matches.
    AtLeast,
}

/// An ordered list of `(bound, band)` pairs with a fallback band for values
/// past the last bound.
///
/// Values that satisfy no bound, including NaN, get the fallback.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdTable {
    kind: BoundKind,
    bands: &'static [(f64, RatingBand)],
    fallback: RatingBand,
}

impl ThresholdTable {
    /// A table of inclusive upper bounds in ascending order.
    #[must_use]
    pub const fn at_most(bands: &'static [(f64, RatingBand)], fallback: RatingBand) -> Self {
        Self {
            kind: BoundKind::AtMost,
            bands,
            fallback,
        }
    }

    /// A table of inclusive lower bounds in descending order.
    #[must_use]
    pub const fn at_least(bands: &'static [(f64, RatingBand)], fallback: RatingBand) -> Self {
        Self {
            kind: BoundKind::AtLeast,
            bands,
            fallback,
        }
    }

    /// Returns the band for `value`.
    #[must_use]
    pub fn rate(&self, value: f64) -> RatingBand {
        self.bands
            .iter()
            .find(|(bound, _)| match self.kind {
                BoundKind::AtMost => value <= *bound,
                BoundKind::AtLeast => value >= *bound,
            })
            .map_or(self.fallback, |(_, band)| *band)
    }

    /// Every band in table order, fallback last.
    pub fn bands(&self) -> impl Iterator<Item = RatingBand> + '_ {
        self.bands
            .iter()
            .map(|(_, band)| *band)
            .chain(std::iter::once(self.fallback))
    }

    /// Returns `true` if the bounds are strictly ordered for this table's
    /// kind.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.bands.windows(2).all(|pair| match self.kind {
            BoundKind::AtMost => pair[0].0 < pair[1].0,
            BoundKind::AtLeast => pair[0].0 > pair[1].0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOW: RatingBand = RatingBand::labeled("Low", "green");
    const MID: RatingBand = RatingBand::labeled("Mid", "yellow");
    const HIGH: RatingBand = RatingBand::labeled("High", "red");

    const UPPER: ThresholdTable = ThresholdTable::at_most(&[(10.0, LOW), (20.0, MID)], HIGH);
    const LOWER: ThresholdTable = ThresholdTable::at_least(&[(20.0, HIGH), (10.0, MID)], LOW);

    #[test]
    fn upper_bounds_are_inclusive() {
        assert_eq!(UPPER.rate(10.0), LOW);
        assert_eq!(UPPER.rate(10.5), MID);
        assert_eq!(UPPER.rate(20.0), MID);
        assert_eq!(UPPER.rate(20.1), HIGH);
        assert_eq!(UPPER.rate(-5.0), LOW);
    }

    #[test]
    fn lower_bounds_are_inclusive() {
        assert_eq!(LOWER.rate(20.0), HIGH);
        assert_eq!(LOWER.rate(19.9), MID);
        assert_eq!(LOWER.rate(10.0), MID);
        assert_eq!(LOWER.rate(9.9), LOW);
    }

    #[test]
    fn nan_falls_through() {
        assert_eq!(UPPER.rate(f64::NAN), HIGH);
    }

    #[test]
    fn lists_bands_and_checks_order() {
        assert_eq!(UPPER.bands().collect::<Vec<_>>(), [LOW, MID, HIGH]);
        assert!(UPPER.is_ordered());
        assert!(LOWER.is_ordered());
        assert!(!ThresholdTable::at_most(&[(5.0, LOW), (5.0, MID)], HIGH).is_ordered());
    }
}
