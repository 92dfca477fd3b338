use core::ops::{Bound, RangeBounds, RangeInclusive};

use crate::Error;

/// A range predicate over column values. Unbounded sides are expressed with
/// `f64::NEG_INFINITY` and `f64::INFINITY`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Range {
    pub from: f64,
    pub from_inclusive: bool,
    pub to: f64,
    pub to_inclusive: bool,
}

impl Range {
    pub const fn new(from: f64, from_inclusive: bool, to: f64, to_inclusive: bool) -> Self {
        Self {
            from,
            from_inclusive,
            to,
            to_inclusive,
        }
    }

    /// `[from, to]`
    pub const fn closed(from: f64, to: f64) -> Self {
        Self::new(from, true, to, true)
    }

    /// The range covering every value.
    pub const fn full() -> Self {
        Self::closed(f64::NEG_INFINITY, f64::INFINITY)
    }

    /// `[value, value]`
    pub const fn point(value: f64) -> Self {
        Self::closed(value, value)
    }

    /// `[from, +inf]`
    pub const fn at_least(from: f64) -> Self {
        Self::new(from, true, f64::INFINITY, true)
    }

    /// `(from, +inf]`
    pub const fn greater_than(from: f64) -> Self {
        Self::new(from, false, f64::INFINITY, true)
    }

    /// `[-inf, to]`
    pub const fn at_most(to: f64) -> Self {
        Self::new(f64::NEG_INFINITY, true, to, true)
    }

    /// `[-inf, to)`
    pub const fn less_than(to: f64) -> Self {
        Self::new(f64::NEG_INFINITY, true, to, false)
    }

    /// Convert any standard range over `f64` into a `Range`.
    pub fn from_bounds<R: RangeBounds<f64>>(bounds: R) -> Self {
        let (from, from_inclusive) = match bounds.start_bound() {
            Bound::Included(v) => (*v, true),
            Bound::Excluded(v) => (*v, false),
            Bound::Unbounded => (f64::NEG_INFINITY, true),
        };
        let (to, to_inclusive) = match bounds.end_bound() {
            Bound::Included(v) => (*v, true),
            Bound::Excluded(v) => (*v, false),
            Bound::Unbounded => (f64::INFINITY, true),
        };

        Self::new(from, from_inclusive, to, to_inclusive)
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.from.is_nan() || self.to.is_nan() || self.from > self.to {
            return Err(Error::InvalidRange {
                from: self.from,
                to: self.to,
            });
        }
        Ok(())
    }

    /// Returns true if `value` lies on or above the lower bound.
    pub(crate) fn admits_from(&self, value: f64) -> bool {
        if self.from_inclusive {
            value >= self.from
        } else {
            value > self.from
        }
    }

    /// Returns true if `value` lies on or below the upper bound.
    pub(crate) fn admits_to(&self, value: f64) -> bool {
        if self.to_inclusive {
            value <= self.to
        } else {
            value < self.to
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.admits_from(value) && self.admits_to(value)
    }
}

impl From<RangeInclusive<f64>> for Range {
    fn from(range: RangeInclusive<f64>) -> Self {
        Self::closed(*range.start(), *range.end())
    }
}

impl From<core::ops::Range<f64>> for Range {
    fn from(range: core::ops::Range<f64>) -> Self {
        Self::new(range.start, true, range.end, false)
    }
}
