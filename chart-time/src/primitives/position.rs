//! Bar positions, as they are written in a chart.
//!
//! A position is a bar number (1-based) and a fraction of a whole note
//! from the start of that bar. So `(3, 1, 4)` is one quarter-note beat
//! after the start of bar 3, whatever the time signature of the bar is.
//!
//! The fraction is stored as given, not reduced: `(3, 2, 8)` and
//! `(3, 1, 4)` are different *notations* of the same place. Use
//! [BarPosition::same_place] to compare places, and
//! [crate::reduce_to_common_denominator] to unify notations.
//!
//! # Examples
//!
//! ```
//! use chart_time::primitives::{BarPosition, Rational};
//!
//! let a = BarPosition::new(3, 2, 8);
//! let b = BarPosition::new(3, 1, 4);
//! assert_ne!(a, b);
//! assert!(a.same_place(&b).unwrap());
//! assert_eq!(a.beats_in_bar().unwrap(), Rational::one());
//! assert_eq!(a.to_string(), "[3, 2, 8]");
//! ```

use std::fmt;

use num::BigInt;

use super::Rational;
use crate::error::ChartTimeResult;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BarPosition {
    /// bar number (1-based, 0 is the same place as bar 1)
    pub bar: u32,
    pub numerator: BigInt,
    /// should be non-zero
    pub denominator: BigInt,
}
impl BarPosition {
    pub fn new(
        bar: u32,
        numerator: impl Into<BigInt>,
        denominator: impl Into<BigInt>,
    ) -> Self {
        Self {
            bar,
            numerator: numerator.into(),
            denominator: denominator.into(),
        }
    }

    /// Position from bar and fraction of whole note, in reduced form.
    pub fn from_fraction(bar: u32, fraction: &Rational) -> Self {
        Self::new(bar, fraction.numer().clone(), fraction.denom().clone())
    }

    /// Distance from bar start as fraction of a whole note.
    ///
    /// Fails on zero denominator.
    pub fn fraction(&self) -> ChartTimeResult<Rational> {
        Rational::new(self.numerator.clone(), self.denominator.clone())
    }

    /// Distance from bar start in quarter-note beats.
    pub fn beats_in_bar(&self) -> ChartTimeResult<Rational> {
        Ok(&self.fraction()? * &Rational::from_integer(4))
    }

    /// Same bar and same fraction, regardless of notation.
    ///
    /// Bars 0 and 1 are not unified here: use conversion for that.
    pub fn same_place(&self, other: &Self) -> ChartTimeResult<bool> {
        Ok(self.bar == other.bar && self.fraction()? == other.fraction()?)
    }

    /// Notation with the fraction reduced.
    pub fn reduced(&self) -> ChartTimeResult<Self> {
        Ok(Self::from_fraction(self.bar, &self.fraction()?))
    }
}
impl From<(u32, i64, i64)> for BarPosition {
    fn from(value: (u32, i64, i64)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}
/// Chart notation: `[bar, numerator, denominator]`.
impl fmt::Display for BarPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.bar, self.numerator, self.denominator)
    }
}
