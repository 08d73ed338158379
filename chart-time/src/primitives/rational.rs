//! Exact fractions over arbitrary-precision integers.
//!
//! Every value is kept in canonical form by [BigRational]: denominator
//! is positive, numerator and denominator share no common factor, and
//! zero is `0/1`. The wrapper only adds fallible construction and
//! division, so a zero denominator is an error instead of a panic.
//!
//! # Examples
//!
//! ```
//! use chart_time::primitives::Rational;
//!
//! let three_eights = Rational::new(3, 8).unwrap();
//! let bar = Rational::new(6, -16).unwrap();
//! assert_eq!(bar, -three_eights.clone());
//! assert_eq!(bar.to_string(), "-3/8");
//! assert_eq!(
//!     &three_eights * &Rational::from_integer(4),
//!     Rational::new(3, 2).unwrap()
//! );
//! assert!(three_eights.checked_div(&Rational::zero()).is_err());
//! ```

use std::{
    fmt,
    ops::{Add, Mul, Neg, Sub},
    str::FromStr,
};

use fraction::{BigFraction, Sign};
use num::{BigInt, BigRational, Signed, ToPrimitive, Zero};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ChartTimeError, ChartTimeResult};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rational(BigRational);
impl Rational {
    /// Fails with [ChartTimeError::DivisionByZero] if denominator is 0.
    pub fn new(
        numer: impl Into<BigInt>,
        denom: impl Into<BigInt>,
    ) -> ChartTimeResult<Self> {
        let denom = denom.into();
        if denom.is_zero() {
            return Err(ChartTimeError::DivisionByZero);
        }
        Ok(Self(BigRational::new(numer.into(), denom)))
    }

    pub fn from_integer(value: impl Into<BigInt>) -> Self {
        Self(BigRational::from_integer(value.into()))
    }
    pub fn zero() -> Self {
        Self(BigRational::zero())
    }
    pub fn one() -> Self {
        Self::from_integer(1)
    }

    pub fn numer(&self) -> &BigInt {
        self.0.numer()
    }
    /// Always positive.
    pub fn denom(&self) -> &BigInt {
        self.0.denom()
    }
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }
    pub fn is_positive(&self) -> bool {
        self.0.is_positive()
    }
    pub fn is_integer(&self) -> bool {
        self.0.is_integer()
    }

    /// `self / other`, or [ChartTimeError::DivisionByZero] if other is 0.
    pub fn checked_div(&self, other: &Self) -> ChartTimeResult<Self> {
        if other.is_zero() {
            return Err(ChartTimeError::DivisionByZero);
        }
        Ok(Self(&self.0 / &other.0))
    }
    pub fn recip(&self) -> ChartTimeResult<Self> {
        Self::one().checked_div(self)
    }
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }
    /// Largest integer not greater than self.
    pub fn floor(&self) -> BigInt {
        self.0.floor().to_integer()
    }
    /// Smallest integer not less than self.
    pub fn ceil(&self) -> BigInt {
        self.0.ceil().to_integer()
    }
    /// `self - floor(self / other) * other`.
    ///
    /// Result has the sign of `other`.
    pub fn modulo(&self, other: &Self) -> ChartTimeResult<Self> {
        let quotient = Self::from_integer(self.checked_div(other)?.floor());
        Ok(self - &(&quotient * other))
    }

    /// Lossy. Use for display and logging only.
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(f64::NAN)
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::zero()
    }
}
impl From<i64> for Rational {
    fn from(value: i64) -> Self {
        Self::from_integer(value)
    }
}
impl From<BigInt> for Rational {
    fn from(value: BigInt) -> Self {
        Self::from_integer(value)
    }
}
impl From<BigRational> for Rational {
    fn from(value: BigRational) -> Self {
        Self(value)
    }
}
impl From<Rational> for BigRational {
    fn from(value: Rational) -> Self {
        value.0
    }
}

impl<'a> Add<&'a Rational> for &'a Rational {
    fn add(self, rhs: &'a Rational) -> Self::Output {
        Rational(&self.0 + &rhs.0)
    }
    type Output = Rational;
}
impl<'a> Sub<&'a Rational> for &'a Rational {
    fn sub(self, rhs: &'a Rational) -> Self::Output {
        Rational(&self.0 - &rhs.0)
    }
    type Output = Rational;
}
impl<'a> Mul<&'a Rational> for &'a Rational {
    fn mul(self, rhs: &'a Rational) -> Self::Output {
        Rational(&self.0 * &rhs.0)
    }
    type Output = Rational;
}
impl Add for Rational {
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
    type Output = Self;
}
impl Sub for Rational {
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
    type Output = Self;
}
impl Mul for Rational {
    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
    type Output = Self;
}
impl Neg for Rational {
    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
    type Output = Self;
}
impl Neg for &Rational {
    fn neg(self) -> Self::Output {
        Rational(-&self.0)
    }
    type Output = Rational;
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.is_integer() {
            true => write!(f, "{}", self.numer()),
            false => write!(f, "{}/{}", self.numer(), self.denom()),
        }
    }
}

/// Accepts `"n"` or `"n/d"`, with optional whitespace around parts.
impl FromStr for Rational {
    type Err = ChartTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |part: &str| {
            BigInt::from_str(part.trim())
                .map_err(|_| ChartTimeError::ParseRational(s.to_string()))
        };
        match s.split_once('/') {
            None => Ok(Self::from_integer(parse(s)?)),
            Some((numer, denom)) => Self::new(parse(numer)?, parse(denom)?),
        }
    }
}

impl Serialize for Rational {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
impl<'de> Deserialize<'de> for Rational {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

impl From<&Rational> for BigFraction {
    fn from(value: &Rational) -> Self {
        let numer = value.numer().magnitude().clone();
        let denom = value.denom().magnitude().clone();
        match value.is_negative() {
            true => BigFraction::new_neg(numer, denom),
            false => BigFraction::new(numer, denom),
        }
    }
}
/// Fails on NaN and infinities.
impl TryFrom<&BigFraction> for Rational {
    type Error = ChartTimeError;

    fn try_from(value: &BigFraction) -> Result<Self, Self::Error> {
        match (value.numer(), value.denom(), value.sign()) {
            (Some(numer), Some(denom), Some(sign)) => {
                let numer = BigInt::from(numer.clone());
                let numer = match sign {
                    Sign::Minus => -numer,
                    Sign::Plus => numer,
                };
                Self::new(numer, BigInt::from(denom.clone()))
            }
            _ => Err(ChartTimeError::NotFinite(
                value.to_f64().unwrap_or(f64::NAN),
            )),
        }
    }
}
