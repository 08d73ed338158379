//! Integer helpers for the reducer, thin wrappers over [num::Integer].

use num::{bigint::Sign, BigInt, Integer, Signed, Zero};

/// Absolute value.
pub fn abs(x: &BigInt) -> BigInt {
    x.abs()
}

/// -1, 0 or 1.
pub fn sign(x: &BigInt) -> i8 {
    match x.sign() {
        Sign::Minus => -1,
        Sign::NoSign => 0,
        Sign::Plus => 1,
    }
}

/// Greatest common divisor, never negative. `gcd(0, 0)` is `0`.
///
/// # Example
///
/// ```
/// # use num::BigInt;
/// # use chart_time::primitives::int_tools::gcd;
/// assert_eq!(gcd(&BigInt::from(-12), &BigInt::from(18)), BigInt::from(6));
/// ```
pub fn gcd(a: &BigInt, b: &BigInt) -> BigInt {
    a.gcd(b)
}

/// Least common multiple, never negative.
///
/// Returns `None` if either argument is zero.
pub fn lcm(a: &BigInt, b: &BigInt) -> Option<BigInt> {
    if a.is_zero() || b.is_zero() {
        return None;
    }
    Some(a.lcm(b))
}
