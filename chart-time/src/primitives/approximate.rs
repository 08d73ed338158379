//! Bring floating values (tempos) into exact arithmetic.
//!
//! This is the only lossy step of the crate: tempo is given in BPM as a
//! float, while everything downstream works on [Rational].

use num::{BigInt, FromPrimitive};

use super::Rational;
use crate::{
    error::{ChartTimeError, ChartTimeResult},
    settings::DEFAULT_APPROXIMATION_CEILING,
};

/// [approximate_with_ceiling] with the default ceiling.
pub fn approximate(value: f64) -> ChartTimeResult<Rational> {
    approximate_with_ceiling(value, DEFAULT_APPROXIMATION_CEILING)
}

/// Find rational representation of the float.
///
/// Denominators are tried in increasing order from 1 up to `ceiling`.
/// The first one that reproduces `value` exactly wins. If none does,
/// the first candidate with the smallest error is returned.
///
/// # Example
///
/// ```
/// # use chart_time::primitives::{approximate_with_ceiling, Rational};
/// assert_eq!(
///     approximate_with_ceiling(120.5, 100).unwrap(),
///     Rational::new(241, 2).unwrap()
/// );
/// assert_eq!(
///     approximate_with_ceiling(std::f64::consts::PI, 10).unwrap(),
///     Rational::new(22, 7).unwrap()
/// );
/// ```
pub fn approximate_with_ceiling(
    value: f64,
    ceiling: u64,
) -> ChartTimeResult<Rational> {
    if !value.is_finite() {
        return Err(ChartTimeError::NotFinite(value));
    }
    if ceiling < 1 {
        return Err(ChartTimeError::InvalidSettings(
            "approximation ceiling should be at least 1".to_string(),
        ));
    }
    if value == 0.0 {
        return Ok(Rational::zero());
    }
    if value < 0.0 {
        return approximate_with_ceiling(-value, ceiling).map(|r| -r);
    }

    let mut best: Option<(f64, f64, u64)> = None;
    for denom in 1..=ceiling {
        let denom_f64 = denom as f64;
        let numer = (value * denom_f64).round();
        let candidate = numer / denom_f64;
        if candidate == value {
            return Rational::new(float_to_int(numer)?, denom);
        }
        let error = (candidate - value).abs();
        match best {
            Some((best_error, _, _)) if best_error <= error => (),
            _ => best = Some((error, numer, denom)),
        }
    }
    let (error, numer, denom) = best.ok_or(ChartTimeError::NotFinite(value))?;
    log::trace!(
        "no exact rational for {} up to denominator {}, using {}/{} (error {})",
        value,
        ceiling,
        numer,
        denom,
        error
    );
    Rational::new(float_to_int(numer)?, denom)
}

fn float_to_int(value: f64) -> ChartTimeResult<BigInt> {
    BigInt::from_f64(value).ok_or(ChartTimeError::NotFinite(value))
}

#[cfg(test)]
mod tests {
    use super::{approximate, approximate_with_ceiling};
    use crate::{error::ChartTimeError, primitives::Rational};

    fn q(n: i64, d: i64) -> Rational {
        Rational::new(n, d).unwrap()
    }

    #[test]
    fn exact_values() {
        assert_eq!(approximate(0.0).unwrap(), Rational::zero());
        assert_eq!(approximate(120.0).unwrap(), q(120, 1));
        assert_eq!(approximate(0.1).unwrap(), q(1, 10));
        assert_eq!(approximate(-0.375).unwrap(), q(-3, 8));
        assert_eq!(approximate(400.0 / 3.0).unwrap(), q(400, 3));
        assert_eq!(approximate(174.125).unwrap(), q(1393, 8));
        assert_eq!(approximate(1e300).unwrap().to_f64(), 1e300);
    }

    #[test]
    fn soundness_for_small_denominators() {
        for denom in 1..=96i64 {
            for numer in [-7i64, 1, 5, 37, 241] {
                let value = numer as f64 / denom as f64;
                assert_eq!(
                    approximate(value).unwrap(),
                    q(numer, denom),
                    "{}/{}",
                    numer,
                    denom
                );
            }
        }
    }

    #[test]
    fn best_candidate() {
        assert_eq!(
            approximate_with_ceiling(std::f64::consts::PI, 10).unwrap(),
            q(22, 7)
        );
        assert_eq!(
            approximate_with_ceiling(-std::f64::consts::PI, 10).unwrap(),
            q(-22, 7)
        );
        // 0/1 and 1/2 are equally far from 0.25: the first one is kept.
        assert_eq!(approximate_with_ceiling(0.25, 2).unwrap(), q(0, 1));
        assert_eq!(approximate_with_ceiling(0.25, 3).unwrap(), q(1, 3));
    }

    #[test]
    fn rejects() {
        assert!(matches!(
            approximate(f64::NAN),
            Err(ChartTimeError::NotFinite(_))
        ));
        assert!(matches!(
            approximate(f64::INFINITY),
            Err(ChartTimeError::NotFinite(_))
        ));
        assert!(matches!(
            approximate_with_ceiling(1.5, 0),
            Err(ChartTimeError::InvalidSettings(_))
        ));
    }
}
