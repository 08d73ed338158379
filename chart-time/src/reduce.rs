//! Bring bar-position fractions to a common denominator, so a batch of
//! positions reads uniformly in a chart.

use itertools::Itertools;
use num::{BigInt, One};

use crate::{
    error::{ChartTimeError, ChartTimeResult},
    primitives::{int_tools::lcm, BarPosition},
};

/// Rewrite every position over the least common multiple of all
/// denominators. Bars and values are untouched.
///
/// # Example
///
/// ```
/// # use chart_time::{reduce_to_common_denominator, primitives::BarPosition};
/// let reduced = reduce_to_common_denominator(&[
///     BarPosition::new(1, 1, 4),
///     BarPosition::new(2, 1, 6),
/// ])
/// .unwrap();
/// assert_eq!(
///     reduced,
///     vec![BarPosition::new(1, 3, 12), BarPosition::new(2, 2, 12)]
/// );
/// ```
pub fn reduce_to_common_denominator(
    positions: &[BarPosition],
) -> ChartTimeResult<Vec<BarPosition>> {
    let pairs = positions
        .iter()
        .map(|p| (p.numerator.clone(), p.denominator.clone()))
        .collect_vec();
    Ok(positions
        .iter()
        .zip_eq(reduce_pairs(&pairs)?)
        .map(|(p, (numerator, denominator))| BarPosition {
            bar: p.bar,
            numerator,
            denominator,
        })
        .collect())
}

/// Same as [reduce_to_common_denominator], for bare
/// `(numerator, denominator)` pairs.
///
/// Fails with [ChartTimeError::DivisionByZero] if any denominator is 0.
pub fn reduce_pairs(
    pairs: &[(BigInt, BigInt)],
) -> ChartTimeResult<Vec<(BigInt, BigInt)>> {
    let common = pairs.iter().try_fold(BigInt::one(), |acc, (_, denom)| {
        lcm(&acc, denom).ok_or(ChartTimeError::DivisionByZero)
    })?;
    log::debug!(
        "reducing {} fractions to denominator {}",
        pairs.len(),
        common
    );
    Ok(pairs
        .iter()
        .map(|(numer, denom)| (numer * (&common / denom), common.clone()))
        .collect())
}
