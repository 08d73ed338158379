//! Intermediate points of a "pseudo long" note.
//!
//! A decorator spanning from one position to another is filled with
//! evenly spaced (in beats) points. Each point also carries its relative
//! place in *time* between the ends, so that a caller can feed it into an
//! easing curve to place the generated note horizontally.

use itertools::Itertools;

use crate::{
    convert::{accumulate_time_with, accumulate_with, distribute_with},
    error::{ChartTimeError, ChartTimeResult},
    primitives::{BarPosition, Rational, TimeSignature},
    settings::Settings,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PseudoLongStep {
    pub position: BarPosition,
    /// `(t - t_start) / (t_end - t_start)`, in `[0, 1)`
    pub ratio: Rational,
}

/// Points from `start` (exclusive) to `end` (exclusive), every
/// `interval` quarter-note beats.
///
/// # Example
///
/// ```
/// # use chart_time::{pseudo_long_steps, Settings};
/// # use chart_time::primitives::{BarPosition, Rational, TimeSignature};
/// let steps = pseudo_long_steps(
///     |_| TimeSignature::new(4, 4),
///     |_| 120.0,
///     &BarPosition::new(1, 0, 1),
///     &BarPosition::new(2, 0, 1),
///     &"1".parse().unwrap(),
///     &Settings::default(),
/// )
/// .unwrap();
/// assert_eq!(steps.len(), 3);
/// assert_eq!(steps[0].position, BarPosition::new(1, 1, 4));
/// assert_eq!(steps[2].ratio, Rational::new(3, 4).unwrap());
/// ```
pub fn pseudo_long_steps(
    time_signature: impl Fn(u32) -> TimeSignature,
    tempo: impl Fn(u32) -> f64,
    start: &BarPosition,
    end: &BarPosition,
    interval: &Rational,
    settings: &Settings,
) -> ChartTimeResult<Vec<PseudoLongStep>> {
    if !interval.is_positive() {
        return Err(ChartTimeError::InvalidSettings(format!(
            "pseudo long interval should be positive, got {}",
            interval
        )));
    }
    let start_beats = accumulate_with(&time_signature, start, settings)?;
    let end_beats = accumulate_with(&time_signature, end, settings)?;
    let start_time =
        accumulate_time_with(&time_signature, &tempo, start, settings)?;
    let end_time =
        accumulate_time_with(&time_signature, &tempo, end, settings)?;
    let length = &end_time - &start_time;

    let mut steps = Vec::new();
    let mut now = &start_beats + interval;
    while now < end_beats {
        let position = distribute_with(&time_signature, &now, settings)?;
        let now_time = accumulate_time_with(
            &time_signature,
            &tempo,
            &position,
            settings,
        )?;
        let ratio = (&now_time - &start_time).checked_div(&length)?;
        steps.push(PseudoLongStep { position, ratio });
        now = &now + interval;
    }
    log::debug!(
        "{} pseudo long steps between {} and {}",
        steps.len(),
        start,
        end
    );
    Ok(steps)
}

/// [pseudo_long_steps] for several `(start, end)` pairs, without
/// repeated points.
pub fn pseudo_long_steps_all(
    time_signature: impl Fn(u32) -> TimeSignature,
    tempo: impl Fn(u32) -> f64,
    spans: &[(BarPosition, BarPosition)],
    interval: &Rational,
    settings: &Settings,
) -> ChartTimeResult<Vec<PseudoLongStep>> {
    let steps = spans
        .iter()
        .map(|(start, end)| {
            pseudo_long_steps(
                &time_signature,
                &tempo,
                start,
                end,
                interval,
                settings,
            )
        })
        .collect::<ChartTimeResult<Vec<_>>>()?;
    Ok(steps.into_iter().flatten().unique().collect())
}
