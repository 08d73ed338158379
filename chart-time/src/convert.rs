//! Conversion between bar positions and linear offsets.
//!
//! "Accumulate" turns a [BarPosition] into an offset from the start of
//! bar 1, "distribute" does the opposite. Offsets are measured either in
//! quarter-note beats or in seconds, never mixed.
//!
//! Every call builds its own [BarStartTable] from the given oracles, long
//! enough for the query (see [Settings::bound_for_bar]), and throws it
//! away afterwards.
//!
//! # Examples
//!
//! ```
//! use chart_time::{accumulate, accumulate_time, distribute};
//! use chart_time::primitives::{BarPosition, Rational, TimeSignature};
//!
//! let four_four = |_| TimeSignature::new(4, 4);
//! let bpm = |_| 120.0;
//! let position = BarPosition::new(3, 0, 4);
//!
//! let beats = accumulate(four_four, &position).unwrap();
//! assert_eq!(beats, Rational::from_integer(8));
//! let seconds = accumulate_time(four_four, bpm, &position).unwrap();
//! assert_eq!(seconds, Rational::from_integer(4));
//! assert_eq!(
//!     distribute(four_four, &beats).unwrap(),
//!     BarPosition::new(3, 0, 1)
//! );
//! ```

use num::ToPrimitive;

use crate::{
    error::{ChartTimeError, ChartTimeResult},
    primitives::{
        beats_to_seconds, seconds_to_beats, tempo_at, BarPosition,
        BarStartTable, Rational, TimeSignature,
    },
    settings::Settings,
};

/// Bar position → offset in quarter-note beats, with default settings.
pub fn accumulate(
    time_signature: impl Fn(u32) -> TimeSignature,
    position: &BarPosition,
) -> ChartTimeResult<Rational> {
    accumulate_with(time_signature, position, &Settings::default())
}

/// Bar position → offset in quarter-note beats.
///
/// `table[bar] + 4 * numerator / denominator`.
pub fn accumulate_with(
    time_signature: impl Fn(u32) -> TimeSignature,
    position: &BarPosition,
    settings: &Settings,
) -> ChartTimeResult<Rational> {
    settings.validate()?;
    let within_bar = position.beats_in_bar()?;
    let table = BarStartTable::beats(
        time_signature,
        settings.bound_for_bar(position.bar),
    )?;
    Ok(&table.start_of(position.bar)? + &within_bar)
}

/// Bar position → offset in seconds, with default settings.
pub fn accumulate_time(
    time_signature: impl Fn(u32) -> TimeSignature,
    tempo: impl Fn(u32) -> f64,
    position: &BarPosition,
) -> ChartTimeResult<Rational> {
    accumulate_time_with(time_signature, tempo, position, &Settings::default())
}

/// Bar position → offset in seconds.
///
/// Distance inside the bar is converted with the tempo of that bar
/// (bar 0 uses the tempo of bar 1).
pub fn accumulate_time_with(
    time_signature: impl Fn(u32) -> TimeSignature,
    tempo: impl Fn(u32) -> f64,
    position: &BarPosition,
    settings: &Settings,
) -> ChartTimeResult<Rational> {
    settings.validate()?;
    let bar = position.bar.max(1);
    let bar_tempo = tempo_at(bar, tempo(bar), settings.approximation_ceiling)?;
    let within_bar =
        beats_to_seconds(bar, &position.beats_in_bar()?, &bar_tempo)?;
    let table = BarStartTable::seconds(
        time_signature,
        tempo,
        settings.bound_for_bar(position.bar),
        settings,
    )?;
    Ok(&table.start_of(position.bar)? + &within_bar)
}

/// Offset in quarter-note beats → bar position, with default settings.
pub fn distribute(
    time_signature: impl Fn(u32) -> TimeSignature,
    offset: &Rational,
) -> ChartTimeResult<BarPosition> {
    distribute_with(time_signature, offset, &Settings::default())
}

/// Offset in quarter-note beats → bar position.
///
/// Offset exactly on a barline gives the bar starting there, with zero
/// fraction. The fraction of the result is reduced.
///
/// Table is first built up to `max(ceil(offset), min_table_bound) +
/// headroom` bars, and doubled until it reaches past the offset.
pub fn distribute_with(
    time_signature: impl Fn(u32) -> TimeSignature,
    offset: &Rational,
    settings: &Settings,
) -> ChartTimeResult<BarPosition> {
    settings.validate()?;
    let table = table_past(offset, settings, |bound| {
        BarStartTable::beats(&time_signature, bound)
    })?;
    let bar = table.locate(offset)?;
    let remainder = offset - &table.start_of(bar)?;
    let fraction = remainder.checked_div(&Rational::from_integer(4))?;
    Ok(BarPosition::from_fraction(bar, &fraction))
}

/// Offset in seconds → bar position, with default settings.
pub fn distribute_time(
    time_signature: impl Fn(u32) -> TimeSignature,
    tempo: impl Fn(u32) -> f64,
    seconds: &Rational,
) -> ChartTimeResult<BarPosition> {
    distribute_time_with(time_signature, tempo, seconds, &Settings::default())
}

/// Offset in seconds → bar position.
///
/// The bar is found by bisection of the time table; the rest is turned
/// back into beats with the tempo of that bar. The table grows the same
/// way as in [distribute_with].
pub fn distribute_time_with(
    time_signature: impl Fn(u32) -> TimeSignature,
    tempo: impl Fn(u32) -> f64,
    seconds: &Rational,
    settings: &Settings,
) -> ChartTimeResult<BarPosition> {
    settings.validate()?;
    let table = table_past(seconds, settings, |bound| {
        BarStartTable::seconds(&time_signature, &tempo, bound, settings)
    })?;
    let bar = table.locate_binary(seconds)?;
    let remainder = seconds - &table.start_of(bar)?;
    let bar_tempo = tempo_at(bar, tempo(bar), settings.approximation_ceiling)?;
    let beats = seconds_to_beats(&remainder, &bar_tempo)?;
    let fraction = beats.checked_div(&Rational::from_integer(4))?;
    Ok(BarPosition::from_fraction(bar, &fraction))
}

/// Move position by the given amount of quarter-note beats (may be
/// negative), crossing barlines as needed.
///
/// ```
/// # use chart_time::shift;
/// # use chart_time::primitives::{BarPosition, Rational, TimeSignature};
/// let three_four = |_| TimeSignature::new(3, 4);
/// let two_beats = Rational::from_integer(2);
/// let moved =
///     shift(three_four, &BarPosition::new(2, 1, 2), &two_beats).unwrap();
/// assert_eq!(moved, BarPosition::new(3, 1, 4));
/// ```
pub fn shift(
    time_signature: impl Fn(u32) -> TimeSignature,
    position: &BarPosition,
    beats: &Rational,
) -> ChartTimeResult<BarPosition> {
    shift_with(time_signature, position, beats, &Settings::default())
}

pub fn shift_with(
    time_signature: impl Fn(u32) -> TimeSignature,
    position: &BarPosition,
    beats: &Rational,
    settings: &Settings,
) -> ChartTimeResult<BarPosition> {
    let offset = accumulate_with(&time_signature, position, settings)?;
    distribute_with(&time_signature, &(&offset + beats), settings)
}

/// [shift] every position by the same amount.
pub fn shift_all(
    time_signature: impl Fn(u32) -> TimeSignature,
    positions: &[BarPosition],
    beats: &Rational,
    settings: &Settings,
) -> ChartTimeResult<Vec<BarPosition>> {
    positions
        .iter()
        .map(|position| shift_with(&time_signature, position, beats, settings))
        .collect()
}

/// Build table with `build`, doubling its bound until the last known
/// bar start lies after the offset.
fn table_past(
    offset: &Rational,
    settings: &Settings,
    build: impl Fn(u32) -> ChartTimeResult<BarStartTable>,
) -> ChartTimeResult<BarStartTable> {
    let mut bound = bound_for_offset(offset, settings)?;
    loop {
        let table = build(bound)?;
        if &table.start_of(table.bound())? > offset {
            return Ok(table);
        }
        if bound == u32::MAX {
            return Err(ChartTimeError::BoundExceeded {
                requested: format!("offset {}", offset),
                bound,
            });
        }
        log::debug!(
            "offset {} lies past bar {}, extending the table",
            offset,
            bound
        );
        bound = bound.saturating_mul(2);
    }
}

/// `max(ceil(offset), min_table_bound) + headroom`
fn bound_for_offset(
    offset: &Rational,
    settings: &Settings,
) -> ChartTimeResult<u32> {
    if offset.is_negative() {
        return Err(ChartTimeError::OffsetBeforeStart(offset.to_string()));
    }
    let bars = offset
        .ceil()
        .to_u32()
        .ok_or_else(|| ChartTimeError::BoundExceeded {
            requested: format!("offset {}", offset),
            bound: u32::MAX,
        })?;
    Ok(settings.bound_for_bar(bars))
}
