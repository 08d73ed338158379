//! Main "ruler" for converting positions: where every bar starts.
//!
//! Table entry `i` is the offset of the start of bar `i` from the start
//! of bar 1. Entries 0 and 1 are both zero: bars are 1-based, and index 0
//! is kept so that bar numbers index the table directly.
//!
//! Tables are built per query and never cached.
use super::{tempo_at, Rational, TimeSignature};
use crate::{
    error::{ChartTimeError, ChartTimeResult},
    settings::Settings,
};

/// Unit of offsets in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    /// quarter-note beats
    Beats,
    Seconds,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarStartTable {
    domain: Domain,
    starts: Vec<Rational>,
}
impl BarStartTable {
    /// Build table of bar starts in quarter-note beats, up to bar `bound`.
    ///
    /// # Example
    /// ```
    /// # use chart_time::primitives::{BarStartTable, Rational, TimeSignature};
    /// let table = BarStartTable::beats(
    ///     |bar| match bar {
    ///         2 => TimeSignature::new(3, 8),
    ///         _ => TimeSignature::new(4, 4),
    ///     },
    ///     4,
    /// )
    /// .unwrap();
    /// assert_eq!(table.start_of(1).unwrap(), Rational::zero());
    /// assert_eq!(table.start_of(2).unwrap(), Rational::from_integer(4));
    /// assert_eq!(table.start_of(3).unwrap(), Rational::new(11, 2).unwrap());
    /// assert!(table.start_of(5).is_err());
    /// ```
    pub fn beats(
        time_signature: impl Fn(u32) -> TimeSignature,
        bound: u32,
    ) -> ChartTimeResult<Self> {
        Self::build(Domain::Beats, bound, |bar| time_signature(bar).beats(bar))
    }

    /// Build table of bar starts in seconds, up to bar `bound`.
    ///
    /// Every bar's tempo is approximated with
    /// `settings.approximation_ceiling`.
    pub fn seconds(
        time_signature: impl Fn(u32) -> TimeSignature,
        tempo: impl Fn(u32) -> f64,
        bound: u32,
        settings: &Settings,
    ) -> ChartTimeResult<Self> {
        Self::build(Domain::Seconds, bound, |bar| {
            let tempo =
                tempo_at(bar, tempo(bar), settings.approximation_ceiling)?;
            time_signature(bar).seconds(bar, &tempo)
        })
    }

    /// `length` is called for bars `1..bound` and must return positive
    /// values.
    fn build(
        domain: Domain,
        bound: u32,
        length: impl Fn(u32) -> ChartTimeResult<Rational>,
    ) -> ChartTimeResult<Self> {
        if bound < 1 {
            return Err(ChartTimeError::InvalidSettings(
                "bar start table should reach at least bar 1".to_string(),
            ));
        }
        log::debug!(
            "building {:?} bar start table up to bar {}",
            domain,
            bound
        );
        let mut starts = Vec::with_capacity(bound as usize + 1);
        let mut current = Rational::zero();
        starts.push(current.clone());
        starts.push(current.clone());
        for bar in 1..bound {
            current = &current + &length(bar)?;
            starts.push(current.clone());
        }
        Ok(Self { domain, starts })
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }
    /// Last bar, which start is known.
    pub fn bound(&self) -> u32 {
        (self.starts.len() - 1) as u32
    }
    pub fn as_slice(&self) -> &[Rational] {
        &self.starts
    }
    pub fn iter(&self) -> impl Iterator<Item = &Rational> {
        self.starts.iter()
    }

    /// Offset of the bar start.
    pub fn start_of(&self, bar: u32) -> ChartTimeResult<Rational> {
        self.starts
            .get(bar as usize)
            .cloned()
            .ok_or_else(|| ChartTimeError::BoundExceeded {
                requested: format!("bar {}", bar),
                bound: self.bound(),
            })
    }

    /// Find the bar the offset belongs to.
    ///
    /// That is the last bar, which starts not later than the offset. So,
    /// an offset exactly on a barline belongs to the bar starting there.
    ///
    /// Beat tables are scanned linearly, time tables are bisected. Both
    /// give the same answer.
    pub fn locate(&self, offset: &Rational) -> ChartTimeResult<u32> {
        match self.domain {
            Domain::Beats => self.locate_linear(offset),
            Domain::Seconds => self.locate_binary(offset),
        }
    }

    pub fn locate_linear(&self, offset: &Rational) -> ChartTimeResult<u32> {
        self.check_offset(offset)?;
        let not_later = self
            .starts
            .iter()
            .take_while(|start| *start <= offset)
            .count();
        self.checked_bar(not_later - 1, offset)
    }

    pub fn locate_binary(&self, offset: &Rational) -> ChartTimeResult<u32> {
        self.check_offset(offset)?;
        let not_later = self.starts.partition_point(|start| start <= offset);
        self.checked_bar(not_later - 1, offset)
    }

    fn check_offset(&self, offset: &Rational) -> ChartTimeResult<()> {
        if offset.is_negative() {
            return Err(ChartTimeError::OffsetBeforeStart(offset.to_string()));
        }
        Ok(())
    }

    /// The last table entry has unknown end, so offsets at or after it
    /// can not be located.
    fn checked_bar(
        &self,
        index: usize,
        offset: &Rational,
    ) -> ChartTimeResult<u32> {
        if index + 1 >= self.starts.len() {
            return Err(ChartTimeError::BoundExceeded {
                requested: format!("offset {}", offset),
                bound: self.bound(),
            });
        }
        Ok(index as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::{BarStartTable, Domain};
    use crate::{
        error::ChartTimeError,
        primitives::{Rational, TimeSignature},
        settings::Settings,
    };

    fn q(n: i64, d: i64) -> Rational {
        Rational::new(n, d).unwrap()
    }

    fn mixed(bar: u32) -> TimeSignature {
        match bar {
            4 => TimeSignature::new(7, 8),
            5 => TimeSignature::new(9, 8),
            6 => TimeSignature::new(3, 16),
            _ => TimeSignature::new(4, 4),
        }
    }

    #[test]
    fn test_contents() {
        let table = BarStartTable::beats(mixed, 8).unwrap();
        assert_eq!(table.domain(), Domain::Beats);
        assert_eq!(table.bound(), 8);
        let expected = vec![
            q(0, 1),
            q(0, 1),
            q(4, 1),
            q(8, 1),
            q(12, 1),
            q(31, 2),
            q(20, 1),
            q(83, 4),
            q(99, 4),
        ];
        assert_eq!(table.as_slice(), expected.as_slice());
        assert_eq!(table.iter().count(), 9);
    }

    #[test]
    fn test_seconds() {
        let settings = Settings::default();
        let table = BarStartTable::seconds(
            mixed,
            |bar| if bar < 3 { 120.0 } else { 90.0 },
            6,
            &settings,
        )
        .unwrap();
        assert_eq!(table.domain(), Domain::Seconds);
        // 2s, 2s, then 8/3s, 7/3s at 90 BPM
        assert_eq!(table.start_of(2).unwrap(), q(2, 1));
        assert_eq!(table.start_of(3).unwrap(), q(4, 1));
        assert_eq!(table.start_of(4).unwrap(), q(20, 3));
        assert_eq!(table.start_of(5).unwrap(), q(9, 1));
    }

    #[test]
    fn test_locate() {
        let table = BarStartTable::beats(mixed, 8).unwrap();
        let cases = [
            (q(0, 1), 1),
            (q(1, 3), 1),
            (q(4, 1), 2),
            (q(31, 2), 5),
            (q(19, 1), 5),
            (q(20, 1), 6),
            (q(99, 4) - q(1, 1000), 7),
        ];
        for (offset, bar) in cases.iter() {
            let found = [
                table.locate_linear(offset).unwrap(),
                table.locate_binary(offset).unwrap(),
                table.locate(offset).unwrap(),
            ];
            assert_eq!(found, [*bar; 3], "{}", offset);
        }
    }

    #[test]
    fn test_bounds() {
        let table = BarStartTable::beats(mixed, 8).unwrap();
        assert!(matches!(
            table.locate(&q(99, 4)),
            Err(ChartTimeError::BoundExceeded { bound: 8, .. })
        ));
        assert!(matches!(
            table.locate_binary(&q(1000, 1)),
            Err(ChartTimeError::BoundExceeded { bound: 8, .. })
        ));
        assert!(matches!(
            table.locate(&q(-1, 4)),
            Err(ChartTimeError::OffsetBeforeStart(_))
        ));
        assert!(matches!(
            table.start_of(9),
            Err(ChartTimeError::BoundExceeded { bound: 8, .. })
        ));
        assert!(BarStartTable::beats(mixed, 0).is_err());
    }

    #[test]
    fn test_malformed() {
        let result = BarStartTable::beats(
            |bar| match bar {
                3 => TimeSignature::new(0, 4),
                _ => TimeSignature::new(4, 4),
            },
            10,
        );
        assert!(matches!(
            result,
            Err(ChartTimeError::MalformedMeter { bar: 3, .. })
        ));
        let result = BarStartTable::seconds(
            |_| TimeSignature::new(4, 4),
            |bar| if bar == 5 { -1.0 } else { 120.0 },
            10,
            &Settings::default(),
        );
        assert!(matches!(
            result,
            Err(ChartTimeError::MalformedMeter { bar: 5, .. })
        ));
    }
}
