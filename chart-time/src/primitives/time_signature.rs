use serde::{Deserialize, Serialize};

use super::{approximate_with_ceiling, Rational};
use crate::error::{ChartTimeError, ChartTimeResult};

/// Meter of one bar: `numerator` notes of `1/denominator` each.
#[derive(
    Debug, PartialEq, Eq, PartialOrd, Clone, Copy, Hash, Serialize, Deserialize,
)]
pub struct TimeSignature {
    pub numerator: u32,
    pub denominator: u32,
}
impl TimeSignature {
    pub fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Length of the bar in quarter-note beats.
    ///
    /// A 4/4 bar gives 4, a 3/8 bar gives 3/2.
    ///
    /// `bar` is used only for reporting [ChartTimeError::MalformedMeter].
    pub fn beats(&self, bar: u32) -> ChartTimeResult<Rational> {
        self.validate(bar)?;
        Rational::new(4 * u64::from(self.numerator), self.denominator)
    }

    /// Length of the bar in seconds at the given tempo (BPM as rational):
    /// `240 * numerator / (denominator * tempo)`.
    pub fn seconds(
        &self,
        bar: u32,
        tempo: &Rational,
    ) -> ChartTimeResult<Rational> {
        let beats = self.beats(bar)?;
        beats_to_seconds(bar, &beats, tempo)
    }

    fn validate(&self, bar: u32) -> ChartTimeResult<()> {
        if self.numerator == 0 || self.denominator == 0 {
            log::warn!("bar {} has malformed time signature {}", bar, self);
            return Err(ChartTimeError::MalformedMeter {
                bar,
                reason: format!(
                    "time signature {} should have positive parts",
                    self
                ),
            });
        }
        Ok(())
    }
}
impl From<(u32, u32)> for TimeSignature {
    fn from(value: (u32, u32)) -> Self {
        Self::new(value.0, value.1)
    }
}
impl std::fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Validate float tempo of the bar and turn it into [Rational].
pub fn tempo_at(bar: u32, bpm: f64, ceiling: u64) -> ChartTimeResult<Rational> {
    if !bpm.is_finite() || bpm <= 0.0 {
        log::warn!("bar {} has malformed tempo {}", bar, bpm);
        return Err(ChartTimeError::MalformedMeter {
            bar,
            reason: format!("tempo {} should be positive and finite", bpm),
        });
    }
    let tempo = approximate_with_ceiling(bpm, ceiling)?;
    if !tempo.is_positive() {
        return Err(ChartTimeError::MalformedMeter {
            bar,
            reason: format!("tempo {} approximates to {}", bpm, tempo),
        });
    }
    Ok(tempo)
}

/// `beats * 60 / tempo`.
pub(crate) fn beats_to_seconds(
    bar: u32,
    beats: &Rational,
    tempo: &Rational,
) -> ChartTimeResult<Rational> {
    (beats * &Rational::from_integer(60))
        .checked_div(tempo)
        .map_err(|_| ChartTimeError::MalformedMeter {
            bar,
            reason: "tempo is zero".to_string(),
        })
}

/// `seconds * tempo / 60`.
pub(crate) fn seconds_to_beats(
    seconds: &Rational,
    tempo: &Rational,
) -> ChartTimeResult<Rational> {
    (seconds * tempo).checked_div(&Rational::from_integer(60))
}

#[cfg(test)]
mod tests {
    use super::{tempo_at, TimeSignature};
    use crate::{error::ChartTimeError, primitives::Rational};

    fn q(n: i64, d: i64) -> Rational {
        Rational::new(n, d).unwrap()
    }

    #[test]
    fn beats() {
        assert_eq!(TimeSignature::new(4, 4).beats(1).unwrap(), q(4, 1));
        assert_eq!(TimeSignature::new(3, 8).beats(1).unwrap(), q(3, 2));
        assert_eq!(TimeSignature::new(7, 8).beats(1).unwrap(), q(7, 2));
        assert_eq!(TimeSignature::new(5, 16).beats(1).unwrap(), q(5, 4));
        assert!(matches!(
            TimeSignature::new(0, 4).beats(7),
            Err(ChartTimeError::MalformedMeter { bar: 7, .. })
        ));
        assert!(matches!(
            TimeSignature::new(4, 0).beats(2),
            Err(ChartTimeError::MalformedMeter { bar: 2, .. })
        ));
    }

    #[test]
    fn seconds() {
        let tempo = q(120, 1);
        let seconds = |n, d| TimeSignature::new(n, d).seconds(1, &tempo);
        assert_eq!(seconds(4, 4).unwrap(), q(2, 1));
        assert_eq!(seconds(3, 8).unwrap(), q(3, 4));
        assert_eq!(
            TimeSignature::new(4, 4).seconds(1, &q(90, 1)).unwrap(),
            q(8, 3)
        );
    }

    #[test]
    fn tempo() {
        assert_eq!(tempo_at(1, 120.0, 100).unwrap(), q(120, 1));
        assert_eq!(tempo_at(1, 97.5, 100).unwrap(), q(195, 2));
        for bpm in [0.0, -120.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                tempo_at(3, bpm, 100),
                Err(ChartTimeError::MalformedMeter { bar: 3, .. })
            ));
        }
        // Positive but rounds to zero with a coarse ceiling.
        assert!(matches!(
            tempo_at(4, 0.001, 10),
            Err(ChartTimeError::MalformedMeter { bar: 4, .. })
        ));
    }
}
