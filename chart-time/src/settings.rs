//! Tunables for table construction and tempo approximation.

use serde::{Deserialize, Serialize};

use crate::error::{ChartTimeError, ChartTimeResult};

/// 64th notes × triplets × tempo in thousandths of a BPM.
pub const DEFAULT_APPROXIMATION_CEILING: u64 = 64 * 3 * 1000;
/// Bar start tables are never built shorter than this.
pub const DEFAULT_MIN_TABLE_BOUND: u32 = 1000;
/// Extra bars built past the queried one.
pub const DEFAULT_HEADROOM: u32 = 100;

/// Conversion settings.
///
/// Every field is optional when deserialized; missing fields take their
/// defaults.
///
/// ```
/// use chart_time::Settings;
///
/// let settings = Settings::default().with_headroom(32);
/// assert_eq!(settings.headroom, 32);
/// assert_eq!(settings.min_table_bound, 1000);
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Largest denominator tried when turning a float tempo into a
    /// rational.
    pub approximation_ceiling: u64,
    pub min_table_bound: u32,
    pub headroom: u32,
}
impl Default for Settings {
    fn default() -> Self {
        Self {
            approximation_ceiling: DEFAULT_APPROXIMATION_CEILING,
            min_table_bound: DEFAULT_MIN_TABLE_BOUND,
            headroom: DEFAULT_HEADROOM,
        }
    }
}
impl Settings {
    pub fn with_approximation_ceiling(mut self, ceiling: u64) -> Self {
        self.approximation_ceiling = ceiling;
        self
    }
    pub fn with_min_table_bound(mut self, bound: u32) -> Self {
        self.min_table_bound = bound;
        self
    }
    pub fn with_headroom(mut self, headroom: u32) -> Self {
        self.headroom = headroom;
        self
    }

    pub fn validate(&self) -> ChartTimeResult<()> {
        if self.approximation_ceiling < 1 {
            return Err(ChartTimeError::InvalidSettings(
                "approximation ceiling should be at least 1".to_string(),
            ));
        }
        if self.headroom < 1 {
            return Err(ChartTimeError::InvalidSettings(
                "headroom should be at least 1 bar".to_string(),
            ));
        }
        Ok(())
    }

    /// Table bound for a query reaching `bar`:
    /// `max(bar, min_table_bound) + headroom`.
    pub fn bound_for_bar(&self, bar: u32) -> u32 {
        bar.max(self.min_table_bound).saturating_add(self.headroom)
    }
}
