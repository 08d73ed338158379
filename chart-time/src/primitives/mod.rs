//! Values everything else is built from.
//!
//! [Rational] carries all the arithmetic. Tempo enters it only through
//! [approximate()]. [TimeSignature] and [BarPosition] describe the chart,
//! and [BarStartTable] turns a time signature (and tempo) oracle into
//! the offsets of barlines.

pub mod approximate;
pub mod int_tools;
pub mod position;
pub mod rational;
pub mod time_map;
pub mod time_signature;

pub use approximate::{approximate, approximate_with_ceiling};
pub use position::BarPosition;
pub use rational::Rational;
pub use time_map::{BarStartTable, Domain};
pub use time_signature::{tempo_at, TimeSignature};
pub(crate) use time_signature::{beats_to_seconds, seconds_to_beats};
