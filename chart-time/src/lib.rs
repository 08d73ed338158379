//! Exact conversion between chart bar positions and linear offsets
//! (quarter-note beats or seconds), for charts with per-bar time
//! signature and tempo.

pub mod convert;
pub mod error;
pub mod primitives;
pub mod pseudo_long;
pub mod reduce;
pub mod settings;

pub use convert::{
    accumulate, accumulate_time, accumulate_time_with, accumulate_with,
    distribute, distribute_time, distribute_time_with, distribute_with, shift,
    shift_all, shift_with,
};
pub use error::{ChartTimeError, ChartTimeResult};
pub use pseudo_long::{pseudo_long_steps, pseudo_long_steps_all, PseudoLongStep};
pub use reduce::{reduce_pairs, reduce_to_common_denominator};
pub use settings::Settings;
