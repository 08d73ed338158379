#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChartTimeError {
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Malformed meter at bar {bar}: {reason}")]
    MalformedMeter { bar: u32, reason: String },
    #[error(
        "Requested {requested} lies beyond the bar start table \
        (bound: {bound}). Rebuild the table with a larger bound."
    )]
    BoundExceeded { requested: String, bound: u32 },
    #[error("Offset {0} lies before the start of bar 1")]
    OffsetBeforeStart(String),
    #[error("Can not approximate non-finite value: {0}")]
    NotFinite(f64),
    #[error("Can not parse rational from `{0}`")]
    ParseRational(String),
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}
pub type ChartTimeResult<T> = Result<T, ChartTimeError>;
