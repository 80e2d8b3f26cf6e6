/// Errors produced by the core image and numeric primitives.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("not-a-number encountered in nearest-value search")]
    NotANumber,

    #[error("nearest-value search needs at least one candidate")]
    EmptyCandidates,

    #[error("rotation must be a non-negative multiple of 90 degrees (got {degrees})")]
    InvalidRotation { degrees: i32 },

    #[error("invalid gray grid (expected {expected} samples, got {got})")]
    InvalidGrid { expected: usize, got: usize },

    #[error("moving average needs {needed} samples after offset {offset}, got {len}")]
    MovingAverageTooShort {
        len: usize,
        offset: usize,
        needed: usize,
    },

    #[error("invalid {what}: {value}")]
    InvalidParameter { what: &'static str, value: usize },
}
