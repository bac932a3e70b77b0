use thiserror::Error;

/// Configuration errors. The follower itself never fails once built.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChaosError {
    #[error("smoothing factor must be within [0, 1], got {0}")]
    InvalidFactor(f32),
    #[error("time constant must be a non-negative number of seconds, got {0}")]
    InvalidTimeConstant(f32),
    #[error("unknown preset `{0}`")]
    UnknownPreset(String),
    #[error("trail needs at least one link")]
    EmptyTrail,
    #[error("scatter bounds must have positive width and height")]
    EmptyBounds,
    #[error("bounds must be finite")]
    UnboundedBounds,
}

pub type Result<T> = std::result::Result<T, ChaosError>;
