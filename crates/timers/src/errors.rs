use crate::Tick;

#[derive(Debug, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ClockError {
    #[error("Must specify {0}")]
    MissingField(&'static str),

    #[error("Got invalid fixed step duration {0}")]
    InvalidStepDuration(f64),

    #[error("Got invalid interpolation fraction {0}, which must be in [0, 1)")]
    InvalidInterpolationFraction(f64),

    #[error("Authoritative tick {authoritative} is ahead of predicted tick {predicted}")]
    AuthorityAhead { authoritative: Tick, predicted: Tick },

    #[error("Authoritative tick {requested} would move backwards from {current}")]
    AuthorityRegressed { requested: Tick, current: Tick },
}

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum WireError {
    #[error("Needed {needed} bytes to decode a timer but only {available} were available")]
    NotEnoughData { needed: usize, available: usize },

    #[error("Got {0} for a boolean field, which must be 0 or 1")]
    InvalidBool(u8),
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("Clock error: {}", _0)]
    Clock(#[from] ClockError),

    #[error("Wire error: {}", _0)]
    Wire(#[from] WireError),
}
