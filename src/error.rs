//! Error types for rotscreen
//!
//! Only argument mistakes and a missing display are errors. A display whose
//! mode can't be read, or a commit the OS refuses, is reported as a
//! [`RotateOutcome`](crate::rotator::RotateOutcome) instead.

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid display ordinal {0}: ordinal must be >= 1")]
    InvalidArgument(u32),

    #[error("Display {0} not found: ordinal exceeds number of connected displays")]
    DisplayNotFound(u32),

    #[error("Invalid degree of rotation, multiples of 90 degrees only, got {0}")]
    InvalidDegrees(isize),

    #[error("Unknown orientation {0:?}")]
    InvalidOrientation(String),

    #[error("No display backend available for this platform")]
    UnsupportedPlatform,

    #[error("Unable to encode output")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
