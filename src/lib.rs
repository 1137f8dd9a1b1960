//! Rotate displays through the OS display configuration API.
//!
//! [`DisplayRotator`] addresses displays by 1-based ordinal and talks to the OS
//! through a [`DisplayBackend`](backends::DisplayBackend).

pub mod backends;
pub mod config;
pub mod display;
pub mod error;
pub mod orientation;
pub mod rotator;

pub use config::RotatorConfig;
pub use display::{DisplayDevice, DisplayMode};
pub use error::{Error, Result};
pub use orientation::DisplayOrientation;
pub use rotator::{DisplayRotator, DisplayStatus, RotateOutcome};
