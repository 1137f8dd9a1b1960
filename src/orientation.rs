//! # Orientation
//!
//! The OS numbers its orientations counter-clockwise (90° clockwise is code 3,
//! 270° clockwise is code 1), so the code never follows degree order.
//! Swap parity is always computed on codes, never on degrees.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayOrientation {
    /// Zero degree rotation; the default landscape orientation.
    Cw0,
    /// 90 degree clockwise rotation; screen "up" will be on the right.
    Cw90,
    /// 180 degree rotation; screen will be flipped.
    Cw180,
    /// 270 degree clockwise rotation; screen "up" will be on the left side.
    Cw270,
}

impl DisplayOrientation {
    pub const ALL: [DisplayOrientation; 4] = [Self::Cw0, Self::Cw90, Self::Cw180, Self::Cw270];

    /// Position in the OS rotation sequence. Identical to the orientation
    /// code written into the display mode.
    pub fn ordinal(&self) -> u32 {
        match *self {
            Self::Cw0 => 0,
            Self::Cw270 => 1,
            Self::Cw180 => 2,
            Self::Cw90 => 3,
        }
    }

    pub fn os_code(&self) -> u32 {
        self.ordinal()
    }

    /// Inverse of [`os_code`](Self::os_code). Codes outside 0..=3 are not
    /// orientations.
    pub fn from_os_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::Cw0),
            1 => Some(Self::Cw270),
            2 => Some(Self::Cw180),
            3 => Some(Self::Cw90),
            _ => None,
        }
    }

    /// Convert to clockwise degrees.
    pub fn to_degrees(&self) -> isize {
        match *self {
            Self::Cw0 => 0,
            Self::Cw90 => 90,
            Self::Cw180 => 180,
            Self::Cw270 => 270,
        }
    }

    /// Attempt conversion from degrees to orientation.
    /// Positive value is clockwise, negative is counter clockwise.
    pub fn from_degrees(cw_degrees: isize) -> Result<Self> {
        match cw_degrees % 360 {
            0 => Ok(Self::Cw0),
            90 | -270 => Ok(Self::Cw90),
            180 | -180 => Ok(Self::Cw180),
            270 | -90 => Ok(Self::Cw270),
            other => Err(Error::InvalidDegrees(other)),
        }
    }

    /// Whether moving a mode stored with `current_code` to this orientation
    /// turns portrait into landscape or back.
    pub fn needs_swap(&self, current_code: u32) -> bool {
        current_code.wrapping_add(self.ordinal()) % 2 == 1
    }
}

impl fmt::Display for DisplayOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.to_degrees())
    }
}

impl FromStr for DisplayOrientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_ascii_lowercase();
        match lowered.as_str() {
            "normal" | "default" => return Ok(Self::Cw0),
            "right" => return Ok(Self::Cw90),
            "inverted" => return Ok(Self::Cw180),
            "left" => return Ok(Self::Cw270),
            _ => {}
        }

        let degrees = lowered.trim_end_matches('°');
        let degrees = degrees.strip_prefix("cw").unwrap_or(degrees);
        match degrees.parse::<isize>() {
            Ok(degrees) => Self::from_degrees(degrees),
            Err(_) => Err(Error::InvalidOrientation(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_to_os_code() -> Result<()> {
        assert_eq!(DisplayOrientation::Cw0.os_code(), 0);
        assert_eq!(DisplayOrientation::Cw90.os_code(), 3);
        assert_eq!(DisplayOrientation::Cw180.os_code(), 2);
        assert_eq!(DisplayOrientation::Cw270.os_code(), 1);

        for orientation in DisplayOrientation::ALL {
            assert_eq!(
                DisplayOrientation::from_os_code(orientation.os_code()),
                Some(orientation)
            );
        }
        assert_eq!(DisplayOrientation::from_os_code(4), None);
        Ok(())
    }

    #[test]
    fn degrees_to_orientation() -> Result<()> {
        // Clockwise degrees.
        assert_eq!(DisplayOrientation::from_degrees(0)?, DisplayOrientation::Cw0);
        assert_eq!(DisplayOrientation::from_degrees(90)?, DisplayOrientation::Cw90);
        assert_eq!(DisplayOrientation::from_degrees(180)?, DisplayOrientation::Cw180);
        assert_eq!(DisplayOrientation::from_degrees(270)?, DisplayOrientation::Cw270);
        assert_eq!(DisplayOrientation::from_degrees(360)?, DisplayOrientation::Cw0);

        // Counter-clockwise degrees.
        assert_eq!(DisplayOrientation::from_degrees(-90)?, DisplayOrientation::Cw270);
        assert_eq!(DisplayOrientation::from_degrees(-270)?, DisplayOrientation::Cw90);

        // Test the modulo.
        assert_eq!(DisplayOrientation::from_degrees(810)?, DisplayOrientation::Cw90);

        assert!(matches!(
            DisplayOrientation::from_degrees(42),
            Err(Error::InvalidDegrees(42))
        ));
        Ok(())
    }

    #[test]
    fn parse_orientation() -> Result<()> {
        assert_eq!("90".parse::<DisplayOrientation>()?, DisplayOrientation::Cw90);
        assert_eq!("270°".parse::<DisplayOrientation>()?, DisplayOrientation::Cw270);
        assert_eq!("cw180".parse::<DisplayOrientation>()?, DisplayOrientation::Cw180);
        assert_eq!("-90".parse::<DisplayOrientation>()?, DisplayOrientation::Cw270);
        assert_eq!(" Normal ".parse::<DisplayOrientation>()?, DisplayOrientation::Cw0);
        assert_eq!("left".parse::<DisplayOrientation>()?, DisplayOrientation::Cw270);
        assert_eq!("right".parse::<DisplayOrientation>()?, DisplayOrientation::Cw90);

        assert!(matches!(
            "sideways".parse::<DisplayOrientation>(),
            Err(Error::InvalidOrientation(_))
        ));
        assert!(matches!(
            "45".parse::<DisplayOrientation>(),
            Err(Error::InvalidDegrees(45))
        ));
        Ok(())
    }

    #[test]
    fn swap_follows_code_parity() -> Result<()> {
        for current_code in 0..4 {
            for requested in DisplayOrientation::ALL {
                assert_eq!(
                    requested.needs_swap(current_code),
                    (current_code + requested.ordinal()) % 2 == 1
                );
            }
        }

        // Landscape to portrait.
        assert!(DisplayOrientation::Cw90.needs_swap(0));
        assert!(DisplayOrientation::Cw270.needs_swap(2));
        // Portrait to portrait.
        assert!(!DisplayOrientation::Cw270.needs_swap(3));
        // Landscape to landscape.
        assert!(!DisplayOrientation::Cw180.needs_swap(0));
        Ok(())
    }
}
