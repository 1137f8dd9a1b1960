//! Display devices and their modes, as seen by the rotator.

use serde::Serialize;

use crate::orientation::DisplayOrientation;

pub(crate) const ATTACHED_TO_DESKTOP: u32 = 0x0000_0001;
const PRIMARY_DEVICE: u32 = 0x0000_0004;
const MIRRORING_DRIVER: u32 = 0x0000_0008;
const REMOVABLE: u32 = 0x0000_0020;
const DISCONNECT: u32 = 0x0200_0000;

/// One display adapter output, found at a zero-based enumeration index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DisplayDevice {
    pub index: u32,
    /// OS handle name, e.g. `\\.\DISPLAY1`. Not meant for users.
    pub name: String,
    pub description: String,
    pub state_flags: u32,
}

impl DisplayDevice {
    /// 1-based ordinal callers use to address this device.
    pub fn ordinal(&self) -> u32 {
        self.index + 1
    }

    pub fn is_attached(&self) -> bool {
        self.state_flags & ATTACHED_TO_DESKTOP != 0
    }

    pub fn is_primary(&self) -> bool {
        self.state_flags & PRIMARY_DEVICE != 0
    }

    pub fn is_mirroring(&self) -> bool {
        self.state_flags & MIRRORING_DRIVER != 0
    }

    pub fn is_removable(&self) -> bool {
        self.state_flags & REMOVABLE != 0
    }

    pub fn is_disconnected(&self) -> bool {
        self.state_flags & DISCONNECT != 0
    }
}

/// Active mode of a device.
///
/// Only the fields rotation touches are decoded. `raw` carries the backend's
/// native mode record and goes back to the OS untouched apart from them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DisplayMode {
    pub device_name: String,
    pub width: u32,
    pub height: u32,
    pub orientation_code: u32,
    #[serde(skip)]
    pub raw: Vec<u8>,
}

impl DisplayMode {
    pub fn orientation(&self) -> Option<DisplayOrientation> {
        DisplayOrientation::from_os_code(self.orientation_code)
    }

    /// Point the mode at `orientation`, swapping width and height first when
    /// the change crosses between portrait and landscape.
    pub fn reorient(&mut self, orientation: DisplayOrientation) {
        if orientation.needs_swap(self.orientation_code) {
            std::mem::swap(&mut self.width, &mut self.height);
        }
        self.orientation_code = orientation.os_code();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;

    fn mode(width: u32, height: u32, orientation: DisplayOrientation) -> DisplayMode {
        DisplayMode {
            device_name: "\\\\.\\DISPLAY1".into(),
            width,
            height,
            orientation_code: orientation.os_code(),
            raw: vec![0xde, 0xad, 0xbe, 0xef],
        }
    }

    #[test]
    fn landscape_to_portrait_swaps() -> Result<()> {
        let mut m = mode(1920, 1080, DisplayOrientation::Cw0);
        m.reorient(DisplayOrientation::Cw90);
        assert_eq!((m.width, m.height, m.orientation_code), (1080, 1920, 3));
        assert_eq!(m.raw, vec![0xde, 0xad, 0xbe, 0xef]);
        Ok(())
    }

    #[test]
    fn portrait_to_portrait_keeps_dimensions() -> Result<()> {
        let mut m = mode(1080, 1920, DisplayOrientation::Cw90);
        m.reorient(DisplayOrientation::Cw270);
        assert_eq!((m.width, m.height, m.orientation_code), (1080, 1920, 1));
        assert_eq!(m.orientation(), Some(DisplayOrientation::Cw270));
        Ok(())
    }

    #[test]
    fn parity_twin_round_trips_dimensions() -> Result<()> {
        for start in DisplayOrientation::ALL {
            for there in DisplayOrientation::ALL {
                let original = mode(2560, 1440, start);
                let mut m = original.clone();
                m.reorient(there);
                m.reorient(start);
                assert_eq!(m, original, "{} -> {} -> {}", start, there, start);
            }
        }
        Ok(())
    }

    #[test]
    fn reorient_is_idempotent() -> Result<()> {
        for orientation in DisplayOrientation::ALL {
            let mut once = mode(1920, 1080, DisplayOrientation::Cw180);
            once.reorient(orientation);
            let mut twice = once.clone();
            twice.reorient(orientation);
            assert_eq!(once, twice);
        }
        Ok(())
    }

    #[test]
    fn state_flags() -> Result<()> {
        let device = DisplayDevice {
            index: 0,
            name: "\\\\.\\DISPLAY1".into(),
            description: "Generic adapter".into(),
            state_flags: ATTACHED_TO_DESKTOP | PRIMARY_DEVICE,
        };
        assert_eq!(device.ordinal(), 1);
        assert!(device.is_attached());
        assert!(device.is_primary());
        assert!(!device.is_mirroring());
        assert!(!device.is_removable());
        assert!(!device.is_disconnected());
        Ok(())
    }
}
