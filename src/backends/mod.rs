use serde::Serialize;

use crate::display::{DisplayDevice, DisplayMode};
use crate::error::Result;

/// How a committed mode is handed to the OS.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CommitMode {
    /// Apply and write to the persistent display configuration store.
    Persist,
    /// Only ask whether the mode would be accepted.
    Test,
}

/// Result code of a display settings change.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum CommitStatus {
    Successful,
    /// Accepted, but only takes effect after a restart.
    Restart,
    Failed,
    BadMode,
    NotUpdated,
    BadFlags,
    BadParam,
    BadDualView,
    Unknown(i32),
}

impl CommitStatus {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Successful,
            1 => Self::Restart,
            -1 => Self::Failed,
            -2 => Self::BadMode,
            -3 => Self::NotUpdated,
            -4 => Self::BadFlags,
            -5 => Self::BadParam,
            -6 => Self::BadDualView,
            other => Self::Unknown(other),
        }
    }

    pub fn is_success(&self) -> bool {
        *self == Self::Successful
    }
}

pub trait DisplayBackend {
    /// Device at a zero-based enumeration index, or `None` past the end of the list.
    fn display_device(&mut self, index: u32) -> Option<DisplayDevice>;

    /// Currently active mode of the device, if it has one.
    fn current_mode(&mut self, device: &DisplayDevice) -> Option<DisplayMode>;

    /// Hand a modified mode back to the OS as the device's active mode.
    fn commit_mode(
        &mut self,
        device: &DisplayDevice,
        mode: &DisplayMode,
        commit: CommitMode,
    ) -> CommitStatus;
}

impl<B: DisplayBackend + ?Sized> DisplayBackend for Box<B> {
    fn display_device(&mut self, index: u32) -> Option<DisplayDevice> {
        (**self).display_device(index)
    }

    fn current_mode(&mut self, device: &DisplayDevice) -> Option<DisplayMode> {
        (**self).current_mode(device)
    }

    fn commit_mode(
        &mut self,
        device: &DisplayDevice,
        mode: &DisplayMode,
        commit: CommitMode,
    ) -> CommitStatus {
        (**self).commit_mode(device, mode, commit)
    }
}

/// The backend talking to this platform's display configuration API.
#[cfg(windows)]
pub fn platform_backend() -> Result<Box<dyn DisplayBackend>> {
    Ok(Box::new(win32::Win32Backend::new()))
}

#[cfg(not(windows))]
pub fn platform_backend() -> Result<Box<dyn DisplayBackend>> {
    Err(crate::error::Error::UnsupportedPlatform)
}

pub mod dummy;
#[cfg(windows)]
pub mod win32;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_commit_status() -> Result<()> {
        assert_eq!(CommitStatus::from_code(0), CommitStatus::Successful);
        assert_eq!(CommitStatus::from_code(1), CommitStatus::Restart);
        assert_eq!(CommitStatus::from_code(-2), CommitStatus::BadMode);
        assert_eq!(CommitStatus::from_code(-6), CommitStatus::BadDualView);
        assert_eq!(CommitStatus::from_code(7), CommitStatus::Unknown(7));

        assert!(CommitStatus::Successful.is_success());
        assert!(!CommitStatus::Restart.is_success());
        Ok(())
    }

    #[cfg(not(windows))]
    #[test]
    fn no_backend_off_windows() -> Result<()> {
        assert!(matches!(
            platform_backend(),
            Err(crate::error::Error::UnsupportedPlatform)
        ));
        Ok(())
    }
}
