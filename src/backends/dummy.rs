//! Dummy backend.
//!
//! This is purely for testing or debugging.
//! It keeps displays in memory and logs changes.

use super::{CommitMode, CommitStatus, DisplayBackend};
use crate::display::{DisplayDevice, DisplayMode, ATTACHED_TO_DESKTOP};
use crate::orientation::DisplayOrientation;

#[derive(Clone, Debug)]
pub struct Commit {
    pub index: u32,
    pub mode: DisplayMode,
    pub commit: CommitMode,
    pub status: CommitStatus,
}

#[derive(Default)]
pub struct DummyBackend {
    displays: Vec<(DisplayDevice, Option<DisplayMode>)>,
    commit_status: Option<CommitStatus>,
    endless: bool,
    lookups: Vec<u32>,
    commits: Vec<Commit>,
}

impl DummyBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a display with the given raster, stored as the OS would for `orientation`.
    pub fn with_display(mut self, width: u32, height: u32, orientation: DisplayOrientation) -> Self {
        let device = self.next_device();
        let mode = dummy_mode(&device, width, height, orientation.os_code());
        self.displays.push((device, Some(mode)));
        self
    }

    /// Add a display that enumerates but has no readable active mode.
    pub fn with_inactive_display(mut self) -> Self {
        let device = self.next_device();
        self.displays.push((device, None));
        self
    }

    /// Answer every commit with `status` instead of accepting it.
    pub fn with_commit_status(mut self, status: CommitStatus) -> Self {
        self.commit_status = Some(status);
        self
    }

    /// Report a device at every index, past the configured ones too.
    pub fn endless(mut self) -> Self {
        self.endless = true;
        self
    }

    /// Current mode of the display at 1-based `ordinal`.
    pub fn mode(&self, ordinal: u32) -> Option<&DisplayMode> {
        let index = ordinal.checked_sub(1)? as usize;
        self.displays.get(index)?.1.as_ref()
    }

    /// Every index the rotator asked about, in order.
    pub fn lookups(&self) -> &[u32] {
        &self.lookups
    }

    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    fn next_device(&self) -> DisplayDevice {
        dummy_device(self.displays.len() as u32)
    }
}

impl DisplayBackend for DummyBackend {
    fn display_device(&mut self, index: u32) -> Option<DisplayDevice> {
        self.lookups.push(index);
        if let Some((device, _)) = self.displays.get(index as usize) {
            return Some(device.clone());
        }
        if !self.endless {
            return None;
        }

        Some(dummy_device(index))
    }

    fn current_mode(&mut self, device: &DisplayDevice) -> Option<DisplayMode> {
        match self.displays.get(device.index as usize) {
            Some((_, mode)) => mode.clone(),
            None => Some(dummy_mode(device, 1920, 1080, 0)),
        }
    }

    fn commit_mode(
        &mut self,
        device: &DisplayDevice,
        mode: &DisplayMode,
        commit: CommitMode,
    ) -> CommitStatus {
        let status = self.commit_status.unwrap_or(CommitStatus::Successful);
        log::info!(
            "dummy: {:?} commit of {} {}x{} code {} -> {:?}",
            commit,
            device.name,
            mode.width,
            mode.height,
            mode.orientation_code,
            status
        );

        self.commits.push(Commit {
            index: device.index,
            mode: mode.clone(),
            commit,
            status,
        });

        if status.is_success() && commit == CommitMode::Persist {
            if let Some((_, stored)) = self.displays.get_mut(device.index as usize) {
                *stored = Some(mode.clone());
            }
        }
        status
    }
}

fn dummy_device(index: u32) -> DisplayDevice {
    DisplayDevice {
        index,
        name: format!("\\\\.\\DISPLAY{}", index + 1),
        description: "Dummy display adapter".into(),
        state_flags: ATTACHED_TO_DESKTOP,
    }
}

fn dummy_mode(device: &DisplayDevice, width: u32, height: u32, orientation_code: u32) -> DisplayMode {
    DisplayMode {
        device_name: device.name.clone(),
        width,
        height,
        orientation_code,
        // Stand-in for refresh rate, color depth and the rest.
        raw: vec![60, 0, 0, 0, 32, 0, 0, 0],
    }
}
