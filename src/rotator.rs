//! # Rotator
//!
//! Every operation walks enumerate → read mode → reorient → commit against the
//! backend. Nothing is cached between calls since displays come and go.

use std::iter::FusedIterator;

use serde::Serialize;

use crate::backends::{CommitMode, CommitStatus, DisplayBackend};
use crate::config::RotatorConfig;
use crate::display::{DisplayDevice, DisplayMode};
use crate::error::{Error, Result};
use crate::orientation::DisplayOrientation;

/// What happened to a display that was found.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum RotateOutcome {
    Committed,
    /// The device enumerates but has no active mode, e.g. it is not attached.
    ModeUnreadable,
    CommitRejected(CommitStatus),
}

impl RotateOutcome {
    pub fn is_success(&self) -> bool {
        *self == Self::Committed
    }
}

/// A display as found by [`DisplayRotator::displays`].
#[derive(Clone, Debug, Serialize)]
pub struct DisplayStatus {
    pub ordinal: u32,
    pub device: DisplayDevice,
    pub mode: Option<DisplayMode>,
}

pub struct DisplayRotator<B> {
    backend: B,
    config: RotatorConfig,
}

impl<B: DisplayBackend> DisplayRotator<B> {
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, RotatorConfig::default())
    }

    pub fn with_config(backend: B, config: RotatorConfig) -> Self {
        DisplayRotator { backend, config }
    }

    pub fn config(&self) -> &RotatorConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Rotate the display at 1-based `display_index`.
    ///
    /// `Ok(true)` only when the OS accepted the new mode. An unreadable mode or
    /// a rejected commit is `Ok(false)`; a zero ordinal or a display that isn't
    /// there is an error.
    pub fn rotate(&mut self, display_index: u32, orientation: DisplayOrientation) -> Result<bool> {
        self.rotate_outcome(display_index, orientation)
            .map(|outcome| outcome.is_success())
    }

    /// Same as [`rotate`](Self::rotate), keeping the reason for a failure.
    pub fn rotate_outcome(
        &mut self,
        display_index: u32,
        orientation: DisplayOrientation,
    ) -> Result<RotateOutcome> {
        if display_index == 0 {
            return Err(Error::InvalidArgument(display_index));
        }

        let device = self
            .backend
            .display_device(display_index - 1)
            .ok_or(Error::DisplayNotFound(display_index))?;

        let Some(mut mode) = self.backend.current_mode(&device) else {
            log::warn!("display {display_index} ({}) has no readable mode", device.name);
            return Ok(RotateOutcome::ModeUnreadable);
        };

        log::debug!(
            "display {display_index} at {}x{} code {}, rotating to {orientation}",
            mode.width,
            mode.height,
            mode.orientation_code
        );
        mode.reorient(orientation);

        let commit = if self.config.dry_run {
            CommitMode::Test
        } else {
            CommitMode::Persist
        };
        let status = self.backend.commit_mode(&device, &mode, commit);
        if !status.is_success() {
            log::warn!("display {display_index} rejected {orientation}: {status:?}");
            return Ok(RotateOutcome::CommitRejected(status));
        }

        log::info!(
            "display {display_index} rotated to {orientation} ({}x{})",
            mode.width,
            mode.height
        );
        Ok(RotateOutcome::Committed)
    }

    /// Best-effort reset of every enumerable display to 0°.
    pub fn reset_all(&mut self) -> Result<()> {
        for result in self.sweep(DisplayOrientation::Cw0) {
            let (ordinal, outcome) = result?;
            if !outcome.is_success() {
                log::warn!("display {ordinal} was not reset: {outcome:?}");
            }
        }
        Ok(())
    }

    /// Rotate displays 1, 2, 3, … to `orientation` one at a time as the
    /// iterator is advanced. Ends at the first missing display or after
    /// `max_displays` ordinals.
    pub fn sweep(&mut self, orientation: DisplayOrientation) -> Sweep<'_, B> {
        Sweep {
            rotator: self,
            orientation,
            attempted: 0,
            done: false,
        }
    }

    /// Every enumerable display with its current mode.
    pub fn displays(&mut self) -> Vec<DisplayStatus> {
        let mut displays = Vec::new();
        for index in 0..self.config.max_displays {
            let Some(device) = self.backend.display_device(index) else {
                break;
            };
            let mode = self.backend.current_mode(&device);
            displays.push(DisplayStatus {
                ordinal: device.ordinal(),
                device,
                mode,
            });
        }
        displays
    }
}

pub struct Sweep<'a, B> {
    rotator: &'a mut DisplayRotator<B>,
    orientation: DisplayOrientation,
    attempted: u32,
    done: bool,
}

impl<B: DisplayBackend> Iterator for Sweep<'_, B> {
    type Item = Result<(u32, RotateOutcome)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.attempted >= self.rotator.config.max_displays {
            return None;
        }

        self.attempted += 1;
        let ordinal = self.attempted;
        match self.rotator.rotate_outcome(ordinal, self.orientation) {
            Ok(outcome) => Some(Ok((ordinal, outcome))),
            Err(Error::DisplayNotFound(_)) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl<B: DisplayBackend> FusedIterator for Sweep<'_, B> {}
