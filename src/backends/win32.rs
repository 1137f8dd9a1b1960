use std::{
    ffi::{CStr, CString},
    mem::{size_of, zeroed},
    ptr::{null, read_unaligned},
    slice,
};

use windows_sys::Win32::Graphics::Gdi::{
    ChangeDisplaySettingsExA, EnumDisplayDevicesA, EnumDisplaySettingsA, CDS_TEST,
    CDS_UPDATEREGISTRY, DEVMODEA, DISPLAY_DEVICEA, ENUM_CURRENT_SETTINGS,
};

use super::{CommitMode, CommitStatus, DisplayBackend};
use crate::display::{DisplayDevice, DisplayMode};

/// GDI display settings API. Holds no state; every call asks the OS again.
#[derive(Default)]
pub struct Win32Backend;

impl Win32Backend {
    pub fn new() -> Self {
        Win32Backend
    }
}

impl DisplayBackend for Win32Backend {
    fn display_device(&mut self, index: u32) -> Option<DisplayDevice> {
        let mut display_device = DISPLAY_DEVICEA {
            cb: size_of::<DISPLAY_DEVICEA>() as _,

            // SAFETY: structure can be zeroed because it will be filled correctly
            // by `EnumDisplayDevicesA`.
            ..unsafe { zeroed() }
        };

        // SAFETY: `EnumDisplayDevicesA` is safe when `lpdisplaydevice` is
        // valid structure pointer with initialized `cb` field.
        let status = unsafe { EnumDisplayDevicesA(null(), index, &mut display_device, 0) };

        if status == 0 {
            log::debug!("EnumDisplayDevicesA found no device at index {index}");
            return None;
        }

        Some(DisplayDevice {
            index,
            name: string_from_chars(&display_device.DeviceName),
            description: string_from_chars(&display_device.DeviceString),
            state_flags: display_device.StateFlags,
        })
    }

    fn current_mode(&mut self, device: &DisplayDevice) -> Option<DisplayMode> {
        let device_name = CString::new(device.name.as_str()).ok()?;

        let mut display_mode = DEVMODEA {
            dmSize: size_of::<DEVMODEA>() as _,

            // SAFETY: structure can be zeroed because it will be filled correctly
            // by `EnumDisplaySettingsA`.
            ..unsafe { zeroed() }
        };

        // SAFETY: `EnumDisplaySettingsA` is safe when `lpszdevicename` is valid
        // pointer to nul-terminated string and `lpdevmode` is valid structure pointer.
        let status = unsafe {
            EnumDisplaySettingsA(
                device_name.as_ptr().cast(),
                ENUM_CURRENT_SETTINGS,
                &mut display_mode,
            )
        };

        if status == 0 {
            log::debug!("EnumDisplaySettingsA returns {status} for {}", device.name);
            return None;
        }

        // SAFETY: display adapters fill the display variant of the union.
        let orientation_code = unsafe { display_mode.Anonymous1.Anonymous2.dmDisplayOrientation };

        Some(DisplayMode {
            device_name: device.name.clone(),
            width: display_mode.dmPelsWidth,
            height: display_mode.dmPelsHeight,
            orientation_code,
            raw: devmode_to_bytes(&display_mode),
        })
    }

    fn commit_mode(
        &mut self,
        device: &DisplayDevice,
        mode: &DisplayMode,
        commit: CommitMode,
    ) -> CommitStatus {
        let Some(mut display_mode) = devmode_from_bytes(&mode.raw) else {
            log::warn!("mode for {} does not carry a DEVMODEA record", device.name);
            return CommitStatus::BadParam;
        };
        let Ok(device_name) = CString::new(device.name.as_str()) else {
            return CommitStatus::BadParam;
        };

        display_mode.dmPelsWidth = mode.width;
        display_mode.dmPelsHeight = mode.height;
        display_mode.Anonymous1.Anonymous2.dmDisplayOrientation = mode.orientation_code;

        let flags = match commit {
            CommitMode::Persist => CDS_UPDATEREGISTRY,
            CommitMode::Test => CDS_TEST,
        };

        // SAFETY: `ChangeDisplaySettingsExA` is safe when `lpszdevicename` is valid
        // pointer to nul-terminated string and `lpdevmode` is valid structure pointer.
        let status = unsafe {
            ChangeDisplaySettingsExA(
                device_name.as_ptr().cast(),
                &display_mode,
                0,
                flags,
                null(),
            )
        };

        log::debug!("ChangeDisplaySettingsExA returns {status} for {}", device.name);
        CommitStatus::from_code(status)
    }
}

fn string_from_chars(chars: &[u8]) -> String {
    match CStr::from_bytes_until_nul(chars) {
        Ok(s) => s.to_string_lossy().into_owned(),
        Err(_) => String::from_utf8_lossy(chars).into_owned(),
    }
}

fn devmode_to_bytes(display_mode: &DEVMODEA) -> Vec<u8> {
    // SAFETY: `DEVMODEA` is plain data that started out zeroed, so every byte
    // of it is initialized.
    let bytes = unsafe {
        slice::from_raw_parts(
            (display_mode as *const DEVMODEA).cast::<u8>(),
            size_of::<DEVMODEA>(),
        )
    };
    bytes.to_vec()
}

fn devmode_from_bytes(raw: &[u8]) -> Option<DEVMODEA> {
    if raw.len() != size_of::<DEVMODEA>() {
        return None;
    }

    // SAFETY: length is checked above and any bit pattern is a valid `DEVMODEA`.
    // The buffer has no alignment guarantee, hence the unaligned read.
    Some(unsafe { read_unaligned(raw.as_ptr().cast::<DEVMODEA>()) })
}
