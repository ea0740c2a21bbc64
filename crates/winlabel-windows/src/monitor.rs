use std::mem;

use windows::Win32::Foundation::{HWND, LPARAM, RECT};
use windows::Win32::Graphics::Gdi::{
    EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITOR_DEFAULTTONEAREST,
    MONITORINFOEXW, MonitorFromWindow,
};
use windows::core::BOOL;

/// A display monitor and its usable area.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Monitor {
    /// Raw `HMONITOR` value.
    pub handle: usize,
    /// GDI device name, e.g. `\\.\DISPLAY1`.
    pub device_name: String,
    /// Work area (excludes the taskbar) as `(x, y, width, height)`.
    pub work_area: (i32, i32, i32, i32),
    pub primary: bool,
}

/// Lists all monitors with the primary monitor first.
pub fn enumerate() -> Vec<Monitor> {
    let mut handles: Vec<HMONITOR> = Vec::new();

    // SAFETY: the callback only pushes into the Vec passed through
    // LPARAM, which outlives the call.
    unsafe {
        let _ = EnumDisplayMonitors(
            None,
            None,
            Some(enum_callback),
            LPARAM(&mut handles as *mut Vec<HMONITOR> as isize),
        );
    }

    let mut monitors: Vec<Monitor> = handles.into_iter().filter_map(describe).collect();
    // Stable sort keeps the OS order among secondary monitors.
    monitors.sort_by_key(|m| !m.primary);
    monitors
}

unsafe extern "system" fn enum_callback(
    monitor: HMONITOR,
    _hdc: HDC,
    _rect: *mut RECT,
    lparam: LPARAM,
) -> BOOL {
    let handles = unsafe { &mut *(lparam.0 as *mut Vec<HMONITOR>) };
    handles.push(monitor);
    BOOL(1)
}

/// Returns the monitor nearest to `hwnd`.
pub fn monitor_of_window(hwnd: HWND) -> Monitor {
    let monitor = unsafe { MonitorFromWindow(hwnd, MONITOR_DEFAULTTONEAREST) };
    describe(monitor).unwrap_or(Monitor {
        handle: monitor.0 as usize,
        ..Default::default()
    })
}

/// Queries the device name and work area of a monitor handle.
fn describe(monitor: HMONITOR) -> Option<Monitor> {
    let mut info = MONITORINFOEXW::default();
    info.monitorInfo.cbSize = mem::size_of::<MONITORINFOEXW>() as u32;

    // SAFETY: MONITORINFOEXW starts with MONITORINFO and cbSize tells
    // the API which layout to fill.
    let ok = unsafe { GetMonitorInfoW(monitor, &mut info as *mut MONITORINFOEXW as *mut _) };
    if !ok.as_bool() {
        return None;
    }

    let device_len = info
        .szDevice
        .iter()
        .position(|&c| c == 0)
        .unwrap_or(info.szDevice.len());
    let rc = info.monitorInfo.rcWork;

    Some(Monitor {
        handle: monitor.0 as usize,
        device_name: String::from_utf16_lossy(&info.szDevice[..device_len]),
        work_area: (rc.left, rc.top, rc.right - rc.left, rc.bottom - rc.top),
        // MONITORINFOF_PRIMARY = 1
        primary: info.monitorInfo.dwFlags & 1 != 0,
    })
}
