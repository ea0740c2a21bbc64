use winlabel_core::{Error, InfoResolver, ProcessInfo, Result, WindowInfo};

use windows::Win32::Foundation::{CloseHandle, HANDLE, HWND};
use windows::Win32::System::Threading::{
    OpenProcess, PROCESS_NAME_WIN32, PROCESS_QUERY_LIMITED_INFORMATION,
    QueryFullProcessImageNameW,
};
use windows::Win32::UI::WindowsAndMessaging::{
    GetWindowTextLengthW, GetWindowTextW, GetWindowThreadProcessId, RealGetWindowClassW,
};
use windows::core::PWSTR;

use crate::{monitor, package};

/// Resolves window attributes through Win32 queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct Win32Resolver;

impl InfoResolver for Win32Resolver {
    fn resolve(&self, hwnd: usize) -> Result<WindowInfo> {
        if hwnd == 0 {
            return Err(Error::resolution(hwnd, "null window handle"));
        }
        let handle = to_hwnd(hwnd);

        // An invalid HWND has no owning thread, so pid 0 doubles as the
        // validity check.
        let pid = process_id(handle);
        if pid == 0 {
            return Err(Error::resolution(hwnd, "window has no owning process"));
        }

        let process_name = image_path(pid)
            .as_deref()
            .and_then(file_name)
            .unwrap_or_default();
        let monitor = monitor::monitor_of_window(handle);

        Ok(WindowInfo {
            hwnd,
            title: title(handle),
            class_name: class_name(handle),
            process: ProcessInfo {
                pid,
                name: process_name,
            },
            monitor_hwnd: monitor.handle,
            monitor_device_name: monitor.device_name,
            package: package::package_for_window(handle),
        })
    }
}

pub(crate) fn to_hwnd(raw: usize) -> HWND {
    HWND(raw as *mut _)
}

/// Returns the window title, or an empty string.
pub fn title(hwnd: HWND) -> String {
    // SAFETY: GetWindowTextLengthW and GetWindowTextW are safe to call
    // with any HWND. They read window text without modifying state.
    unsafe {
        let length = GetWindowTextLengthW(hwnd);
        if length == 0 {
            return String::new();
        }

        // +1 for the null terminator that Windows requires
        let mut buffer = vec![0u16; (length + 1) as usize];
        let copied = GetWindowTextW(hwnd, &mut buffer);
        String::from_utf16_lossy(&buffer[..copied as usize])
    }
}

/// Returns the window class name.
pub fn class_name(hwnd: HWND) -> String {
    // SAFETY: RealGetWindowClassW reads the window class name.
    // 256 is the maximum class name length in Win32.
    unsafe {
        let mut buffer = [0u16; 256];
        let length = RealGetWindowClassW(hwnd, &mut buffer);
        String::from_utf16_lossy(&buffer[..length as usize])
    }
}

/// Returns the id of the process owning `hwnd`, or 0.
pub fn process_id(hwnd: HWND) -> u32 {
    let mut pid: u32 = 0;
    unsafe { GetWindowThreadProcessId(hwnd, Some(&mut pid)) };
    pid
}

/// Closes a process handle on drop.
pub(crate) struct ProcessHandle(pub(crate) HANDLE);

impl ProcessHandle {
    pub(crate) fn open(pid: u32) -> Option<Self> {
        // SAFETY: OpenProcess with the least-privilege query right.
        unsafe { OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, false, pid) }
            .ok()
            .map(Self)
    }
}

impl Drop for ProcessHandle {
    fn drop(&mut self) {
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

/// Returns the full executable path for a process ID.
pub fn image_path(pid: u32) -> Option<String> {
    let process = ProcessHandle::open(pid)?;
    let mut buf = vec![0u16; 1024];
    let mut len = buf.len() as u32;
    unsafe {
        QueryFullProcessImageNameW(
            process.0,
            PROCESS_NAME_WIN32,
            PWSTR(buf.as_mut_ptr()),
            &mut len,
        )
        .ok()?;
    }
    String::from_utf16(&buf[..len as usize]).ok()
}

fn file_name(path: &str) -> Option<String> {
    path.rsplit(['\\', '/']).next().map(str::to_string)
}
