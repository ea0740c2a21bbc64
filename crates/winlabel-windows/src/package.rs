//! Package identity for windows of packaged (Store/UWP) apps.

use std::path::PathBuf;

use windows::Win32::Foundation::{ERROR_SUCCESS, HWND, LPARAM};
use windows::Win32::Storage::Packaging::Appx::{GetPackageFullName, GetPackagePathByFullName};
use windows::Win32::UI::WindowsAndMessaging::EnumChildWindows;
use windows::core::{BOOL, PCWSTR, PWSTR};
use winlabel_core::PackageInfo;

use crate::window::{ProcessHandle, class_name, process_id};

/// Frame window class that hosts UWP apps in a separate process.
const FRAME_HOST_CLASS: &str = "ApplicationFrameWindow";

/// Returns package identity for the app owning `hwnd`, if packaged.
pub fn package_for_window(hwnd: HWND) -> Option<PackageInfo> {
    let pid = app_process_id(hwnd);
    let full_name = package_full_name(pid)?;
    let install_dir = package_path(&full_name)?;
    Some(PackageInfo {
        full_name,
        install_dir,
    })
}

/// Returns the pid of the process that owns the app content.
///
/// For UWP windows the top-level window belongs to the frame host, and
/// the app itself owns a child window from a different process.
fn app_process_id(hwnd: HWND) -> u32 {
    let host = process_id(hwnd);
    if class_name(hwnd) != FRAME_HOST_CLASS {
        return host;
    }

    let mut search = ChildSearch { host, found: 0 };
    // SAFETY: the callback only writes into `search`, which outlives
    // the call.
    unsafe {
        let _ = EnumChildWindows(
            Some(hwnd),
            Some(find_app_child),
            LPARAM(&mut search as *mut ChildSearch as isize),
        );
    }
    if search.found != 0 { search.found } else { host }
}

struct ChildSearch {
    host: u32,
    found: u32,
}

unsafe extern "system" fn find_app_child(child: HWND, lparam: LPARAM) -> BOOL {
    let search = unsafe { &mut *(lparam.0 as *mut ChildSearch) };
    let pid = process_id(child);
    if pid != 0 && pid != search.host {
        search.found = pid;
        return BOOL(0);
    }
    BOOL(1)
}

fn package_full_name(pid: u32) -> Option<String> {
    let process = ProcessHandle::open(pid)?;
    let mut buf = vec![0u16; 256];
    let mut len = buf.len() as u32;
    // Unpackaged processes fail with APPMODEL_ERROR_NO_PACKAGE.
    let status = unsafe { GetPackageFullName(process.0, &mut len, Some(PWSTR(buf.as_mut_ptr()))) };
    if status != ERROR_SUCCESS {
        return None;
    }
    Some(from_wide(&buf, len))
}

fn package_path(full_name: &str) -> Option<PathBuf> {
    let wide: Vec<u16> = full_name.encode_utf16().chain(std::iter::once(0)).collect();
    let mut buf = vec![0u16; 1024];
    let mut len = buf.len() as u32;
    let status = unsafe {
        GetPackagePathByFullName(
            PCWSTR(wide.as_ptr()),
            &mut len,
            Some(PWSTR(buf.as_mut_ptr())),
        )
    };
    if status != ERROR_SUCCESS {
        tracing::debug!("no install path for package {full_name}: {status:?}");
        return None;
    }
    Some(PathBuf::from(from_wide(&buf, len)))
}

/// Decodes a length that may or may not count the null terminator.
fn from_wide(buf: &[u16], len: u32) -> String {
    let len = (len as usize).min(buf.len());
    let end = buf[..len].iter().position(|&c| c == 0).unwrap_or(len);
    String::from_utf16_lossy(&buf[..end])
}
