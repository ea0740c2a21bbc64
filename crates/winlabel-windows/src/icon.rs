//! Window icon extraction.
//!
//! Tries the icons a window advertises, then the logo of its app
//! package, then the shell icon of its executable. The result is
//! rendered through `DrawIconEx` into a 32-bit DIB and handed to the
//! core resolver, which scales and caches it.

use std::ffi::OsStr;
use std::mem;
use std::os::windows::ffi::OsStrExt;

use image::RgbaImage;
use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
use windows::Win32::Graphics::Gdi::{
    BI_RGB, BITMAPINFO, BITMAPINFOHEADER, CreateCompatibleDC, CreateDIBSection, DIB_RGB_COLORS,
    DeleteDC, DeleteObject, SelectObject,
};
use windows::Win32::UI::Shell::{SHFILEINFOW, SHGFI_ICON, SHGFI_SMALLICON, SHGetFileInfoW};
use windows::Win32::UI::WindowsAndMessaging::{
    DI_NORMAL, DestroyIcon, DrawIconEx, GCLP_HICON, GCLP_HICONSM, HICON, ICON_BIG, ICON_SMALL,
    SMTO_ABORTIFHUNG, SendMessageTimeoutW, WM_GETICON,
};
use windows::core::PCWSTR;
use winlabel_core::{Error, IconSource, Result, manifest};

use crate::package;
use crate::window::{image_path, process_id, to_hwnd};

/// Pixel size icons are rasterized at before the core scales them down.
const RENDER_SIZE: i32 = 32;

/// How long a hung window may delay a `WM_GETICON` query.
const GETICON_TIMEOUT_MS: u32 = 100;

/// Loads icons through Win32 and package manifests.
#[derive(Debug, Clone, Copy, Default)]
pub struct Win32IconSource;

impl IconSource for Win32IconSource {
    fn load(&self, hwnd: usize) -> Result<RgbaImage> {
        let handle = to_hwnd(hwnd);

        if let Some(hicon) = window_icon(handle) {
            // Icons returned by WM_GETICON and the class are shared and
            // must not be destroyed.
            return render_icon(hicon);
        }

        if let Some(pkg) = package::package_for_window(handle) {
            match manifest::load_logo(&pkg.install_dir) {
                Ok(logo) => return Ok(logo),
                Err(e) => tracing::debug!("package logo for {}: {e}", pkg.full_name),
            }
        }

        let path = image_path(process_id(handle))
            .ok_or_else(|| Error::IconDecode(format!("no executable for 0x{hwnd:X}")))?;
        let hicon = shell_icon(&path)
            .ok_or_else(|| Error::IconDecode(format!("no shell icon for {path}")))?;
        let image = render_icon(hicon);
        unsafe {
            let _ = DestroyIcon(hicon);
        }
        image
    }
}

/// Asks the window for its small icon, then its big icon, then falls
/// back to the icons registered with its class.
fn window_icon(hwnd: HWND) -> Option<HICON> {
    for kind in [ICON_SMALL, ICON_BIG] {
        let mut result: usize = 0;
        let ok = unsafe {
            SendMessageTimeoutW(
                hwnd,
                WM_GETICON,
                WPARAM(kind as usize),
                LPARAM(0),
                SMTO_ABORTIFHUNG,
                GETICON_TIMEOUT_MS,
                Some(&mut result),
            )
        };
        if ok.0 != 0 && result != 0 {
            return Some(HICON(result as *mut _));
        }
    }

    [GCLP_HICONSM, GCLP_HICON]
        .into_iter()
        .map(|index| class_long(hwnd, index))
        .find(|&raw| raw != 0)
        .map(|raw| HICON(raw as *mut _))
}

#[cfg(target_pointer_width = "64")]
fn class_long(
    hwnd: HWND,
    index: windows::Win32::UI::WindowsAndMessaging::GET_CLASS_LONG_INDEX,
) -> usize {
    unsafe { windows::Win32::UI::WindowsAndMessaging::GetClassLongPtrW(hwnd, index) }
}

#[cfg(target_pointer_width = "32")]
fn class_long(
    hwnd: HWND,
    index: windows::Win32::UI::WindowsAndMessaging::GET_CLASS_LONG_INDEX,
) -> usize {
    unsafe { windows::Win32::UI::WindowsAndMessaging::GetClassLongW(hwnd, index) as usize }
}

/// Gets the small shell icon for an executable path. The caller owns
/// the returned icon.
fn shell_icon(path: &str) -> Option<HICON> {
    let wide: Vec<u16> = OsStr::new(path).encode_wide().chain(Some(0)).collect();
    let mut info: SHFILEINFOW = unsafe { mem::zeroed() };
    let ok = unsafe {
        SHGetFileInfoW(
            PCWSTR(wide.as_ptr()),
            Default::default(),
            Some(&mut info),
            mem::size_of::<SHFILEINFOW>() as u32,
            SHGFI_ICON | SHGFI_SMALLICON,
        )
    };
    if ok != 0 && !info.hIcon.0.is_null() {
        Some(info.hIcon)
    } else {
        None
    }
}

/// Renders an HICON into a temporary DIB and returns its pixels.
fn render_icon(hicon: HICON) -> Result<RgbaImage> {
    let size = RENDER_SIZE;
    unsafe {
        let dc = CreateCompatibleDC(None);
        let bmi = BITMAPINFO {
            bmiHeader: BITMAPINFOHEADER {
                biSize: mem::size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: size,
                biHeight: -size, // top-down
                biPlanes: 1,
                biBitCount: 32,
                biCompression: BI_RGB.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut bits = std::ptr::null_mut();
        let bmp = match CreateDIBSection(Some(dc), &bmi, DIB_RGB_COLORS, &mut bits, None, 0) {
            Ok(bmp) if !bits.is_null() => bmp,
            Ok(bmp) => {
                let _ = DeleteObject(bmp.into());
                let _ = DeleteDC(dc);
                return Err(Error::IconDecode("DIB section has no pixels".into()));
            }
            Err(e) => {
                let _ = DeleteDC(dc);
                return Err(Error::IconDecode(format!("CreateDIBSection: {e}")));
            }
        };
        let old = SelectObject(dc, bmp.into());
        let buf = std::slice::from_raw_parts_mut(bits as *mut u32, (size * size) as usize);
        buf.fill(0);

        let drawn = DrawIconEx(dc, 0, 0, hicon, size, size, 0, None, DI_NORMAL);
        let image = drawn
            .map_err(|e| Error::IconDecode(format!("DrawIconEx: {e}")))
            .map(|()| to_rgba(buf, size as u32));

        SelectObject(dc, old);
        let _ = DeleteObject(bmp.into());
        let _ = DeleteDC(dc);
        image
    }
}

/// Converts premultiplied BGRA pixels to straight RGBA.
///
/// Icons without an alpha channel draw with alpha 0 everywhere; any
/// coloured pixel in such an icon is treated as opaque.
fn to_rgba(pixels: &[u32], size: u32) -> RgbaImage {
    let has_alpha = pixels.iter().any(|&p| p >> 24 != 0);
    let mut image = RgbaImage::new(size, size);

    for (dst, &src) in image.pixels_mut().zip(pixels) {
        let (b, g, r) = (src & 0xFF, (src >> 8) & 0xFF, (src >> 16) & 0xFF);
        let a = if has_alpha {
            src >> 24
        } else if src & 0x00FF_FFFF != 0 {
            255
        } else {
            0
        };

        dst.0 = match a {
            0 => [0, 0, 0, 0],
            255 => [r as u8, g as u8, b as u8, 255],
            _ => [
                unpremultiply(r, a),
                unpremultiply(g, a),
                unpremultiply(b, a),
                a as u8,
            ],
        };
    }
    image
}

fn unpremultiply(channel: u32, alpha: u32) -> u8 {
    (channel * 255 / alpha).min(255) as u8
}
