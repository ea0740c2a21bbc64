//! Draws the widget into a DIB and presents it with
//! `UpdateLayeredWindow`.

use std::mem;

use image::RgbaImage;
use windows::Win32::Foundation::{COLORREF, HWND, POINT, SIZE};
use windows::Win32::Graphics::Gdi::{
    BI_RGB, BITMAPINFO, BITMAPINFOHEADER, BLENDFUNCTION, CreateCompatibleDC, CreateDIBSection,
    CreateFontW, DIB_RGB_COLORS, DeleteDC, DeleteObject, FONT_CHARSET, FONT_CLIP_PRECISION,
    FONT_OUTPUT_PRECISION, FONT_QUALITY, GetDC, HDC, ReleaseDC, SelectObject, SetBkMode,
    TRANSPARENT,
};
use windows::Win32::UI::WindowsAndMessaging::{ULW_ALPHA, UpdateLayeredWindow};
use windows::core::PCWSTR;
use winlabel_core::config::AppearanceConfig;

use super::text::{DrawCtx, draw_image, draw_text, premultiply};
use crate::color::Color;

/// Horizontal padding before the icon and between icon and text.
const PADDING: i32 = 6;

/// Resolved colors and font for drawing.
#[derive(Debug, Clone)]
pub struct Style {
    pub font: Vec<u16>,
    pub font_size: i32,
    pub foreground: Color,
    pub background: Color,
    pub background_alpha: u8,
}

impl Style {
    pub fn from_config(config: &AppearanceConfig) -> Self {
        Self {
            font: config.font.encode_utf16().chain(std::iter::once(0)).collect(),
            font_size: config.font_size,
            foreground: Color::from_hex_or(
                &config.foreground,
                Color {
                    r: 0xcd,
                    g: 0xd6,
                    b: 0xf4,
                },
            ),
            background: Color::from_hex_or(
                &config.background,
                Color {
                    r: 0x1e,
                    g: 0x1e,
                    b: 0x2e,
                },
            ),
            background_alpha: (config.background_opacity.clamp(0, 100) * 255 / 100) as u8,
        }
    }
}

/// Screen rectangle of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

/// Renders icon and text and applies them to the layered window.
pub fn render(hwnd: HWND, bounds: Bounds, style: &Style, text: &str, icon: Option<&RgbaImage>) {
    let Bounds { x, y, w, h } = bounds;
    if w <= 0 || h <= 0 {
        return;
    }

    unsafe {
        let screen_dc = GetDC(None);
        let mem_dc = CreateCompatibleDC(Some(screen_dc));

        let bmi = BITMAPINFO {
            bmiHeader: BITMAPINFOHEADER {
                biSize: mem::size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: w,
                biHeight: -h,
                biPlanes: 1,
                biBitCount: 32,
                biCompression: BI_RGB.0,
                ..Default::default()
            },
            ..Default::default()
        };

        let mut bits = std::ptr::null_mut();
        let Ok(bmp) = CreateDIBSection(Some(mem_dc), &bmi, DIB_RGB_COLORS, &mut bits, None, 0)
        else {
            tracing::warn!("CreateDIBSection failed for {w}x{h} widget");
            let _ = DeleteDC(mem_dc);
            let _ = ReleaseDC(None, screen_dc);
            return;
        };
        if bits.is_null() {
            let _ = DeleteObject(bmp.into());
            let _ = DeleteDC(mem_dc);
            let _ = ReleaseDC(None, screen_dc);
            return;
        }

        let old_bmp = SelectObject(mem_dc, bmp.into());

        let bg_pixel = premultiply(style.background, style.background_alpha);
        let buf = std::slice::from_raw_parts_mut(bits as *mut u32, (w * h) as usize);
        buf.fill(bg_pixel);

        let font = CreateFontW(
            style.font_size,
            0,
            0,
            0,
            400,
            0,
            0,
            0,
            FONT_CHARSET(0),
            FONT_OUTPUT_PRECISION(0),
            FONT_CLIP_PRECISION(0),
            FONT_QUALITY(0),
            0,
            PCWSTR(style.font.as_ptr()),
        );
        let old_font = SelectObject(mem_dc, font.into());
        let _ = SetBkMode(mem_dc, TRANSPARENT);

        let mut ctx = DrawCtx {
            dc: mem_dc,
            buf,
            w,
            h,
            bg_pixel,
        };

        let mut cursor = PADDING;
        if let Some(icon) = icon {
            let iy = (h - icon.height() as i32) / 2;
            draw_image(&mut ctx, icon, cursor, iy);
            cursor += icon.width() as i32 + PADDING;
        }
        draw_text(&mut ctx, cursor, text, style.foreground);

        apply_layered(hwnd, screen_dc, mem_dc, bounds);

        SelectObject(mem_dc, old_font);
        let _ = DeleteObject(font.into());
        SelectObject(mem_dc, old_bmp);
        let _ = DeleteObject(bmp.into());
        let _ = DeleteDC(mem_dc);
        let _ = ReleaseDC(None, screen_dc);
    }
}

/// Calls `UpdateLayeredWindow` to atomically present the bitmap.
unsafe fn apply_layered(hwnd: HWND, screen_dc: HDC, mem_dc: HDC, bounds: Bounds) {
    let blend = BLENDFUNCTION {
        BlendOp: 0,
        SourceConstantAlpha: 255,
        AlphaFormat: 1, // AC_SRC_ALPHA
        ..Default::default()
    };
    unsafe {
        let _ = UpdateLayeredWindow(
            hwnd,
            Some(screen_dc),
            Some(&POINT {
                x: bounds.x,
                y: bounds.y,
            }),
            Some(&SIZE {
                cx: bounds.w,
                cy: bounds.h,
            }),
            Some(mem_dc),
            Some(&POINT::default()),
            COLORREF(0),
            Some(&blend),
            ULW_ALPHA,
        );
    }
}
