//! Pixel helpers for drawing onto the widget's DIB.
//!
//! GDI writes text with zero alpha, so drawn regions get their alpha
//! fixed up before `UpdateLayeredWindow`.

use image::RgbaImage;
use windows::Win32::Foundation::{COLORREF, SIZE};
use windows::Win32::Graphics::Gdi::{GetTextExtentPoint32W, HDC, SetTextColor, TextOutW};

use crate::color::Color;

/// The DC, pixel buffer and dimensions shared by the draw helpers.
pub struct DrawCtx<'a> {
    pub dc: HDC,
    pub buf: &'a mut [u32],
    pub w: i32,
    pub h: i32,
    pub bg_pixel: u32,
}

/// Draws `text` at `x`, vertically centered. Returns the X after it.
pub fn draw_text(ctx: &mut DrawCtx, x: i32, text: &str, color: Color) -> i32 {
    if text.is_empty() {
        return x;
    }

    let wide: Vec<u16> = text.encode_utf16().collect();
    let mut size = SIZE::default();
    unsafe {
        let _ = GetTextExtentPoint32W(ctx.dc, &wide, &mut size);
    }
    let y = (ctx.h - size.cy) / 2;

    unsafe {
        let _ = SetTextColor(ctx.dc, COLORREF(color.to_colorref()));
        let _ = TextOutW(ctx.dc, x, y, &wide);
    }

    fix_alpha_region(ctx, x, y, size.cx, size.cy);
    x + size.cx
}

/// Composites a straight-alpha RGBA image at (x, y).
pub fn draw_image(ctx: &mut DrawCtx, image: &RgbaImage, x: i32, y: i32) {
    for (ix, iy, pixel) in image.enumerate_pixels() {
        let (dx, dy) = (x + ix as i32, y + iy as i32);
        if dx < 0 || dx >= ctx.w || dy < 0 || dy >= ctx.h {
            continue;
        }
        let [r, g, b, a] = pixel.0;
        if a == 0 {
            continue;
        }
        let src = premultiply(Color { r, g, b }, a);
        let di = (dy * ctx.w + dx) as usize;
        ctx.buf[di] = blend_over(src, ctx.buf[di]);
    }
}

/// Converts a color and alpha to a premultiplied BGRA pixel.
///
/// `UpdateLayeredWindow` with `AC_SRC_ALPHA` requires every channel
/// scaled by `alpha / 255`.
pub fn premultiply(c: Color, alpha: u8) -> u32 {
    let a = u32::from(alpha);
    let r = u32::from(c.r) * a / 255;
    let g = u32::from(c.g) * a / 255;
    let b = u32::from(c.b) * a / 255;
    (a << 24) | (r << 16) | (g << 8) | b
}

/// Source-over blend of two premultiplied BGRA pixels.
fn blend_over(src: u32, dst: u32) -> u32 {
    let inv = 255 - (src >> 24);
    let channel = |shift: u32| {
        let s = (src >> shift) & 0xFF;
        let d = (dst >> shift) & 0xFF;
        (s + d * inv / 255).min(255) << shift
    };
    channel(24) | channel(16) | channel(8) | channel(0)
}

/// Sets alpha to 0xFF for pixels in a region that differ from the
/// background.
fn fix_alpha_region(ctx: &mut DrawCtx, rx: i32, ry: i32, rw: i32, rh: i32) {
    let x0 = rx.max(0);
    let y0 = ry.max(0);
    let x1 = (rx + rw).min(ctx.w);
    let y1 = (ry + rh).min(ctx.h);

    for py in y0..y1 {
        for px in x0..x1 {
            let idx = (py * ctx.w + px) as usize;
            if idx < ctx.buf.len() && ctx.buf[idx] != ctx.bg_pixel {
                ctx.buf[idx] |= 0xFF00_0000;
            }
        }
    }
}
