//! The widget's on-screen window.
//!
//! A layered, topmost popup that never takes focus. Clicks are turned
//! into [`WindowEvent::Clicked`] and queued for the message loop.

mod render;
mod text;

use std::sync::Once;

use image::RgbaImage;
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, HWND_TOPMOST, MA_NOACTIVATE, RegisterClassW,
    SW_HIDE, SWP_NOACTIVATE, SWP_SHOWWINDOW, SetWindowPos, ShowWindow, WM_LBUTTONUP,
    WM_MBUTTONUP, WM_MOUSEACTIVATE, WM_RBUTTONUP, WNDCLASSW, WS_EX_LAYERED, WS_EX_NOACTIVATE,
    WS_EX_TOOLWINDOW, WS_EX_TOPMOST, WS_POPUP,
};
use windows::core::PCWSTR;
use winlabel_core::config::AppearanceConfig;
use winlabel_core::filter::{OWN_WINDOW_CLASS, OWN_WINDOW_TITLE};
use winlabel_core::{Error, MouseButton, Result, WidgetSurface, WindowEvent};

use crate::event_loop;
use crate::monitor::Monitor;
pub use render::{Bounds, Style};

static REGISTER_CLASS: Once = Once::new();

fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

fn ensure_class_registered() {
    REGISTER_CLASS.call_once(|| {
        let class_name = wide(OWN_WINDOW_CLASS);
        let wc = WNDCLASSW {
            lpfnWndProc: Some(widget_wnd_proc),
            lpszClassName: PCWSTR(class_name.as_ptr()),
            ..Default::default()
        };
        // SAFETY: RegisterClassW copies the class name.
        if unsafe { RegisterClassW(&wc) } == 0 {
            tracing::error!("failed to register {OWN_WINDOW_CLASS} window class");
        }
    });
}

unsafe extern "system" fn widget_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let button = match msg {
        WM_MOUSEACTIVATE => return LRESULT(MA_NOACTIVATE as isize),
        WM_LBUTTONUP => Some(MouseButton::Left),
        WM_MBUTTONUP => Some(MouseButton::Middle),
        WM_RBUTTONUP => Some(MouseButton::Right),
        _ => None,
    };
    if let Some(button) = button {
        event_loop::emit(WindowEvent::Clicked { button });
        return LRESULT(0);
    }
    unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
}

/// Layered popup window showing the label and icon.
pub struct WidgetWindow {
    hwnd: HWND,
    bounds: Bounds,
    style: Style,
    text: String,
    icon: Option<RgbaImage>,
    visible: bool,
}

impl WidgetWindow {
    /// Creates the hidden widget window on `monitor`.
    ///
    /// Must be called on the thread that runs the message pump, since
    /// clicks are delivered there.
    pub fn new(monitor: &Monitor, config: &AppearanceConfig) -> Result<Self> {
        ensure_class_registered();

        let (wx, wy, ww, _) = monitor.work_area;
        let bounds = Bounds {
            x: wx + config.x,
            y: wy + config.y,
            w: config.width.min(ww.max(1)),
            h: config.height,
        };

        let class_name = wide(OWN_WINDOW_CLASS);
        let title = wide(OWN_WINDOW_TITLE);
        let ex = WS_EX_LAYERED | WS_EX_TOOLWINDOW | WS_EX_TOPMOST | WS_EX_NOACTIVATE;
        let hwnd = unsafe {
            CreateWindowExW(
                ex,
                PCWSTR(class_name.as_ptr()),
                PCWSTR(title.as_ptr()),
                WS_POPUP,
                bounds.x,
                bounds.y,
                bounds.w,
                bounds.h,
                None,
                None,
                None,
                None,
            )
        }
        .map_err(|e| Error::Platform(format!("CreateWindowExW: {e}")))?;

        tracing::debug!(
            "widget window 0x{:X} at {},{} {}x{} on {}",
            hwnd.0 as usize,
            bounds.x,
            bounds.y,
            bounds.w,
            bounds.h,
            monitor.device_name
        );

        Ok(Self {
            hwnd,
            bounds,
            style: Style::from_config(config),
            text: String::new(),
            icon: None,
            visible: false,
        })
    }

    /// Raw handle of the widget window.
    pub fn hwnd(&self) -> usize {
        self.hwnd.0 as usize
    }

    fn redraw(&self) {
        if self.visible {
            render::render(
                self.hwnd,
                self.bounds,
                &self.style,
                &self.text,
                self.icon.as_ref(),
            );
        }
    }
}

impl WidgetSurface for WidgetWindow {
    fn show(&mut self) {
        if self.visible {
            return;
        }
        self.visible = true;
        self.redraw();
        let Bounds { x, y, w, h } = self.bounds;
        unsafe {
            let _ = SetWindowPos(
                self.hwnd,
                Some(HWND_TOPMOST),
                x,
                y,
                w,
                h,
                SWP_NOACTIVATE | SWP_SHOWWINDOW,
            );
        }
    }

    fn hide(&mut self) {
        if !self.visible {
            return;
        }
        self.visible = false;
        unsafe {
            let _ = ShowWindow(self.hwnd, SW_HIDE);
        }
    }

    fn set_text(&mut self, text: &str) {
        if self.text != text {
            self.text = text.to_string();
            self.redraw();
        }
    }

    fn set_icon(&mut self, icon: Option<&RgbaImage>) {
        if self.icon.as_ref() != icon {
            self.icon = icon.cloned();
            self.redraw();
        }
    }
}

impl Drop for WidgetWindow {
    fn drop(&mut self) {
        unsafe {
            let _ = DestroyWindow(self.hwnd);
        }
    }
}
