//! Ctrl+C handling for the widget's message loop.
//!
//! The handler runs on a thread the console spawns, so it posts
//! `WM_QUIT` to the thread running the message pump.

use std::sync::OnceLock;

use windows::Win32::System::Console::{CTRL_BREAK_EVENT, CTRL_C_EVENT, SetConsoleCtrlHandler};
use windows::Win32::UI::WindowsAndMessaging::{PostThreadMessageW, WM_QUIT};
use windows::Win32::Foundation::{LPARAM, WPARAM};

/// Thread id of the message loop. Written once by `set_handler`.
static LOOP_THREAD: OnceLock<u32> = OnceLock::new();

/// Makes Ctrl+C end the message loop running on `thread_id`.
pub fn set_handler(thread_id: u32) -> winlabel_core::Result<()> {
    LOOP_THREAD
        .set(thread_id)
        .map_err(|_| winlabel_core::Error::Platform("Ctrl+C handler already registered".into()))?;
    unsafe { SetConsoleCtrlHandler(Some(handler), true) }
        .map_err(|e| winlabel_core::Error::Platform(format!("SetConsoleCtrlHandler: {e}")))
}

unsafe extern "system" fn handler(ctrl_type: u32) -> windows::core::BOOL {
    if (ctrl_type == CTRL_C_EVENT || ctrl_type == CTRL_BREAK_EVENT)
        && let Some(&thread_id) = LOOP_THREAD.get()
    {
        unsafe {
            let _ = PostThreadMessageW(thread_id, WM_QUIT, WPARAM(0), LPARAM(0));
        }
        return windows::core::BOOL(1);
    }
    windows::core::BOOL(0)
}
