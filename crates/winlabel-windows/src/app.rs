//! Runs the widget until Ctrl+C.

use std::sync::mpsc;

use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::WindowsAndMessaging::GetForegroundWindow;
use winlabel_core::config::Config;
use winlabel_core::{ActiveWindowWidget, Error, Result, WidgetSurface};

use crate::event_loop::{self, Hook};
use crate::icon::Win32IconSource;
use crate::monitor::{self, Monitor};
use crate::surface::WidgetWindow;
use crate::window::Win32Resolver;
use crate::{ctrl_c, dpi};

/// Creates the widget on the configured monitor and runs the message
/// loop on the calling thread.
pub fn run(config: &Config) -> Result<()> {
    dpi::enable_dpi_awareness();

    let monitor = pick_monitor(config.appearance.monitor)?;
    let surface = WidgetWindow::new(&monitor, &config.appearance)?;
    let mut widget = ActiveWindowWidget::new(
        config,
        monitor.handle,
        Win32Resolver,
        Win32IconSource,
        surface,
    );
    widget.surface_mut().show();

    let (tx, rx) = mpsc::channel();
    let hook = Hook::install(tx)?;
    ctrl_c::set_handler(unsafe { GetCurrentThreadId() })?;

    let foreground = unsafe { GetForegroundWindow() };
    widget.on_focus_changed(foreground.0 as usize);

    tracing::info!(
        "winlabel running on {} (window 0x{:X})",
        monitor.device_name,
        widget.surface().hwnd()
    );

    event_loop::run_message_pump(|| {
        for event in rx.try_iter() {
            tracing::trace!("{event}");
            widget.handle(event);
        }
    });

    drop(hook);
    tracing::info!("winlabel stopped");
    Ok(())
}

/// Returns the monitor at `index` (primary first), or the primary
/// monitor if the index is out of range.
fn pick_monitor(index: usize) -> Result<Monitor> {
    let mut monitors = monitor::enumerate();
    if monitors.is_empty() {
        return Err(Error::Platform("no monitors found".into()));
    }
    if index >= monitors.len() {
        tracing::warn!(
            "monitor {index} not found ({} connected), using primary",
            monitors.len()
        );
        return Ok(monitors.swap_remove(0));
    }
    Ok(monitors.swap_remove(index))
}
