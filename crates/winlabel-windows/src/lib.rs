//! Windows implementations of the winlabel collaborator traits.
//!
//! Everything here is Win32 glue; the decisions live in `winlabel-core`.
#![cfg(windows)]

/// Widget startup and the single-threaded message pump.
pub mod app;

/// RGB colors parsed from config hex strings.
pub mod color;

/// Ctrl+C handling via `SetConsoleCtrlHandler`.
pub mod ctrl_c;

/// Per-monitor DPI awareness.
pub mod dpi;

/// Raw WinEvent to `WindowEvent` translation.
pub mod event;

/// WinEvent hooks and message pump helpers.
pub mod event_loop;

/// Window icon extraction.
pub mod icon;

/// Monitor enumeration and lookup.
pub mod monitor;

/// Packaged app detection.
pub mod package;

/// The layered popup the widget draws into.
pub mod surface;

/// Window attribute queries.
pub mod window;

pub use icon::Win32IconSource;
pub use surface::WidgetWindow;
pub use window::Win32Resolver;
