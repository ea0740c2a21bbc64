pub mod config;
pub mod display;
pub mod error;
pub mod event;
pub mod filter;
pub mod icon;
pub mod log;
pub mod manifest;
pub mod template;
pub mod widget;
pub mod window;

pub use error::{Error, Result};
pub use event::{MouseButton, WindowEvent};
pub use filter::{IgnoreRules, Visibility};
pub use icon::{Icon, IconResolver, IconSource};
pub use widget::{ActiveWindowWidget, WidgetSurface};
pub use window::{InfoResolver, PackageInfo, ProcessInfo, WindowInfo};
