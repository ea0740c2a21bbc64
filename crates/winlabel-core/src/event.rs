use std::fmt;

/// A platform-agnostic event delivered to the widget.
///
/// Platform crates translate raw OS notifications and widget-window
/// input into these variants and deliver them in order on one thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    /// A window became the foreground window.
    Focused { hwnd: usize },

    /// A window's title changed.
    TitleChanged { hwnd: usize },

    /// A window finished being moved or resized.
    Moved { hwnd: usize },

    /// The widget window itself was clicked.
    Clicked { button: MouseButton },
}

impl WindowEvent {
    /// Returns the window handle associated with this event, if any.
    pub fn hwnd(&self) -> Option<usize> {
        match self {
            Self::Focused { hwnd } | Self::TitleChanged { hwnd } | Self::Moved { hwnd } => {
                Some(*hwnd)
            }
            Self::Clicked { .. } => None,
        }
    }
}

impl fmt::Display for WindowEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Focused { hwnd } => write!(f, "Focused      0x{hwnd:08X}"),
            Self::TitleChanged { hwnd } => write!(f, "TitleChanged 0x{hwnd:08X}"),
            Self::Moved { hwnd } => write!(f, "Moved        0x{hwnd:08X}"),
            Self::Clicked { button } => write!(f, "Clicked      {button:?}"),
        }
    }
}

/// Mouse button that clicked the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}
