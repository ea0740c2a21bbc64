//! Decides whether a focus change should reach the display.
//!
//! Three outcomes: show the new window, hide the widget, or keep the
//! widget visible with whatever it showed before.

use std::collections::HashSet;

use crate::window::WindowInfo;

/// Title of the widget's own window.
pub const OWN_WINDOW_TITLE: &str = "WinLabel";

/// Window class registered for the widget's own window.
pub const OWN_WINDOW_CLASS: &str = "WinLabelWidget";

/// Titles that always hide the widget (desktop, launchers, docks).
pub const BUILTIN_TITLES: &[&str] = &[
    "",
    " ",
    "FolderView",
    "Program Manager",
    "python3",
    "pythonw3",
    "WinLaunch",
    "NxDock",
    OWN_WINDOW_TITLE,
];

/// Shell surfaces that always hide the widget.
pub const BUILTIN_CLASSES: &[&str] = &[
    "WorkerW",
    "TopLevelWindowForOverflowXamlIsland",
    "Shell_TrayWnd",
    "Shell_SecondaryTrayWnd",
];

/// Processes whose windows never replace the displayed title.
pub const BUILTIN_PROCESSES: &[&str] = &["SearchHost.exe", "komorebi.exe"];

/// Outcome of [`should_display`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Show the widget and update it with the new window.
    Visible,
    /// Hide the widget. Stored state is left untouched.
    Hidden,
    /// Keep the widget visible with its previous content.
    Suppressed,
}

/// Ignore lists: user configuration merged with the built-in lists.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    titles: HashSet<String>,
    classes: HashSet<String>,
    processes: HashSet<String>,
}

impl IgnoreRules {
    /// Merges user-supplied lists with the built-in ones.
    pub fn with_builtins<I, S>(titles: I, classes: I, processes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let merge = |user: I, builtin: &[&str]| -> HashSet<String> {
            user.into_iter()
                .map(Into::into)
                .chain(builtin.iter().map(|s| (*s).to_string()))
                .collect()
        };
        Self {
            titles: merge(titles, BUILTIN_TITLES),
            classes: merge(classes, BUILTIN_CLASSES),
            processes: merge(processes, BUILTIN_PROCESSES),
        }
    }

    pub fn ignores_title(&self, title: &str) -> bool {
        self.titles.contains(title)
    }

    pub fn ignores_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn ignores_process(&self, process: &str) -> bool {
        self.processes.contains(process)
    }
}

/// Applies the filter rules to a resolved window.
///
/// Rules run in order and the first match wins:
/// 1. no info, empty title, or the widget's own window: hidden
/// 2. monitor-exclusive and the window is on another monitor: hidden
/// 3. a built-in ignored title or class: hidden
/// 4. title (trimmed), class, or process in `rules`: suppressed
/// 5. otherwise visible
pub fn should_display(
    info: Option<&WindowInfo>,
    rules: &IgnoreRules,
    monitor_exclusive: bool,
    current_monitor: usize,
) -> Visibility {
    let Some(info) = info else {
        return Visibility::Hidden;
    };
    if info.hwnd == 0 || info.title.is_empty() || is_own_window(info) {
        return Visibility::Hidden;
    }
    if monitor_exclusive && info.monitor_hwnd != current_monitor {
        return Visibility::Hidden;
    }
    if BUILTIN_TITLES.contains(&info.title.as_str())
        || BUILTIN_CLASSES.contains(&info.class_name.as_str())
    {
        return Visibility::Hidden;
    }
    if rules.ignores_title(info.title.trim())
        || rules.ignores_class(&info.class_name)
        || rules.ignores_process(&info.process.name)
    {
        return Visibility::Suppressed;
    }
    Visibility::Visible
}

fn is_own_window(info: &WindowInfo) -> bool {
    info.title == OWN_WINDOW_TITLE || info.class_name == OWN_WINDOW_CLASS
}
