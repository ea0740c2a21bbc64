//! Turns the last accepted window into label text.

use crate::config::WidgetConfig;
use crate::template::format_label;
use crate::window::WindowInfo;

/// Which of the two configured label templates is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LabelTemplate {
    #[default]
    Primary,
    Alternate,
}

impl LabelTemplate {
    pub fn toggled(self) -> Self {
        match self {
            Self::Primary => Self::Alternate,
            Self::Alternate => Self::Primary,
        }
    }
}

/// Mutable display state of one widget.
///
/// `last` only ever holds a window that passed the filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayState {
    pub active: LabelTemplate,
    pub last: Option<WindowInfo>,
}

impl DisplayState {
    /// Flips between the primary and alternate template.
    pub fn toggle(&mut self) {
        self.active = self.active.toggled();
    }

    /// Returns the template string currently in effect.
    pub fn template<'a>(&self, config: &'a WidgetConfig) -> &'a str {
        match self.active {
            LabelTemplate::Primary => &config.label,
            LabelTemplate::Alternate => &config.label_alt,
        }
    }

    /// Produces the label text for the current state.
    ///
    /// Shows `label_no_window` until a window has been accepted. The
    /// title is truncated for display only; `last` keeps the original.
    /// A template that fails to expand is shown verbatim.
    pub fn render(&self, config: &WidgetConfig) -> String {
        let Some(last) = &self.last else {
            return config.label_no_window.clone();
        };
        let template = self.template(config);

        let mut shown = last.clone();
        shown.title = truncate(&last.title, config.max_length, &config.max_length_ellipsis);

        match format_label(template, Some(&shown)) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("{e}");
                template.to_string()
            }
        }
    }
}

/// Cuts `title` to `max_length` characters and appends `ellipsis`.
///
/// A `max_length` of 0 disables truncation. Counts characters, not
/// bytes, so multi-byte titles are never split mid-character.
pub fn truncate(title: &str, max_length: usize, ellipsis: &str) -> String {
    if max_length == 0 || title.chars().count() <= max_length {
        return title.to_string();
    }
    let mut out: String = title.chars().take(max_length).collect();
    out.push_str(ellipsis);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::ProcessInfo;

    fn config() -> WidgetConfig {
        WidgetConfig {
            label: "{win[title]}".into(),
            label_alt: "{win[process][name]}".into(),
            label_no_window: "-".into(),
            max_length: 10,
            max_length_ellipsis: "\u{2026}".into(),
            ..WidgetConfig::default()
        }
    }

    fn code() -> WindowInfo {
        WindowInfo {
            hwnd: 7,
            title: "Visual Studio Code".into(),
            class_name: "Chrome_WidgetWin_1".into(),
            process: ProcessInfo {
                pid: 1,
                name: "Code.exe".into(),
            },
            ..WindowInfo::default()
        }
    }

    #[test]
    fn truncate_short_title_unchanged() {
        assert_eq!(truncate("Notepad", 10, "..."), "Notepad");
    }

    #[test]
    fn truncate_exact_length_unchanged() {
        assert_eq!(truncate("0123456789", 10, "..."), "0123456789");
    }

    #[test]
    fn truncate_long_title_keeps_max_length_chars_plus_ellipsis() {
        // Arrange
        let title = "Visual Studio Code";

        // Act
        let out = truncate(title, 10, "\u{2026}");

        // Assert
        assert_eq!(out, "Visual Stu\u{2026}");
        assert_eq!(out.chars().count(), 10 + 1);
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate("日本語のタイトル", 3, "..."), "日本語...");
    }

    #[test]
    fn zero_max_length_disables_truncation() {
        assert_eq!(truncate("Visual Studio Code", 0, "..."), "Visual Studio Code");
    }

    #[test]
    fn renders_no_window_label_before_first_window() {
        assert_eq!(DisplayState::default().render(&config()), "-");
    }

    #[test]
    fn render_truncates_but_keeps_stored_title() {
        // Arrange
        let state = DisplayState {
            last: Some(code()),
            ..DisplayState::default()
        };

        // Act
        let text = state.render(&config());

        // Assert
        assert_eq!(text, "Visual Stu\u{2026}");
        assert_eq!(state.last.unwrap().title, "Visual Studio Code");
    }

    #[test]
    fn render_uses_alternate_template_after_toggle() {
        // Arrange
        let mut state = DisplayState {
            last: Some(code()),
            ..DisplayState::default()
        };

        // Act
        state.toggle();

        // Assert
        assert_eq!(state.active, LabelTemplate::Alternate);
        assert_eq!(state.render(&config()), "Code.exe");
    }

    #[test]
    fn malformed_template_renders_verbatim() {
        // Arrange
        let config = WidgetConfig {
            label: "{win[bogus]}".into(),
            ..config()
        };
        let state = DisplayState {
            last: Some(code()),
            ..DisplayState::default()
        };

        // Act / Assert
        assert_eq!(state.render(&config), "{win[bogus]}");
    }
}
