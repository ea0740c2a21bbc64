mod loader;
pub mod template;

use serde::{Deserialize, Serialize};

use crate::filter::IgnoreRules;
use crate::icon::DEFAULT_CACHE_CAPACITY;
use crate::log::LogConfig;
use crate::widget::Action;

pub use loader::{config_dir, config_path, load, try_load, try_load_from};

/// Top-level configuration for winlabel.
///
/// Loaded from `~/.config/winlabel/config.toml`. Missing sections
/// fall back to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Label templates, filtering and click behaviour.
    pub widget: WidgetConfig,
    /// Window icon settings.
    pub icon: IconConfig,
    /// Placement and colors of the widget window.
    pub appearance: AppearanceConfig,
    /// File logging.
    pub log: LogConfig,
}

/// Behaviour of the active window label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Primary label template (e.g. `"{win[title]}"`).
    pub label: String,
    /// Alternate template shown after a toggle click.
    pub label_alt: String,
    /// Text shown before any window has been accepted.
    pub label_no_window: String,
    /// Only follow windows on the widget's own monitor.
    pub monitor_exclusive: bool,
    /// Maximum title length in characters. 0 = no truncation.
    pub max_length: usize,
    /// Appended to truncated titles.
    pub max_length_ellipsis: String,
    /// Extra windows to ignore, on top of the built-in lists.
    pub ignore_window: IgnoreWindowConfig,
    /// Mouse button to action mapping.
    pub callbacks: CallbacksConfig,
}

/// User additions to the ignore lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnoreWindowConfig {
    pub titles: Vec<String>,
    pub classes: Vec<String>,
    pub processes: Vec<String>,
}

/// Action names bound to each mouse button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallbacksConfig {
    pub on_left: String,
    pub on_middle: String,
    pub on_right: String,
}

/// Window icon settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconConfig {
    /// Whether to show the focused window's icon.
    pub enabled: bool,
    /// Number of windows whose icons are kept in memory.
    pub cache_capacity: usize,
}

/// Placement and colors of the widget window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Monitor index (0-based, primary first) the widget lives on.
    pub monitor: usize,
    /// Horizontal offset from the monitor work area's left edge.
    pub x: i32,
    /// Vertical offset from the monitor work area's top edge.
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub font: String,
    /// Font size in pixels.
    pub font_size: i32,
    /// Text color (hex, e.g. "#cdd6f4").
    pub foreground: String,
    /// Background color (hex, e.g. "#1e1e2e").
    pub background: String,
    /// Background opacity as a percentage (0 = transparent, 100 = opaque).
    pub background_opacity: i32,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            label: "{win[title]}".into(),
            label_alt: "[class_name='{win[class_name]}' exe='{win[process][name]}' hwnd={win[hwnd]}]"
                .into(),
            label_no_window: String::new(),
            monitor_exclusive: true,
            max_length: 0,
            max_length_ellipsis: "...".into(),
            ignore_window: IgnoreWindowConfig::default(),
            callbacks: CallbacksConfig::default(),
        }
    }
}

impl Default for CallbacksConfig {
    fn default() -> Self {
        Self {
            on_left: Action::ToggleLabel.name().into(),
            on_middle: Action::DoNothing.name().into(),
            on_right: Action::ToggleLabel.name().into(),
        }
    }
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            monitor: 0,
            x: 8,
            y: 0,
            width: 480,
            height: 28,
            font: "Segoe UI".into(),
            font_size: 14,
            foreground: "#cdd6f4".into(),
            background: "#1e1e2e".into(),
            background_opacity: 90,
        }
    }
}

impl WidgetConfig {
    /// Builds the immutable ignore rules: user lists plus built-ins.
    pub fn ignore_rules(&self) -> IgnoreRules {
        let IgnoreWindowConfig {
            titles,
            classes,
            processes,
        } = &self.ignore_window;
        IgnoreRules::with_builtins(titles.clone(), classes.clone(), processes.clone())
    }
}

impl Config {
    /// Clamps values to safe ranges and repairs unknown action names.
    ///
    /// Returns a description of every repair so callers can report them.
    pub fn validate(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();

        let callbacks = &mut self.widget.callbacks;
        for (button, action) in [
            ("on_left", &mut callbacks.on_left),
            ("on_middle", &mut callbacks.on_middle),
            ("on_right", &mut callbacks.on_right),
        ] {
            if Action::from_name(action).is_none() {
                warnings.push(format!(
                    "unknown action {action:?} for {button}, using \"{}\"",
                    Action::DoNothing.name()
                ));
                *action = Action::DoNothing.name().into();
            }
        }

        self.icon.cache_capacity = self.icon.cache_capacity.clamp(1, 4096);

        let a = &mut self.appearance;
        a.width = a.width.clamp(16, 8000);
        a.height = a.height.clamp(8, 200);
        a.font_size = a.font_size.clamp(6, 96);
        a.background_opacity = a.background_opacity.clamp(0, 100);

        self.log.max_files = self.log.max_files.clamp(1, 100);

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        // Arrange / Act
        let config = Config::default();

        // Assert
        assert_eq!(config.widget.label, "{win[title]}");
        assert!(config.widget.monitor_exclusive);
        assert_eq!(config.widget.max_length, 0);
        assert_eq!(config.widget.callbacks.on_left, "toggle_label");
        assert_eq!(config.widget.callbacks.on_middle, "do_nothing");
        assert_eq!(config.widget.callbacks.on_right, "toggle_label");
        assert_eq!(config.icon.cache_capacity, DEFAULT_CACHE_CAPACITY);
    }

    #[test]
    fn partial_toml_uses_defaults_for_missing_sections() {
        // Arrange
        let toml_str = "[widget]\nmax_length = 24\n\n[widget.ignore_window]\nprocesses = [\"Slack.exe\"]\n";

        // Act
        let config: Config = toml::from_str(toml_str).unwrap();

        // Assert
        assert_eq!(config.widget.max_length, 24);
        assert_eq!(config.widget.max_length_ellipsis, "...");
        assert_eq!(config.widget.ignore_window.processes, vec!["Slack.exe"]);
        assert!(config.widget.ignore_window.titles.is_empty());
        assert_eq!(config.appearance, AppearanceConfig::default());
    }

    #[test]
    fn validate_replaces_unknown_actions() {
        // Arrange
        let mut config = Config::default();
        config.widget.callbacks.on_middle = "launch_rockets".into();

        // Act
        let warnings = config.validate();

        // Assert
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("launch_rockets"));
        assert_eq!(config.widget.callbacks.on_middle, "do_nothing");
    }

    #[test]
    fn validate_clamps_extreme_values() {
        // Arrange
        let mut config = Config::default();
        config.icon.cache_capacity = 0;
        config.appearance.height = -5;
        config.appearance.background_opacity = 250;

        // Act
        let warnings = config.validate();

        // Assert
        assert!(warnings.is_empty());
        assert_eq!(config.icon.cache_capacity, 1);
        assert_eq!(config.appearance.height, 8);
        assert_eq!(config.appearance.background_opacity, 100);
    }

    #[test]
    fn ignore_rules_merge_user_and_builtin_lists() {
        // Arrange
        let mut widget = WidgetConfig::default();
        widget.ignore_window.processes.push("Slack.exe".into());

        // Act
        let rules = widget.ignore_rules();

        // Assert
        assert!(rules.ignores_process("Slack.exe"));
        assert!(rules.ignores_process("SearchHost.exe"));
        assert!(rules.ignores_class("WorkerW"));
        assert!(rules.ignores_title("Program Manager"));
    }
}
