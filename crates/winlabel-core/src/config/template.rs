/// Generates the default `config.toml` contents with explanatory comments.
///
/// This is used by `winlabel init` to create a starter config file that
/// users can immediately edit.
pub fn generate_config() -> String {
    r##"# winlabel configuration
# Location: ~/.config/winlabel/config.toml

[widget]
# Label template. Placeholders: {win[title]}, {win[class_name]},
# {win[process][name]}, {win[process][pid]}, {win[hwnd]},
# {win[monitor_hwnd]}, {win[monitor_info][device]}, {win[package][full_name]}.
# Format specs pad or cut a value: {win[title]:.30}, {win[process][pid]:>6}.
# Use {{ and }} for literal braces.
label = "{win[title]}"
# Template shown after clicking a button bound to "toggle_label".
label_alt = "[class_name='{win[class_name]}' exe='{win[process][name]}' hwnd={win[hwnd]}]"
# Text shown until the first window is focused.
label_no_window = ""
# Only follow windows on the monitor the widget is on.
monitor_exclusive = true
# Maximum title length in characters (0 = no limit).
max_length = 0
# Appended to titles cut at max_length.
max_length_ellipsis = "..."

# Windows that never replace the displayed title. These are added to
# built-in lists covering the desktop, taskbar and search.
[widget.ignore_window]
titles = []
classes = []
processes = []

# Mouse button actions: "toggle_label" or "do_nothing".
[widget.callbacks]
on_left = "toggle_label"
on_middle = "do_nothing"
on_right = "toggle_label"

[icon]
# Show the focused window's icon before the label.
enabled = true
# Number of windows whose icons are kept in memory.
cache_capacity = 64

[appearance]
# Monitor index the widget is placed on (0 = primary).
monitor = 0
# Offset in pixels from the monitor work area's top-left corner.
x = 8
y = 0
width = 480
height = 28
font = "Segoe UI"
font_size = 14
foreground = "#cdd6f4"
background = "#1e1e2e"
# Background opacity in percent (0 = transparent, 100 = opaque).
background_opacity = 90

[log]
# Enable file logging to ~/.config/winlabel/logs/.
enabled = false
# Minimum log level: "trace", "debug", "info", "warn", or "error".
level = "info"
# Number of daily log files to keep.
max_files = 5
"##
    .to_string()
}
