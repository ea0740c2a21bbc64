//! Label templates with `{win[...]}` placeholders.
//!
//! A template is literal text with placeholders such as `{win[title]}`
//! or `{win[process][name]}`. `{{` and `}}` produce literal braces.
//! A placeholder may end in `!s` and a format spec such as `:>8` or
//! `:.30`, which pads or cuts the value.

use crate::window::WindowInfo;
use crate::{Error, Result};

/// Expands `template` against the given window.
///
/// Fails on unbalanced braces, unknown fields, or a placeholder when
/// there is no window. Callers fall back to showing `template` as-is.
pub fn format_label(template: &str, info: Option<&WindowInfo>) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '}' => return Err(Error::format(template, "single '}' encountered")),
            '{' => {
                let mut field = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some('{') | None => {
                            return Err(Error::format(template, "unclosed placeholder"));
                        }
                        Some(ch) => field.push(ch),
                    }
                }
                let info = info.ok_or_else(|| Error::format(template, "no window"))?;
                out.push_str(&expand(template, &field, info)?);
            }
            _ => out.push(c),
        }
    }
    Ok(out)
}

/// A field value before formatting. Numbers align right by default and
/// reject a precision.
enum Value {
    Text(String),
    Number(String),
}

/// Expands one placeholder body such as `win[title]!s:>8.20`.
fn expand(template: &str, body: &str, info: &WindowInfo) -> Result<String> {
    let (field, conversion, spec) = split_field(body);
    let mut value = lookup(template, field, info)?;
    match conversion {
        None => {}
        Some("s") => {
            if let Value::Number(n) = value {
                value = Value::Text(n);
            }
        }
        Some(other) => {
            return Err(Error::format(template, format!("unsupported conversion !{other}")));
        }
    }
    let spec = FormatSpec::parse(spec)
        .ok_or_else(|| Error::format(template, format!("bad format spec {spec:?}")))?;
    spec.apply(value)
        .ok_or_else(|| Error::format(template, "precision not allowed for numbers"))
}

/// Splits a placeholder body into field, conversion and format spec.
///
/// `:` and `!` inside brackets belong to the key.
fn split_field(body: &str) -> (&str, Option<&str>, &str) {
    let mut depth = 0usize;
    for (i, c) in body.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            ':' if depth == 0 => return (&body[..i], None, &body[i + 1..]),
            '!' if depth == 0 => {
                let rest = &body[i + 1..];
                return match rest.split_once(':') {
                    Some((conversion, spec)) => (&body[..i], Some(conversion), spec),
                    None => (&body[..i], Some(rest), ""),
                };
            }
            _ => {}
        }
    }
    (body, None, "")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
    Center,
}

/// The subset `[[fill]align][width][.precision][type]` of the Python
/// format mini-language, with type `s` or `d`.
#[derive(Debug, Default, PartialEq, Eq)]
struct FormatSpec {
    fill: Option<char>,
    align: Option<Align>,
    width: usize,
    precision: Option<usize>,
}

impl FormatSpec {
    fn parse(spec: &str) -> Option<Self> {
        let align_of = |c: char| match c {
            '<' => Some(Align::Left),
            '>' => Some(Align::Right),
            '^' => Some(Align::Center),
            _ => None,
        };

        let mut out = Self::default();
        let chars: Vec<char> = spec.chars().collect();
        let mut i = 0;
        if let Some(align) = chars.get(1).copied().and_then(align_of) {
            out.fill = Some(chars[0]);
            out.align = Some(align);
            i = 2;
        } else if let Some(align) = chars.first().copied().and_then(align_of) {
            out.align = Some(align);
            i = 1;
        }

        let digits = |i: &mut usize| {
            let start = *i;
            while chars.get(*i).is_some_and(char::is_ascii_digit) {
                *i += 1;
            }
            chars[start..*i].iter().collect::<String>()
        };

        let width = digits(&mut i);
        if !width.is_empty() {
            out.width = width.parse().ok()?;
        }
        if chars.get(i) == Some(&'.') {
            i += 1;
            out.precision = Some(digits(&mut i).parse().ok()?);
        }
        match chars.get(i).copied() {
            None => {}
            Some('s' | 'd') if i + 1 == chars.len() => {}
            Some(_) => return None,
        }
        Some(out)
    }

    /// Returns `None` when a precision is applied to a number.
    fn apply(&self, value: Value) -> Option<String> {
        let (text, default_align) = match value {
            Value::Text(text) => match self.precision {
                Some(p) => (text.chars().take(p).collect(), Align::Left),
                None => (text, Align::Left),
            },
            Value::Number(_) if self.precision.is_some() => return None,
            Value::Number(n) => (n, Align::Right),
        };

        let pad = self.width.saturating_sub(text.chars().count());
        if pad == 0 {
            return Some(text);
        }
        let fill = self.fill.unwrap_or(' ');
        let repeat = |n: usize| std::iter::repeat_n(fill, n).collect::<String>();
        let (left, right) = match self.align.unwrap_or(default_align) {
            Align::Left => (0, pad),
            Align::Right => (pad, 0),
            Align::Center => (pad / 2, pad - pad / 2),
        };
        Some(format!("{}{text}{}", repeat(left), repeat(right)))
    }
}

/// Resolves a field such as `win[process][name]`.
fn lookup(template: &str, field: &str, info: &WindowInfo) -> Result<Value> {
    let path = parse_path(field)
        .ok_or_else(|| Error::format(template, format!("bad field {field:?}")))?;

    let value = match path.as_slice() {
        ["title"] => Value::Text(info.title.clone()),
        ["class_name"] => Value::Text(info.class_name.clone()),
        ["hwnd"] => Value::Number(info.hwnd.to_string()),
        ["monitor_hwnd"] => Value::Number(info.monitor_hwnd.to_string()),
        ["monitor_device_name"] | ["monitor_info", "device"] => {
            Value::Text(info.monitor_device_name.clone())
        }
        ["process", "name"] => Value::Text(info.process.name.clone()),
        ["process", "pid"] => Value::Number(info.process.pid.to_string()),
        ["package", "full_name"] => Value::Text(
            info.package
                .as_ref()
                .map(|p| p.full_name.clone())
                .unwrap_or_default(),
        ),
        _ => return Err(Error::format(template, format!("unknown field {field:?}"))),
    };
    Ok(value)
}

/// Splits `win[a][b]` into `["a", "b"]`. Returns `None` if the body is
/// not `win` followed by at least one bracketed key.
fn parse_path(field: &str) -> Option<Vec<&str>> {
    let mut rest = field.trim().strip_prefix("win")?;
    let mut keys = Vec::new();
    while !rest.is_empty() {
        let inner = rest.strip_prefix('[')?;
        let end = inner.find(']')?;
        keys.push(inner[..end].trim_matches(['\'', '"']));
        rest = &inner[end + 1..];
    }
    if keys.is_empty() { None } else { Some(keys) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::{PackageInfo, ProcessInfo};

    fn info() -> WindowInfo {
        WindowInfo {
            hwnd: 1234,
            title: "Inbox - Outlook".into(),
            class_name: "rctrl_renwnd32".into(),
            process: ProcessInfo {
                pid: 99,
                name: "OUTLOOK.EXE".into(),
            },
            monitor_hwnd: 65537,
            monitor_device_name: r"\\.\DISPLAY2".into(),
            package: None,
        }
    }

    #[test]
    fn expands_title() {
        assert_eq!(
            format_label("{win[title]}", Some(&info())).unwrap(),
            "Inbox - Outlook"
        );
    }

    #[test]
    fn expands_nested_fields_and_literal_text() {
        // Arrange
        let template = "[{win[class_name]}] {win[process][name]} ({win[process][pid]}) #{win[hwnd]}";

        // Act
        let out = format_label(template, Some(&info())).unwrap();

        // Assert
        assert_eq!(out, "[rctrl_renwnd32] OUTLOOK.EXE (99) #1234");
    }

    #[test]
    fn accepts_quoted_keys() {
        assert_eq!(
            format_label("{win['title']}", Some(&info())).unwrap(),
            "Inbox - Outlook"
        );
    }

    #[test]
    fn expands_monitor_fields() {
        let out = format_label(
            "{win[monitor_hwnd]} {win[monitor_info][device]}",
            Some(&info()),
        )
        .unwrap();
        assert_eq!(out, r"65537 \\.\DISPLAY2");
    }

    #[test]
    fn package_name_is_empty_for_unpackaged_windows() {
        // Arrange
        let mut packaged = info();
        packaged.package = Some(PackageInfo {
            full_name: "Microsoft.WindowsCalculator_11.2_x64__8wekyb3d8bbwe".into(),
            install_dir: "C:/Program Files/WindowsApps/calc".into(),
        });

        // Act / Assert
        assert_eq!(
            format_label("{win[package][full_name]}", Some(&info())).unwrap(),
            ""
        );
        assert!(
            format_label("{win[package][full_name]}", Some(&packaged))
                .unwrap()
                .starts_with("Microsoft.WindowsCalculator")
        );
    }

    #[test]
    fn doubled_braces_are_literal() {
        assert_eq!(
            format_label("{{{win[title]}}}", Some(&info())).unwrap(),
            "{Inbox - Outlook}"
        );
    }

    #[test]
    fn plain_text_formats_without_a_window() {
        assert_eq!(format_label("No window", None).unwrap(), "No window");
    }

    #[test]
    fn placeholder_without_window_fails() {
        assert!(matches!(
            format_label("{win[title]}", None),
            Err(Error::Format { .. })
        ));
    }

    #[test]
    fn width_and_alignment_pad_the_value() {
        // Arrange
        let info = info();

        // Act
        let right = format_label("[{win[process][name]:>13}]", Some(&info)).unwrap();
        let center = format_label("[{win[process][name]:*^15}]", Some(&info)).unwrap();
        let left = format_label("[{win[process][pid]:<4}]", Some(&info)).unwrap();

        // Assert
        assert_eq!(right, "[  OUTLOOK.EXE]");
        assert_eq!(center, "[**OUTLOOK.EXE**]");
        assert_eq!(left, "[99  ]");
    }

    #[test]
    fn numbers_align_right_by_default() {
        assert_eq!(
            format_label("{win[process][pid]:5}|", Some(&info())).unwrap(),
            "   99|"
        );
    }

    #[test]
    fn precision_cuts_text_to_characters() {
        assert_eq!(
            format_label("{win[title]:.5}", Some(&info())).unwrap(),
            "Inbox"
        );
        assert_eq!(
            format_label("{win[title]:>8.3}|", Some(&info())).unwrap(),
            "     Inb|"
        );
    }

    #[test]
    fn string_conversion_is_accepted() {
        // Arrange
        let info = info();

        // Act
        let title = format_label("{win[title]!s}", Some(&info)).unwrap();
        let pid = format_label("{win[process][pid]!s:.1}", Some(&info)).unwrap();

        // Assert
        assert_eq!(title, "Inbox - Outlook");
        assert_eq!(pid, "9");
    }

    #[test]
    fn unsupported_specs_fail() {
        let info = info();
        for template in [
            "{win[title]:x}",
            "{win[title]!a}",
            "{win[process][pid]:.2}",
            "{win[title]:>8.}",
        ] {
            assert!(
                format_label(template, Some(&info)).is_err(),
                "{template:?} should fail"
            );
        }
    }

    #[test]
    fn colon_inside_brackets_is_part_of_the_key() {
        assert!(matches!(
            format_label("{win[a:b]}", Some(&info())),
            Err(Error::Format { reason, .. }) if reason.contains("a:b")
        ));
    }

    #[test]
    fn malformed_templates_fail() {
        let info = info();
        for template in ["{win[title]", "title}", "{win[nope]}", "{title}", "{win}", "{}"] {
            assert!(
                format_label(template, Some(&info)).is_err(),
                "{template:?} should fail"
            );
        }
    }
}
