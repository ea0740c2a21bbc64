use super::parse_hwnd;

/// Resolves one window and prints what the widget would make of it.
pub fn execute(raw: &str) {
    let Some(hwnd) = parse_hwnd(raw) else {
        eprintln!("Error: invalid window handle {raw:?}");
        std::process::exit(1);
    };
    inspect(hwnd);
}

#[cfg(windows)]
fn inspect(hwnd: usize) {
    use winlabel_core::display::DisplayState;
    use winlabel_core::filter::should_display;
    use winlabel_core::{IconSource, InfoResolver, config};
    use winlabel_windows::{Win32IconSource, Win32Resolver, monitor};

    let config = config::load();

    let info = match Win32Resolver.resolve(hwnd) {
        Ok(info) => info,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&info) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Error: could not serialize window info: {e}"),
    }

    let widget_monitor = monitor::enumerate()
        .into_iter()
        .nth(config.appearance.monitor)
        .map(|m| m.handle)
        .unwrap_or(info.monitor_hwnd);
    let visibility = should_display(
        Some(&info),
        &config.widget.ignore_rules(),
        config.widget.monitor_exclusive,
        widget_monitor,
    );
    println!("\nVisibility: {visibility:?}");

    let state = DisplayState {
        last: Some(info),
        ..Default::default()
    };
    println!("Label:      {}", state.render(&config.widget));

    match Win32IconSource.load(hwnd) {
        Ok(icon) => println!("Icon:       {}x{}", icon.width(), icon.height()),
        Err(e) => println!("Icon:       none ({e})"),
    }
}

#[cfg(not(windows))]
fn inspect(_hwnd: usize) {
    crate::commands::unsupported("debug window");
}
