use winlabel_core::config;

/// ANSI escape helpers for doctor output.
const OK: &str = "\x1b[32m[ok]\x1b[0m";
const WARN: &str = "\x1b[33m[warn]\x1b[0m";
const FAIL: &str = "\x1b[31m[fail]\x1b[0m";

pub fn execute() {
    println!();
    check_config_dir();
    let config = check_config_file();
    check_log_dir(&config);
    check_monitors(&config);
    println!();
}

fn check_config_dir() {
    match config::config_dir() {
        Some(dir) if dir.is_dir() => {
            println!("  {OK} Config directory exists ({})", dir.display());
        }
        Some(dir) => {
            println!(
                "  {WARN} Config directory missing ({}), run `winlabel init`",
                dir.display()
            );
        }
        None => println!("  {FAIL} Could not determine home directory"),
    }
}

/// Validates `config.toml` and returns the config the widget would use.
fn check_config_file() -> config::Config {
    let Some(path) = config::config_path() else {
        println!("  {FAIL} Could not determine config path");
        return config::Config::default();
    };
    if !path.exists() {
        println!("  {WARN} config.toml not found (using defaults)");
        return config::Config::default();
    }
    match config::try_load() {
        Ok((config, warnings)) if warnings.is_empty() => {
            println!("  {OK} config.toml is valid");
            config
        }
        Ok((config, warnings)) => {
            for w in warnings {
                println!("  {WARN} config.toml: {w}");
            }
            config
        }
        Err(e) => {
            println!("  {FAIL} {e}");
            config::Config::default()
        }
    }
}

fn check_log_dir(config: &config::Config) {
    if !config.log.enabled {
        println!("  {OK} File logging disabled (logs go to stderr)");
        return;
    }
    match config::config_dir().map(|d| d.join("logs")) {
        Some(dir) => println!("  {OK} Logging to {}", dir.display()),
        None => println!("  {FAIL} Log directory unavailable, falling back to stderr"),
    }
}

#[cfg(windows)]
fn check_monitors(config: &config::Config) {
    let monitors = winlabel_windows::monitor::enumerate();
    if monitors.is_empty() {
        println!("  {FAIL} No monitors detected");
        return;
    }
    println!("  {OK} {} monitor(s) detected", monitors.len());
    for (i, m) in monitors.iter().enumerate() {
        let (x, y, w, h) = m.work_area;
        println!("       Monitor {i}: {} {w}x{h} at ({x}, {y})", m.device_name);
    }
    if config.appearance.monitor >= monitors.len() {
        println!(
            "  {WARN} appearance.monitor = {} does not exist, the primary monitor is used",
            config.appearance.monitor
        );
    }
}

#[cfg(not(windows))]
fn check_monitors(_config: &config::Config) {
    println!("  {WARN} Monitor checks are only available on Windows");
}
