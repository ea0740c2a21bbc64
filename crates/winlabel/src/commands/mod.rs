pub mod debug;
pub mod doctor;
pub mod init;
pub mod run;

/// Exits with an error on platforms without a widget implementation.
#[cfg(not(windows))]
pub fn unsupported(command: &str) -> ! {
    eprintln!("Error: `winlabel {command}` is only supported on Windows.");
    std::process::exit(1);
}
