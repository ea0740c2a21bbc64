use winlabel_core::{config, log};

/// Loads the config, sets up logging and runs the widget.
pub fn execute() {
    let config = config::load();
    log::init(&config.log);

    #[cfg(windows)]
    {
        tracing::info!("starting winlabel {}", env!("CARGO_PKG_VERSION"));
        if let Err(e) = winlabel_windows::app::run(&config) {
            tracing::error!("{e}");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }

    #[cfg(not(windows))]
    {
        let _ = config;
        super::unsupported("run");
    }
}
