/// Prints focus and title events with the window's title until Ctrl+C.
#[cfg(windows)]
pub fn execute() {
    use std::sync::mpsc;

    use winlabel_core::InfoResolver;
    use winlabel_windows::{Win32Resolver, ctrl_c, event_loop};

    println!("Watching window events (press Ctrl+C to stop)...\n");

    let (tx, rx) = mpsc::channel();
    let event_loop = match event_loop::start(tx) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Failed to start event loop: {e}");
            std::process::exit(1);
        }
    };

    // Ctrl+C ends the hook thread, which closes the channel.
    if let Err(e) = ctrl_c::set_handler(event_loop.thread_id()) {
        eprintln!("Warning: {e}");
    }

    for event in rx {
        let title = event
            .hwnd()
            .and_then(|hwnd| Win32Resolver.resolve(hwnd).ok())
            .map(|info| info.title)
            .unwrap_or_default();
        println!("{event} \"{title}\"");
    }

    event_loop.stop();
}

#[cfg(not(windows))]
pub fn execute() {
    crate::commands::unsupported("debug events");
}
