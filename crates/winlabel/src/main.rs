mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "winlabel",
    version,
    about = "A taskbar widget showing the title and icon of the focused window"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the default configuration file
    Init,
    /// Show the widget until Ctrl+C is pressed
    Run,
    /// Check the configuration and environment
    Doctor,
    /// Debugging and inspection tools
    Debug {
        #[command(subcommand)]
        command: DebugCommands,
    },
}

#[derive(Subcommand)]
enum DebugCommands {
    /// Watch focus and title events in real time
    Events,
    /// Show what the widget would display for a window
    Window {
        /// Window handle (decimal or hex with 0x prefix)
        hwnd: String,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Run => commands::run::execute(),
        Commands::Doctor => commands::doctor::execute(),
        Commands::Debug { command } => match command {
            DebugCommands::Events => commands::debug::events::execute(),
            DebugCommands::Window { hwnd } => commands::debug::window::execute(&hwnd),
        },
    }
}
