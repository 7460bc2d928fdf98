use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "meditime", version, about = "Meditime CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run meditation sessions
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Meditation statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Month view of meditated days
    Calendar {
        /// Year to display (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,
        /// Month to display, 1-12 (defaults to the current month)
        #[arg(long)]
        month: Option<u32>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Theme preference
    Theme {
        #[command(subcommand)]
        action: commands::theme::ThemeAction,
    },
    /// Clear all history, settings, and theme preference
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Calendar { year, month } => commands::calendar::run(year, month),
        Commands::Config { action } => commands::config::run(action),
        Commands::Theme { action } => commands::theme::run(action),
        Commands::Reset { yes } => commands::reset::run(yes),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
