use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use playtime::core::config::Config;
use playtime::core::launcher;
use playtime::ledger::Segment;
use playtime::utils::logger;

#[derive(Parser)]
#[command(author, version, about = "Sideline playing-time tracker", long_about = None)]
struct Cli {
    /// Config file (defaults to ./playtime.config, then the user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Track a live game on the terminal board (default)
    Run {
        /// Display refresh interval while the clock runs
        #[arg(short, long)]
        tick_ms: Option<u64>,
        /// Write the final snapshot as JSON when the board closes
        #[arg(short, long)]
        export: Option<PathBuf>,
    },
    /// Replay a scripted event list and print the result
    Replay {
        script: PathBuf,
        /// Print every display update
        #[arg(short, long, default_value_t = false)]
        trace: bool,
        /// Print the final snapshot as JSON
        #[arg(short, long, default_value_t = false)]
        json: bool,
    },
    /// List the segment labels in game order
    Segments,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Run {
        tick_ms: None,
        export: None,
    }) {
        Commands::Run { tick_ms, export } => {
            let mut config = prepare(cli.config.as_deref())?;
            if let Some(ms) = tick_ms {
                config.override_tick_ms(ms)?;
            }
            launcher::run(&config, export.as_deref())?;
        }
        Commands::Replay {
            script,
            trace,
            json,
        } => {
            let config = prepare(cli.config.as_deref())?;
            launcher::run_replay(&config, &script, trace, json)?;
        }
        Commands::Segments => {
            for segment in Segment::ALL {
                println!("{}", segment);
            }
        }
    }

    Ok(())
}

/// Logger, terminal reset and config for the commands that track a game.
fn prepare(config_path: Option<&Path>) -> Result<Config> {
    // 1. Initialize Logger (playtime-debug.log / playtime-error.log)
    let log_dir = std::env::current_dir().unwrap_or_default();
    logger::init(&log_dir);

    // 2. Reset Terminal State left behind by a previous crash
    let _ = crossterm::terminal::disable_raw_mode();
    let _ = crossterm::execute!(std::io::stderr(), crossterm::terminal::LeaveAlternateScreen);

    match config_path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}
