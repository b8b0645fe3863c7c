//! Cappy CLI: headless tools around the view engine.
//!
//! Usage:
//!   cappy replay <SCRIPT>        Replay a JSONL input script against a synthetic capture
//!   cappy config init|show|path  Manage the configuration file
//!   cappy classify               Report which crop handle a point hits

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "cappy",
    about = "Screen capture viewer with zoom, color picking, and cropping",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay an input script and report the final view state
    Replay {
        /// Path to the JSONL event script
        script: PathBuf,

        /// Synthetic capture width
        #[arg(long, default_value = "1920")]
        width: u32,

        /// Synthetic capture height
        #[arg(long, default_value = "1080")]
        height: u32,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Config file to use instead of the standard location
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Classify a screen point against a selection rectangle
    Classify {
        /// Rectangle corners: X1 Y1 X2 Y2
        #[arg(long, num_args = 4, value_names = ["X1", "Y1", "X2", "Y2"], allow_negative_numbers = true)]
        rect: Vec<f64>,

        /// Point: X Y
        #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
        point: Vec<f64>,

        /// Corner handle size in screen pixels
        #[arg(long, default_value = "15")]
        handle_size: f64,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Write the default config to the standard location
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective config
    Show,
    /// Print the standard config path
    Path,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    cappy_common::logging::init_logging(&cappy_common::config::LoggingConfig {
        level: log_level.to_string(),
        json: false,
        file: None,
    })?;

    match cli.command {
        Commands::Replay {
            script,
            width,
            height,
            json,
            config,
        } => commands::replay::run(script, width, height, json, config),
        Commands::Config { action } => commands::config::run(action),
        Commands::Classify {
            rect,
            point,
            handle_size,
        } => commands::classify::run(&rect, &point, handle_size),
    }
}
