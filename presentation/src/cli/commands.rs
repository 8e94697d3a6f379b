//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for vox-pilot
#[derive(Parser, Debug)]
#[command(name = "vox-pilot")]
#[command(author, version, about = "VoxPilot - conversational core of the AI voice assistant")]
#[command(long_about = r#"
VoxPilot serializes conversational requests into a single-flight queue and
answers them through a prioritized chain of backends, falling back to the
alternates when the preferred one fails.

With a question argument it answers once and exits; without one it starts
an interactive session where each typed line is handled like recognized
speech.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./vox-pilot.toml    Project-level config
3. ~/.config/vox-pilot/config.toml   Global config

Example:
  vox-pilot "What's the weather like on Mars?"
  vox-pilot --provider gemini
  vox-pilot --quiet "Summarize my last note"
"#)]
pub struct Cli {
    /// One-shot question; omit to start the interactive session
    pub question: Option<String>,

    /// Preferred answer backend (claude, chatgpt, gemini)
    #[arg(short, long, value_name = "PROVIDER")]
    pub provider: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress spoken-line output
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
