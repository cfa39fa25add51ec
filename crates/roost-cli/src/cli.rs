use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI parser for the `roost` binary.
#[derive(Debug, Parser)]
#[command(name = "roost", version, about = "roost - file-backed record console")]
pub struct Cli {
    /// Store file path (overrides config)
    #[arg(short, long)]
    pub store: Option<PathBuf>,

    /// Execute a single command line and exit
    #[arg(short, long)]
    pub command: Option<String>,

    /// Quiet mode (errors only in the log)
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long)]
    pub verbose: bool,
}
