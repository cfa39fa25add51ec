//! `roost` — an interactive console over a JSON-file record store.

use std::io::Write;

use anyhow::Context;
use clap::Parser;

use roost_store::FileRegistry;

mod cli;
mod command;
mod config;
mod dispatch;
mod parser;
mod repl;
mod tokenizer;

fn main() {
    if let Err(error) = run() {
        eprintln!("roost error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = config::RoostConfig::load_with_dotenv()?;
    let store_path = cli.store.unwrap_or(config.store.path);

    let mut registry = FileRegistry::new(store_path);
    registry
        .reload()
        .context("failed to load the store file")?;

    let stdout = std::io::stdout();

    if let Some(line) = cli.command {
        let mut out = stdout.lock();
        repl::eval_line(&mut registry, &line, &mut out)?;
        out.flush()?;
        return Ok(());
    }

    let stdin = std::io::stdin();
    repl::run(
        &mut registry,
        &config.repl.prompt,
        stdin.lock(),
        stdout.lock(),
    )
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("ROOST_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
