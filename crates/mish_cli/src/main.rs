use anyhow::Context;
use clap::Parser;
use mish_core::{logging, mish_log_info, startup, Shell, ShellConfig, ShellState};
use std::io;
use std::path::PathBuf;

/// A small interactive shell with background jobs and foreground-only mode.
#[derive(Parser, Debug)]
#[command(author, version, about = "mish command-line shell", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults apply when omitted.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Diagnostic log filter, e.g. `debug` or `mish_core=trace`.
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ShellConfig::load(path)?,
        None => ShellConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    logging::init(&config.logging)?;
    startup::install_signal_dispositions().context("installing signal handlers")?;

    let state = ShellState::new(&config)?;
    mish_log_info!(config = ?cli.config, jobs = config.max_background_jobs, "shell started");

    let mut shell = Shell::new(state);
    shell.run(io::stdin().lock())?;
    Ok(())
}
