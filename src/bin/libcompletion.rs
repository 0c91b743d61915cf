//! libcompletion - Prefix and fuzzy word completion over text files
//!
//! Set `RUST_LOG=libcompletion=debug` to see rebuild and search diagnostics.

use clap::Parser;
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use libcompletion::cli::commands;
use libcompletion::cli::Cli;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = commands::execute(cli.command, cli.config.as_deref()) {
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        process::exit(1);
    }
}
