// this_file: crates/ogw-cli/src/main.rs

//! OGW CLI: render JSON scene files to PNG, JPEG or raw RGBA.

mod cli;
mod commands;
mod scene;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.command {
        Commands::Info => commands::info::run(),
        Commands::Render(args) => commands::render::run(&args),
    }
}

fn init_logger(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}
