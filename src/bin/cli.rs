// src/bin/cli.rs
use catalog_sync::cli::{self, Cli};
use clap::Parser;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    cli::run(Cli::parse())
}
