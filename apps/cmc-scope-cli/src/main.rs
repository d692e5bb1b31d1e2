#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use anyhow::Result;
use clap::Parser;
use tracing::debug;

mod cli;
mod commands;
mod config;
mod logging;

use cli::Cli;
use config::AppConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    logging::init(&config.logging)?;

    let catalog = config.catalog.build();
    debug!(
        districts = catalog.len(),
        builtin = config.catalog.builtin,
        "district catalog ready"
    );

    let output = commands::run(&cli.command, &catalog)?;
    println!("{output}");
    Ok(())
}
