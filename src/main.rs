use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use gearstash::cli::args::Cli;
use gearstash::cli::commands;
use gearstash::config::{Config, Paths};
use gearstash::error::GearError;
use gearstash::{logging, GearStore};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        let code = e.downcast_ref::<GearError>().map_or(1, GearError::exit_code);
        std::process::exit(code);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let paths = Paths::new()?;
    paths
        .ensure_dirs()
        .with_context(|| format!("preparing data directory {}", paths.root.display()))?;

    let config = Config::load_from_path(&paths.config_file)?.with_endpoint(cli.sync_url);

    let mut store = GearStore::from_config(&paths, &config);
    store.initialize();

    let output = commands::dispatch(&mut store, &paths, cli.command, cli.output)?;

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
