//! unnoise CLI
//!
//! Reverts whitespace and comment noise in working-copy files against
//! their committed versions.

mod cli;
mod error;
mod logging;
mod output;

use clap::Parser;
use colored::Colorize;
use unnoise_core::{CleanOptions, Cleaner};
use unnoise_fs::NormalizedPath;

use cli::Cli;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let cwd = std::env::current_dir()?;
    let options = CleanOptions {
        dry_run: cli.dry_run,
        revision: cli.rev,
        exclude_dirs: cli.exclude,
        config_path: cli.config.map(NormalizedPath::new),
    };

    let cleaner = Cleaner::open(&NormalizedPath::new(&cwd), options)?;
    let paths: Vec<NormalizedPath> = cli.paths.iter().map(NormalizedPath::new).collect();
    let report = cleaner.process_paths(&paths);

    if cli.json {
        output::print_json(&report)?;
    } else {
        output::print_human(&report);
    }
    Ok(())
}
