mod cli;
mod config;
mod current_cmd;
mod logging;
mod tree_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Tree(args) => tree_cmd::run(args),
        Command::Current(args) => current_cmd::run(args),
    }
}
